//! Registry entry-point: loads settings, prepares the user table and serves
//! the REST endpoints.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use user_store::{Initialization, UserStore};

use user_registry::inbound::http::health::HealthState;
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::persistence::CsvUserDirectory;
use user_registry::server::{AppDependencies, RegistrySettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RegistrySettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("load configuration: {error}"))?;

    let store = UserStore::new(settings.store_config());
    let (store, initialization) = web::block(move || {
        store
            .ensure_initialized()
            .map(|initialization| (store, initialization))
    })
    .await
    .map_err(|error| eyre!("user table initialisation task failed: {error}"))?
    .wrap_err("initialise user table")?;
    if initialization == Initialization::Existing {
        info!(path = %store.path().display(), "using existing user table");
    }

    let bind_addr = settings.bind_addr();
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::new(Arc::new(CsvUserDirectory::new(store)))),
    };
    let server = create_server(deps, bind_addr).wrap_err_with(|| format!("bind {bind_addr}"))?;
    info!(%bind_addr, "user registry listening");
    server.await.wrap_err("HTTP server failed")
}
