//! User registry handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users {"name":"Ann Lee","email":"ann@x.com","mobile":"555-123-4567","age":40,"address":"10 Oak Street"}
//! PUT    /api/users/{id} {"age":41}
//! DELETE /api/users/{id}
//! GET    /api/users/stats/summary
//! ```
//!
//! Handlers only translate between JSON and the [`UserDirectory`] port; the
//! store owns validation and persistence.
//!
//! [`UserDirectory`]: crate::domain::ports::UserDirectory

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::payload::UserPayload;
use crate::inbound::http::schemas::{
    ErrorSchema, MessageResponse, UserListResponse, UserResponse, UserStatsResponse,
};
use crate::inbound::http::state::HttpState;

/// Register the user routes on a scope.
///
/// `/users/stats/summary` is registered before `/users/{id}` so the literal
/// path wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_stats)
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users in stored order", body = UserListResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(Envelope::list(users)))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state.users.get_user(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(user)))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner().into()).await?;
    info!(user_id = %user.id, "user created");
    Ok(HttpResponse::Created().json(Envelope::with_message("User created successfully", user)))
}

/// Change some fields of an existing user.
///
/// Absent and `null` fields are left untouched.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .update_user(&id, payload.into_inner().into())
        .await?;
    info!(user_id = %user.id, "user updated");
    Ok(HttpResponse::Ok().json(Envelope::with_message("User updated successfully", user)))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(&id).await?;
    info!(user_id = %id, "user deleted");
    Ok(HttpResponse::Ok().json(Envelope::message("User deleted successfully")))
}

/// Aggregate age statistics over every stored user.
#[utoipa::path(
    get,
    path = "/api/users/stats/summary",
    responses(
        (status = 200, description = "Statistics", body = UserStatsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userStats"
)]
#[get("/users/stats/summary")]
pub async fn user_stats(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let stats = state.users.user_stats().await?;
    Ok(HttpResponse::Ok().json(Envelope::data(stats)))
}
