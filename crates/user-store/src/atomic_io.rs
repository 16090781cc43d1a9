//! Atomic table replacement.
//!
//! A rewrite goes to a hidden temporary file beside the table, is synced,
//! and is then renamed over the table. Readers therefore see either the old
//! table or the new one, never a truncated mix.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

use crate::error::StoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` inside `dir` with `contents`.
///
/// `dir_path` is only used to report failures.
///
/// # Errors
///
/// Returns [`StoreError::Storage`] if the temporary file cannot be written
/// or renamed. The previous table is left in place in either case.
pub(crate) fn write_atomic(
    dir: &Dir,
    dir_path: &Path,
    file_name: &str,
    contents: &str,
) -> Result<(), StoreError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    write_to_temp_file(dir, &tmp_name, contents)
        .map_err(|error| StoreError::storage(dir_path.join(&tmp_name), &error))?;
    rename_temp_to_target(dir, &tmp_name, file_name)
        .map_err(|error| StoreError::storage(dir_path.join(file_name), &error))?;
    sync_parent_directory(dir);

    Ok(())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(error) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(error);
    }
    Ok(())
}

fn rename_temp_to_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    rename_temp_to_target_impl(dir, tmp_name, target_name).inspect_err(|_| {
        drop(dir.remove_file(tmp_name));
    })
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_parent_directory(parent: &Dir) {
    if parent.open(".").and_then(|dir| dir.sync_all()).is_err() {
        // Best effort only.
    }
}
