//! Schema setup for the `kv` snapshot store.
//!
//! The schema is a single key-value table; everything structured lives in
//! the JSON values.  [`MIGRATIONS`] lists each step with the
//! `user_version` it leaves behind, and opening a [`Database`](crate::Database)
//! applies whichever steps the file has not seen yet.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

type Step = fn(&Connection) -> std::result::Result<(), rusqlite::Error>;

/// `(user_version after the step, name, step)`, in order.
const MIGRATIONS: &[(u32, &str, Step)] = &[(1, "v001_initial", v001_initial::up)];

/// Schema version of a fully migrated file.
const CURRENT_VERSION: u32 = 1;

/// Bring `conn` up to [`CURRENT_VERSION`].
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    for &(version, name, step) in MIGRATIONS.iter().filter(|(v, _, _)| *v > found) {
        tracing::info!(from = found, to = version, migration = name, "upgrading kv schema");
        step(conn).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}
