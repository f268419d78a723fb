pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod router;
pub mod session;
pub mod state;
pub mod views;

use tracing_subscriber::{fmt, EnvFilter};

use orgdesk_shared::constants::APP_NAME;
use orgdesk_store::EntityStore;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::state::AppState;
use crate::views::ActiveView;

/// Install the global tracing subscriber.  `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("orgdesk=debug,orgdesk_client=debug,orgdesk_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Open storage, load the dataset, restore the session and route the
/// configured start location.
pub fn boot(config: &ClientConfig) -> ClientResult<(AppState, ActiveView)> {
    tracing::info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let persistence = config.open_persistence()?;
    let store = EntityStore::open(persistence);
    let (state, view) = AppState::start(store, &config.start_location);

    tracing::info!(location = state.location(), "client ready");
    Ok((state, view))
}
