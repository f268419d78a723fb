//! # orgdesk
//!
//! Interactive shell for the OrgDesk client.  Reads one command per line
//! from stdin, prints the queued notifications and re-renders the active
//! view after each one.

mod shell;

use std::io::{self, BufRead, Write};

use tracing::info;

use orgdesk_client::config::ClientConfig;
use orgdesk_client::state::AppState;
use orgdesk_client::views::ActiveView;

use crate::shell::Line;

fn flush_notifications(state: &mut AppState) {
    for n in state.drain_notifications() {
        println!("{}", shell::render_notification(&n));
    }
}

fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    orgdesk_client::init_tracing();

    // -----------------------------------------------------------------------
    // 2. Load configuration and boot the client
    // -----------------------------------------------------------------------
    let config = ClientConfig::from_env();
    info!(?config, "Loaded configuration");

    let (mut state, mut view): (AppState, ActiveView) = orgdesk_client::boot(&config)?;
    flush_notifications(&mut state);
    print!("{}", shell::render_view(&view));

    // -----------------------------------------------------------------------
    // 3. Command loop
    // -----------------------------------------------------------------------
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}> ", state.location());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parsed = match shell::parse(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            }
        };

        match parsed {
            Line::Quit => break,
            Line::Help => {
                println!("{}", shell::HELP);
                continue;
            }
            Line::Json => {
                println!("{}", serde_json::to_string_pretty(&view)?);
                continue;
            }
            Line::Goto(location) => view = state.navigate(&location),
            Line::Command { words, fields } => {
                if let Err(e) = shell::execute(&mut state, &words, fields) {
                    eprintln!("error: {e:#}");
                }
                view = state.refresh();
            }
        }

        flush_notifications(&mut state);
        print!("{}", shell::render_view(&view));
    }

    info!("Shutting down");
    Ok(())
}
