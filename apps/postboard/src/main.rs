//! # Postboard
//!
//! Runs the post manager against a file-backed store and a headless surface.
//! Events are read from stdin as JSON lines; after every handled command a
//! snapshot of the visible view is written to stdout as one JSON line.

use std::io::Write;
use std::sync::Arc;

use postboard_core::{PostStore, ViewController};
use postboard_infra::{EventLoop, FsImageReader, HeadlessSurface};

mod config;
mod input;
mod telemetry;

use config::AppConfig;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!(storage = ?config.storage, "Starting Postboard");

    let store = PostStore::new(config.open_storage());
    let controller = ViewController::new(store, HeadlessSurface::new(), config.controller.clone());

    let reader = FsImageReader::new();
    let (mut event_loop, sender) = EventLoop::new(controller, Arc::new(reader.clone()));
    event_loop.start();
    print_snapshot("start", event_loop.controller())?;

    tokio::spawn(input::read_commands(sender, reader));

    event_loop
        .run(|name, controller| {
            if let Err(e) = print_snapshot(name, controller) {
                tracing::error!(error = %e, "Failed to write snapshot");
            }
        })
        .await;

    Ok(())
}

fn print_snapshot(after: &str, controller: &ViewController<HeadlessSurface>) -> anyhow::Result<()> {
    let line = serde_json::json!({
        "after": after,
        "snapshot": controller.surface().snapshot(),
    });

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &line)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
