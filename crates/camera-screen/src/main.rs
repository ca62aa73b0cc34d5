//! Camera-Screen: camera screen with photo capture, timed video recording
//! and a photo roll, driven from the terminal.

mod app;
mod app_command;
mod config;
mod error;
mod input_handler;
mod screen_state;
mod simulated_camera;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    input_handler::InputHandler,
    screen_state::{ScreenState, ScreenView},
    simulated_camera::SimulatedCamera,
};

use crate::{app_command::COMMAND_HELP, config::Config};

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("camera_screen=debug,camera_screen_core=debug")
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let app = match App::new(&config, command_rx, shutdown_tx) {
            Ok(app) => app,
            Err(e) => {
                error!("Failed to create App: {:?}", e);
                std::process::exit(1);
            }
        };

        let input_handler = InputHandler::new(command_tx);

        println!("{}", COMMAND_HELP);

        tokio::join!(
            async {
                if let Err(e) = input_handler.run(shutdown_rx).await {
                    error!(error = ?e, "Input handler error");
                }
            },
            async {
                if let Err(e) = app.run().await {
                    error!(error = ?e, "App error");
                }
            }
        );
    });

    // The stdin reader may still be parked in a blocking read.
    rt.shutdown_timeout(Duration::from_secs(1));
}
