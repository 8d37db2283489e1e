//! sx-alerter CLI entry point

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sx_alerter::cli::{
    app::{cli_config, load_merged_config, run_alert, EXIT_ERROR},
    args::{AlertOptions, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use sx_alerter::domain::alert::ALL_SOUNDS;
use sx_alerter::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    init_tracing();

    let mut cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command.take() {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Sounds) => {
            for sound in ALL_SOUNDS {
                presenter.output(sound.as_str());
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let config = load_merged_config(cli_config(cli.alerter_path.as_deref(), cli.timeout)).await;

    let options = AlertOptions {
        request: cli.to_request(),
        alerter_path: cli.alerter_path.clone(),
        wait: cli.wait.map(Duration::from_secs),
        json: cli.json,
    };

    run_alert(options, config).await
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sx_alerter=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
