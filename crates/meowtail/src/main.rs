mod cli;
mod commands;
mod config;
mod error;
mod notify;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meowtail_core::Appliance;

use crate::cli::{Cli, Command};
use crate::commands::Ctx;
use crate::error::CliError;
use crate::notify::ConsoleNotifier;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need an appliance
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "meowtail", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(&cli.global, &cfg);
            let appliance_config = config::resolve_appliance_config(&cli.global, &cfg, &profile_name)?;

            let notifier = Arc::new(ConsoleNotifier::new(
                cli.global.quiet,
                output::should_color(&cli.global.color),
            ));
            let appliance = Appliance::new(appliance_config, notifier)
                .map_err(|e| CliError::from_core(e, &profile_name, 0))?;

            let ctx = Ctx {
                appliance: &appliance,
                global: &cli.global,
                profile_name: &profile_name,
                profile: cfg.profiles.get(&profile_name),
            };

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &ctx).await
        }
    }
}
