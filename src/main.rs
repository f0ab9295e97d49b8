use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sessionizer_core::{MarkerProbe, SystemRunner};
use tmux_sessionizer::app::App;
use tmux_sessionizer::config::{Config, Settings};

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate();

    let runner = SystemRunner;
    let probe = MarkerProbe;
    let app = App::new(settings.to_core_config(), &runner, &probe);
    let outcome = app.run(cli.mode())?;
    Ok(outcome.exit_code())
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tmux_sessionizer=debug,sessionizer_core=debug")
    } else {
        EnvFilter::new("tmux_sessionizer=info,sessionizer_core=info")
    };

    // stdout and the terminal belong to fzf and tmux
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
