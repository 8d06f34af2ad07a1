//! Workout agent - a plugin-based command REPL.

use tracing::{error, info};
use workout_agent::app::App;
use workout_agent::cli::Cli;
use workout_agent::config::Config;
use workout_agent::error::Result;
use workout_agent::logging;
use workout_agent::repl::StdinLines;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env before anything reads the environment (including RUST_LOG)
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse_args();
    match cli.log_path() {
        Some(path) => logging::init_file_logging(&path),
        None => logging::init_stderr_logging(),
    }
    if let Ok(path) = dotenv {
        info!("Environment variables loaded from {}", path.display());
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());

    // Precedence: CLI flags > environment > config file > defaults
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_env_overrides();
    cli.apply_to(&mut config);

    let mut app = App::new(config);
    let mut input = StdinLines::spawn();
    let mut output = std::io::stdout();

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for interrupt signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let report = app.start(&mut input, &mut output, interrupt).await;
    info!(
        "Session ended ({:?}) after {} line(s).",
        report.exit, report.lines
    );
    Ok(())
}
