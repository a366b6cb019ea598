use certgate::cli;
use certgate::errors::GateError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match cli.command {
        cli::Commands::Check(args) => cli::check::handle_check(args, cli.quiet).await,
        cli::Commands::Recommend(args) => cli::recommend::handle_recommend(args).await,
        cli::Commands::StubTms(args) => cli::stub::handle_stub(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                GateError::Config(_) | GateError::Yaml(_) => 2,
                err if err.is_transport() => 3,
                GateError::Certificate(_) => 4,
                GateError::InvalidUrl(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), GateError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = certgate::config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    println!("Trust service: {}", config.endpoint());
    Ok(())
}
