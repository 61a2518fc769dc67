use clap::Parser;
use error_common::{ErrorContext, ErrorReporter, OncoBillError};
use ops_cli::{execute, AppConfig, Cli, CommandContext};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return Ok(fail(&e, "load-config")),
    };
    if cli.verbose {
        config.logging.log_level = "debug".to_string();
    }
    logger_redacted::init(&config.logging)?;

    let ctx = match CommandContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(fail(&e, "load-reference-tables")),
    };

    match execute(&cli.command, &ctx, &mut std::io::stdin().lock()) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(fail(&e, "execute")),
    }
}

/// Report the error on stderr; callers get exit code 2 for bad input, 1 otherwise.
fn fail(error: &OncoBillError, operation: &str) -> ExitCode {
    let report = ErrorReporter::new().report(error, ErrorContext::new().with_operation(operation));
    match serde_json::to_string_pretty(&report) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{}: {}", report.error_code, report.message),
    }
    if error.is_client_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
