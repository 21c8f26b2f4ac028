mod config;

use std::process::ExitCode;

use clap::Parser;
use shelfctl::{DEFAULT_TIMEOUT, Operation, OperationOptions};

/// Stops a Topshelf-hosted Windows service by running `<executable> stop [instance]`.
#[derive(Parser, Debug)]
#[command(name = "stop_service", version)]
struct Cli {
    #[command(flatten)]
    common: config::CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = match cli.common.init_logging() {
        Ok(guard) => guard,
        Err(code) => return code,
    };

    let options = OperationOptions {
        instance_name: cli.common.instance.clone(),
        timeout: cli.common.timeout_or(DEFAULT_TIMEOUT),
    };
    config::run(Operation::Stop, |controller| {
        controller.stop_service(&cli.common.executable, &options)
    })
}
