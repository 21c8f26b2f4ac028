mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shelfctl::{Operation, ServiceSettings};
use tracing::error;

/// Installs a Topshelf-hosted Windows service by running `<executable> install`.
#[derive(Parser, Debug)]
#[command(name = "install_service", version)]
struct Cli {
    #[command(flatten)]
    common: config::CommonArgs,

    /// JSON file with service settings (camelCase keys). Flags below override it.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    password: Option<String>,

    /// Start automatically at boot. Manual start otherwise.
    #[arg(long)]
    autostart: bool,

    #[arg(long)]
    disabled: bool,

    /// Delayed automatic start.
    #[arg(long)]
    delayed: bool,

    #[arg(long)]
    localsystem: bool,

    #[arg(long)]
    localservice: bool,

    #[arg(long)]
    networkservice: bool,

    #[arg(long)]
    service_name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    display_name: Option<String>,

    /// Pre-built argument fragment placed before the generated flags.
    #[arg(long, allow_hyphen_values = true)]
    extra_arguments: Option<String>,
}

impl Cli {
    fn build_settings(&self) -> shelfctl::Result<ServiceSettings> {
        let mut settings = match &self.settings {
            Some(path) => ServiceSettings::from_json_file(path)?,
            None => ServiceSettings::default(),
        };

        let overrides = [
            (&mut settings.username, &self.username),
            (&mut settings.password, &self.password),
            (&mut settings.instance_name, &self.common.instance),
            (&mut settings.service_name, &self.service_name),
            (&mut settings.description, &self.description),
            (&mut settings.display_name, &self.display_name),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }

        settings.autostart |= self.autostart;
        settings.disabled |= self.disabled;
        settings.delayed_start |= self.delayed;
        settings.run_as_local_system |= self.localsystem;
        settings.run_as_local_service |= self.localservice;
        settings.run_as_network_service |= self.networkservice;
        if self.extra_arguments.is_some() {
            settings.extra_arguments = self.extra_arguments.clone();
        }
        settings.timeout = self.common.timeout_or(settings.timeout);
        Ok(settings)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = match cli.common.init_logging() {
        Ok(guard) => guard,
        Err(code) => return code,
    };

    let settings = match cli.build_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!(action = "service_helper", "{}", e);
            return ExitCode::FAILURE;
        }
    };

    config::run(Operation::Install, |controller| {
        controller.install_service(&cli.common.executable, Some(&settings))
    })
}
