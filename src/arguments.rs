//! Command-line rendering for Topshelf-style executables.
//!
//! The token order is fixed because the target's parser is order sensitive:
//! base fragment, credentials, instance, start mode, identity, then naming.

use crate::settings::{Operation, ServiceSettings};

const REDACTED: &str = "********";

/// Renders the arguments that follow the `install` verb.
pub fn install_arguments(settings: &ServiceSettings) -> String {
    render(settings, false)
}

/// Same as [`install_arguments`] with the password value masked, for logging.
pub fn install_arguments_redacted(settings: &ServiceSettings) -> String {
    render(settings, true)
}

/// Full argument string for an operation: the verb, then either the rendered
/// settings (install) or the bare instance name.
pub fn command_arguments(operation: Operation, rendered: Option<&str>) -> String {
    let mut builder = ArgumentBuilder::default();
    builder.push(operation.verb());
    if let Some(rendered) = rendered.filter(|r| !r.is_empty()) {
        builder.push(rendered);
    }
    builder.finish()
}

/// `<verb>` or `<verb> <instance>` for uninstall, start and stop.
pub fn verb_arguments(operation: Operation, instance_name: Option<&str>) -> String {
    command_arguments(
        operation,
        instance_name.map(str::trim).filter(|name| !name.is_empty()),
    )
}

fn render(settings: &ServiceSettings, redact: bool) -> String {
    let mut builder = ArgumentBuilder::default();

    let base = settings.extra_arguments.as_deref();
    if let Some(base) = base.filter(|base| is_present(base)) {
        builder.push(base);
    }

    builder.quoted("-username", &settings.username);
    if redact && is_present(&settings.password) {
        builder.quoted("-password", REDACTED);
    } else {
        builder.quoted("-password", &settings.password);
    }
    builder.quoted("-instance", &settings.instance_name);

    builder.push(if settings.autostart { "--autostart" } else { "--manual" });
    builder.flag("--disabled", settings.disabled);
    builder.flag("--delayed", settings.delayed_start);
    builder.flag("--localsystem", settings.run_as_local_system);
    builder.flag("--localservice", settings.run_as_local_service);
    builder.flag("--networkservice", settings.run_as_network_service);

    builder.quoted("--servicename", &settings.service_name);
    builder.quoted("--description", &settings.description);
    builder.quoted("--displayname", &settings.display_name);

    builder.finish()
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Default)]
struct ArgumentBuilder {
    rendered: String,
}

impl ArgumentBuilder {
    fn push(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        if !self.rendered.is_empty() {
            self.rendered.push(' ');
        }
        self.rendered.push_str(token);
    }

    fn flag(&mut self, flag: &str, enabled: bool) {
        if enabled {
            self.push(flag);
        }
    }

    // Quotes are added verbatim; embedded quotes are passed through unescaped.
    fn quoted(&mut self, name: &str, value: &str) {
        if is_present(value) {
            self.push(&format!("{name} \"{value}\""));
        }
    }

    fn finish(self) -> String {
        self.rendered
    }
}
