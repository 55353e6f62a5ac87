use std::process::ExitCode;

use firment_cli::plugin_main;
use firment_compiler::WidgetGenerator;

fn main() -> ExitCode {
    plugin_main(&WidgetGenerator)
}
