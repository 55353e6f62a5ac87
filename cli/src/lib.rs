//! firment-cli
//!
//! Shared plumbing for the `protoc-gen-widgets` / `protoc-gen-can` plugin
//! binaries and the `fgen` command line.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use firment_compiler::{FirmentError, Generator};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FIRMENT_LOG=debug`.
pub const LOG_ENV: &str = "FIRMENT_LOG";

/// Installs a stderr logger; stdout is reserved for the plugin response.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

/// Entry point of a protoc plugin: request on stdin, response on stdout.
pub fn plugin_main(generator: &dyn Generator) -> ExitCode {
    init_logging();
    match run_plugin(generator, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("protoc-gen-{}: {}", generator.name(), e);
            ExitCode::FAILURE
        }
    }
}

/// Reads a whole request from `input` and writes the response to `output`.
/// On error `output` is left untouched.
pub fn run_plugin<R: Read, W: Write>(
    generator: &dyn Generator,
    mut input: R,
    mut output: W,
) -> Result<(), FirmentError> {
    let mut request = Vec::new();
    input.read_to_end(&mut request)?;
    debug!(bytes = request.len(), "read request");

    // Fully assembled before anything reaches the output.
    let response = firment_compiler::run(&request, generator)?;

    output.write_all(&response)?;
    output.flush()?;
    Ok(())
}
