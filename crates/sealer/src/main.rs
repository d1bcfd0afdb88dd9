//! `sealer`: seal JSON into tokens and open tokens back into JSON.
//!
//! Startup sequence:
//! 1. Parse the command (`encode` or `decode`) from the arguments.
//! 2. Load and validate [`config::Config`] from environment variables.
//! 3. Initialise structured JSON logging.
//! 4. Read stdin, run the command, and write the result to stdout.

mod command;
mod config;
mod telemetry;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use common::protocol::ErrorResponse;
use secure_serializer::SecureSerializer;
use tracing::{debug, info, warn};

use command::{Command, CommandError};

fn main() -> Result<ExitCode> {
    // -----------------------------------------------------------------------
    // 1. Command
    // -----------------------------------------------------------------------
    let command = Command::from_args(std::env::args().skip(1)).map_err(|e| {
        eprintln!("usage: sealer <encode|decode> < input");
        anyhow::anyhow!(e)
    })?;

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: sealer configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), ?command, "sealer starting");

    // -----------------------------------------------------------------------
    // 4. Run
    // -----------------------------------------------------------------------
    let serializer = SecureSerializer::new(&cfg.encrypt_key, &cfg.validate_key);

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let mut stdout = io::stdout().lock();
    match command.run(&serializer, &input) {
        Ok(output) => {
            writeln!(stdout, "{output}").context("failed to write stdout")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(CommandError::Codec(e)) => {
            // Operators get the reason; the output only carries the public code.
            debug!(error = %e, "token operation failed");
            warn!(code = e.public_code(), "token operation rejected");
            let body = serde_json::to_string(&ErrorResponse::from_codec_error(&e))?;
            writeln!(stdout, "{body}").context("failed to write stdout")?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
