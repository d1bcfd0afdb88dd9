//! The two operations the tool exposes and the glue around the serializer.

use std::str::FromStr;

use secure_serializer::{CodecError, SecureSerializer};
use serde_json::Value;
use thiserror::Error;

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read JSON from stdin, write a token to stdout.
    Encode,
    /// Read a token from stdin, write JSON to stdout.
    Decode,
}

/// Errors produced while parsing arguments or running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No command was given.
    #[error("missing command; expected `encode` or `decode`")]
    MissingCommand,

    /// The command is not one the tool knows.
    #[error("unknown command `{0}`; expected `encode` or `decode`")]
    UnknownCommand(String),

    /// The input to `encode` is not JSON.
    #[error("input is not valid JSON: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// The serializer rejected the operation.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encode" => Ok(Command::Encode),
            "decode" => Ok(Command::Decode),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

impl Command {
    /// Parse the command from process arguments (without the program name).
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, CommandError> {
        args.into_iter()
            .next()
            .ok_or(CommandError::MissingCommand)?
            .parse()
    }

    /// Run the command against `input`, returning what should be printed.
    pub fn run(self, serializer: &SecureSerializer, input: &str) -> Result<String, CommandError> {
        match self {
            Command::Encode => {
                let value: Value = serde_json::from_str(input)?;
                Ok(serializer.encode(&value)?)
            }
            Command::Decode => {
                let value: Value = serializer.decode(input.trim())?;
                serde_json::to_string(&value)
                    .map_err(|e| CodecError::Serialization(e.to_string()).into())
            }
        }
    }
}
