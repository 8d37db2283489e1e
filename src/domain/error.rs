//! Domain error types

use thiserror::Error;

/// Error when a notification request cannot be turned into alerter arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please specify a proper message argument")]
    EmptyMessage,

    #[error("Please provide a message at a minimum")]
    NoArguments,
}

/// Error when an unknown sound name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid sound: \"{input}\". Valid sounds are: default, Basso, Blow, Bottle, Frog, Funk, Glass, Hero, Morse, Ping, Pop, Purr, Sosumi, Tink")]
pub struct InvalidSoundError {
    pub input: String,
}

/// Error when an unknown activation type tag is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid activation type: \"{input}\"")]
pub struct InvalidActivationKindError {
    pub input: String,
}

/// Error when alerter output is not a valid activation record
#[derive(Debug, Error)]
#[error("Malformed alerter output: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
