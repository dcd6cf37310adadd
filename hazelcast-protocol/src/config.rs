//! Configuration for the framed message codec.
//!
//! [`CodecConfig`] bounds what [`ClientMessageCodec`](crate::protocol::ClientMessageCodec)
//! accepts from a peer and controls outbound fragmentation. It is built
//! programmatically through [`CodecConfigBuilder`], deserialized from a
//! configuration file section through [`FileCodecConfig`], or read from
//! `HAZELCAST_PROTOCOL_*` environment variables.
//!
//! # Example TOML
//!
//! ```toml
//! [protocol]
//! max-frame-length = 16777216
//! max-message-length = 268435456
//! max-pending-fragments = 256
//! max-fragment-size = 65536
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::protocol::constants::SIZE_OF_FRAME_LENGTH_AND_FLAGS;

/// Default upper bound for a single frame, header included.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 64 * 1024 * 1024;

/// Default upper bound for a (reassembled) message.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 256 * 1024 * 1024;

/// Default number of fragmented messages that may be in flight at once.
pub const DEFAULT_MAX_PENDING_FRAGMENTS: usize = 1024;

const ENV_MAX_FRAME_LENGTH: &str = "HAZELCAST_PROTOCOL_MAX_FRAME_LENGTH";
const ENV_MAX_MESSAGE_LENGTH: &str = "HAZELCAST_PROTOCOL_MAX_MESSAGE_LENGTH";
const ENV_MAX_PENDING_FRAGMENTS: &str = "HAZELCAST_PROTOCOL_MAX_PENDING_FRAGMENTS";
const ENV_MAX_FRAGMENT_SIZE: &str = "HAZELCAST_PROTOCOL_MAX_FRAGMENT_SIZE";

/// Error returned when a configuration value is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Limits and fragmentation settings for the framed message codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    max_frame_length: usize,
    max_message_length: usize,
    max_pending_fragments: usize,
    max_fragment_size: Option<usize>,
}

impl CodecConfig {
    /// Creates a builder initialised with the defaults.
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::new()
    }

    /// Largest frame accepted from the wire, header included.
    pub fn max_frame_length(&self) -> usize {
        self.max_frame_length
    }

    /// Largest message accepted from the wire after fragment reassembly.
    pub fn max_message_length(&self) -> usize {
        self.max_message_length
    }

    /// Number of fragmented messages that may be reassembled concurrently.
    pub fn max_pending_fragments(&self) -> usize {
        self.max_pending_fragments
    }

    /// Outbound messages larger than this are split into fragments.
    ///
    /// `None` disables outbound fragmentation.
    pub fn max_fragment_size(&self) -> Option<usize> {
        self.max_fragment_size
    }

    /// Loads configuration from `HAZELCAST_PROTOCOL_*` environment variables,
    /// falling back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is not a valid integer or the
    /// resulting configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = CodecConfigBuilder::new();
        if let Some(value) = read_env_usize(ENV_MAX_FRAME_LENGTH)? {
            builder = builder.max_frame_length(value);
        }
        if let Some(value) = read_env_usize(ENV_MAX_MESSAGE_LENGTH)? {
            builder = builder.max_message_length(value);
        }
        if let Some(value) = read_env_usize(ENV_MAX_PENDING_FRAGMENTS)? {
            builder = builder.max_pending_fragments(value);
        }
        if let Some(value) = read_env_usize(ENV_MAX_FRAGMENT_SIZE)? {
            builder = builder.max_fragment_size(value);
        }
        builder.build()
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            max_pending_fragments: DEFAULT_MAX_PENDING_FRAGMENTS,
            max_fragment_size: None,
        }
    }
}

fn read_env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| ConfigError::new(format!("{name} must be a positive integer: {e}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::new(format!("{name} is not readable: {e}"))),
    }
}

impl From<CodecConfig> for CodecConfigBuilder {
    fn from(config: CodecConfig) -> Self {
        Self {
            max_frame_length: Some(config.max_frame_length),
            max_message_length: Some(config.max_message_length),
            max_pending_fragments: Some(config.max_pending_fragments),
            max_fragment_size: config.max_fragment_size,
        }
    }
}

/// Builder for [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct CodecConfigBuilder {
    max_frame_length: Option<usize>,
    max_message_length: Option<usize>,
    max_pending_fragments: Option<usize>,
    max_fragment_size: Option<usize>,
}

impl CodecConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest frame accepted from the wire, header included.
    pub fn max_frame_length(mut self, length: usize) -> Self {
        self.max_frame_length = Some(length);
        self
    }

    /// Sets the largest reassembled message accepted from the wire.
    pub fn max_message_length(mut self, length: usize) -> Self {
        self.max_message_length = Some(length);
        self
    }

    /// Sets how many fragmented messages may be reassembled concurrently.
    pub fn max_pending_fragments(mut self, count: usize) -> Self {
        self.max_pending_fragments = Some(count);
        self
    }

    /// Enables outbound fragmentation above the given size.
    pub fn max_fragment_size(mut self, size: usize) -> Self {
        self.max_fragment_size = Some(size);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - the maximum frame length cannot hold a frame header or does not fit
    ///   the 32-bit length field
    /// - the maximum message length is smaller than the maximum frame length
    /// - no fragmented messages are allowed in flight
    /// - the fragment size cannot hold a fragmentation frame
    pub fn build(self) -> Result<CodecConfig, ConfigError> {
        let max_frame_length = self.max_frame_length.unwrap_or(DEFAULT_MAX_FRAME_LENGTH);
        let max_message_length = self
            .max_message_length
            .unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH.max(max_frame_length));
        let max_pending_fragments = self
            .max_pending_fragments
            .unwrap_or(DEFAULT_MAX_PENDING_FRAGMENTS);

        if max_frame_length < SIZE_OF_FRAME_LENGTH_AND_FLAGS {
            return Err(ConfigError::new(format!(
                "max frame length must be at least {SIZE_OF_FRAME_LENGTH_AND_FLAGS} bytes"
            )));
        }
        if u32::try_from(max_frame_length).is_err() {
            return Err(ConfigError::new(
                "max frame length must fit the 32-bit frame length field",
            ));
        }
        if max_message_length < max_frame_length {
            return Err(ConfigError::new(
                "max message length must not be smaller than max frame length",
            ));
        }
        if max_pending_fragments == 0 {
            return Err(ConfigError::new("max pending fragments must be at least 1"));
        }
        if let Some(size) = self.max_fragment_size {
            // Fragmentation frame header plus its 8-byte id.
            if size <= SIZE_OF_FRAME_LENGTH_AND_FLAGS + 8 {
                return Err(ConfigError::new(format!(
                    "max fragment size must exceed {} bytes",
                    SIZE_OF_FRAME_LENGTH_AND_FLAGS + 8
                )));
            }
        }

        Ok(CodecConfig {
            max_frame_length,
            max_message_length,
            max_pending_fragments,
            max_fragment_size: self.max_fragment_size,
        })
    }
}

/// File-based mirror of [`CodecConfig`].
///
/// Deserializes from the `protocol` section of a YAML, TOML or JSON client
/// configuration and converts into [`CodecConfig`] via [`TryFrom`], so the
/// same validation applies to file and programmatic configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FileCodecConfig {
    /// Largest frame accepted from the wire.
    pub max_frame_length: Option<usize>,
    /// Largest reassembled message accepted from the wire.
    pub max_message_length: Option<usize>,
    /// Fragmented messages that may be reassembled concurrently.
    pub max_pending_fragments: Option<usize>,
    /// Outbound fragmentation threshold.
    pub max_fragment_size: Option<usize>,
}

impl TryFrom<FileCodecConfig> for CodecConfig {
    type Error = ConfigError;

    fn try_from(file: FileCodecConfig) -> Result<Self, Self::Error> {
        let mut builder = CodecConfigBuilder::new();
        if let Some(value) = file.max_frame_length {
            builder = builder.max_frame_length(value);
        }
        if let Some(value) = file.max_message_length {
            builder = builder.max_message_length(value);
        }
        if let Some(value) = file.max_pending_fragments {
            builder = builder.max_pending_fragments(value);
        }
        if let Some(value) = file.max_fragment_size {
            builder = builder.max_fragment_size(value);
        }
        builder.build()
    }
}
