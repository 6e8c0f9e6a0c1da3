//! Configuration for the witness transaction codec
//!
//! Provides the decoder's resource limits and the witness-count policy.
//! These settings can be deserialized from a config file, loaded from
//! environment variables, or passed programmatically.

use crate::constants::{MAX_INPUTS, MAX_OUTPUTS, MAX_VAR_BYTES_LENGTH};
use serde::{Deserialize, Serialize};

/// Decoder resource limits
///
/// Counts and lengths are checked before anything is allocated for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum number of inputs in one transaction
    /// Default: 1,000,000
    #[serde(default = "default_max_inputs")]
    pub max_inputs: u64,

    /// Maximum number of outputs in one transaction
    /// Default: 1,000,000
    #[serde(default = "default_max_outputs")]
    pub max_outputs: u64,

    /// Maximum number of witness entries in one transaction
    /// Default: 1,000,000 (same as inputs)
    #[serde(default = "default_max_inputs")]
    pub max_witnesses: u64,

    /// Maximum declared length of a script or witness entry
    /// Default: 32 MiB
    #[serde(default = "default_max_var_bytes_length")]
    pub max_var_bytes_length: u64,
}

fn default_max_inputs() -> u64 {
    MAX_INPUTS
}

fn default_max_outputs() -> u64 {
    MAX_OUTPUTS
}

fn default_max_var_bytes_length() -> u64 {
    MAX_VAR_BYTES_LENGTH
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_inputs: MAX_INPUTS,
            max_outputs: MAX_OUTPUTS,
            max_witnesses: MAX_INPUTS,
            max_var_bytes_length: MAX_VAR_BYTES_LENGTH,
        }
    }
}

/// Decoder behaviour switches
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Reject a witness count that differs from the input count
    /// Default: false (the mismatch is logged and the transaction returned)
    #[serde(default)]
    pub reject_witness_count_mismatch: bool,
}

/// Complete codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub limits: DecodeLimits,

    #[serde(default)]
    pub decode: DecodeConfig,
}

impl CodecConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: `BLVM_WITNESS_<SECTION>_<KEY>`
    ///
    /// Examples:
    /// - `BLVM_WITNESS_LIMITS_MAX_INPUTS=5000`
    /// - `BLVM_WITNESS_DECODE_REJECT_WITNESS_COUNT_MISMATCH=true`
    ///
    /// Unparseable values are ignored and the default kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max) = env_parse::<u64>("BLVM_WITNESS_LIMITS_MAX_INPUTS") {
            config.limits.max_inputs = max;
        }
        if let Some(max) = env_parse::<u64>("BLVM_WITNESS_LIMITS_MAX_OUTPUTS") {
            config.limits.max_outputs = max;
        }
        if let Some(max) = env_parse::<u64>("BLVM_WITNESS_LIMITS_MAX_WITNESSES") {
            config.limits.max_witnesses = max;
        }
        if let Some(max) = env_parse::<u64>("BLVM_WITNESS_LIMITS_MAX_VAR_BYTES_LENGTH") {
            config.limits.max_var_bytes_length = max;
        }
        if let Some(reject) = env_parse::<bool>("BLVM_WITNESS_DECODE_REJECT_WITNESS_COUNT_MISMATCH")
        {
            config.decode.reject_witness_count_mismatch = reject;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable codec setting");
            None
        }
    }
}

/// Global codec configuration instance
static GLOBAL_CODEC_CONFIG: std::sync::OnceLock<CodecConfig> = std::sync::OnceLock::new();

/// Initialize global codec configuration
///
/// Should be called once at startup, before any decoding. Returns the
/// rejected config if the global was already set.
pub fn init_codec_config(config: CodecConfig) -> Result<(), CodecConfig> {
    GLOBAL_CODEC_CONFIG.set(config)
}

/// Get global codec configuration
///
/// Returns the global config if initialized, otherwise loads it from the
/// environment on first use.
pub fn get_codec_config() -> &'static CodecConfig {
    GLOBAL_CODEC_CONFIG.get_or_init(CodecConfig::from_env)
}
