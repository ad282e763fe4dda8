//! # Configuration
//!
//! Synthesis settings loaded from environment variables.
//!
//! All configuration has sensible defaults and can be overridden via
//! environment variables; CLI flags take precedence over both.

mod synth;

pub use synth::SynthConfig;

/// Load configuration from environment variables with defaults
pub fn load_config() -> SynthConfig {
    SynthConfig::from_env()
}

/// Read environment variable or return default value
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
