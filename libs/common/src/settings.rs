//! Environment-backed configuration loading
//!
//! Every configuration struct in the workspace is loaded the same way: a
//! `config` builder reading environment variables under a fixed prefix, with
//! defaults supplied in code by the caller.

use config::{Config, ConfigBuilder, Environment, builder::DefaultState};

/// Start a configuration builder over environment variables under `prefix`
///
/// With prefix `DATABASE`, the variable `DATABASE_MAX_CONNECTIONS` becomes the
/// key `max_connections`. Values are parsed into numbers and booleans where
/// possible.
pub fn env_builder(prefix: &str) -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(
        Environment::with_prefix(prefix)
            .prefix_separator("_")
            .try_parsing(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serial_test::serial;

    #[derive(Debug, Deserialize)]
    struct Sample {
        bind_address: String,
        workers: u32,
        enabled: bool,
    }

    fn load() -> Result<Sample, config::ConfigError> {
        env_builder("SETTINGS_TEST")
            .set_default("bind_address", "127.0.0.1:8080")?
            .set_default("workers", 4_i64)?
            .set_default("enabled", false)?
            .build()?
            .try_deserialize()
    }

    #[test]
    #[serial]
    fn test_defaults_apply_without_environment() {
        let sample = load().unwrap();
        assert_eq!(sample.bind_address, "127.0.0.1:8080");
        assert_eq!(sample.workers, 4);
        assert!(!sample.enabled);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() {
        unsafe {
            std::env::set_var("SETTINGS_TEST_WORKERS", "12");
            std::env::set_var("SETTINGS_TEST_ENABLED", "true");
        }

        let sample = load().unwrap();
        assert_eq!(sample.workers, 12);
        assert!(sample.enabled);

        unsafe {
            std::env::remove_var("SETTINGS_TEST_WORKERS");
            std::env::remove_var("SETTINGS_TEST_ENABLED");
        }
    }
}
