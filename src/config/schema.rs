//! Application configuration shape.
//!
//! The crate only understands the `base_env` section, which feeds back
//! into the environment resolver as defaults. Everything else belongs to
//! the embedding application and is kept as an open extension map rather
//! than hardcoded keys.

use std::collections::HashMap;

use serde::Deserialize;

use crate::env::AppEnvVars;

/// Default configuration shape for a deployment context.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Environment defaults, lowest-precedence input of the resolver.
    #[serde(default)]
    pub base_env: AppEnvVars,

    /// Application-defined configuration, untouched by this crate.
    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_env_and_extra_sections_deserialize() {
        let config: AppConfig = toml::from_str(
            r#"
            listen_port = 8080

            [base_env]
            NODE_ENV = "production"
            DB_HOST = "db.internal"

            [database]
            pool_size = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.base_env["NODE_ENV"], "production");
        assert_eq!(config.base_env["DB_HOST"], "db.internal");
        assert!(config.extra.contains_key("listen_port"));
        assert!(config.extra.contains_key("database"));
    }

    #[test]
    fn empty_config_is_valid() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.base_env.is_empty());
        assert!(config.extra.is_empty());
    }
}
