use super::Config;
use std::sync::OnceLock;

static DEFAULT_CONFIG: OnceLock<Config> = OnceLock::new();

pub fn default_config() -> Config {
    DEFAULT_CONFIG
        .get_or_init(|| {
            let json_text = include_str!("default_config.json");
            let value: serde_json::Value =
                serde_json::from_str(json_text).expect("bundled default config JSON is valid");
            Config::from_value(value)
        })
        .clone()
}
