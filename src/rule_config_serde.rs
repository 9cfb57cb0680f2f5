//! Typed loading of per-rule configuration sections.

use crate::config::Config;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A rule's option struct, stored under `[<RULE_NAME>]` in the config file
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    const RULE_NAME: &'static str;
}

/// Deserialize the section for `T` from the config, falling back to defaults
/// for a missing section or invalid values.
pub fn load_rule_config<T: RuleConfig>(config: &Config) -> T {
    let Some(rule_config) = config.rules.get(T::RULE_NAME) else {
        return T::default();
    };

    let table: toml::Table = rule_config
        .values
        .iter()
        .map(|(key, value)| (crate::config::normalize_key(key), value.clone()))
        .collect();

    match toml::Value::Table(table).try_into::<T>() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Invalid configuration for [{}]: {e}; using defaults", T::RULE_NAME);
            T::default()
        }
    }
}

/// Render the default options of `T` as a TOML section, if it has any
pub fn default_config_section<T: RuleConfig>() -> Option<(String, toml::Value)> {
    match toml::Value::try_from(T::default()) {
        Ok(toml::Value::Table(table)) if !table.is_empty() => Some((T::RULE_NAME.to_string(), toml::Value::Table(table))),
        _ => None,
    }
}
