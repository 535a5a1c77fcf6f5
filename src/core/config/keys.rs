use std::fmt;

use crate::core::config::data::Config;

/// Keys accepted by `charcard set` / `charcard unset`.
pub const CONFIG_KEYS: [&str; 3] = ["log-level", "pretty", "avatar"];

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigKeyError {
    UnknownKey(String),
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKeyError::UnknownKey(key) => {
                write!(
                    f,
                    "Unknown config key '{}'. Available keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )
            }
            ConfigKeyError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigKeyError {}

impl Config {
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigKeyError> {
        match key {
            "log-level" => {
                let level = value.trim();
                if level.is_empty() {
                    return Err(ConfigKeyError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.log_level = Some(level.to_string());
            }
            "pretty" => self.pretty = Some(parse_switch(key, value)?),
            "avatar" => self.avatar = Some(parse_switch(key, value)?),
            _ => return Err(ConfigKeyError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), ConfigKeyError> {
        match key {
            "log-level" => self.log_level = None,
            "pretty" => self.pretty = None,
            "avatar" => self.avatar = None,
            _ => return Err(ConfigKeyError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool, ConfigKeyError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigKeyError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
