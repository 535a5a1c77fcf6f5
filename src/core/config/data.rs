use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Filter used when neither `CHARCARD_LOG` nor `log_level` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Tracing filter directive, e.g. "debug" or "charcard=trace"
    pub log_level: Option<String>,
    /// Pretty-print JSON output (default: on)
    pub pretty: Option<bool>,
    /// Include the avatar data URI in `inspect` output (default: off)
    pub avatar: Option<bool>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn pretty_output(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    pub fn include_avatar(&self) -> bool {
        self.avatar.unwrap_or(false)
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
