// src/infra/paths.rs — Config path resolution
//
// RETAIL_CHAT_HOME overrides the config directory. Otherwise ~/.retail-chat/.

use std::path::PathBuf;

fn retail_chat_home() -> Option<PathBuf> {
    std::env::var_os("RETAIL_CHAT_HOME").map(PathBuf::from)
}

/// Configuration directory: $RETAIL_CHAT_HOME/ or ~/.retail-chat/
pub fn config_dir() -> PathBuf {
    if let Some(home) = retail_chat_home() {
        return home;
    }
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(".retail-chat"),
        None => PathBuf::from(".retail-chat"),
    }
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_config_dir() {
        let path = config_file_path();
        assert!(path.starts_with(config_dir()));
        assert!(path.ends_with("config.toml"));
    }
}
