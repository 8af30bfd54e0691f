use config::{Config, ConfigError, Environment, File};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    pub static ref SETTINGS: Settings = Settings::new().expect("invalid configuration");
}

const SETTINGS_PATH: &str = "./sha2stream.config.toml";
const PREFIX: &str = "SHA2STREAM";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Also hash with the `sha2` crate and report whether both digests agree.
    pub compare_reference: bool,
    /// Trim surrounding whitespace from a line read from stdin.
    pub trim_input: bool,
    /// Buffer size used when streaming files into the hasher.
    pub read_chunk_size: usize,
    pub uppercase: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            compare_reference: true,
            trim_input: true,
            read_chunk_size: 65_536,
            uppercase: false,
        }
    }
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        Self::with_file(SETTINGS_PATH)
    }

    /// Load settings from the toml file at `path` (if it exists), overridden by
    /// `SHA2STREAM_*` environment variables.
    pub fn with_file(path: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("absent.config.toml");
        let settings = Settings::with_file(path.to_str().expect("invalid path"))
            .expect("settings failed");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("sha2stream.config.toml");
        let mut file = std::fs::File::create(&path).expect("create failed");
        writeln!(file, "read_chunk_size = 4096").expect("write failed");
        writeln!(file, "uppercase = true").expect("write failed");
        drop(file);

        let settings = Settings::with_file(path.to_str().expect("invalid path"))
            .expect("settings failed");
        assert_eq!(settings.read_chunk_size, 4096);
        assert!(settings.uppercase);
        assert!(settings.compare_reference);
        assert!(settings.trim_input);
    }
}
