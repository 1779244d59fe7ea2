use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::pipeline::RowFailurePolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_donor_path")]
    pub donor_path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            donor_path: default_donor_path(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_donor_path() -> PathBuf { PathBuf::from("donor.csv") }
fn default_delimiter() -> char { ',' }

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self { path: default_model_path() }
    }
}

fn default_model_path() -> PathBuf { PathBuf::from("donor_matching_model.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
    #[serde(default)]
    pub row_failure_policy: RowFailurePolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
            row_failure_policy: RowFailurePolicy::default(),
        }
    }
}

fn default_top_n() -> usize { 3 }
fn default_max_top_n() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Output layout of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Multi-line, human oriented
    Pretty,
    /// Single-line plain text
    Compact,
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DONOR)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DONOR__DATA__DONOR_PATH -> data.donor_path
            .add_source(env_source())
            .build()?;

        settings = apply_path_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_path_overrides(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("DONOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor the short `DONOR_CSV` and `MODEL_PATH` variables used by deploy scripts
fn apply_path_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(donor_path) = env::var("DONOR_CSV") {
        builder = builder.set_override("data.donor_path", donor_path)?;
    }
    if let Ok(model_path) = env::var("MODEL_PATH") {
        builder = builder.set_override("model.path", model_path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Tests below read the process environment; run them one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets an env variable for the life of the guard, restoring the old value on drop
    struct EnvVar {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvVar {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVar {
        fn drop(&mut self) {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn settings_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_top_n, 3);
        assert_eq!(matching.max_top_n, 50);
        assert_eq!(matching.row_failure_policy, RowFailurePolicy::Abort);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let _lock = env_lock();
        let file = settings_file(
            r#"
[data]
donor_path = "/srv/donors.csv"
delimiter = ";"

[matching]
default_top_n = 5
row_failure_policy = "skip"

[logging]
format = "compact"
"#,
        );

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.data.donor_path, PathBuf::from("/srv/donors.csv"));
        assert_eq!(settings.data.delimiter, ';');
        assert_eq!(settings.matching.default_top_n, 5);
        assert_eq!(settings.matching.row_failure_policy, RowFailurePolicy::Skip);
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.model.path, PathBuf::from("donor_matching_model.json"));
    }

    #[test]
    fn test_env_overrides_file() {
        let _lock = env_lock();
        let file = settings_file("[matching]\ndefault_top_n = 5\n");
        let _top_n = EnvVar::set("DONOR__MATCHING__DEFAULT_TOP_N", "7");

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.matching.default_top_n, 7);
    }

    #[test]
    fn test_donor_csv_overrides_donor_path() {
        let _lock = env_lock();
        let file = settings_file("[data]\ndonor_path = \"data/donor.csv\"\n");
        let _csv = EnvVar::set("DONOR_CSV", "/mnt/share/donors.csv");
        let _model = EnvVar::set("MODEL_PATH", "/mnt/share/model.json");

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.data.donor_path, PathBuf::from("/mnt/share/donors.csv"));
        assert_eq!(settings.model.path, PathBuf::from("/mnt/share/model.json"));
    }

    #[test]
    fn test_env_vars_restored() {
        let _lock = env_lock();
        {
            let _csv = EnvVar::set("DONOR_CSV", "/tmp/elsewhere.csv");
        }
        let file = settings_file("[data]\ndonor_path = \"data/donor.csv\"\n");

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.data.donor_path, PathBuf::from("data/donor.csv"));
    }
}
