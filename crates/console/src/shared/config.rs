use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Филиал, от которого разрешаются доступные филиалы компании
    pub branch_id: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            filter: default_log_filter(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_dir() -> String {
    "target/logs".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8080"
timeout_secs = 30

[session]
branch_id = 1

[logging]
dir = "target/logs"
filter = "info"
"#;

/// Откуда взята конфигурация; в лог пишется после `logger::init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Встроенная конфигурация; `missing` - где искали config.toml
    Embedded { missing: Option<PathBuf> },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!("Loading config from: {}", path.display());
            }
            ConfigSource::Embedded { missing } => {
                if let Some(path) = missing {
                    tracing::warn!("config.toml not found at: {}", path.display());
                }
                tracing::info!("Using default embedded configuration");
            }
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Explicit path (command line)
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, ConfigSource)> {
    if let Some(path) = explicit {
        let config = parse_file(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let mut missing = None;
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                let config = parse_file(&config_path)?;
                return Ok((config, ConfigSource::File(config_path)));
            }
            missing = Some(config_path);
        }
    }

    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok((config, ConfigSource::Embedded { missing }))
}

fn parse_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Get the log directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_log_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.logging.dir);

    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(dir);
        }
    }

    PathBuf::from(&config.logging.dir)
}
