use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dialnorm_core::{is_region_code, RegionTimezoneIndex, DEFAULT_MAX_RECOVERY_DEPTH};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "dialnorm";
const CONFIG_FILENAME: &str = "config.toml";

pub const MAX_RECOVERY_DEPTH: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub locale: LocaleConfig,
    pub max_recovery_depth: u8,
}

/// Context used to read numbers written without an international prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocaleConfig {
    #[default]
    None,
    Region(String),
    Timezone(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::None,
            max_recovery_depth: DEFAULT_MAX_RECOVERY_DEPTH,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid default_region value: {0}")]
    InvalidRegion(String),
    #[error("invalid default_timezone value: {0}")]
    InvalidTimezone(String),
    #[error("default_region and default_timezone are mutually exclusive")]
    ConflictingLocale,
    #[error("invalid max_recovery_depth value: {0}")]
    InvalidRecoveryDepth(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_region: Option<String>,
    default_timezone: Option<String>,
    max_recovery_depth: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    config.locale = match (parsed.default_region, parsed.default_timezone) {
        (Some(_), Some(_)) => return Err(ConfigError::ConflictingLocale),
        (Some(region), None) => {
            let region = region.trim().to_string();
            if !is_region_code(&region) {
                return Err(ConfigError::InvalidRegion(region));
            }
            LocaleConfig::Region(region)
        }
        (None, Some(timezone)) => {
            let timezone = timezone.trim().to_string();
            if !RegionTimezoneIndex::builtin().contains_timezone(&timezone) {
                return Err(ConfigError::InvalidTimezone(timezone));
            }
            LocaleConfig::Timezone(timezone)
        }
        (None, None) => LocaleConfig::None,
    };

    if let Some(depth) = parsed.max_recovery_depth {
        config.max_recovery_depth = u8::try_from(depth)
            .ok()
            .filter(|value| (1..=MAX_RECOVERY_DEPTH).contains(value))
            .ok_or(ConfigError::InvalidRecoveryDepth(depth))?;
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
