/// Configuration utilities - locating, loading and validating the config file
///
/// Unlike a process-wide config singleton, the loaded [`Config`] is returned to
/// the caller and handed to each component at construction.
use std::path::{Path, PathBuf};

use super::schemas::Config;
use crate::errors::{ScanError, ScanResult};
use crate::logger::{self, LogTag};

/// Config file looked up in the working directory when --config is absent
pub const CONFIG_FILE_NAME: &str = "creatorscan.toml";

pub const HELIUS_KEY_ENV: &str = "HELIUS_API_KEY";
pub const BIRDEYE_KEY_ENV: &str = "BIRDEYE_API_KEY";

/// Resolve which config file to read
///
/// Order: explicit path, `./creatorscan.toml`, `<config dir>/creatorscan/config.toml`.
/// Returns `None` when nothing exists, meaning defaults apply.
pub fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("creatorscan").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from an optional file, apply env overrides and validate
pub fn load_config(explicit: Option<&Path>) -> ScanResult<Config> {
    let mut config = match locate_config_file(explicit) {
        Some(path) => {
            let config = load_config_from_path(&path)?;
            logger::info(
                LogTag::Config,
                &format!("Loaded configuration from {}", path.display()),
            );
            config
        }
        None => {
            logger::info(
                LogTag::Config,
                &format!("No {} found, using default configuration", CONFIG_FILE_NAME),
            );
            Config::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Parse a TOML file into a [`Config`]
///
/// A missing file is an error here: the caller asked for this exact path.
pub fn load_config_from_path(path: &Path) -> ScanResult<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
    parse_config(&contents)
        .map_err(|e| ScanError::Config(format!("Failed to parse '{}': {}", path.display(), e)))
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(contents)
}

/// Replace API keys with environment values when those are set and non-empty
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(HELIUS_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.helius.api_key = key.trim().to_string();
    }
    if let Some(key) = lookup(BIRDEYE_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.birdeye.api_key = key.trim().to_string();
    }
}

/// Reject values the pipeline cannot run with; warn about degraded setups
pub fn validate_config(config: &Config) -> ScanResult<()> {
    let pipeline = &config.pipeline;

    if pipeline.max_workers == 0 {
        return Err(ScanError::Config("pipeline.max_workers must be at least 1".to_string()));
    }
    if pipeline.max_retries == 0 {
        return Err(ScanError::Config("pipeline.max_retries must be at least 1".to_string()));
    }
    if pipeline.request_timeout_secs == 0 {
        return Err(ScanError::Config(
            "pipeline.request_timeout_secs must be at least 1".to_string(),
        ));
    }
    if pipeline.analyzed_token_cap == 0 {
        return Err(ScanError::Config(
            "pipeline.analyzed_token_cap must be at least 1".to_string(),
        ));
    }

    if config.helius.api_key.is_empty() {
        logger::warning(
            LogTag::Config,
            "No Helius API key configured - token discovery will rely on DexScreener search",
        );
    }
    if config.birdeye.api_key.is_empty() {
        logger::warning(
            LogTag::Config,
            "No Birdeye API key configured - volumes will come from DexScreener only",
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VolumeCascade;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [pipeline]
            max_workers = 4
            volume_cascade = "daily"

            [helius]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.max_workers, 4);
        assert_eq!(config.pipeline.volume_cascade, VolumeCascade::Daily);
        assert_eq!(config.pipeline.analyzed_token_cap, 10);
        assert_eq!(config.pipeline.request_timeout_secs, 12);
        assert_eq!(config.helius.api_key, "abc");
        assert_eq!(config.paths.input_file, "wallets.txt");
    }

    #[test]
    fn test_unknown_cascade_rejected() {
        assert!(parse_config("[pipeline]\nvolume_cascade = \"weekly\"\n").is_err());
    }

    #[test]
    fn test_env_overrides_only_when_set() {
        let mut config = Config::default();
        config.birdeye.api_key = "from-file".to_string();

        apply_env_overrides(&mut config, |key| match key {
            HELIUS_KEY_ENV => Some(" env-helius ".to_string()),
            BIRDEYE_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.helius.api_key, "env-helius");
        assert_eq!(config.birdeye.api_key, "from-file");
    }

    #[test]
    fn test_validation_rejects_zero_workers() {
        let mut config = Config::default();
        config.pipeline.max_workers = 0;
        assert!(matches!(validate_config(&config), Err(ScanError::Config(_))));

        config.pipeline.max_workers = 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config_from_path(&missing),
            Err(ScanError::Io { .. })
        ));
    }
}
