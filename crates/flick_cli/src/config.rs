//! Engine configuration file handling (flick.toml)

use anyhow::{Context, Result};
use flick_charm::FlickConfig;
use std::fs;
use std::path::Path;

/// Load engine configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<FlickConfig> {
    let Some(path) = path else {
        return Ok(FlickConfig::default());
    };

    let config_path = if path.is_dir() {
        path.join("flick.toml")
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        anyhow::bail!("No flick config found at {}", config_path.display());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config = FlickConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    tracing::debug!("Loaded {:?} from {}", config, config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_is_default() {
        assert_eq!(load_config(None).unwrap(), FlickConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/definitely/not/here/flick.toml"))).unwrap_err();
        assert!(err.to_string().contains("No flick config found"));
    }

    #[test]
    fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("flick-config-{}.toml", std::process::id()));
        fs::write(&path, "max_speed = 12\ndeceleration = 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_speed, 12);
        assert_eq!(config.deceleration, 3);

        fs::write(&path, "tick_interval_ms = 0\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));

        fs::remove_file(&path).ok();
    }
}
