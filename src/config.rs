use anyhow::{Context, Result};
use mission_control_core::habitability::HabitabilityCriteria;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub launches: LaunchesConfig,
    #[serde(default)]
    pub planets: PlanetsConfig,
    #[serde(default)]
    pub startup: StartupConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LaunchesConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LaunchesConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_feed_url() -> String {
    "https://api.spacexdata.com/v3/launches".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanetsConfig {
    #[serde(default = "default_planets_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub criteria: HabitabilityCriteria,
}

impl Default for PlanetsConfig {
    fn default() -> Self {
        Self {
            path: default_planets_path(),
            criteria: HabitabilityCriteria::default(),
        }
    }
}

fn default_planets_path() -> PathBuf {
    PathBuf::from("data").join("kepler_exoplanets_nasa.csv")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StartupConfig {
    /// Keep running with one store empty when its ingestion fails.
    #[serde(default)]
    pub allow_degraded: bool,
}

/// Load configuration from `path`, or fall back to defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate launches
    if config.launches.timeout_secs == 0 {
        anyhow::bail!("launches.timeout_secs must be > 0");
    }
    let url = &config.launches.feed_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!(
            "launches.feed_url must be an http(s) URL, got '{}'",
            url
        );
    }

    // Validate planets
    if let Some(name) = config.planets.criteria.invalid_range() {
        anyhow::bail!("planets.criteria.{} must have min < max", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_control_core::habitability::ExclusiveRange;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(
            config.launches.feed_url,
            "https://api.spacexdata.com/v3/launches"
        );
        assert_eq!(config.launches.timeout_secs, 30);
        assert_eq!(
            config.planets.path,
            PathBuf::from("data/kepler_exoplanets_nasa.csv")
        );
        assert_eq!(config.planets.criteria, HabitabilityCriteria::default());
        assert!(!config.startup.allow_degraded);
        validate(&config).unwrap();
    }

    #[test]
    fn test_partial_criteria_override() {
        let config = parse_config(
            r#"
[launches]
feed_url = "http://127.0.0.1:9000/launches"
timeout_secs = 5

[planets]
path = "/tmp/koi.csv"

[planets.criteria]
planet_radius = { min = 0.8, max = 1.2 }

[startup]
allow_degraded = true
"#,
        )
        .unwrap();
        assert_eq!(config.launches.timeout_secs, 5);
        assert_eq!(
            config.planets.criteria.planet_radius,
            ExclusiveRange::new(0.8, 1.2)
        );
        assert_eq!(
            config.planets.criteria.stellar_mass,
            HabitabilityCriteria::default().stellar_mass
        );
        assert!(config.startup.allow_degraded);
        validate(&config).unwrap();
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = parse_config("[launches]\ntimeout_secs = 0\n").unwrap();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_non_http_feed_rejected() {
        let config = parse_config("[launches]\nfeed_url = \"ftp://example.com\"\n").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config =
            parse_config("[planets.criteria]\nstellar_radius = { min = 1.1, max = 0.9 }\n")
                .unwrap();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("stellar_radius"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_config(Path::new("/nonexistent/mc.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
