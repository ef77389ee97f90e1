//! Schema configuration: knobs of the built-in pagination and sort parameters.
//!
//! Precedence: explicit path > `QUERYLITE_CONFIG` > `~/.config/querylite.toml` > `./querylite.toml`
//! > defaults, then `QUERYLITE_*` environment overrides on top.

use crate::errors::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "querylite.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub default_limit: f64,
    pub min_limit: f64,
    pub max_limit: f64,
    pub default_page: f64,
    pub max_page: f64,
    pub default_sort: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            default_limit: 30.0,
            min_limit: 1.0,
            max_limit: 100.0,
            default_page: 1.0,
            max_page: 30.0,
            default_sort: "-createdAt".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Loads the first config file found (see module docs) and applies environment overrides.
    ///
    /// # Errors
    /// Returns an error if a found file cannot be read or parsed, an override is malformed,
    /// or the resulting bounds are inconsistent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match candidate_paths(path).into_iter().find(|p| p.exists()) {
            Some(p) => {
                log::debug!("loading schema config from {}", p.display());
                Self::from_file(&p)?
            }
            None => Self::default(),
        };
        cfg.apply_env_from(|k| std::env::var(k).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML for this struct.
    pub fn from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml(&s)
    }

    /// # Errors
    /// Returns an error if `s` is not valid TOML for this struct.
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    /// Returns an error if the config cannot be rendered.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Applies `QUERYLITE_DEFAULT_LIMIT`, `QUERYLITE_MAX_LIMIT`, `QUERYLITE_MAX_PAGE` and
    /// `QUERYLITE_DEFAULT_SORT` as read through `lookup`.
    ///
    /// # Errors
    /// Returns an error if a numeric override does not parse.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("QUERYLITE_DEFAULT_LIMIT") {
            self.default_limit = parse_env_number("QUERYLITE_DEFAULT_LIMIT", &v)?;
        }
        if let Some(v) = lookup("QUERYLITE_MAX_LIMIT") {
            self.max_limit = parse_env_number("QUERYLITE_MAX_LIMIT", &v)?;
        }
        if let Some(v) = lookup("QUERYLITE_MAX_PAGE") {
            self.max_page = parse_env_number("QUERYLITE_MAX_PAGE", &v)?;
        }
        if let Some(v) = lookup("QUERYLITE_DEFAULT_SORT") {
            self.default_sort = v;
        }
        Ok(())
    }

    /// # Errors
    /// Returns `QueryError::Config` describing the first inconsistent setting.
    pub fn validate(&self) -> Result<()> {
        if self.min_limit > self.max_limit {
            return Err(QueryError::Config(format!(
                "min_limit ({}) exceeds max_limit ({})",
                self.min_limit, self.max_limit
            )));
        }
        if !(self.min_limit..=self.max_limit).contains(&self.default_limit) {
            return Err(QueryError::Config(format!(
                "default_limit ({}) outside [{}, {}]",
                self.default_limit, self.min_limit, self.max_limit
            )));
        }
        if !(1.0..=self.max_page).contains(&self.default_page) {
            return Err(QueryError::Config(format!(
                "default_page ({}) outside [1, {}]",
                self.default_page, self.max_page
            )));
        }
        if self.default_sort.trim().is_empty() {
            return Err(QueryError::Config("default_sort must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_env_number(key: &str, v: &str) -> Result<f64> {
    v.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| QueryError::Config(format!("{key}: expected a number, got {v:?}")))
}

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = explicit {
        paths.push(p.to_path_buf());
        return paths;
    }
    if let Ok(p) = std::env::var("QUERYLITE_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join(CONFIG_FILE_NAME));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_consistent() {
        let cfg = SchemaConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.default_limit, 30.0);
        assert_eq!(cfg.default_sort, "-createdAt");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SchemaConfig::from_toml("max_limit = 500.0\n").unwrap();
        assert_eq!(cfg.max_limit, 500.0);
        assert_eq!(cfg.default_limit, 30.0);
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> =
            [("QUERYLITE_MAX_LIMIT", "50"), ("QUERYLITE_DEFAULT_SORT", "name")].into_iter().collect();
        let mut cfg = SchemaConfig::default();
        cfg.apply_env_from(|k| env.get(k).map(|v| (*v).to_string())).unwrap();
        assert_eq!(cfg.max_limit, 50.0);
        assert_eq!(cfg.default_sort, "name");
    }

    #[test]
    fn malformed_override_is_rejected() {
        let mut cfg = SchemaConfig::default();
        let err = cfg
            .apply_env_from(|k| (k == "QUERYLITE_MAX_PAGE").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn inconsistent_bounds_are_rejected() {
        let cfg = SchemaConfig { min_limit: 10.0, max_limit: 5.0, ..SchemaConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SchemaConfig { default_limit: 500.0, ..SchemaConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SchemaConfig { default_sort: " ".into(), ..SchemaConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
