// src/config.rs
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

use crate::error::ConfigError;

/// Which reference years to compare and where each value lives in a row.
///
/// Every key is optional in YAML; missing keys fall back to the 2016 → 2021
/// comparison over the `year,region,_,cohort` layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub before_year: i32,
    pub after_year: i32,
    pub year_field: usize,
    pub region_field: usize,
    pub cohort_field: usize,
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            before_year: 2016,
            after_year: 2021,
            year_field: 0,
            region_field: 1,
            cohort_field: 3,
            delimiter: ',',
        }
    }
}

impl Config {
    /// Load a YAML config from `path` and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_yaml(&text)?;
        debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.before_year == self.after_year {
            return Err(ConfigError::SameYear(self.before_year));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// True when `year` is one of the two reference years.
    pub fn is_reference_year(&self, year: i32) -> bool {
        year == self.before_year || year == self.after_year
    }

    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::NonAsciiDelimiter(self.delimiter));
        }
        Ok(self.delimiter as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_reference_layout() {
        let cfg = Config::default();
        assert_eq!((cfg.before_year, cfg.after_year), (2016, 2021));
        assert_eq!((cfg.year_field, cfg.region_field, cfg.cohort_field), (0, 1, 3));
        assert_eq!(cfg.delimiter_byte().unwrap(), b',');
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = Config::from_yaml("before_year: 2010\ncohort_field: 2\n").unwrap();
        assert_eq!(cfg.before_year, 2010);
        assert_eq!(cfg.after_year, 2021);
        assert_eq!(cfg.cohort_field, 2);
        assert_eq!(cfg.region_field, 1);
    }

    #[test]
    fn rejects_identical_years() {
        let err = Config::from_yaml("before_year: 2021\n").unwrap_err();
        assert!(matches!(err, ConfigError::SameYear(2021)));
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let err = Config::from_yaml("delimiter: \"、\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::NonAsciiDelimiter('、')));
    }

    #[test]
    fn reference_year_predicate() {
        let cfg = Config::default();
        assert!(cfg.is_reference_year(2016));
        assert!(cfg.is_reference_year(2021));
        assert!(!cfg.is_reference_year(2019));
    }

    #[test]
    fn load_from_file() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "after_year: 2020\ndelimiter: \"\\t\"")?;
        let cfg = Config::load(tmp.path())?;
        assert_eq!(cfg.after_year, 2020);
        assert_eq!(cfg.delimiter, '\t');
        Ok(())
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load("/nonexistent/cohortrank.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
