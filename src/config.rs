use std::fs;
use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use serde::Deserialize;
use thiserror::Error;

use crate::color::parse_hex_color;
use crate::data::loader::{ColumnRange, SheetLayout, SourceSpec};

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid column range '{0}', expected e.g. \"B:R\"")]
    ColumnRange(String),
    #[error("invalid bar colour '{0}', expected e.g. \"#0083B8\"")]
    Color(String),
}

/// Dashboard settings. Every field defaults to the reference workbook layout.
///
/// A relative `source` in a config file is resolved against the directory
/// holding that file; the built-in default stays relative to the working
/// directory.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: PathBuf,
    pub sheet: String,
    pub skip_rows: usize,
    pub columns: String,
    pub max_rows: Option<usize>,
    pub bar_color: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("supermarkt_sales.xlsx"),
            sheet: "Sales".to_string(),
            skip_rows: 3,
            columns: "B:R".to_string(),
            max_rows: Some(1000),
            bar_color: "#0083B8".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if config.source.is_relative() {
            if let Some(dir) = path.parent() {
                config.source = dir.join(&config.source);
            }
        }
        Ok(config)
    }

    /// Load `dashboard.json` from `dir` if it exists, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::info!("Using config {}", candidate.display());
            Self::load(candidate)
        } else {
            log::info!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the source location and layout for the loader.
    pub fn source_spec(&self) -> Result<SourceSpec, ConfigError> {
        let columns = ColumnRange::parse(&self.columns)
            .ok_or_else(|| ConfigError::ColumnRange(self.columns.clone()))?;
        Ok(SourceSpec {
            path: self.source.clone(),
            layout: SheetLayout {
                sheet: self.sheet.clone(),
                skip_rows: self.skip_rows,
                columns,
                max_rows: self.max_rows,
            },
        })
    }

    pub fn bar_color(&self) -> Result<Color32, ConfigError> {
        parse_hex_color(&self.bar_color).ok_or_else(|| ConfigError::Color(self.bar_color.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn defaults_match_reference_workbook() {
        let spec = DashboardConfig::default().source_spec().unwrap();
        assert_eq!(spec.path, PathBuf::from("supermarkt_sales.xlsx"));
        assert_eq!(spec.layout.sheet, "Sales");
        assert_eq!(spec.layout.skip_rows, 3);
        assert_eq!(spec.layout.columns, ColumnRange { first: 1, last: 17 });
        assert_eq!(spec.layout.max_rows, Some(1000));
    }

    #[test]
    fn load_overrides_only_given_fields() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"source": "sales.csv", "max_rows": null}"#)
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = DashboardConfig::load(&path).unwrap();
        assert_eq!(cfg.source, path.parent().unwrap().join("sales.csv"));
        assert_eq!(cfg.max_rows, None);
        assert_eq!(cfg.sheet, "Sales");
        assert_eq!(cfg.columns, "B:R");
    }

    #[test]
    fn source_resolves_against_config_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("conf");
        fs::create_dir(&nested).unwrap();
        fs::write(
            nested.join(DEFAULT_CONFIG_FILE),
            r#"{"source": "../data/sales.csv"}"#,
        )
        .unwrap();
        let cfg = DashboardConfig::discover(&nested).unwrap();
        assert_eq!(cfg.source, nested.join("../data/sales.csv"));
        assert_eq!(cfg.source_spec().unwrap().path, cfg.source);

        let absolute = dir.path().join("abs.csv");
        let body = serde_json::json!({ "source": absolute }).to_string();
        fs::write(nested.join(DEFAULT_CONFIG_FILE), body).unwrap();
        assert_eq!(DashboardConfig::discover(&nested).unwrap().source, absolute);
    }

    #[test]
    fn load_rejects_bad_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{ not json").unwrap();
        let path = temp.into_temp_path();
        assert!(matches!(
            DashboardConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            DashboardConfig::discover(dir.path()).unwrap(),
            DashboardConfig::default()
        );

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), r#"{"sheet": "Q1"}"#).unwrap();
        assert_eq!(DashboardConfig::discover(dir.path()).unwrap().sheet, "Q1");
    }

    #[test]
    fn invalid_range_and_colour_are_reported() {
        let cfg = DashboardConfig {
            columns: "R:B".into(),
            bar_color: "blue".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.source_spec(), Err(ConfigError::ColumnRange(_))));
        assert!(matches!(cfg.bar_color(), Err(ConfigError::Color(_))));
        assert_eq!(
            DashboardConfig::default().bar_color().unwrap(),
            Color32::from_rgb(0x00, 0x83, 0xB8)
        );
    }
}
