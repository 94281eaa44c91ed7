use crate::domain::model::{PointsTable, StageOrder};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";
pub const DEFAULT_EVENT_TITLE: &str = "**event title**";

/// Run settings, read from `config.json` (or a `.toml` file with the same keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Recognized categories, in output order.
    pub categories: Vec<String>,
    pub points_table: PointsTable,
    pub title_style: StyleConfig,
    pub header_style: StyleConfig,
    pub body_style: StyleConfig,
    #[serde(default)]
    pub specify_input_file: bool,
    #[serde(default)]
    pub input_file_name: Option<String>,
    #[serde(default)]
    pub input_file_names: Vec<String>,
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub stage_order: StageOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub font_color: String,
    pub font_size: f64,
    #[serde(default)]
    pub is_bold: bool,
    pub font_name: String,
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default)]
    pub border_thickness: BorderThickness,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderThickness {
    None,
    #[default]
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl Settings {
    /// Loads settings, picking the format from the file extension (`.toml` or JSON).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| EtlError::ConfigValidationError {
            field: "json_parsing".to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Explicitly configured input files, single-file key first.
    pub fn explicit_inputs(&self) -> Vec<String> {
        self.input_file_name
            .iter()
            .chain(self.input_file_names.iter())
            .cloned()
            .collect()
    }

    pub fn event_title(&self) -> &str {
        self.event_title.as_deref().unwrap_or(DEFAULT_EVENT_TITLE)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_list("categories", &self.categories)?;
        for category in &self.categories {
            validation::validate_non_empty_string("categories", category)?;
        }

        if self.specify_input_file {
            let inputs = self.explicit_inputs();
            if inputs.is_empty() {
                return Err(EtlError::MissingConfigError {
                    field: "input_file_name".to_string(),
                });
            }
            validation::validate_file_extensions("input_file_names", &inputs, &["csv"])?;
        }

        self.title_style.validate_style("title_style")?;
        self.header_style.validate_style("header_style")?;
        self.body_style.validate_style("body_style")?;

        Ok(())
    }
}

impl StyleConfig {
    pub fn font_rgb(&self) -> Result<u32> {
        validation::parse_hex_color("font_color", &self.font_color)
    }

    pub fn fill_rgb(&self) -> Result<Option<u32>> {
        self.fill_color
            .as_deref()
            .map(|color| validation::parse_hex_color("fill_color", color))
            .transpose()
    }

    fn validate_style(&self, name: &str) -> Result<()> {
        validation::parse_hex_color(&format!("{}.font_color", name), &self.font_color)?;
        if let Some(fill) = &self.fill_color {
            validation::parse_hex_color(&format!("{}.fill_color", name), fill)?;
        }
        validation::validate_non_empty_string(&format!("{}.font_name", name), &self.font_name)?;
        validation::validate_range(&format!("{}.font_size", name), self.font_size, 1.0, 409.0)?;
        Ok(())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Place;
    use std::io::Write;

    const JSON: &str = r##"{
        "categories": ["Women Pro", "Men Pro"],
        "points_table": { "1": 100, "2": 80, "N/C": 1 },
        "title_style": { "font_color": "#FFFFFF", "font_size": 16, "is_bold": true,
                         "font_name": "Calibri", "fill_color": "#1F4E78", "border_thickness": "medium" },
        "header_style": { "font_color": "#000000", "font_size": 11, "is_bold": true,
                          "font_name": "Calibri", "fill_color": "#D9D9D9", "border_thickness": "thin" },
        "body_style": { "font_color": "#000000", "font_size": 11, "font_name": "Calibri",
                        "border_thickness": "thin" },
        "specify_input_file": true,
        "input_file_name": "results.csv"
    }"##;

    #[test]
    fn test_parse_json_settings() {
        let settings = Settings::from_json_str(JSON).unwrap();

        assert_eq!(settings.categories, vec!["Women Pro", "Men Pro"]);
        assert_eq!(
            settings.points_table.points_for(&Place::Rank("2".to_string())),
            Some(80.0)
        );
        assert_eq!(settings.title_style.border_thickness, BorderThickness::Medium);
        assert!(!settings.body_style.is_bold);
        assert_eq!(settings.explicit_inputs(), vec!["results.csv"]);
        assert_eq!(settings.event_title(), DEFAULT_EVENT_TITLE);
        assert_eq!(settings.stage_order, StageOrder::Source);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_settings() {
        let toml_content = r##"
categories = ["Men Expert"]
specify_input_file = false
event_title = "Round 3"
stage_order = "numeric"

[points_table]
"1" = 25
"DNF" = 0

[title_style]
font_color = "#FFFFFF"
font_size = 14
is_bold = true
font_name = "Arial"
fill_color = "#000000"
border_thickness = "thick"

[header_style]
font_color = "#000000"
font_size = 11
font_name = "Arial"
fill_color = "#CCCCCC"

[body_style]
font_color = "#000000"
font_size = 10
font_name = "Arial"
"##;
        let settings = Settings::from_toml_str(toml_content).unwrap();

        assert_eq!(settings.event_title(), "Round 3");
        assert_eq!(settings.stage_order, StageOrder::Numeric);
        assert_eq!(settings.points_table.points_for(&Place::DidNotFinish), Some(0.0));
        assert_eq!(settings.header_style.border_thickness, BorderThickness::Thin);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_explicit_mode_requires_files() {
        let mut settings = Settings::from_json_str(JSON).unwrap();
        settings.input_file_name = None;
        assert!(matches!(
            settings.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));

        settings.input_file_names = vec!["results.txt".to_string()];
        assert!(settings.validate().is_err());

        settings.specify_input_file = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_bad_color_fails_validation() {
        let mut settings = Settings::from_json_str(JSON).unwrap();
        settings.header_style.fill_color = Some("grey".to_string());
        assert!(matches!(
            settings.validate(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_border_is_rejected() {
        let content = JSON.replace("\"medium\"", "\"extra-thick\"");
        assert!(Settings::from_json_str(&content).is_err());
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(JSON.as_bytes()).unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.categories.len(), 2);

        assert!(matches!(
            Settings::from_file("/nonexistent/config.json"),
            Err(EtlError::ConfigError { .. })
        ));
    }
}
