//! Form definition files
//!
//! A form definition holds the field registry (`formData`) and the root
//! widget tree (`formDataFillInTheBlanks.data`). It can be written as JSON,
//! YAML or TOML; the format is picked from the file extension.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{FieldRegistry, Widget};

/// On-disk format of a form definition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFormat {
    Json,
    Yaml,
    Toml,
}

impl FormFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "json" => Some(FormFormat::Json),
            "yaml" | "yml" => Some(FormFormat::Yaml),
            "toml" => Some(FormFormat::Toml),
            _ => None,
        }
    }
}

/// Complete static definition of a fill-in-the-blanks form
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(rename = "formData")]
    pub form_data: FieldRegistry,
    #[serde(rename = "formDataFillInTheBlanks")]
    pub fill_in_the_blanks: FillInTheBlanks,
}

/// Root of the widget tree
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FillInTheBlanks {
    #[serde(default)]
    pub data: Vec<Widget>,
}

impl FormConfig {
    pub fn new(form_data: FieldRegistry, data: Vec<Widget>) -> Self {
        Self {
            form_data,
            fill_in_the_blanks: FillInTheBlanks { data },
        }
    }

    /// Root widgets in display order
    pub fn widgets(&self) -> &[Widget] {
        &self.fill_in_the_blanks.data
    }

    pub fn parse(content: &str, format: FormFormat) -> Result<Self, anyhow::Error> {
        let form = match format {
            FormFormat::Json => serde_json::from_str(content)?,
            FormFormat::Yaml => serde_yaml::from_str(content)?,
            FormFormat::Toml => toml::from_str(content)?,
        };
        Ok(form)
    }

    /// Read and parse a form definition, choosing the format by extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let format = FormFormat::from_path(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported form file '{}': expected .json, .yaml, .yml or .toml",
                path.display()
            )
        })?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file '{}'", path.display()))?;
        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse form file '{}'", path.display()))
    }
}
