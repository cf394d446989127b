//! Journey schema and translation table.
//!
//! A journey describes one record type: its display names and the custom
//! fields its instances carry, each with a column type tag. Both the schema
//! and the translation table are read-only inputs to column assembly and
//! can be loaded from YAML or JSON files.

use std::{
    collections::{BTreeMap, HashSet},
    fs::File,
    io::BufReader,
    path::Path,
};

use anyhow::{Context, Result, bail, ensure};
use heck::ToTitleCase;
use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::ColumnError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field key, used both as the column field and as the row key.
    pub slug: String,
    /// Column type tag, resolved against the registry at assembly time.
    #[serde(rename = "type")]
    pub type_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySchema {
    #[serde(default)]
    pub id: Option<u64>,
    pub singular_name: String,
    #[serde(default)]
    pub plural_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
}

impl JourneySchema {
    pub fn new(singular_name: impl Into<String>) -> Self {
        Self {
            id: None,
            singular_name: singular_name.into(),
            plural_name: None,
            custom_fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, slug: impl Into<String>, type_tag: impl Into<String>) -> Self {
        self.custom_fields.push(CustomField {
            slug: slug.into(),
            type_tag: type_tag.into(),
        });
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let schema: JourneySchema = load_document(path, "journey schema")?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.singular_name.trim().is_empty(),
            "Journey singular_name must not be empty"
        );
        let mut seen = HashSet::new();
        for field in &self.custom_fields {
            let slug = field.slug.trim();
            if slug.is_empty() {
                bail!("Custom field slugs must not be empty");
            }
            if slug != field.slug {
                bail!("Custom field slug '{}' has surrounding whitespace", field.slug);
            }
            if !seen.insert(slug) {
                bail!("Custom field '{slug}' is declared more than once");
            }
        }
        Ok(())
    }
}

/// Header text per column field, supplied by the localization layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, header: impl Into<String>) -> Self {
        self.insert(field, header);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, header: impl Into<String>) {
        self.0.insert(field.into(), header.into());
    }

    pub fn header(&self, field: &str) -> Result<&str, ColumnError> {
        self.0
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| ColumnError::missing_translation(field))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let translations: Translations = load_document(path, "translations")?;
        if translations.is_empty() {
            warn!("Translation table {path:?} has no entries");
        }
        Ok(translations)
    }

    /// A table with a Title Case guess for each field, as a starting point
    /// for a real translation file.
    pub fn scaffold<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        fields
            .into_iter()
            .fold(Self::new(), |table, field| table.with(field, field.to_title_case()))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Serializing translations to YAML")
    }
}

impl FromIterator<(String, String)> for Translations {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// YAML is a superset of JSON, so one parser covers both file formats.
fn load_document<T>(path: &Path, what: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path).with_context(|| format!("Opening {what} file {path:?}"))?;
    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).with_context(|| format!("Parsing {what} from {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_yaml_schema_with_custom_fields() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "singular_name: Case\ncustom_fields:\n  - slug: intake_answer\n    type: survey_response\n  - slug: homepage\n    type: url"
        )
        .unwrap();
        let schema = JourneySchema::load(file.path()).expect("load schema");
        assert_eq!(schema.singular_name, "Case");
        assert_eq!(schema.custom_fields.len(), 2);
        assert_eq!(schema.custom_fields[0].type_tag, "survey_response");
    }

    #[test]
    fn loads_json_translations() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, r#"{{"id": "ID", "summary": "Summary"}}"#).unwrap();
        let translations = Translations::load(file.path()).expect("load translations");
        assert_eq!(translations.header("summary").unwrap(), "Summary");
        assert_eq!(
            translations.header("people").unwrap_err(),
            ColumnError::missing_translation("people")
        );
        assert_eq!(translations.len(), 2);
        assert!(!translations.is_empty());
    }

    #[test]
    fn loads_empty_translation_table() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{{}}").unwrap();
        let translations = Translations::load(file.path()).expect("load translations");
        assert!(translations.is_empty());
    }

    #[test]
    fn validate_rejects_duplicate_slugs() {
        let schema = JourneySchema::new("Case")
            .with_field("notes", "text")
            .with_field("notes", "text");
        let err = schema.validate().expect_err("duplicate slug");
        assert!(err.to_string().contains("notes"));
    }

    #[test]
    fn scaffold_guesses_title_case_headers() {
        let table = Translations::scaffold(["next_milestone_title", "id"]);
        assert_eq!(table.header("next_milestone_title").unwrap(), "Next Milestone Title");
        assert_eq!(table.header("id").unwrap(), "Id");
    }
}
