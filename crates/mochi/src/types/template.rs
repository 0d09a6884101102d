//! Template types.
//!
//! A template is a reusable card layout: markdown `content` containing
//! `<< Field name >>` placeholders, plus the definitions of those fields.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of input a template field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Boolean,
    Number,
    Draw,
    Ai,
    Speech,
    Image,
    Translate,
    Transcription,
    Dictionary,
    Pinyin,
    Furigana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

/// Template name, 1 to 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateName(#[schemars(length(min = 1, max = 64))] String);

impl TemplateName {
    /// Longest accepted name, in characters.
    pub const MAX_CHARS: usize = 64;

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TemplateName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let chars = value.chars().count();
        if chars == 0 {
            Err("template name must not be empty".to_string())
        } else if chars > Self::MAX_CHARS {
            Err(format!(
                "template name must be at most {} characters, got {chars}",
                Self::MAX_CHARS
            ))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<TemplateName> for String {
    fn from(name: TemplateName) -> Self {
        name.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-field options.
///
/// Mochi keeps adding field options, so only the common ones are typed.
/// Anything else is preserved in `extra` and sent back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOptions {
    /// Render the input as a multi-line text area.
    #[serde(rename = "multi-line?", default, skip_serializing_if = "Option::is_none")]
    pub multi_line: Option<bool>,
    /// Hide the field when reviewing.
    #[serde(rename = "hide-term?", default, skip_serializing_if = "Option::is_none")]
    pub hide_term: Option<bool>,
    /// Unrecognised options, passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Definition of one field in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateField {
    /// Field ID, referenced by card `fields` maps.
    pub id: String,
    /// Display name, used in `<< name >>` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Lexicographic position; fields are ordered by this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Default content for new cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateStyle {
    #[serde(rename = "text-alignment", default, skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateOptions {
    /// Review each side of the card separately.
    #[serde(
        rename = "show-sides-separately?",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub show_sides_separately: Option<bool>,
}

/// A template as returned by Mochi.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Field definitions keyed by field ID.
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    /// Field definitions that parse under the typed schema, sorted by `pos`.
    ///
    /// Fields whose upstream shape is not understood are skipped.
    pub fn ordered_fields(&self) -> Vec<TemplateField> {
        let mut fields: Vec<TemplateField> = self
            .fields
            .values()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();
        fields.sort_by(|a, b| a.pos.cmp(&b.pos));
        fields
    }
}

/// Body of a create-template request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTemplate {
    /// Template name, 1 to 64 characters.
    pub name: TemplateName,
    /// Markdown layout with `<< Field name >>` placeholders.
    pub content: String,
    /// Sort position among templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Field definitions keyed by field ID.
    pub fields: BTreeMap<String, TemplateField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TemplateStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TemplateOptions>,
}
