//! Rich-text delta input model
//!
//!     A document is the ordered list of insert operations produced by the editor:
//!
//!         { "ops": [ { "insert": "Hello " }, { "insert": "World", "attributes": { "color": "#00FF00" } } ] }
//!
//!     Attribute values follow the editor's loose truthiness: `null`, `false`, `0` and `""` all
//!     count as "not set". Only `color`, `size` and `header` influence the output. The remaining
//!     editor attributes are kept in [`IgnoredAttributes`] so callers can see what was dropped.
//!
//!     Inserts that are not plain text (images, formulas and other embeds) deserialize into
//!     [`Insert::Embed`]. The serializer skips them.

use crate::error::{Result, SqfError};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// The whole editor document.
///
/// `ops` is optional: a missing or `null` sequence serializes to an empty body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub ops: Option<Vec<StyledFragment>>,
}

impl Document {
    pub fn new(ops: Vec<StyledFragment>) -> Self {
        Self { ops: Some(ops) }
    }

    /// Fragments in document order (empty when `ops` is absent).
    pub fn fragments(&self) -> &[StyledFragment] {
        self.ops.as_deref().unwrap_or(&[])
    }

    /// Decode a JSON delta. A top-level `null` yields the empty document.
    pub fn from_json(source: &str) -> Result<Self> {
        let doc: Option<Document> = serde_json::from_str(source)?;
        Ok(doc.unwrap_or_default())
    }

    /// Decode a YAML delta. An empty or `null` document yields the empty document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let doc: Option<Document> = serde_yaml::from_str(source)?;
        Ok(doc.unwrap_or_default())
    }

    pub fn parse(source: &str, format: InputFormat) -> Result<Self> {
        match format {
            InputFormat::Json => Self::from_json(source),
            InputFormat::Yaml => Self::from_yaml(source),
        }
    }

    /// Read and decode a delta file. `None` infers the format from the extension.
    pub fn load(path: impl AsRef<Path>, format: Option<InputFormat>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SqfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = format.unwrap_or_else(|| InputFormat::from_path(path));
        Self::parse(&source, format)
    }
}

/// One insert operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyledFragment {
    pub insert: Insert,
    #[serde(default)]
    pub attributes: Option<StyleAttributes>,
}

impl StyledFragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Insert::Text(text.into()),
            attributes: None,
        }
    }

    pub fn styled(text: impl Into<String>, attributes: StyleAttributes) -> Self {
        Self {
            insert: Insert::Text(text.into()),
            attributes: Some(attributes),
        }
    }

    pub fn embed(value: Value) -> Self {
        Self {
            insert: Insert::Embed(value),
            attributes: None,
        }
    }

    /// Header lines keep their raw newlines.
    pub fn is_header(&self) -> bool {
        self.attributes.as_ref().is_some_and(StyleAttributes::is_header)
    }
}

/// Inserted content: plain text or an editor embed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Value),
}

impl Insert {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Insert::Text(text) => Some(text),
            Insert::Embed(_) => None,
        }
    }
}

/// Categorical font size requested by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Large,
    Huge,
    /// Any other value, kept verbatim. Renders with the default point size.
    Other(String),
}

impl FontSize {
    pub fn from_name(name: &str) -> Self {
        match name {
            "small" => FontSize::Small,
            "large" => FontSize::Large,
            "huge" => FontSize::Huge,
            other => FontSize::Other(other.to_string()),
        }
    }
}

/// Style attributes attached to a fragment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StyleAttributes {
    #[serde(default, deserialize_with = "truthy_text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "truthy_size")]
    pub size: Option<FontSize>,
    #[serde(default, deserialize_with = "truthy_value")]
    pub header: Option<Value>,
    #[serde(flatten)]
    pub ignored: IgnoredAttributes,
}

impl StyleAttributes {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: FontSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_header(mut self, level: impl Into<Value>) -> Self {
        let level = level.into();
        self.header = is_truthy(&level).then_some(level);
        self
    }

    pub fn is_header(&self) -> bool {
        self.header.is_some()
    }

    /// Keys present on the fragment that produce no markup.
    pub fn ignored_keys(&self) -> Vec<&str> {
        self.ignored.keys()
    }
}

/// Editor attributes with no markup counterpart.
///
/// The named fields are the diary features the target engine knows about but that are not
/// rendered yet. `extra` collects everything else (bold, italic, links, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IgnoredAttributes {
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub marker: Option<Value>,
    #[serde(default)]
    pub log: Option<Value>,
    #[serde(default)]
    pub gear: Option<Value>,
    #[serde(default, rename = "currentTask")]
    pub current_task: Option<Value>,
    #[serde(default)]
    pub font: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IgnoredAttributes {
    pub fn keys(&self) -> Vec<&str> {
        let named = [
            ("image", &self.image),
            ("marker", &self.marker),
            ("log", &self.log),
            ("gear", &self.gear),
            ("currentTask", &self.current_task),
            ("font", &self.font),
        ];
        named
            .into_iter()
            .filter(|(_, value)| value.is_some())
            .map(|(key, _)| key)
            .chain(self.extra.keys().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

/// Editor truthiness: `null`, `false`, `0`, `NaN` and `""` are unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn truthy_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn truthy_size<'de, D>(deserializer: D) -> std::result::Result<Option<FontSize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).map(|name| FontSize::from_name(&name)))
}

fn truthy_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value).then_some(value))
}

/// Serialization format of a delta file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.yaml` / `.yml` files are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

impl FromStr for InputFormat {
    type Err = SqfError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            _ => Err(SqfError::UnknownInputFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_parse_quill_delta() {
        let doc = Document::from_json(
            r##"{"ops":[{"insert":"Hello "},{"insert":"World","attributes":{"color":"#00FF00","size":"large"}}]}"##,
        )
        .unwrap();

        let fragments = doc.fragments();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], StyledFragment::text("Hello "));

        let attrs = fragments[1].attributes.as_ref().unwrap();
        assert_eq!(attrs.color.as_deref(), Some("#00FF00"));
        assert_eq!(attrs.size, Some(FontSize::Large));
        assert!(attrs.ignored.is_empty());
    }

    #[rstest]
    #[case("{}")]
    #[case("null")]
    #[case(r#"{"ops":null}"#)]
    #[case(r#"{"ops":[]}"#)]
    fn test_missing_ops_is_empty(#[case] source: &str) {
        let doc = Document::from_json(source).unwrap();
        assert!(doc.fragments().is_empty());
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(""), false)]
    #[case(json!(true), true)]
    #[case(json!(1), true)]
    #[case(json!("0"), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    fn test_truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }

    #[test]
    fn test_falsy_attributes_are_unset() {
        let attrs: StyleAttributes =
            serde_json::from_value(json!({"color": "", "size": null, "header": 0})).unwrap();
        assert_eq!(attrs, StyleAttributes::default());
    }

    #[test]
    fn test_non_string_scalars_are_stringified() {
        let attrs: StyleAttributes =
            serde_json::from_value(json!({"color": 255, "size": 3})).unwrap();
        assert_eq!(attrs.color.as_deref(), Some("255"));
        assert_eq!(attrs.size, Some(FontSize::Other("3".to_string())));
    }

    #[test]
    fn test_header_detection() {
        let header: StyledFragment =
            serde_json::from_value(json!({"insert": "\n", "attributes": {"header": 1}})).unwrap();
        assert!(header.is_header());

        let plain: StyledFragment =
            serde_json::from_value(json!({"insert": "\n", "attributes": {"header": false}}))
                .unwrap();
        assert!(!plain.is_header());
        assert!(!StyledFragment::text("x").is_header());
    }

    #[test]
    fn test_unsupported_attributes_are_collected() {
        let attrs: StyleAttributes = serde_json::from_value(json!({
            "color": "red",
            "image": "a.paa",
            "currentTask": true,
            "bold": true
        }))
        .unwrap();

        assert_eq!(attrs.color.as_deref(), Some("red"));
        assert_eq!(attrs.ignored.image, Some(json!("a.paa")));
        assert_eq!(attrs.ignored.current_task, Some(json!(true)));
        assert_eq!(attrs.ignored_keys(), vec!["image", "currentTask", "bold"]);
    }

    #[test]
    fn test_embed_insert() {
        let fragment: StyledFragment =
            serde_json::from_value(json!({"insert": {"image": "https://x/y.png"}})).unwrap();
        assert_eq!(fragment.insert.as_text(), None);
        assert!(matches!(fragment.insert, Insert::Embed(_)));
    }

    #[test]
    fn test_parse_yaml_delta() {
        let source = "ops:\n  - insert: \"Title\\n\"\n    attributes:\n      header: 2\n  - insert: body\n";
        let doc = Document::from_yaml(source).unwrap();
        assert_eq!(doc.fragments().len(), 2);
        assert!(doc.fragments()[0].is_header());
        assert_eq!(doc.fragments()[1].insert.as_text(), Some("body"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Document::from_json("{\"ops\": [").unwrap_err();
        assert!(matches!(err, SqfError::Json(_)));
    }

    #[rstest]
    #[case("notes.json", InputFormat::Json)]
    #[case("notes.yaml", InputFormat::Yaml)]
    #[case("notes.YML", InputFormat::Yaml)]
    #[case("notes", InputFormat::Json)]
    fn test_input_format_from_path(#[case] path: &str, #[case] expected: InputFormat) {
        assert_eq!(InputFormat::from_path(Path::new(path)), expected);
    }

    #[test]
    fn test_input_format_from_str() {
        assert_eq!("YAML".parse::<InputFormat>().unwrap(), InputFormat::Yaml);
        assert!(matches!(
            "toml".parse::<InputFormat>(),
            Err(SqfError::UnknownInputFormat(name)) if name == "toml"
        ));
    }
}
