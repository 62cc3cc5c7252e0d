//! Delta → SQF serialization
//!
//!     Folds the fragments of a [`Document`] into one `createDiaryRecord` statement:
//!
//!         player createDiaryRecord ["Diary", ["<name>", "<body>"]];
//!
//!     Per fragment, in document order:
//!
//!     1. Every `\n` becomes `\n<br/>`, unless the fragment carries a header attribute.
//!     2. The tags from [`map_attributes_with`] wrap the text, one after the other.
//!     3. The result is appended to the body.
//!
//!     After the last fragment a single trailing `\n<br/>` is removed. Embedded (non-text)
//!     inserts are skipped with a warning.
//!
//!     Neither the name nor the body is escaped; quotes in either end up verbatim in the command.

use crate::delta::{Document, StyledFragment};
use crate::markup::{map_attributes_with, FontSizeTable};
use crate::render::render_tag;
use log::{debug, warn};

/// Marker inserted after every newline of non-header text.
pub const LINE_BREAK: &str = "\n<br/>";

/// Values of the command template that callers may change.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializerOptions {
    /// Object the record is attached to.
    pub target: String,
    /// Diary subject the record is filed under.
    pub subject: String,
    pub font_sizes: FontSizeTable,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            target: "player".to_string(),
            subject: "Diary".to_string(),
            font_sizes: FontSizeTable::default(),
        }
    }
}

/// Serializer for diary record commands.
#[derive(Debug, Clone, Default)]
pub struct SqfSerializer {
    options: SerializerOptions,
}

impl SqfSerializer {
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Produce the full command for `doc`, titled `name`.
    pub fn serialize(&self, name: &str, doc: &Document) -> String {
        let mut sqf = format!(
            "{} createDiaryRecord [\"{}\", [\"{}\", \"",
            self.options.target, self.options.subject, name
        );
        sqf.push_str(&self.serialize_body(doc));
        sqf.push_str("\"]];");
        sqf
    }

    /// Produce only the record body (the text between the inner quotes).
    pub fn serialize_body(&self, doc: &Document) -> String {
        let fragments = doc.fragments();
        debug!("serializing {} fragment(s)", fragments.len());

        let mut body = String::new();
        for (index, fragment) in fragments.iter().enumerate() {
            match self.serialize_fragment(fragment) {
                Some(text) => body.push_str(&text),
                None => warn!("skipping embedded insert at op {index}"),
            }
        }

        if let Some(len) = body.strip_suffix(LINE_BREAK).map(str::len) {
            body.truncate(len);
        }
        body
    }

    /// Render one fragment, `None` for embeds.
    fn serialize_fragment(&self, fragment: &StyledFragment) -> Option<String> {
        let text = fragment.insert.as_text()?;

        let mut insert = if fragment.is_header() {
            text.to_string()
        } else {
            text.replace('\n', LINE_BREAK)
        };

        let tags = map_attributes_with(fragment.attributes.as_ref(), &self.options.font_sizes);
        for (name, attrs) in tags.iter() {
            insert = render_tag(name, &attrs, Some(&insert));
        }
        Some(insert)
    }
}

/// Serialize with the default template (`player` / `Diary`).
pub fn to_sqf(name: &str, doc: &Document) -> String {
    SqfSerializer::default().serialize(name, doc)
}
