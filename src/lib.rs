//! # sqf-diary
//!
//! Converts rich-text editor deltas into SQF `createDiaryRecord` commands.
//!
//! ## Pipeline
//!
//!     Document ──▶ for each fragment ──▶ map_attributes ──▶ render_tag ──▶ body ──▶ command
//!
//! - [`delta`]: input model and decoding (JSON / YAML)
//! - [`markup`]: style attributes → `font` tag attributes
//! - [`render`]: tag attributes + content → markup string
//! - [`serializer`]: the fold over fragments and the command template
//! - [`settings`]: layered TOML configuration for the template values
//!
//! This is a pure lib: no printing, no environment access. The `sqf-diary` binary is the
//! only shell-facing piece.
//!
//! ## Example
//!
//! ```text
//! let doc = Document::from_json(r#"{"ops":[{"insert":"Hello\n"}]}"#)?;
//! to_sqf("Notes", &doc)
//! // player createDiaryRecord ["Diary", ["Notes", "Hello"]];
//! ```

pub mod delta;
pub mod error;
pub mod markup;
pub mod render;
pub mod serializer;
pub mod settings;

pub use delta::{Document, FontSize, InputFormat, Insert, StyleAttributes, StyledFragment};
pub use error::{Result, SqfError};
pub use markup::{map_attributes, FontSizeTable, MarkupTags};
pub use render::render_tag;
pub use serializer::{to_sqf, SerializerOptions, SqfSerializer};
