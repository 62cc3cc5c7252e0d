//! Tag rendering
//!
//! ## Format
//!
//! - Attributes render as ` key='value'`, in the given order
//! - With content: `<font color='red'>hi<font/>`
//! - Without content: `<font color='red' />`
//!
//! The closing marker repeats the tag name followed by `/>` instead of the usual `</font>`.
//! The diary parser of the game expects exactly this form.
//!
//! Nothing is escaped. Quotes or angle brackets in values and content pass through as-is.

use crate::markup::AttrValue;

/// Render one tag, wrapping `content` when it is non-empty.
pub fn render_tag(name: &str, attributes: &[(&str, AttrValue)], content: Option<&str>) -> String {
    let open = format!("<{name}");
    let mut start = open.clone();
    for (key, value) in attributes {
        start.push_str(&format!(" {key}='{value}'"));
    }

    match content {
        Some(content) if !content.is_empty() => format!("{start}>{content}{open}/>"),
        _ => format!("{start} />"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_without_content() {
        let attrs = [("color", AttrValue::from("red"))];
        assert_eq!(render_tag("font", &attrs, None), "<font color='red' />");
        assert_eq!(render_tag("font", &attrs, Some("")), "<font color='red' />");
    }

    #[test]
    fn test_wraps_content() {
        let attrs = [("color", AttrValue::from("red"))];
        assert_eq!(
            render_tag("font", &attrs, Some("hi")),
            "<font color='red'>hi<font/>"
        );
    }

    #[test]
    fn test_attribute_order_is_kept() {
        let attrs = [
            ("color", AttrValue::from("#00FF00")),
            ("size", AttrValue::from(27.69)),
        ];
        assert_eq!(
            render_tag("font", &attrs, Some("World")),
            "<font color='#00FF00' size='27.69'>World<font/>"
        );
    }

    #[test]
    fn test_no_attributes() {
        assert_eq!(render_tag("br", &[], None), "<br />");
        assert_eq!(render_tag("t", &[], Some("x")), "<t>x<t/>");
    }

    #[test]
    fn test_nested_rendering_rewraps_previous_output() {
        let inner = render_tag("font", &[("size", AttrValue::from(13.0))], Some("a"));
        let outer = render_tag("font", &[("color", AttrValue::from("blue"))], Some(&inner));
        assert_eq!(
            outer,
            "<font color='blue'><font size='13'>a<font/><font/>"
        );
    }

    #[test]
    fn test_no_escaping() {
        let attrs = [("color", AttrValue::from("a'b"))];
        assert_eq!(
            render_tag("font", &attrs, Some("<&>")),
            "<font color='a'b'><&><font/>"
        );
    }
}
