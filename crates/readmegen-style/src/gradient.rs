//! Vendor-prefixed background gradients.
//!
//! The page background is a horizontal gradient that fades from the start
//! color at both edges into a solid band of the end color, exactly as wide
//! as the centered content column. Older browsers only understand prefixed
//! gradient functions, so the same gradient is declared once per prefix and
//! the browser keeps the last one it can parse.
//!
//! Each prefix is the opening of a gradient function up to and including the
//! direction argument, e.g. `"linear-gradient(     to right, "`. The shared
//! color stops are appended to it:
//!
//! ```text
//! <prefix><start> 0px, <end>  calc(50% - ( <w>px / 2 ) ), <end>  calc( 50% + ( <w>px / 2 ) ), <start> 100%)
//! ```

use serde::Deserialize;

use crate::error::StyleError;
use crate::inspect::parse_stylesheet;
use crate::stylesheet::Declaration;

/// Default outer color of the gradient.
pub const DEFAULT_START: &str = "black";

/// Default color of the central band.
pub const DEFAULT_END: &str = "#222233";

/// Default width of the central band, in pixels.
pub const DEFAULT_WIDTH_PX: u32 = 928;

/// Default prefixes, oldest syntax first so the standard one wins.
pub const DEFAULT_PREFIXES: &[&str] = &[
    "-webkit-linear-gradient(left,  ",
    "-o-linear-gradient(     right, ",
    "-moz-linear-gradient(   right, ",
    "linear-gradient(     to right, ",
];

/// A background gradient declared once per vendor prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Gradient {
    /// Color at both edges.
    pub start: String,
    /// Color of the central band.
    pub end: String,
    /// Width of the central band in pixels.
    pub width_px: u32,
    /// Gradient function openings, emitted in order.
    pub prefixes: Vec<String>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            width_px: DEFAULT_WIDTH_PX,
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Gradient {
    /// Creates a gradient with no prefixes.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            width_px: DEFAULT_WIDTH_PX,
            prefixes: Vec::new(),
        }
    }

    /// Appends a prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Sets the width of the central band.
    pub fn width_px(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    /// The color stops shared by every prefix, including the closing paren.
    pub fn suffix(&self) -> String {
        let (start, end, w) = (&self.start, &self.end, self.width_px);
        format!(
            "{start} 0px, {end}  calc(50% - ( {w}px / 2 ) ), {end}  calc( 50% + ( {w}px / 2 ) ), {start} 100%)"
        )
    }

    /// One `background` declaration per prefix, in prefix order.
    pub fn declarations(&self) -> Vec<Declaration> {
        let suffix = self.suffix();
        self.prefixes
            .iter()
            .map(|prefix| Declaration::new("background", format!("{prefix}{suffix}")))
            .collect()
    }

    /// Checks that every prefix yields a syntactically complete declaration.
    ///
    /// A prefix must open exactly one more parenthesis than it closes, since
    /// the suffix closes one. Each color and each finished declaration must
    /// tokenize back as exactly one declaration with the same value, which
    /// rules out comment openers, unterminated strings and stray escapes.
    /// At least one prefix is required; `body` without a background is not
    /// a valid page stylesheet.
    pub fn validate(&self) -> Result<(), StyleError> {
        validate_color("start", &self.start)?;
        validate_color("end", &self.end)?;

        if self.prefixes.is_empty() {
            return Err(StyleError::NoPrefixes);
        }

        let suffix = self.suffix();
        for prefix in &self.prefixes {
            if prefix.trim().is_empty() {
                return Err(StyleError::prefix(prefix, "prefix is empty"));
            }
            if let Some(c) = find_terminator(prefix) {
                return Err(StyleError::prefix(prefix, format!("contains '{c}'")));
            }
            match paren_depth(prefix) {
                Some(1) => {}
                Some(depth) => {
                    return Err(StyleError::prefix(
                        prefix,
                        format!("must leave exactly one parenthesis open, leaves {depth}"),
                    ))
                }
                None => {
                    return Err(StyleError::prefix(
                        prefix,
                        "closes a parenthesis it never opened",
                    ))
                }
            }
            if !round_trips("background", &format!("{prefix}{suffix}")) {
                return Err(StyleError::prefix(
                    prefix,
                    "does not parse back as a single declaration",
                ));
            }
        }
        Ok(())
    }
}

/// True if `property: value;` parses back as one declaration with the same value.
fn round_trips(property: &str, value: &str) -> bool {
    let css = format!("body {{\n    {property}: {value};\n}}\n");
    match parse_stylesheet(&css) {
        Ok(rules) => match rules.as_slice() {
            [rule] => {
                rule.selector == "body"
                    && rule.declarations.len() == 1
                    && rule.declarations[0].property == property
                    && rule.declarations[0].value == value.trim()
            }
            _ => false,
        },
        Err(_) => false,
    }
}

fn validate_color(role: &'static str, value: &str) -> Result<(), StyleError> {
    if value.trim().is_empty() {
        return Err(StyleError::color(role, value, "color is empty"));
    }
    if let Some(c) = find_terminator(value) {
        return Err(StyleError::color(role, value, format!("contains '{c}'")));
    }
    if paren_depth(value) != Some(0) {
        return Err(StyleError::color(role, value, "unbalanced parentheses"));
    }
    if !round_trips("color", value) {
        return Err(StyleError::color(
            role,
            value,
            "does not parse back as a single value",
        ));
    }
    Ok(())
}

fn find_terminator(s: &str) -> Option<char> {
    s.chars().find(|c| matches!(c, ';' | '{' | '}'))
}

/// Net open parentheses, or `None` if the depth ever goes negative.
fn paren_depth(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    Some(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: &str =
        "#222233  calc(50% - ( 928px / 2 ) ), #222233  calc( 50% + ( 928px / 2 ) ), black 100%);";

    #[test]
    fn test_declaration_shape() {
        let gradient = Gradient::new("black", "#222233").prefix("a(");
        let decls = gradient.declarations();
        assert_eq!(decls.len(), 1);
        assert_eq!(
            decls[0].to_string(),
            format!("background: a(black 0px, {CENTER}")
        );
    }

    #[test]
    fn test_prefix_order_is_preserved() {
        let gradient = Gradient::new("black", "#222233")
            .prefix("c(")
            .prefix("a(")
            .prefix("b(");
        let values: Vec<_> = gradient
            .declarations()
            .into_iter()
            .map(|d| d.value[..2].to_string())
            .collect();
        assert_eq!(values, ["c(", "a(", "b("]);
    }

    #[test]
    fn test_width_is_substituted() {
        let gradient = Gradient::new("white", "red").width_px(640);
        assert_eq!(
            gradient.suffix(),
            "white 0px, red  calc(50% - ( 640px / 2 ) ), red  calc( 50% + ( 640px / 2 ) ), white 100%)"
        );
    }

    #[test]
    fn test_default_gradient_is_valid() {
        let gradient = Gradient::default();
        assert_eq!(gradient.prefixes.len(), 4);
        gradient.validate().unwrap();
    }

    #[test]
    fn test_rejects_unbalanced_prefix() {
        let err = Gradient::new("black", "white")
            .prefix("linear-gradient(to right, ")
            .prefix("broken((")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidPrefix { ref prefix, .. } if prefix == "broken(("));
    }

    #[test]
    fn test_rejects_prefix_without_open_paren() {
        let err = Gradient::new("black", "white")
            .prefix("linear-gradient ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidPrefix { .. }));
    }

    #[test]
    fn test_rejects_prefix_closing_first() {
        let err = Gradient::new("black", "white")
            .prefix(")x((")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("never opened"));
    }

    #[test]
    fn test_rejects_terminator_in_color() {
        let err = Gradient::new("black; color: red", "white")
            .prefix("a(")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidColor { role: "start", .. }));
    }

    #[test]
    fn test_rejects_comment_opener_in_color() {
        let err = Gradient::new("black/*", "#222233")
            .prefix("a(")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidColor { role: "start", .. }));
    }

    #[test]
    fn test_rejects_quote_in_prefix() {
        let err = Gradient::new("black", "#222233")
            .prefix("a(\"")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidPrefix { ref prefix, .. } if prefix == "a(\""));
    }

    #[test]
    fn test_rejects_quote_in_color() {
        let err = Gradient::new("black", "'#222233")
            .prefix("a(")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidColor { role: "end", .. }));
    }

    #[test]
    fn test_rejects_trailing_escape_in_color() {
        let err = Gradient::new("black\\", "#222233")
            .prefix("a(")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidColor { role: "start", .. }));
    }

    #[test]
    fn test_rejects_comment_opener_in_prefix() {
        let err = Gradient::new("black", "#222233")
            .prefix("a(/* ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidPrefix { .. }));
    }

    #[test]
    fn test_rejects_empty_prefix_list() {
        let gradient = Gradient {
            prefixes: Vec::new(),
            ..Gradient::default()
        };
        assert!(matches!(gradient.validate(), Err(StyleError::NoPrefixes)));
    }

    #[test]
    fn test_accepts_functional_color() {
        Gradient::new("rgb(0, 0, 0)", "#222233")
            .prefix("a(")
            .validate()
            .unwrap();
    }

    #[test]
    fn test_rejects_empty_color() {
        let err = Gradient::new("black", "  ").validate().unwrap_err();
        assert!(matches!(err, StyleError::InvalidColor { role: "end", .. }));
    }
}
