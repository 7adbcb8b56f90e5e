//! The documentation stylesheet.
//!
//! A [`Stylesheet`] is an ordered list of [`Rule`]s, each an ordered list of
//! [`Declaration`]s. The layout is fixed by [`Stylesheet::kashyyyk`]; only
//! the background gradient varies.
//!
//! # Output format
//!
//! ```css
//! body {
//!     align: center;
//!     background: linear-gradient(     to right, black 0px, ...);
//! }
//! h1 {
//!     box-shadow: 10px 5px 5px #555577;
//! }
//! ```
//!
//! Every line ends with `\n`, on every platform, so output is byte-identical
//! across runs and hosts.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::StyleError;
use crate::gradient::Gradient;

/// Indentation of declarations inside a rule block.
const INDENT: &str = "    ";

/// A single `property: value;` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// A selector and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Creates an empty rule for `selector`.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Adds a declaration.
    pub fn add(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value));
        self
    }

    /// Adds several prebuilt declarations.
    pub fn extend(mut self, declarations: impl IntoIterator<Item = Declaration>) -> Self {
        self.declarations.extend(declarations);
        self
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for decl in &self.declarations {
            writeln!(f, "{INDENT}{decl}")?;
        }
        writeln!(f, "}}")
    }
}

/// An ordered collection of rules rendered as one CSS file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    /// Creates an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rules in output order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Builds the Kashyyyk documentation stylesheet: a centered dark `body`
    /// carrying `gradient`, raised `h1` banners and shadowed `h2` headings.
    pub fn kashyyyk(gradient: &Gradient) -> Self {
        let body = Rule::new("body")
            .add("align", "center")
            .add("margin", "0px auto")
            .add("width", "50%")
            .add("color", "#888899")
            .add("font-family", "\"DejaVu sans\"")
            .extend(gradient.declarations());

        let h1 = Rule::new("h1")
            .add("box-shadow", "10px 5px 5px #555577")
            .add("color", "black")
            .add("padding-left", "1em")
            .add("padding-right", "1em")
            .add("padding-top", "0.5em")
            .add("padding-bottom", "0.25em")
            .add("border-color", "#666666")
            .add("background", "#AAAAAA")
            .add("border-radius", "8px")
            .add("border-color", "#220202");

        let h2 = Rule::new("h2").add("box-shadow", "5px 2px 2px #555577");

        Self::new().rule(body).rule(h1).rule(h2)
    }

    /// Renders the stylesheet to CSS text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Writes the rendered stylesheet to `path`, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), StyleError> {
        let path = path.as_ref();
        let css = self.render();
        fs::write(path, &css).map_err(|source| StyleError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = css.len(), "wrote stylesheet");
        Ok(())
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
