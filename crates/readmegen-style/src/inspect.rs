//! Reading a stylesheet back.
//!
//! The emitter builds CSS by concatenation, so nothing stops a bad gradient
//! prefix from leaking a stray `;` or `)` into the file. This module runs the
//! result through `cssparser` (the tokenizer used by Firefox) and recovers a
//! plain list of rules and declarations, which is what the `check` command
//! and the tests compare against.
//!
//! Only flat qualified rules are understood. At-rules and nested rules are
//! reported as parse errors; the documentation stylesheet uses neither.

use std::fs;
use std::path::Path;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

use crate::error::StyleError;

/// A declaration as it appears in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeclaration {
    pub property: String,
    /// Raw value text, trimmed, without the trailing `;`.
    pub value: String,
}

/// A rule as it appears in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub selector: String,
    pub declarations: Vec<ParsedDeclaration>,
}

impl ParsedRule {
    /// Declarations setting `property`, in source order.
    pub fn values<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.declarations
            .iter()
            .filter(move |d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// Number of declarations setting `property`.
    pub fn count(&self, property: &str) -> usize {
        self.values(property).count()
    }
}

type InspectError = &'static str;

/// Parses CSS text into its rules.
pub fn parse_stylesheet(css: &str) -> Result<Vec<ParsedRule>, StyleError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collector = RuleCollector;

    let mut rules = Vec::new();
    for result in cssparser::StyleSheetParser::new(&mut parser, &mut collector) {
        match result {
            Ok(rule) => rules.push(rule),
            Err((err, _)) => return Err(to_style_error(err)),
        }
    }
    Ok(rules)
}

/// Reads and parses a stylesheet file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<ParsedRule>, StyleError> {
    let path = path.as_ref();
    let css = fs::read_to_string(path).map_err(|source| StyleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_stylesheet(&css)
}

/// Checks that `rules` are exactly `body`, `h1`, `h2` in that order and
/// that `body` carries at least one `background` declaration.
pub fn verify_layout(rules: &[ParsedRule]) -> Result<(), StyleError> {
    let selectors: Vec<&str> = rules.iter().map(|r| r.selector.as_str()).collect();
    if selectors != ["body", "h1", "h2"] {
        return Err(StyleError::Layout(format!(
            "expected rules [body, h1, h2], found [{}]",
            selectors.join(", ")
        )));
    }
    if rules[0].count("background") == 0 {
        return Err(StyleError::Layout(
            "body has no background declarations".to_string(),
        ));
    }
    Ok(())
}

fn to_style_error(err: ParseError<'_, InspectError>) -> StyleError {
    let message = match err.kind {
        ParseErrorKind::Custom(msg) => msg.to_string(),
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    };
    StyleError::Parse {
        line: err.location.line + 1,
        column: err.location.column,
        message,
    }
}

/// Consumes every remaining token and returns the source text they span.
fn rest_as_text<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next().is_ok() {}
    input.slice_from(start).trim()
}

struct RuleCollector;

impl<'i> QualifiedRuleParser<'i> for RuleCollector {
    type Prelude = String;
    type QualifiedRule = ParsedRule;
    type Error = InspectError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let selector = rest_as_text(input);
        if selector.is_empty() {
            return Err(input.new_custom_error("empty selector"));
        }
        Ok(selector.to_string())
    }

    fn parse_block<'t>(
        &mut self,
        selector: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut decl_parser = DeclarationCollector;
        let mut declarations = Vec::new();
        for item in RuleBodyParser::new(input, &mut decl_parser) {
            match item {
                Ok(decl) => declarations.push(decl),
                Err((err, _)) => return Err(err),
            }
        }
        Ok(ParsedRule {
            selector,
            declarations,
        })
    }
}

impl<'i> AtRuleParser<'i> for RuleCollector {
    type Prelude = ();
    type AtRule = ParsedRule;
    type Error = InspectError;
}

struct DeclarationCollector;

impl<'i> DeclarationParser<'i> for DeclarationCollector {
    type Declaration = ParsedDeclaration;
    type Error = InspectError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let value = rest_as_text(input);
        if value.is_empty() {
            return Err(input.new_custom_error("declaration has no value"));
        }
        Ok(ParsedDeclaration {
            property: name.as_ref().to_string(),
            value: value.to_string(),
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type AtRule = ParsedDeclaration;
    type Error = InspectError;
}

impl<'i> QualifiedRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type QualifiedRule = ParsedDeclaration;
    type Error = InspectError;
}

impl<'i> RuleBodyItemParser<'i, ParsedDeclaration, InspectError> for DeclarationCollector {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
