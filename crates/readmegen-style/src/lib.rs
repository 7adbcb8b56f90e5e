//! # readmegen-style - Documentation Stylesheet Emitter
//!
//! Builds the CSS file shared by the Kashyyyk HTML documentation: a dark
//! centered page whose background is a horizontal gradient, declared once per
//! vendor prefix, plus fixed heading styles.
//!
//! ```rust
//! use readmegen_style::{Gradient, Stylesheet};
//!
//! let gradient = Gradient::new("black", "#222233").prefix("linear-gradient(to right, ");
//! gradient.validate().unwrap();
//!
//! let css = Stylesheet::kashyyyk(&gradient).render();
//! assert!(css.starts_with("body {"));
//! ```
//!
//! The emitted text can be read back with [`inspect::parse_stylesheet`] to
//! confirm that every gradient declaration came out well-formed.

pub mod error;
pub mod gradient;
pub mod inspect;
pub mod stylesheet;

pub use error::StyleError;
pub use gradient::Gradient;
pub use inspect::{parse_file, parse_stylesheet, verify_layout, ParsedDeclaration, ParsedRule};
pub use stylesheet::{Declaration, Rule, Stylesheet};
