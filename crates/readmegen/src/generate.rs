//! The two generation steps: write the stylesheet, then convert documents.

use std::path::{Path, PathBuf};

use readmegen_pipe::{convert_all, ConversionReport, Conversion, Converter};
use readmegen_style::{parse_file, verify_layout, ParsedRule, StyleError, Stylesheet};

use crate::config::Config;

/// Source documents and the HTML pages they become.
pub const DOCUMENTS: [(&str, &str); 2] = [
    ("README.md", "kashyyyk.html"),
    ("license.txt", "license.html"),
];

/// The document conversions, resolved against `dir`.
pub fn documents(dir: &Path) -> Vec<Conversion> {
    DOCUMENTS
        .iter()
        .map(|(input, output)| Conversion::new(*input, *output).in_dir(dir))
        .collect()
}

/// Path the stylesheet is written to.
pub fn stylesheet_path(config: &Config, dir: &Path) -> PathBuf {
    dir.join(&config.stylesheet)
}

/// Renders the stylesheet for `config`.
pub fn render_stylesheet(config: &Config) -> String {
    Stylesheet::kashyyyk(&config.gradient).render()
}

/// Writes the stylesheet into `dir`, replacing any previous one.
pub fn emit_stylesheet(config: &Config, dir: &Path) -> Result<PathBuf, StyleError> {
    let path = stylesheet_path(config, dir);
    Stylesheet::kashyyyk(&config.gradient).write_to(&path)?;
    Ok(path)
}

/// Writes the stylesheet, then converts both documents against it.
///
/// A stylesheet write failure aborts before any conversion. Conversion
/// problems are reported in the returned [`ConversionReport`].
pub fn generate(
    config: &Config,
    dir: &Path,
    converter: &dyn Converter,
) -> Result<ConversionReport, StyleError> {
    emit_stylesheet(config, dir)?;
    Ok(convert_all(converter, &documents(dir), &config.stylesheet))
}

/// Parses a stylesheet file and checks its rule layout.
pub fn check(path: &Path) -> Result<Vec<ParsedRule>, StyleError> {
    let rules = parse_file(path)?;
    verify_layout(&rules)?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmegen_pipe::ConvertError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingConverter {
        stylesheets: Mutex<Vec<String>>,
    }

    impl Converter for RecordingConverter {
        fn program(&self) -> &str {
            "recorder"
        }

        fn convert(&self, job: &Conversion, stylesheet: &str) -> Result<(), ConvertError> {
            // The stylesheet must already be on disk when conversion starts.
            let dir = job.output.parent().unwrap();
            assert!(dir.join(stylesheet).is_file());
            self.stylesheets.lock().unwrap().push(stylesheet.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_documents_resolved_in_dir() {
        let jobs = documents(Path::new("/src/kashyyyk"));
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].input, Path::new("/src/kashyyyk/README.md"));
        assert_eq!(jobs[0].output, Path::new("/src/kashyyyk/kashyyyk.html"));
        assert_eq!(jobs[1].input, Path::new("/src/kashyyyk/license.txt"));
        assert_eq!(jobs[1].output, Path::new("/src/kashyyyk/license.html"));
    }

    #[test]
    fn test_generate_writes_stylesheet_first() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            stylesheet: "yyyk.css".into(),
            ..Config::default()
        };
        let converter = RecordingConverter::default();

        let report = generate(&config, dir.path(), &converter).unwrap();

        assert!(report.is_success());
        assert_eq!(
            *converter.stylesheets.lock().unwrap(),
            ["yyyk.css", "yyyk.css"]
        );
        let written = std::fs::read_to_string(dir.path().join("yyyk.css")).unwrap();
        assert_eq!(written, render_stylesheet(&config));
    }

    #[test]
    fn test_generate_stops_on_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            stylesheet: "missing/yyyk.css".into(),
            ..Config::default()
        };
        let converter = RecordingConverter::default();

        let err = generate(&config, dir.path(), &converter).unwrap_err();

        assert!(matches!(err, StyleError::Write { .. }));
        assert!(converter.stylesheets.lock().unwrap().is_empty());
    }

    #[test]
    fn test_check_accepts_emitted_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = emit_stylesheet(&Config::default(), dir.path()).unwrap();
        let rules = check(&path).unwrap();
        assert_eq!(rules[0].count("background"), 4);
    }

    #[test]
    fn test_check_rejects_foreign_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.css");
        std::fs::write(&path, "p { color: red; }\n").unwrap();
        assert!(matches!(check(&path), Err(StyleError::Layout(_))));
    }
}
