//! Runs the real subprocess path against a small shell stand-in for pandoc.
#![cfg(unix)]

use readmegen_pipe::{convert_all, Conversion, Pandoc, RunError};
use std::fs;
use std::path::Path;

/// Accepts `--reference-links IN --css=NAME -o OUT`, fails if IN is missing.
const FAKE_PANDOC: &str = r#"
in="$2"
css="${3#--css=}"
out="$5"
[ -f "$in" ] || { echo "fake-pandoc: $in: no such file" >&2; exit 1; }
printf '<link rel="stylesheet" href="%s" />\n' "$css" > "$out"
cat "$in" >> "$out"
"#;

fn fake_pandoc(dir: &Path) -> Pandoc {
    let script = dir.join("fake-pandoc.sh");
    fs::write(&script, FAKE_PANDOC).unwrap();
    let command = format!("sh {}", shell_quote(&script));
    Pandoc::from_command(&command).unwrap()
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

fn jobs(dir: &Path) -> Vec<Conversion> {
    vec![
        Conversion::new("README.md", "kashyyyk.html").in_dir(dir),
        Conversion::new("license.txt", "license.html").in_dir(dir),
    ]
}

#[test]
fn test_both_documents_reference_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "# Kashyyyk\n").unwrap();
    fs::write(dir.path().join("license.txt"), "zlib license\n").unwrap();

    let report = convert_all(&fake_pandoc(dir.path()), &jobs(dir.path()), "yyyk.css");

    assert!(report.is_success());
    assert_eq!(report.converted.len(), 2);
    for name in ["kashyyyk.html", "license.html"] {
        let html = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(html.contains(r#"href="yyyk.css""#), "{name}: {html}");
    }
    let readme = fs::read_to_string(dir.path().join("kashyyyk.html")).unwrap();
    assert!(readme.contains("# Kashyyyk"));
}

#[test]
fn test_failed_conversion_reported_separately() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("license.txt"), "zlib license\n").unwrap();

    let report = convert_all(&fake_pandoc(dir.path()), &jobs(dir.path()), "kashyyyk.css");

    assert!(report.tool_missing.is_none());
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(
        report.failed[0].source,
        RunError::CommandFailed(_, status) if status.code() == Some(1)
    ));
    assert_eq!(report.converted, [dir.path().join("license.html")]);
    assert!(!dir.path().join("kashyyyk.html").exists());
}

#[test]
fn test_ignore_status_hides_failure() {
    let dir = tempfile::tempdir().unwrap();

    let converter = fake_pandoc(dir.path()).ignore_status();
    let report = convert_all(&converter, &jobs(dir.path()), "kashyyyk.css");

    assert!(report.is_success());
    assert_eq!(report.converted.len(), 2);
    assert!(!dir.path().join("kashyyyk.html").exists());
}

#[test]
fn test_missing_tool_leaves_outputs_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("kashyyyk.html");
    fs::write(&existing, "<p>stale</p>").unwrap();

    let converter = Pandoc::new("readmegen-no-such-converter");
    let report = convert_all(&converter, &jobs(dir.path()), "kashyyyk.css");

    assert_eq!(
        report.tool_missing.as_deref(),
        Some("readmegen-no-such-converter")
    );
    assert!(report.converted.is_empty());
    assert!(report.failed.is_empty());
    assert_eq!(fs::read_to_string(&existing).unwrap(), "<p>stale</p>");
    assert!(!dir.path().join("license.html").exists());
}
