use crate::converter::{ConvertError, Conversion, Converter};
use std::path::PathBuf;

/// Outcome of converting a batch of documents.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Outputs written, in job order.
    pub converted: Vec<PathBuf>,
    /// Jobs where the converter ran but did not succeed.
    pub failed: Vec<ConvertError>,
    /// Set when the converter could not be found; no jobs ran after that.
    pub tool_missing: Option<String>,
}

impl ConversionReport {
    /// True unless a conversion ran and failed. A missing tool is not a failure.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert each job in order.
///
/// A missing converter ends the batch with a single warning, leaving every
/// output untouched. Any other failure is logged and recorded, and the
/// remaining jobs still run.
pub fn convert_all(
    converter: &dyn Converter,
    jobs: &[Conversion],
    stylesheet: &str,
) -> ConversionReport {
    let mut report = ConversionReport::default();

    for job in jobs {
        match converter.convert(job, stylesheet) {
            Ok(()) => {
                tracing::info!(
                    input = %job.input.display(),
                    output = %job.output.display(),
                    "converted"
                );
                report.converted.push(job.output.clone());
            }
            Err(err) if err.is_tool_missing() => {
                tracing::warn!(
                    "{} was not installed. Not generating HTML readme.",
                    converter.program()
                );
                report.tool_missing = Some(converter.program().to_string());
                break;
            }
            Err(err) => {
                tracing::error!("{err}");
                report.failed.push(err);
            }
        }
    }

    report
}
