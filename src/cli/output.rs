//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Print a serializable payload as JSON or YAML
pub fn print_serialized<T: Serialize>(format: OutputFormat, payload: &T) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(payload).into_diagnostic()?);
        }
        _ => {
            print!("{}", serde_yml::to_string(payload).into_diagnostic()?);
        }
    }
    Ok(())
}
