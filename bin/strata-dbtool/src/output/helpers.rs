//! Helper functions for output formatting
//!
//! This module provides output functions and helper utilities for consistent
//! formatting across all commands.

use std::io::{self, Write};

use serde::Serialize;
use strata_cli_common::errors::{DisplayableError, DisplayedError};

use super::traits::Formattable;
use crate::cli::OutputFormat;

/// Output function that handles all formats
///
/// This is the idiomatic way - separate the formatting concern from the data.
/// Types must implement Serialize for JSON and Formattable for porcelain.
pub(crate) fn output<T: Serialize + Formattable>(
    data: &T,
    format: OutputFormat,
) -> Result<(), DisplayedError> {
    output_to(data, format, &mut io::stdout())
}

/// Output function that writes to a specific writer (useful for testing)
pub(crate) fn output_to<T: Serialize + Formattable, W: Write>(
    data: &T,
    format: OutputFormat,
    writer: &mut W,
) -> Result<(), DisplayedError> {
    match format {
        OutputFormat::Porcelain => {
            let porcelain_str = data.format_porcelain();
            writeln!(writer, "{porcelain_str}")
                .internal_error("Failed to write porcelain output")?;
        }
        OutputFormat::Json => {
            let json_str =
                serde_json::to_string_pretty(data).internal_error("Failed to serialize to JSON")?;
            writeln!(writer, "{json_str}").internal_error("Failed to write JSON output")?;
        }
    }
    Ok(())
}

/// Helper function for creating porcelain field output
pub(crate) fn porcelain_field<T: std::fmt::Display>(key: &str, value: T) -> String {
    format!("{key}: {value}")
}

/// Helper function for porcelain boolean formatting
pub(crate) fn porcelain_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
