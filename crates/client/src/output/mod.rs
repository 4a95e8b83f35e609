//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Format a value as JSON or through its human-readable formatter.
pub fn format_output<T: serde::Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    pretty: impl FnOnce(&T) -> String,
) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_output_picks_formatter() {
        let values = vec!["a".to_string(), "b".to_string()];
        let pretty = |v: &[String]| v.join(", ");

        assert_eq!(format_output(&values[..], OutputFormat::Json, pretty), r#"["a","b"]"#);
        assert_eq!(format_output(&values[..], OutputFormat::Pretty, pretty), "a, b");
    }
}
