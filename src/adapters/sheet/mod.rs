//! Sheet Adapters - CSV Input and Output
//!
//! CSV stands in for the uploaded spreadsheet: the reader handles the
//! vertical/horizontal orientation transform, the writer emits the
//! annotated result and the feature sheet.

use anyhow::{Result, ensure};

pub mod reader;
pub mod writer;

pub use reader::CsvSheetReader;
pub use writer::CsvResultWriter;

/// Field delimiter as the single byte the csv crate expects.
///
/// # Errors
/// The delimiter is not ASCII, or is a quote or line break.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    ensure!(
        delimiter.is_ascii() && !matches!(delimiter, '"' | '\n' | '\r'),
        "unusable CSV delimiter {delimiter:?}: must be a single ASCII character other than a quote or line break"
    );
    Ok(delimiter as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_delimiters_accepted() {
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = delimiter_byte('é').unwrap_err();
        assert!(err.to_string().contains("'é'"));
        assert!(delimiter_byte('"').is_err());
        assert!(delimiter_byte('\n').is_err());
    }
}
