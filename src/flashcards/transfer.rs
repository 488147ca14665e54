//! Import and export of card lists
//!
//! Formats:
//! - CSV with a `question,answer` header
//! - JSON, a full set record as stored in flashcards.json
//! - plain text, one card per line with a configurable term delimiter

use std::io::{Read, Write};

use thiserror::Error;

use super::models::{FlashcardSet, NewCard};

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Term delimiter must not be empty")]
    EmptyDelimiter,
}

pub type Result<T> = std::result::Result<T, TransferError>;

/// Supported import/export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Csv,
    Json,
    Text,
}

impl TransferFormat {
    /// Guess a format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "txt" | "tsv" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Write a set's cards as CSV (progress is not exported)
pub fn export_csv<W: Write>(set: &FlashcardSet, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for card in &set.cards {
        wtr.serialize(NewCard::from(card))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read `question,answer` rows. Rows are returned as-is; blank cards are
/// filtered when the cards are stored.
pub fn import_csv<R: Read>(reader: R) -> Result<Vec<NewCard>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cards = Vec::new();
    for record in rdr.deserialize::<NewCard>() {
        cards.push(record?);
    }
    Ok(cards)
}

/// Serialize a whole set, progress included
pub fn export_json(set: &FlashcardSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(set)?)
}

pub fn import_json(content: &str) -> Result<FlashcardSet> {
    Ok(serde_json::from_str(content)?)
}

/// Parse plain text into cards. Lines without the term delimiter are skipped;
/// anything after a second delimiter belongs to the answer.
pub fn parse_delimited(
    content: &str,
    term_delimiter: &str,
    line_delimiter: &str,
) -> Result<Vec<NewCard>> {
    if term_delimiter.is_empty() {
        return Err(TransferError::EmptyDelimiter);
    }

    let lines: Vec<&str> = if line_delimiter.is_empty() || line_delimiter == "\n" {
        content.lines().collect()
    } else {
        content.split(line_delimiter).collect()
    };

    Ok(lines
        .into_iter()
        .filter_map(|line| {
            let (question, answer) = line.split_once(term_delimiter)?;
            Some(NewCard::new(question.trim(), answer.trim()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::{Card, CardProgress};

    fn sample_set() -> FlashcardSet {
        let mut cards = vec![
            Card::new("Largest planet?".into(), "Jupiter".into()),
            Card::new("Closest star, after the Sun?".into(), "Proxima Centauri".into()),
        ];
        cards[0].progress = Some(CardProgress {
            learned: true,
            times_correct: 4,
            times_wrong: 0,
        });
        FlashcardSet::new("Astronomy".to_string(), cards)
    }

    #[test]
    fn test_csv_export_then_import() {
        let set = sample_set();
        let mut buf = Vec::new();
        export_csv(&set, &mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("question,answer\n"));
        assert!(text.contains("\"Closest star, after the Sun?\""));

        let cards = import_csv(buf.as_slice()).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].answer, "Proxima Centauri");
    }

    #[test]
    fn test_csv_missing_column_is_an_error() {
        let input = "question\nonly a question\n";
        assert!(matches!(import_csv(input.as_bytes()), Err(TransferError::Csv(_))));
    }

    #[test]
    fn test_json_keeps_progress() {
        let set = sample_set();
        let json = export_json(&set).unwrap();
        let imported = import_json(&json).unwrap();
        assert_eq!(imported.cards[0].progress, set.cards[0].progress);
        assert_eq!(imported.set_name, "Astronomy");
    }

    #[test]
    fn test_parse_delimited() {
        let content = "H2O\twater\nno delimiter here\nNaCl\tsalt\textra\n";
        let cards = parse_delimited(content, "\t", "\n").unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0], NewCard::new("H2O", "water"));
        assert_eq!(cards[1].answer, "salt\textra");
    }

    #[test]
    fn test_parse_custom_line_delimiter() {
        let cards = parse_delimited("a - 1; b - 2;", " - ", ";").unwrap();
        assert_eq!(cards, vec![NewCard::new("a", "1"), NewCard::new("b", "2")]);

        assert!(matches!(
            parse_delimited("a", "", "\n"),
            Err(TransferError::EmptyDelimiter)
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TransferFormat::from_extension("CSV"), Some(TransferFormat::Csv));
        assert_eq!(TransferFormat::from_extension("json"), Some(TransferFormat::Json));
        assert_eq!(TransferFormat::from_extension("txt"), Some(TransferFormat::Text));
        assert_eq!(TransferFormat::from_extension("apkg"), None);
    }
}
