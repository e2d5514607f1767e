//! CSV tokenizer
//!
//! Splits statement text into [`RawRow`]s one physical line at a time, so a
//! stray quote can never pull later lines into its row. Within a line a `"`
//! toggles quoting wherever it appears and quoted delimiters stay in the
//! field. Quote characters are dropped, except `""` inside quotes, which is a
//! literal `"`. Every field is trimmed.
//! Column counts are never validated, so a malformed line becomes a short (or
//! long) row for the format to reject.

use tracing::debug;

use crate::domain::RawRow;

/// Restartable row source over a statement's text
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    text: &'a str,
    delimiter: u8,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.trim_start_matches('\u{feff}'),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Lazily tokenize the text; each call starts again from the top
    pub fn rows(&self) -> impl Iterator<Item = RawRow> + 'a {
        let delimiter = char::from(self.delimiter);
        self.text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(move |(index, line)| RawRow::new(split_line(index, line, delimiter)))
    }
}

/// Tokenize `text` with the default comma delimiter
pub fn tokenize(text: &str) -> Vec<RawRow> {
    Tokenizer::new(text).rows().collect()
}

fn split_line(index: usize, line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            c if c == delimiter && !quoted => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    if quoted {
        debug!(line = index, "Unbalanced quote; quoting ends with the line");
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(row: &RawRow) -> Vec<&str> {
        row.fields().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_splits_lines_and_fields() {
        let rows =
            tokenize("30/06/2025,-4.24,PAYPAL,1234.56\r\n01/07/2025,10.00,SALARY,1244.56\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["30/06/2025", "-4.24", "PAYPAL", "1234.56"]);
        assert_eq!(fields(&rows[1])[2], "SALARY");
    }

    #[test]
    fn test_quoted_field_keeps_delimiter() {
        let rows = tokenize("\"30/06/2025\",\"-4.24\",\"SMITH, J RENT\",\"+1,234.56\"");
        assert_eq!(
            fields(&rows[0]),
            vec!["30/06/2025", "-4.24", "SMITH, J RENT", "+1,234.56"]
        );
    }

    #[test]
    fn test_quote_inside_field_toggles_quoting() {
        let rows = tokenize("30/06/2025,-4.24,SMITH \"J, RENT\" PAID,1.00");
        assert_eq!(
            fields(&rows[0]),
            vec!["30/06/2025", "-4.24", "SMITH J, RENT PAID", "1.00"]
        );
    }

    #[test]
    fn test_doubled_quote_inside_quotes_is_literal() {
        let rows = tokenize("a,\"SAY \"\"HI\"\", BOB\",\"\",c");
        assert_eq!(fields(&rows[0]), vec!["a", "SAY \"HI\", BOB", "", "c"]);
    }

    #[test]
    fn test_unbalanced_quote_stays_on_its_line() {
        let rows = tokenize(
            "30/06/2025,\"-4.24,PAYPAL AUSTRALIA,1234.56\n\
             01/07/2025,-10.00,COLES,1224.56\n\
             02/07/2025,-5.00,ALDI,1219.56\n",
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(fields(&rows[0]), vec!["30/06/2025", "-4.24,PAYPAL AUSTRALIA,1234.56"]);
        assert_eq!(fields(&rows[1]), vec!["01/07/2025", "-10.00", "COLES", "1224.56"]);
        assert_eq!(fields(&rows[2])[2], "ALDI");
    }

    #[test]
    fn test_trims_fields() {
        let rows = tokenize("  a  , \"b\" ,c ");
        assert_eq!(fields(&rows[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_skips_blank_lines() {
        let rows = tokenize("\n\na,b\n   \n\nc,d\n\n");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let rows = tokenize("a,b,c,d\nsingle\n,,\n");
        assert_eq!(rows.iter().map(RawRow::len).collect::<Vec<_>>(), vec![4, 1, 3]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n \r\n").is_empty());
    }

    #[test]
    fn test_rows_restart() {
        let tokenizer = Tokenizer::new("a,b\nc,d");
        assert_eq!(tokenizer.rows().count(), 2);
        assert_eq!(tokenizer.rows().count(), 2);
    }

    #[test]
    fn test_custom_delimiter_and_bom() {
        let rows: Vec<_> = Tokenizer::new("\u{feff}a;b;c").with_delimiter(b';').rows().collect();
        assert_eq!(fields(&rows[0]), vec!["a", "b", "c"]);
    }
}
