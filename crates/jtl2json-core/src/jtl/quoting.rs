//! Strict quote checking for CSV input.
//!
//! The `csv` reader accepts a quote inside an unquoted field and treats end of
//! input as closing an open quoted field. JTL files with either defect are
//! truncated or corrupt, so they are rejected before parsing.

use crate::error::Jtl2JsonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// A `"` seen inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
    /// Closing quote followed by `\r`; only a line end may follow.
    ClosedCr,
}

/// Reject bare quotes in unquoted fields, text after a closing quote, and
/// quoted fields that never close. Messages carry one-based line numbers.
pub fn check_quoting(data: &[u8]) -> Result<(), Jtl2JsonError> {
    let mut state = State::FieldStart;
    let mut line = 1usize;
    let mut quote_line = 1usize;

    for &byte in data {
        state = match (state, byte) {
            (State::FieldStart, b'"') => {
                quote_line = line;
                State::Quoted
            }
            (State::FieldStart | State::Unquoted, b',' | b'\n') => State::FieldStart,
            (State::FieldStart | State::Unquoted, b'"') => {
                return Err(Jtl2JsonError::Parse(format!(
                    "line {line}: bare \" in non-quoted field"
                )));
            }
            (State::FieldStart | State::Unquoted, _) => State::Unquoted,
            (State::Quoted, b'"') => State::QuoteInQuoted,
            (State::Quoted, _) => State::Quoted,
            (State::QuoteInQuoted, b'"') => State::Quoted,
            (State::QuoteInQuoted | State::ClosedCr, b',' | b'\n') => State::FieldStart,
            (State::QuoteInQuoted, b'\r') => State::ClosedCr,
            (State::QuoteInQuoted | State::ClosedCr, _) => {
                return Err(Jtl2JsonError::Parse(format!(
                    "line {line}: extraneous or missing \" in quoted field"
                )));
            }
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    if state == State::Quoted {
        return Err(Jtl2JsonError::Parse(format!(
            "line {quote_line}: quoted field is never closed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_message(data: &str) -> String {
        match check_quoting(data.as_bytes()) {
            Err(Jtl2JsonError::Parse(msg)) => msg,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_plain_and_quoted_fields() {
        let data = "1700000000,100,Home\r\n1700000001,5,\"Search, \"\"all\"\"\"\r\n";
        assert!(check_quoting(data.as_bytes()).is_ok());
    }

    #[test]
    fn accepts_newline_inside_quotes() {
        assert!(check_quoting(b"1,2,\"multi\nline\"\n").is_ok());
    }

    #[test]
    fn accepts_closing_quote_at_end_of_input() {
        assert!(check_quoting(b"1,2,\"Home\"").is_ok());
        assert!(check_quoting(b"").is_ok());
    }

    #[test]
    fn unterminated_quote_reports_opening_line() {
        let msg = parse_message("1,100,Home\n2,200,\"Home\n3,300,Home\n");
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("never closed"), "{msg}");
    }

    #[test]
    fn bare_quote_in_unquoted_field() {
        let msg = parse_message("1,100,Home\n2,100,Ho\"me\n");
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("bare"), "{msg}");
    }

    #[test]
    fn leading_space_makes_quote_bare() {
        assert!(check_quoting(b"1,100, \"Home\"\n").is_err());
    }

    #[test]
    fn text_after_closing_quote() {
        let msg = parse_message("1,100,\"Ho\"me\n");
        assert!(msg.contains("extraneous"), "{msg}");
    }
}
