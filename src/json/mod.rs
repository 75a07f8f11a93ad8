pub mod pda;
pub mod stack;
pub mod tokenizer;

pub use pda::{ErrorKind, Eof, Outcome, StructuralAutomaton, ValidationError};
pub use stack::{Bracket, BracketStack};
pub use tokenizer::{tokenize, InvalidReason, Token, TokenKind, Tokenizer};

/// Number of lines, counting a trailing partial line.
pub fn line_count(text: &str) -> usize {
    1 + text.bytes().filter(|&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_reports_token_count() {
        let text = r#"{"k": [1, 2]}"#;
        let outcome = pda::validate(&tokenize(text), Eof::of(text));
        assert!(outcome.is_valid());
        assert_eq!(outcome.token_count, 9);
        assert_eq!(outcome.max_depth, 2);
    }

    #[test]
    fn test_eof_sits_on_last_line() {
        let text = "{\n  \"a\": [\n";
        let eof = Eof::of(text);
        assert_eq!(eof.line, line_count(text));
        assert_eq!(eof.position, text.len());
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("{}"), 1);
        assert_eq!(line_count("{\n}\n"), 3);
    }
}
