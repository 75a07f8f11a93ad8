use regex::Regex;
use serde::Serialize;
use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$").unwrap());

/// Why the tokenizer could not classify a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvalidReason {
    /// A string ran into a newline or the end of input before its closing quote.
    UnterminatedString,
    BadEscape,
    /// A raw character below U+0020 (tab, carriage return, ...) inside a string.
    ControlCharacter,
    MalformedNumber,
    /// A bareword other than `true`, `false` or `null`.
    UnknownLiteral,
    UnexpectedCharacter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    Colon,
    Comma,
    String,
    Number,
    Boolean,
    Null,
    Invalid(InvalidReason),
}

impl TokenKind {
    pub fn is_close(self) -> bool {
        matches!(self, TokenKind::BraceClose | TokenKind::BracketClose)
    }

    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::BraceOpen => "'{'",
            TokenKind::BraceClose => "'}'",
            TokenKind::BracketOpen => "'['",
            TokenKind::BracketClose => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Invalid(_) => "invalid token",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// Byte offset of the first character.
    pub position: usize,
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}

pub struct Tokenizer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            line: 1,
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn string(&mut self) -> TokenKind {
        let mut defect = None;
        loop {
            // Strings never span lines; the newline is left for the main loop.
            let Some((_, c)) = self.chars.next_if(|&(_, c)| c != '\n') else {
                return TokenKind::Invalid(InvalidReason::UnterminatedString);
            };
            match c {
                '"' => return defect.map_or(TokenKind::String, TokenKind::Invalid),
                '\\' => match self.chars.next_if(|&(_, c)| c != '\n') {
                    Some((_, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')) => {}
                    Some((_, 'u')) => {
                        for _ in 0..4 {
                            if self
                                .chars
                                .next_if(|&(_, c)| c.is_ascii_hexdigit())
                                .is_none()
                            {
                                defect.get_or_insert(InvalidReason::BadEscape);
                                break;
                            }
                        }
                    }
                    Some(_) => {
                        defect.get_or_insert(InvalidReason::BadEscape);
                    }
                    None => return TokenKind::Invalid(InvalidReason::UnterminatedString),
                },
                // DEL and the C1 range are allowed unescaped.
                c if c < '\u{20}' => {
                    defect.get_or_insert(InvalidReason::ControlCharacter);
                }
                _ => {}
            }
        }
    }

    fn number(&mut self, start: usize) -> TokenKind {
        while self
            .chars
            .next_if(|&(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            .is_some()
        {}
        let end = self.offset();
        if NUMBER.is_match(&self.input[start..end]) {
            TokenKind::Number
        } else {
            TokenKind::Invalid(InvalidReason::MalformedNumber)
        }
    }

    fn word(&mut self, start: usize) -> TokenKind {
        while self
            .chars
            .next_if(|&(_, c)| c.is_alphanumeric() || c == '_')
            .is_some()
        {}
        let end = self.offset();
        match &self.input[start..end] {
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            _ => TokenKind::Invalid(InvalidReason::UnknownLiteral),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let (position, c) = self.chars.next()?;
            let line = self.line;
            let kind = match c {
                '\n' => {
                    self.line += 1;
                    continue;
                }
                ' ' | '\t' | '\r' => continue,
                '{' => TokenKind::BraceOpen,
                '}' => TokenKind::BraceClose,
                '[' => TokenKind::BracketOpen,
                ']' => TokenKind::BracketClose,
                ':' => TokenKind::Colon,
                ',' => TokenKind::Comma,
                '"' => self.string(),
                '-' | '0'..='9' => self.number(position),
                c if c.is_alphabetic() => self.word(position),
                _ => TokenKind::Invalid(InvalidReason::UnexpectedCharacter),
            };
            let end = self.offset();
            return Some(Token {
                kind,
                text: self.input[position..end].to_string(),
                line,
                position,
            });
        }
    }
}
