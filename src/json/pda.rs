//! Structural automaton for JSON token streams.
//!
//! Two pieces of state cooperate: the bracket stack checks nesting, and the
//! expectation cursor checks the grammar between brackets (colons, commas,
//! keys, values). Errors are recorded and scanning continues, so one pass
//! surfaces every independent defect.

use serde::Serialize;
use std::fmt;

use super::stack::{Bracket, BracketStack};
use super::tokenizer::{InvalidReason, Token, TokenKind};
use crate::emit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    UnexpectedToken,
    MismatchedBracket,
    UnbalancedBracket,
    MissingColon,
    MissingComma,
    TrailingComma,
    InvalidValue,
    UnterminatedString,
    UnexpectedEndOfInput,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::UnexpectedToken,
        ErrorKind::MismatchedBracket,
        ErrorKind::UnbalancedBracket,
        ErrorKind::MissingColon,
        ErrorKind::MissingComma,
        ErrorKind::TrailingComma,
        ErrorKind::InvalidValue,
        ErrorKind::UnterminatedString,
        ErrorKind::UnexpectedEndOfInput,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::MismatchedBracket => "MismatchedBracket",
            ErrorKind::UnbalancedBracket => "UnbalancedBracket",
            ErrorKind::MissingColon => "MissingColon",
            ErrorKind::MissingComma => "MissingComma",
            ErrorKind::TrailingComma => "TrailingComma",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::UnterminatedString => "UnterminatedString",
            ErrorKind::UnexpectedEndOfInput => "UnexpectedEndOfInput",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub error_type: ErrorKind,
    pub position: usize,
    pub line: usize,
    /// Open brackets at detection time, outermost first.
    #[serde(rename = "pda_stack_state")]
    pub stack_snapshot: Vec<String>,
    pub suggestion: String,
}

/// Where the input ends; used to place end-of-input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eof {
    pub position: usize,
    pub line: usize,
}

impl Eof {
    pub fn of(input: &str) -> Self {
        Self {
            position: input.len(),
            line: super::line_count(input),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A value at the top level or after a colon.
    Value,
    /// Right after `[`.
    ValueOrClose,
    /// Right after `{`.
    KeyOrClose,
    /// After a comma inside an object.
    Key,
    Colon,
    CommaOrClose,
    /// A complete top-level value has been read.
    End,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub errors: Vec<ValidationError>,
    pub final_stack: Vec<String>,
    pub max_depth: usize,
    pub token_count: usize,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct StructuralAutomaton<'t> {
    tokens: &'t [Token],
    stack: BracketStack,
    expect: Expect,
    errors: Vec<ValidationError>,
}

pub fn validate(tokens: &[Token], eof: Eof) -> Outcome {
    StructuralAutomaton::new(tokens).run(eof)
}

impl<'t> StructuralAutomaton<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            stack: BracketStack::new(),
            expect: Expect::Value,
            errors: Vec::new(),
        }
    }

    pub fn run(mut self, eof: Eof) -> Outcome {
        let tokens = self.tokens;
        for (i, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::BraceOpen | TokenKind::BracketOpen => self.open(token),
                TokenKind::BraceClose | TokenKind::BracketClose => self.close(token),
                TokenKind::Colon => self.colon(token),
                TokenKind::Comma => self.comma(token, tokens.get(i + 1)),
                TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Null => {
                    self.value(token)
                }
                TokenKind::Invalid(reason) => self.invalid(token, reason),
            }
        }
        self.finish(eof);

        Outcome {
            final_stack: self.stack.snapshot(),
            max_depth: self.stack.max_depth(),
            token_count: tokens.len(),
            errors: self.errors,
        }
    }

    fn in_object(&self) -> bool {
        self.stack.peek() == Some(Bracket::Brace)
    }

    fn describe_expected(&self) -> String {
        match self.expect {
            Expect::Value => "a value".to_string(),
            Expect::ValueOrClose => "a value or ']'".to_string(),
            Expect::KeyOrClose => "a string key or '}'".to_string(),
            Expect::Key => "a string key".to_string(),
            Expect::Colon => "':'".to_string(),
            Expect::CommaOrClose => match self.stack.peek() {
                Some(top) => format!("',' or '{}'", top.close()),
                None => "','".to_string(),
            },
            Expect::End => "end of input".to_string(),
        }
    }

    /// A value just completed in the current context.
    fn after_value(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::End
        } else {
            Expect::CommaOrClose
        };
    }

    fn open(&mut self, token: &Token) {
        let Some(bracket) = Bracket::opened_by(token.kind) else {
            return;
        };
        match self.expect {
            Expect::Value | Expect::ValueOrClose => {}
            Expect::Colon => emit!(
                self,
                ErrorKind::MissingColon,
                token,
                "insert ':' between the key and this {}",
                token.kind.describe()
            ),
            Expect::CommaOrClose => emit!(
                self,
                ErrorKind::MissingComma,
                token,
                "insert ',' before this {}",
                token.kind.describe()
            ),
            Expect::KeyOrClose | Expect::Key => emit!(
                self,
                ErrorKind::UnexpectedToken,
                token,
                "expected {}, found {}; object keys must be quoted strings",
                self.describe_expected(),
                token.kind.describe()
            ),
            Expect::End => emit!(
                self,
                ErrorKind::UnexpectedToken,
                token,
                "unexpected {} after the end of the document; wrap multiple values in an array",
                token.kind.describe()
            ),
        }
        self.stack.push(bracket);
        self.expect = match bracket {
            Bracket::Brace => Expect::KeyOrClose,
            Bracket::Square => Expect::ValueOrClose,
        };
    }

    fn close(&mut self, token: &Token) {
        let Some(bracket) = Bracket::closed_by(token.kind) else {
            return;
        };
        match self.stack.peek() {
            None => {
                emit!(
                    self,
                    ErrorKind::UnbalancedBracket,
                    token,
                    "remove this '{}'; there is no open '{}' to close",
                    bracket.close(),
                    bracket.open()
                );
                return;
            }
            Some(top) if top == bracket => {
                match self.expect {
                    Expect::Colon => emit!(
                        self,
                        ErrorKind::MissingColon,
                        token,
                        "add ':' and a value after the last key before '{}'",
                        bracket.close()
                    ),
                    Expect::Value | Expect::Key => emit!(
                        self,
                        ErrorKind::UnexpectedToken,
                        token,
                        "expected {} before '{}'",
                        self.describe_expected(),
                        bracket.close()
                    ),
                    _ => {}
                }
                self.stack.pop();
            }
            Some(top) => {
                emit!(
                    self,
                    ErrorKind::MismatchedBracket,
                    token,
                    "expected '{}' to close '{}', found '{}'",
                    top.close(),
                    top.open(),
                    bracket.close()
                );
                if !self.stack.contains(bracket) {
                    return;
                }
                // Close the unterminated inner frames along with the matching opener.
                while let Some(popped) = self.stack.pop() {
                    if popped == bracket {
                        break;
                    }
                }
            }
        }
        self.after_value();
    }

    fn colon(&mut self, token: &Token) {
        if self.expect == Expect::Colon {
            self.expect = Expect::Value;
        } else {
            emit!(
                self,
                ErrorKind::UnexpectedToken,
                token,
                "unexpected ':'; expected {}",
                self.describe_expected()
            );
        }
    }

    fn comma(&mut self, token: &Token, next: Option<&Token>) {
        if self.expect != Expect::CommaOrClose {
            emit!(
                self,
                ErrorKind::UnexpectedToken,
                token,
                "unexpected ','; expected {}",
                self.describe_expected()
            );
            return;
        }
        if let Some(close) = next.filter(|t| t.kind.is_close()) {
            // The closer is then accepted as if the comma were absent.
            emit!(
                self,
                ErrorKind::TrailingComma,
                token,
                "remove the trailing ',' before '{}'",
                close.text
            );
            return;
        }
        self.expect = if self.in_object() {
            Expect::Key
        } else {
            Expect::Value
        };
    }

    fn value(&mut self, token: &Token) {
        let is_key = token.kind == TokenKind::String;
        match self.expect {
            Expect::Value | Expect::ValueOrClose => self.after_value(),
            Expect::KeyOrClose | Expect::Key => {
                if !is_key {
                    emit!(
                        self,
                        ErrorKind::UnexpectedToken,
                        token,
                        "expected {}, found {} {}; object keys must be quoted strings",
                        self.describe_expected(),
                        token.kind.describe(),
                        token.text
                    );
                }
                self.expect = Expect::Colon;
            }
            Expect::Colon => {
                emit!(
                    self,
                    ErrorKind::MissingColon,
                    token,
                    "insert ':' between the key and {}",
                    token.text
                );
                self.after_value();
            }
            Expect::CommaOrClose => {
                emit!(
                    self,
                    ErrorKind::MissingComma,
                    token,
                    "insert ',' before {}",
                    token.text
                );
                if is_key && self.in_object() {
                    self.expect = Expect::Colon;
                }
            }
            Expect::End => emit!(
                self,
                ErrorKind::UnexpectedToken,
                token,
                "unexpected {} after the end of the document; wrap multiple values in an array",
                token.kind.describe()
            ),
        }
    }

    fn invalid(&mut self, token: &Token, reason: InvalidReason) {
        match reason {
            InvalidReason::UnterminatedString => emit!(
                self,
                ErrorKind::UnterminatedString,
                token,
                "close the string {} with '\"' before the end of the line",
                token.text
            ),
            InvalidReason::BadEscape => emit!(
                self,
                ErrorKind::InvalidValue,
                token,
                "invalid escape sequence in {}; use \\\", \\\\, \\/, \\b, \\f, \\n, \\r, \\t or \\uXXXX",
                token.text
            ),
            InvalidReason::ControlCharacter => emit!(
                self,
                ErrorKind::InvalidValue,
                token,
                "escape control characters inside {} (for example \\t or \\n)",
                token.text
            ),
            InvalidReason::MalformedNumber => emit!(
                self,
                ErrorKind::InvalidValue,
                token,
                "'{}' is not a valid JSON number; no leading zeros, '+' signs or trailing dots",
                token.text
            ),
            InvalidReason::UnknownLiteral => emit!(
                self,
                ErrorKind::InvalidValue,
                token,
                "'{}' is not a JSON literal; use true, false, null or quote it as a string",
                token.text
            ),
            InvalidReason::UnexpectedCharacter => emit!(
                self,
                ErrorKind::InvalidValue,
                token,
                "remove the unexpected character '{}'; expected {}",
                token.text,
                self.describe_expected()
            ),
        }

        // Stand in for whatever the lexeme was meant to be.
        match self.expect {
            Expect::KeyOrClose | Expect::Key => self.expect = Expect::Colon,
            Expect::End => {}
            _ => self.after_value(),
        }
    }

    fn finish(&mut self, eof: Eof) {
        if !self.stack.is_empty() {
            emit!(
                self,
                ErrorKind::UnexpectedEndOfInput,
                eof,
                "input ended inside {} open bracket(s); add '{}'",
                self.stack.depth(),
                self.stack.pending_closers()
            );
        } else if self.expect == Expect::Value {
            emit!(
                self,
                ErrorKind::UnexpectedEndOfInput,
                eof,
                "input contains no JSON value"
            );
        }
    }
}
