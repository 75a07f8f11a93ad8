use std::fmt;

use super::tokenizer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Brace,
    Square,
}

impl Bracket {
    pub fn opened_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::BraceOpen => Some(Bracket::Brace),
            TokenKind::BracketOpen => Some(Bracket::Square),
            _ => None,
        }
    }

    pub fn closed_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::BraceClose => Some(Bracket::Brace),
            TokenKind::BracketClose => Some(Bracket::Square),
            _ => None,
        }
    }

    pub const fn open(self) -> char {
        match self {
            Bracket::Brace => '{',
            Bracket::Square => '[',
        }
    }

    pub const fn close(self) -> char {
        match self {
            Bracket::Brace => '}',
            Bracket::Square => ']',
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.open())
    }
}

/// Open brackets, outermost first.
#[derive(Debug, Clone, Default)]
pub struct BracketStack {
    items: Vec<Bracket>,
    max_depth: usize,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bracket: Bracket) {
        self.items.push(bracket);
        self.max_depth = self.max_depth.max(self.items.len());
    }

    pub fn pop(&mut self) -> Option<Bracket> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<Bracket> {
        self.items.last().copied()
    }

    pub fn contains(&self, bracket: Bracket) -> bool {
        self.items.contains(&bracket)
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the current contents, outermost first.
    pub fn snapshot(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }

    /// Closers needed to empty the stack, innermost first.
    pub fn pending_closers(&self) -> String {
        self.items.iter().rev().map(|b| b.close()).collect()
    }

    /// Rebuild a stack from the open/close tokens alone. Closers that do not
    /// match the top are skipped rather than reported; this only describes
    /// input the structural automaton has already accepted.
    pub fn replay(tokens: &[Token]) -> Self {
        let mut stack = Self::new();
        for token in tokens {
            if let Some(bracket) = Bracket::opened_by(token.kind) {
                stack.push(bracket);
            } else if let Some(bracket) = Bracket::closed_by(token.kind) {
                if stack.peek() == Some(bracket) {
                    stack.pop();
                }
            }
        }
        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::tokenizer::tokenize;

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut stack = BracketStack::new();
        stack.push(Bracket::Brace);
        stack.push(Bracket::Square);

        let snap = stack.snapshot();
        assert_eq!(snap, vec!["{", "["]);
        assert_eq!(stack.depth(), 2);

        stack.pop();
        assert_eq!(snap, vec!["{", "["], "snapshot must not alias the stack");
        assert_eq!(stack.snapshot(), vec!["{"]);
    }

    #[test]
    fn test_max_depth_survives_pops() {
        let mut stack = BracketStack::new();
        stack.push(Bracket::Square);
        stack.push(Bracket::Square);
        stack.push(Bracket::Brace);
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.max_depth(), 3);
    }

    #[test]
    fn test_pending_closers_innermost_first() {
        let mut stack = BracketStack::new();
        stack.push(Bracket::Brace);
        stack.push(Bracket::Square);
        stack.push(Bracket::Brace);
        assert_eq!(stack.pending_closers(), "}]}");
    }

    #[test]
    fn test_replay_valid_input_is_empty() {
        let stack = BracketStack::replay(&tokenize(r#"{"a": [{"b": []}]}"#));
        assert!(stack.is_empty());
        assert_eq!(stack.max_depth(), 4);
    }

    #[test]
    fn test_replay_skips_mismatched_closers() {
        let stack = BracketStack::replay(&tokenize("{ ] ["));
        assert_eq!(stack.snapshot(), vec!["{", "["]);
    }
}
