use std::sync::Arc;
use thiserror::Error;

use crate::tokens::Token;

/// Signals a [`Input::peek`] on an exhausted input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("empty input")]
pub struct EndOfInput;

/// An immutable cursor over a token sequence.
///
/// Advancing returns a new `Input`; the original remains valid, which is what lets alternation backtrack for free.
/// Cloning is cheap (the tokens are shared), and inputs may be shared across threads.
///
/// Two inputs are equal when their *remaining* tokens are equal; all exhausted inputs are equal.
#[derive(Clone)]
pub struct Input {
    tokens: Arc<[Token]>,
    position: usize,
}

impl Input {
    /// A cursor at the start of `tokens`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
            position: 0,
        }
    }

    /// The canonical exhausted input.
    pub fn empty() -> Self {
        Self::new(Vec::default())
    }

    /// The current token.
    pub fn peek(&self) -> Result<&Token, EndOfInput> {
        self.tokens.get(self.position).ok_or(EndOfInput)
    }

    /// The input just past the current token.
    /// Advancing an exhausted input yields an exhausted input.
    pub fn advance(&self) -> Input {
        if self.is_empty() {
            Input::empty()
        } else {
            Self {
                tokens: Arc::clone(&self.tokens),
                position: self.position + 1,
            }
        }
    }

    /// Whether every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// The number of tokens left to consume.
    pub fn len(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    /// The tokens left to consume.
    pub fn remaining(&self) -> &[Token] {
        if self.is_empty() {
            &[]
        } else {
            &self.tokens[self.position..]
        }
    }
}

impl From<Vec<Token>> for Input {
    fn from(tokens: Vec<Token>) -> Self {
        Input::new(tokens)
    }
}

impl PartialEq for Input {
    fn eq(&self, other: &Self) -> bool {
        self.remaining() == other.remaining()
    }
}

impl Eq for Input {}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.remaining()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::tokenize;

    #[test]
    fn input_empty() {
        let input = Input::empty();
        assert!(input.is_empty());
        assert_eq!(input.len(), 0);
        assert_eq!(input.peek(), Err(EndOfInput));
        assert_eq!(input.advance(), Input::empty());
    }

    #[test]
    fn input_advance() {
        // Setup
        let tokens = tokenize(&["a", "b"]);
        let input = Input::new(tokens.clone());

        // Execute
        let next = input.advance();
        let last = next.advance();

        // Verify
        assert_eq!(input.peek(), Ok(&tokens[0]));
        assert_eq!(input.len(), 2);
        assert_eq!(next.peek(), Ok(&tokens[1]));
        assert_eq!(next.len(), 1);
        assert!(last.is_empty());
        assert_eq!(last.peek(), Err(EndOfInput));
        assert!(last.advance().is_empty());
    }

    #[test]
    fn input_immutable() {
        // Setup
        let tokens = tokenize(&["a", "b"]);
        let input = Input::new(tokens.clone());

        // Execute
        let _ = input.advance().advance();

        // Verify
        assert_eq!(input.peek(), Ok(&tokens[0]));
        assert_eq!(input.remaining(), tokens.as_slice());
    }

    #[test]
    fn input_structural_equality() {
        let tokens = tokenize(&["a", "b", "c"]);
        let left = Input::new(tokens.clone()).advance();
        let right = Input::new(tokens[1..].to_vec());
        assert_eq!(left, right);
        assert_ne!(left, Input::new(tokens.clone()));
        assert_eq!(Input::new(tokens.clone()).advance().advance().advance(), Input::empty());
    }
}
