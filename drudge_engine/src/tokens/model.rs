use crate::constant::*;

/// Where a token came from on the command line.
///
/// Offsets and lengths are measured in characters, relative to the argument at `arg_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Index of the originating argument.
    pub arg_index: usize,
    /// Character offset within the argument.
    pub start: usize,
    /// Length in characters.
    pub length: usize,
}

impl Location {
    /// A location `length` characters long, `start` characters into argument `arg_index`.
    pub fn new(arg_index: usize, start: usize, length: usize) -> Self {
        Self {
            arg_index,
            start,
            length,
        }
    }
}

/// The classification of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A plain value: `hello`, or the `value` in `--name=value`.
    Value(String),
    /// A long option `--name`; holds the name without the dashes.
    LongOption(String),
    /// The `=` inside `--name=value`.
    Equals,
    /// A lone `--`.
    OptionsEnd,
}

/// A classified, located unit of the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    location: Location,
}

impl Token {
    /// A token of `kind` at `location`.
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }

    /// A [`TokenKind::Value`] token.
    pub fn value(text: impl Into<String>, location: Location) -> Self {
        Self::new(TokenKind::Value(text.into()), location)
    }

    /// A [`TokenKind::LongOption`] token; `name` excludes the dashes.
    pub fn long_option(name: impl Into<String>, location: Location) -> Self {
        Self::new(TokenKind::LongOption(name.into()), location)
    }

    /// A [`TokenKind::Equals`] token.
    pub fn equals(location: Location) -> Self {
        Self::new(TokenKind::Equals, location)
    }

    /// A [`TokenKind::OptionsEnd`] token.
    pub fn options_end(location: Location) -> Self {
        Self::new(TokenKind::OptionsEnd, location)
    }

    /// The classification.
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Where the token came from.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The text payload, for the kinds that carry one.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Value(text) | TokenKind::LongOption(text) => Some(text),
            TokenKind::Equals | TokenKind::OptionsEnd => None,
        }
    }

    /// Whether this is a [`TokenKind::Value`].
    pub fn is_value(&self) -> bool {
        matches!(self.kind, TokenKind::Value(_))
    }

    /// Whether this is a [`TokenKind::LongOption`].
    pub fn is_long_option(&self) -> bool {
        matches!(self.kind, TokenKind::LongOption(_))
    }

    /// Whether this is a [`TokenKind::Equals`].
    pub fn is_equals(&self) -> bool {
        self.kind == TokenKind::Equals
    }

    /// Whether this is a [`TokenKind::OptionsEnd`].
    pub fn is_options_end(&self) -> bool {
        self.kind == TokenKind::OptionsEnd
    }
}

/// Renders the token as it appeared on the command line.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Value(text) => write!(f, "{text}"),
            TokenKind::LongOption(name) => write!(f, "{LONG_PREFIX}{name}"),
            TokenKind::Equals => write!(f, "{EQUALS}"),
            TokenKind::OptionsEnd => write!(f, "{OPTIONS_END}"),
        }
    }
}
