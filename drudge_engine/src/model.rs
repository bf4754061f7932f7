/// How a positional parameter binds to the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Precisely one value.
    Required,
    /// Zero or one value.
    Optional,
    /// Any number of values, including `0`.
    /// At most one per command, and only as the final positional parameter.
    Variadic,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The cardinality of a repetition parser.
///
/// Inspired by regex quantifiers: `*` and `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// `*`: May repeat any number of times, including `0`.
    ZeroOrMore,
    /// `+`: Must repeat at least once.
    OneOrMore,
}

impl std::fmt::Display for Repetition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Repetition::ZeroOrMore => write!(f, "*"),
            Repetition::OneOrMore => write!(f, "+"),
        }
    }
}
