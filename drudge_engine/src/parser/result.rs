use std::ops::Add;

use crate::input::Input;

/// The accumulated content of a successful parse.
///
/// `ParseValue` forms a monoid under `+`, with [`ParseValue::Empty`] as its identity.
/// This lets sequencing merge results without knowing whether each side produced zero, one, or many items.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseValue<T> {
    /// Nothing was produced (ex: a skipped optional, or a consumed marker).
    Empty,
    /// Exactly one value.
    Single(T),
    /// An ordered sequence of values.
    Seq(Vec<T>),
}

impl<T> Default for ParseValue<T> {
    fn default() -> Self {
        ParseValue::Empty
    }
}

impl<T> ParseValue<T> {
    /// Whether this is `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, ParseValue::Empty)
    }

    /// Apply `f` to every contained item, preserving the shape.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> ParseValue<U> {
        match self {
            ParseValue::Empty => ParseValue::Empty,
            ParseValue::Single(value) => ParseValue::Single(f(value)),
            ParseValue::Seq(values) => ParseValue::Seq(values.into_iter().map(f).collect()),
        }
    }

    /// Flatten into the contained items, in order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ParseValue::Empty => Vec::default(),
            ParseValue::Single(value) => vec![value],
            ParseValue::Seq(values) => values,
        }
    }

    /// The single item, if this is a `Single`.
    pub fn into_single(self) -> Option<T> {
        match self {
            ParseValue::Single(value) => Some(value),
            ParseValue::Empty | ParseValue::Seq(_) => None,
        }
    }
}

impl<T> Add for ParseValue<T> {
    type Output = ParseValue<T>;

    fn add(self, other: Self) -> Self::Output {
        match (self, other) {
            (ParseValue::Empty, x) | (x, ParseValue::Empty) => x,
            (ParseValue::Single(a), ParseValue::Single(b)) => ParseValue::Seq(vec![a, b]),
            (ParseValue::Single(a), ParseValue::Seq(mut bs)) => {
                bs.insert(0, a);
                ParseValue::Seq(bs)
            }
            (ParseValue::Seq(mut as_), ParseValue::Single(b)) => {
                as_.push(b);
                ParseValue::Seq(as_)
            }
            (ParseValue::Seq(mut as_), ParseValue::Seq(bs)) => {
                as_.extend(bs);
                ParseValue::Seq(as_)
            }
        }
    }
}

/// The outcome of running a parser.
///
/// * `Success` carries the value and the input just past what was consumed.
/// * `Failure` is a recoverable rejection: alternation may try another branch from the original input.
/// * `Error` is a committed rejection: alternation propagates it without trying any other branch.
///
/// For both rejections, `remaining` points at the place the parse went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    /// The parser accepted its input.
    Success {
        /// What was produced.
        value: ParseValue<T>,
        /// The input left to consume.
        remaining: Input,
    },
    /// The parser rejected its input; alternatives may still be tried.
    Failure {
        /// Why the input was rejected.
        message: String,
        /// Where the rejection happened.
        remaining: Input,
    },
    /// The parser rejected its input after committing; no alternatives are tried.
    Error {
        /// Why the input was rejected.
        message: String,
        /// Where the rejection happened.
        remaining: Input,
    },
}

impl<T> ParseResult<T> {
    /// A successful parse of `value`, with `remaining` left to consume.
    pub fn success(value: ParseValue<T>, remaining: Input) -> Self {
        ParseResult::Success { value, remaining }
    }

    /// A recoverable rejection, located at `remaining`.
    pub fn failure(message: impl Into<String>, remaining: Input) -> Self {
        ParseResult::Failure {
            message: message.into(),
            remaining,
        }
    }

    /// An unrecoverable rejection, located at `remaining`.
    pub fn error(message: impl Into<String>, remaining: Input) -> Self {
        ParseResult::Error {
            message: message.into(),
            remaining,
        }
    }

    /// Whether this is a `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// Whether this is a `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, ParseResult::Failure { .. })
    }

    /// Whether this is an `Error`.
    pub fn is_error(&self) -> bool {
        matches!(self, ParseResult::Error { .. })
    }

    /// The input left over (for a rejection, where it happened).
    pub fn remaining(&self) -> &Input {
        match self {
            ParseResult::Success { remaining, .. }
            | ParseResult::Failure { remaining, .. }
            | ParseResult::Error { remaining, .. } => remaining,
        }
    }

    /// The rejection message, if this is not a `Success`.
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure { message, .. } | ParseResult::Error { message, .. } => {
                Some(message)
            }
        }
    }

    /// Transform the value of a `Success`; rejections pass through unchanged.
    pub fn map<U>(self, f: impl FnOnce(ParseValue<T>) -> ParseValue<U>) -> ParseResult<U> {
        match self {
            ParseResult::Success { value, remaining } => ParseResult::success(f(value), remaining),
            ParseResult::Failure { message, remaining } => ParseResult::failure(message, remaining),
            ParseResult::Error { message, remaining } => ParseResult::error(message, remaining),
        }
    }

    /// Monadic bind.
    ///
    /// `f` receives the value and the remaining input of a `Success`, and decides the next result.
    /// Rejections short-circuit.
    pub fn flat_map<U>(self, f: impl FnOnce(ParseValue<T>, Input) -> ParseResult<U>) -> ParseResult<U> {
        match self {
            ParseResult::Success { value, remaining } => f(value, remaining),
            ParseResult::Failure { message, remaining } => ParseResult::failure(message, remaining),
            ParseResult::Error { message, remaining } => ParseResult::error(message, remaining),
        }
    }
}

/// `Success + Success` combines the values (the right side decides the remaining input).
/// Any rejection propagates unchanged, the left side taking precedence.
impl<T> Add for ParseResult<T> {
    type Output = ParseResult<T>;

    fn add(self, other: Self) -> Self::Output {
        self.flat_map(|left, _| other.map(|right| left + right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::tokenize;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn random_value() -> ParseValue<u8> {
        let mut rng = thread_rng();

        match rng.gen_range(0..3) {
            0 => ParseValue::Empty,
            1 => ParseValue::Single(rng.gen()),
            _ => {
                let length = rng.gen_range(0..5);
                ParseValue::Seq((0..length).map(|_| rng.gen()).collect())
            }
        }
    }

    #[rstest]
    #[case(ParseValue::Empty, ParseValue::Empty, ParseValue::Empty)]
    #[case(ParseValue::Empty, ParseValue::Single(1), ParseValue::Single(1))]
    #[case(ParseValue::Single(1), ParseValue::Empty, ParseValue::Single(1))]
    #[case(ParseValue::Single(1), ParseValue::Single(2), ParseValue::Seq(vec![1, 2]))]
    #[case(ParseValue::Single(1), ParseValue::Seq(vec![2, 3]), ParseValue::Seq(vec![1, 2, 3]))]
    #[case(ParseValue::Seq(vec![1, 2]), ParseValue::Single(3), ParseValue::Seq(vec![1, 2, 3]))]
    #[case(ParseValue::Seq(vec![1]), ParseValue::Seq(vec![2, 3]), ParseValue::Seq(vec![1, 2, 3]))]
    #[case(ParseValue::Seq(vec![]), ParseValue::Empty, ParseValue::Seq(vec![]))]
    fn parse_value_add(
        #[case] left: ParseValue<u8>,
        #[case] right: ParseValue<u8>,
        #[case] expected: ParseValue<u8>,
    ) {
        assert_eq!(left + right, expected);
    }

    #[test]
    fn parse_value_identity() {
        for _ in 0..100 {
            let x = random_value();
            assert_eq!(ParseValue::Empty + x.clone(), x);
            assert_eq!(x.clone() + ParseValue::Empty, x);
        }
    }

    #[test]
    fn parse_value_associative() {
        for _ in 0..100 {
            let a = random_value();
            let b = random_value();
            let c = random_value();
            assert_eq!(
                (a.clone() + b.clone()) + c.clone(),
                a.clone() + (b.clone() + c.clone())
            );
        }
    }

    #[test]
    fn parse_value_associative_shape() {
        let singles = [
            ParseValue::Single(1),
            ParseValue::Single(2),
            ParseValue::Single(3),
        ];
        let [a, b, c] = singles;
        assert_eq!(
            (a.clone() + b.clone()) + c.clone(),
            a + (b + c),
        );
    }

    #[test]
    fn parse_value_map() {
        assert_eq!(ParseValue::<u8>::Empty.map(|v| v + 1), ParseValue::Empty);
        assert_eq!(ParseValue::Single(1).map(|v| v + 1), ParseValue::Single(2));
        assert_eq!(
            ParseValue::Seq(vec![1, 2]).map(|v| v + 1),
            ParseValue::Seq(vec![2, 3])
        );
    }

    #[test]
    fn parse_result_add() {
        // Setup
        let input = Input::new(tokenize(&["a", "b"]));
        let middle = input.advance();
        let end = middle.advance();

        // Execute
        let both = ParseResult::success(ParseValue::Single(1), middle.clone())
            + ParseResult::success(ParseValue::Single(2), end.clone());
        let left_failure = ParseResult::<u8>::failure("left", input.clone())
            + ParseResult::error("right", end.clone());
        let right_error = ParseResult::success(ParseValue::Single(1), middle.clone())
            + ParseResult::error("right", end.clone());

        // Verify
        assert_eq!(both, ParseResult::success(ParseValue::Seq(vec![1, 2]), end.clone()));
        assert_eq!(left_failure, ParseResult::failure("left", input));
        assert_eq!(right_error, ParseResult::error("right", end));
    }

    #[test]
    fn parse_result_flat_map() {
        // Setup
        let input = Input::new(tokenize(&["a"]));
        let success = ParseResult::success(ParseValue::Single(1u8), input.clone());
        let failure = ParseResult::<u8>::failure("nope", input.clone());

        // Execute
        let mapped = success.flat_map(|value, remaining| {
            ParseResult::success(value.map(|v| v * 10), remaining.advance())
        });
        let short_circuited = failure.flat_map(|_, remaining| {
            ParseResult::<u8>::success(ParseValue::Empty, remaining)
        });

        // Verify
        assert_eq!(mapped, ParseResult::success(ParseValue::Single(10), Input::empty()));
        assert_eq!(short_circuited, ParseResult::failure("nope", input));
    }

    #[test]
    fn parse_result_accessors() {
        let failure = ParseResult::<u8>::failure("f", Input::empty());
        let error = ParseResult::<u8>::error("e", Input::empty());
        let success = ParseResult::<u8>::success(ParseValue::Empty, Input::empty());
        assert!(failure.is_failure() && !failure.is_success() && !failure.is_error());
        assert!(error.is_error());
        assert!(success.is_success());
        assert_eq!(failure.message(), Some("f"));
        assert_eq!(error.message(), Some("e"));
        assert_eq!(success.message(), None);
    }
}
