use std::ops::{Add, BitOr};
use std::sync::Arc;
use thiserror::Error;

use crate::input::Input;
use crate::model::Repetition;
use crate::parser::{ErrorContext, ParseResult, ParseValue};
use crate::tokens::{tokenize, Token};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A malformed grammar declaration (ex: a variadic parameter that is not in final position).
///
/// This is a programming error in the command declarations, reported when the `Command`/`Kit` is built.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// A failed parse of user input.
///
/// Carries the full token list and the tokens that remained unconsumed at the point of failure,
/// so the caller can render where the input went wrong (see [`ParseError::context`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("error: {message}")]
pub struct ParseError {
    message: String,
    tokens: Vec<Token>,
    remaining: Vec<Token>,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, tokens: Vec<Token>, remaining: Vec<Token>) -> Self {
        Self {
            message: message.into(),
            tokens,
            remaining,
        }
    }

    /// The failure message (without the `error: ` prefix).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// All the tokens of the command line.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The tokens which had not been consumed when the parse failed.
    pub fn remaining(&self) -> &[Token] {
        &self.remaining
    }

    /// The two-line rendering: the command line, and a line marking the offending token.
    pub fn context(&self) -> ErrorContext {
        ErrorContext::new(self.tokens.clone(), self.remaining.first().cloned())
    }

    /// The full diagnostic: `error: <message>` followed by the [`ParseError::context`] lines.
    pub fn diagnostic(&self) -> String {
        format!("{self}\n{}", self.context())
    }
}

type ParseFn<T> = Arc<dyn Fn(&Input) -> ParseResult<T> + Send + Sync>;

/// A composable parser from [`Input`] to [`ParseResult`].
///
/// Parsers are immutable and stateless: build them once, then run them any number of times (from any thread).
/// Each parser carries a description, used when composing error messages and when displaying grammars.
///
/// ### Example
/// ```
/// # use drudge_engine as drudge;
/// use drudge::{command, Repetition};
///
/// let greeting = command("hi").repeat_until(Repetition::ZeroOrMore, command("no"));
/// let result = greeting.parse_args(&["hi", "hi", "no"]);
///
/// assert!(result.is_success());
/// assert_eq!(result.remaining().len(), 1);
/// ```
pub struct Parser<T> {
    function: ParseFn<T>,
    description: String,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
            description: self.description.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("description", &self.description)
            .finish()
    }
}

impl<T> std::fmt::Display for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl<T: Send + Sync + 'static> Parser<T> {
    /// Wrap a parse function, displayed as `description`.
    pub fn new(
        description: impl Into<String>,
        function: impl Fn(&Input) -> ParseResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            function: Arc::new(function),
            description: description.into(),
        }
    }

    /// Run the parser.
    pub fn parse(&self, input: &Input) -> ParseResult<T> {
        (self.function)(input)
    }

    /// Tokenize the raw arguments, and run the parser over them.
    pub fn parse_args<S: AsRef<str>>(&self, args: &[S]) -> ParseResult<T> {
        self.parse(&Input::new(tokenize(args)))
    }

    /// Tokenize the raw arguments, run the parser over them, and unwrap the successful value.
    /// A rejected parse becomes a [`ParseError`].
    pub fn parse_or_error<S: AsRef<str>>(&self, args: &[S]) -> Result<ParseValue<T>, ParseError> {
        let tokens = tokenize(args);

        match self.parse(&Input::new(tokens.clone())) {
            ParseResult::Success { value, .. } => Ok(value),
            ParseResult::Failure { message, remaining }
            | ParseResult::Error { message, remaining } => Err(ParseError::new(
                message,
                tokens,
                remaining.remaining().to_vec(),
            )),
        }
    }

    /// Attach a display description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The display description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Transform the whole result.
    pub fn map<U: Send + Sync + 'static>(
        self,
        f: impl Fn(ParseResult<T>) -> ParseResult<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        let description = self.description.clone();
        Parser::new(description, move |input| f(self.parse(input)))
    }

    /// Transform each value wrapped inside a `Success`.
    pub fn map_value<U: Send + Sync + 'static>(
        self,
        f: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Parser<U> {
        self.map_result(move |value| value.map(&f))
    }

    /// Transform the [`ParseValue`] container of a `Success` (ex: to tell `Single` from `Seq`).
    pub fn map_result<U: Send + Sync + 'static>(
        self,
        f: impl Fn(ParseValue<T>) -> ParseValue<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        self.map(move |result| result.map(&f))
    }

    /// Monadic bind: the value of this parser chooses the parser for the remaining input.
    pub fn and_then<U: Send + Sync + 'static>(
        self,
        f: impl Fn(ParseValue<T>) -> Parser<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        let description = self.description.clone();
        Parser::new(description, move |input| {
            self.parse(input)
                .flat_map(|value, remaining| f(value).parse(&remaining))
        })
    }

    /// Keep the consumption of this parser, but drop its value.
    pub fn discard<U: Send + Sync + 'static>(self) -> Parser<U> {
        self.map_result(|_| ParseValue::Empty)
    }

    /// Convert a single value; anything else (including a failed conversion) is a `Failure`.
    pub fn coerce<U: Send + Sync + 'static>(
        self,
        f: impl Fn(T) -> Result<U, String> + Send + Sync + 'static,
    ) -> Parser<U> {
        self.map(move |result| {
            result.flat_map(|value, remaining| match value {
                ParseValue::Single(value) => match f(value) {
                    Ok(converted) => ParseResult::success(ParseValue::Single(converted), remaining),
                    Err(message) => ParseResult::failure(message, remaining),
                },
                ParseValue::Empty | ParseValue::Seq(_) => ParseResult::failure(
                    "coercion is possible only with single values",
                    remaining,
                ),
            })
        })
    }

    /// Sequencing: run `self`, then `other` on what remains, combining the values with `+`.
    ///
    /// A rejection from either side propagates with its own remaining input,
    /// so error locations point at the failing token rather than the start of the sequence.
    pub fn seq(self, other: Parser<T>) -> Parser<T> {
        let description = join_descriptions(&self.description, &other.description);
        Parser::new(description, move |input| {
            self.parse(input)
                .flat_map(|left, remaining| other.parse(&remaining).map(|right| left + right))
        })
    }

    /// Alternation: try `self`, falling back to `other` (from the same input) on a `Failure`.
    ///
    /// An `Error` from `self` is committed and returned without trying `other`.
    /// When both sides fail, the failure which got further into the input wins; on a tie, `other`'s failure wins.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        let description = format!("{} | {}", self.description, other.description);
        Parser::new(description, move |input| match self.parse(input) {
            ParseResult::Failure { message, remaining } => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("'{self}' failed ({message}), trying '{other}'.");
                }

                let right = other.parse(input);

                match right {
                    ParseResult::Failure { .. } if remaining.len() < right.remaining().len() => {
                        ParseResult::Failure { message, remaining }
                    }
                    _ => right,
                }
            }
            success_or_error => success_or_error,
        })
    }

    /// Make this parser optional: a `Failure` becomes an `Empty` success on the original input.
    /// An `Error` still propagates.
    pub fn optional(self) -> Parser<T> {
        let description = format!("[{}]", self.description);
        Parser::new(description, move |input| match self.parse(input) {
            ParseResult::Failure { .. } => ParseResult::success(ParseValue::Empty, input.clone()),
            success_or_error => success_or_error,
        })
    }

    /// Forbid backtracking past this parser: a `Failure` becomes an `Error` (same message and location).
    pub fn commit(self) -> Parser<T> {
        let description = self.description.clone();
        Parser::new(description, move |input| match self.parse(input) {
            ParseResult::Failure { message, remaining } => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Committing failure of '{self}': {message}.");
                }

                ParseResult::Error { message, remaining }
            }
            success_or_error => success_or_error,
        })
    }

    /// Reset the remaining input of a rejection to where this parser started.
    pub fn attempt(self) -> Parser<T> {
        let description = self.description.clone();
        Parser::new(description, move |input| match self.parse(input) {
            ParseResult::Failure { message, .. } => ParseResult::failure(message, input.clone()),
            ParseResult::Error { message, .. } => ParseResult::error(message, input.clone()),
            success => success,
        })
    }

    /// Succeed (consuming nothing) exactly when this parser does not succeed.
    pub fn reject<U: Send + Sync + 'static>(self) -> Parser<U> {
        let description = format!("!{}", self.description);
        Parser::new(description, move |input| {
            let result = self.parse(input);

            if result.is_success() {
                ParseResult::failure(format!("unexpected {self}"), result.remaining().clone())
            } else {
                ParseResult::success(ParseValue::Empty, input.clone())
            }
        })
    }

    /// Repeat this parser until it fails.
    pub fn repeat(self, repetition: Repetition) -> Parser<T> {
        self.repeat_with::<T>(repetition, None)
    }

    /// Repeat this parser, non-greedily: stop at the first position where `until` would succeed
    /// (even if this parser could also match there), or when this parser fails.
    /// `until` is only checked, never consumed.
    pub fn repeat_until<U: Send + Sync + 'static>(
        self,
        repetition: Repetition,
        until: Parser<U>,
    ) -> Parser<T> {
        self.repeat_with(repetition, Some(until))
    }

    fn repeat_with<U: Send + Sync + 'static>(
        self,
        repetition: Repetition,
        until: Option<Parser<U>>,
    ) -> Parser<T> {
        let description = match repetition {
            Repetition::ZeroOrMore => format!("[{} ...]", self.description),
            Repetition::OneOrMore => format!("{0} [{0} ...]", self.description),
        };

        Parser::new(description, move |input| {
            let mut accumulated = ParseValue::Empty;
            let mut remaining = input.clone();
            let mut count = 0;
            let mut last_failure = None;

            loop {
                if let Some(until) = &until {
                    if until.parse(&remaining).is_success() {
                        break;
                    }
                }

                match self.parse(&remaining) {
                    ParseResult::Success {
                        value,
                        remaining: next,
                    } => {
                        let progressed = next.len() < remaining.len();
                        accumulated = accumulated + value;
                        remaining = next;
                        count += 1;

                        if !progressed {
                            break;
                        }
                    }
                    ParseResult::Failure {
                        message,
                        remaining: at,
                    } => {
                        last_failure.replace((message, at));
                        break;
                    }
                    error => return error,
                }
            }

            #[cfg(feature = "tracing_debug")]
            {
                debug!("'{self}' repeated {count} times.");
            }

            if count == 0 && repetition == Repetition::OneOrMore {
                match last_failure {
                    Some((message, at)) => ParseResult::failure(message, at),
                    None => ParseResult::failure(format!("expected {self}"), remaining),
                }
            } else {
                ParseResult::success(accumulated, remaining)
            }
        })
    }

    /// Rewrite the message of a rejection; `rewrite` receives the old message and the input this parser started on.
    pub fn with_failure_message(
        self,
        rewrite: impl Fn(&str, &Input) -> String + Send + Sync + 'static,
    ) -> Parser<T> {
        let description = self.description.clone();
        Parser::new(description, move |input| match self.parse(input) {
            ParseResult::Failure { message, remaining } => {
                ParseResult::failure(rewrite(&message, input), remaining)
            }
            ParseResult::Error { message, remaining } => {
                ParseResult::error(rewrite(&message, input), remaining)
            }
            success => success,
        })
    }
}

fn join_descriptions(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (false, true) => left.to_string(),
        (false, false) => format!("{left} {right}"),
    }
}

/// `a + b` is [`Parser::seq`].
impl<T: Send + Sync + 'static> Add for Parser<T> {
    type Output = Parser<T>;

    fn add(self, other: Parser<T>) -> Self::Output {
        self.seq(other)
    }
}

/// `a | b` is [`Parser::or`].
impl<T: Send + Sync + 'static> BitOr for Parser<T> {
    type Output = Parser<T>;

    fn bitor(self, other: Parser<T>) -> Self::Output {
        self.or(other)
    }
}

/// See [`Parser::commit`].
pub fn commit<T: Send + Sync + 'static>(parser: Parser<T>) -> Parser<T> {
    parser.commit()
}

/// See [`Parser::attempt`].
pub fn attempt<T: Send + Sync + 'static>(parser: Parser<T>) -> Parser<T> {
    parser.attempt()
}

/// A parser that always succeeds with `value`, consuming nothing.
pub fn success<T: Clone + Send + Sync + 'static>(value: ParseValue<T>) -> Parser<T> {
    Parser::new("", move |input| ParseResult::success(value.clone(), input.clone()))
}

/// A parser that matches the end of input, failing with `message` otherwise.
pub fn eos<T: Send + Sync + 'static>(message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    Parser::new("", move |input| {
        if input.is_empty() {
            ParseResult::success(ParseValue::Empty, input.clone())
        } else {
            ParseResult::failure(message.clone(), input.clone())
        }
    })
}
