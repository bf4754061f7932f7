use crate::api::Arg;
use crate::constant::*;
use crate::input::Input;
use crate::matcher::Matcher;
use crate::parser::{commit, ParseResult, ParseValue, Parser};
use crate::tokens::{Token, TokenKind};
use crate::types::{TypeParser, Value};

/// Match a single token satisfying `predicate`.
///
/// An exhausted input fails with `on_empty`, and a token which doesn't satisfy the predicate fails with `on_mismatch(token)`.
/// Either way, the failure is located at the token under the cursor.
pub fn accept(
    predicate: impl Fn(&Token) -> bool + Send + Sync + 'static,
    on_empty: impl Into<String>,
    on_mismatch: impl Fn(&Token) -> String + Send + Sync + 'static,
) -> Parser<Token> {
    let on_empty = on_empty.into();
    Parser::new("token", move |input: &Input| match input.peek() {
        Err(_) => ParseResult::failure(on_empty.clone(), input.clone()),
        Ok(token) if predicate(token) => {
            ParseResult::success(ParseValue::Single(token.clone()), input.advance())
        }
        Ok(token) => ParseResult::failure(on_mismatch(token), input.clone()),
    })
}

/// Match a value token, and convert it with `type_parser`.
///
/// On any failure (including a failed conversion) the remaining input is reset to the value token,
/// so diagnostics underline the offending value.
pub fn value(type_parser: impl Into<TypeParser>) -> Parser<Value> {
    let type_parser = type_parser.into();
    let description = type_parser.name().to_string();

    accept(Token::is_value, EXPECTED_VALUE, unexpected)
        .coerce(move |token: Token| match token.text() {
            Some(text) => type_parser.parse(text),
            None => unreachable!("internal error - value tokens always carry text"),
        })
        .attempt()
        .describe(description)
}

fn unexpected(token: &Token) -> String {
    match token.kind() {
        TokenKind::LongOption(name) => format!("unexpected switch '{LONG_PREFIX}{name}'"),
        TokenKind::Equals => format!("unexpected '{EQUALS}'"),
        TokenKind::OptionsEnd => format!("unexpected '{OPTIONS_END}'"),
        TokenKind::Value(text) => format!("unexpected '{text}'"),
    }
}

/// Match a long option whose name `matcher` matches.
pub fn long_option(matcher: impl Into<Matcher>) -> Parser<Token> {
    let matcher = matcher.into();
    let description = format!("{LONG_PREFIX}{matcher}");
    let expected = description.clone();

    accept(
        move |token| token.is_long_option() && token.text().map_or(false, |name| matcher.matches(name)),
        EXPECTED_KEYWORD,
        move |token| format!("'{token}' doesn't match {expected}"),
    )
    .describe(description)
}

/// Match the `=` of `--name=value`.
pub fn equals() -> Parser<Token> {
    accept(Token::is_equals, format!("expected '{EQUALS}'"), unexpected).describe(EQUALS)
}

/// Match a lone `--`.
pub fn options_end() -> Parser<Token> {
    accept(Token::is_options_end, format!("expected '{OPTIONS_END}'"), unexpected)
        .describe(OPTIONS_END)
}

/// Match the command name `name`.
pub fn command(name: impl Into<String>) -> Parser<Token> {
    let name = name.into();
    let expected = name.clone();

    accept(
        move |token| token.is_value() && token.text() == Some(expected.as_str()),
        EXPECTED_COMMAND,
        |token| format!("unknown command '{token}'"),
    )
    .describe(name)
}

/// Match a positional argument called `name`.
/// Failures are attributed to the argument (ex: `expected a value for argument <name>`).
pub fn arg(name: impl Into<String>, type_parser: impl Into<TypeParser>) -> Parser<Arg> {
    let name = name.into();
    let description = format!("<{name}>");
    let label = name.clone();

    value(type_parser)
        .map_value(move |value| Arg::Positional {
            name: name.clone(),
            value,
        })
        .with_failure_message(move |message, _| format!("{message} for argument <{label}>"))
        .describe(description)
}

/// Match a keyword argument `--name value` or `--name=value`.
///
/// Underscores in `name` are matched by dashes (ex: `dry_run` is given as `--dry-run`).
/// Once the flag matches, the parse is committed to the value.
pub fn keyword_arg(name: impl Into<String>, type_parser: impl Into<TypeParser>) -> Parser<Arg> {
    let name = name.into();
    let type_parser = type_parser.into();
    let flag = name.replace('_', "-");
    let description = format!("{LONG_PREFIX}{flag} <{}>", type_parser.name());

    (long_option(flag.as_str()).discard::<Value>()
        + equals().optional().discard::<Value>()
        + commit(value(type_parser)))
    .map_value(move |value| Arg::Keyword {
        name: name.clone(),
        value,
    })
    .with_failure_message(move |message, _| format!("{message} for {LONG_PREFIX}{flag}"))
    .describe(description)
}
