use crate::constant::*;
use crate::tokens::{Location, Token, TokenKind};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Convert raw command line arguments into located tokens.
///
/// Tokenizing happens in two passes:
/// 1. Classification: `--` becomes [`TokenKind::OptionsEnd`], `--name` becomes [`TokenKind::LongOption`],
/// `--name=value` becomes the three tokens `--name`, `=` and `value`, anything else becomes a [`TokenKind::Value`].
/// 2. Options-end rewrite: once a `--` has been seen, every later long option is turned back into a value token
/// `--name` (the `=` and value of a `--name=value` argument are left as they were).
///
/// ### Example
/// ```
/// # use drudge_engine as drudge;
/// use drudge::{tokenize, TokenKind};
///
/// let tokens = tokenize(&["hello", "--from=Bob"]);
/// let kinds: Vec<&TokenKind> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         &TokenKind::Value("hello".to_string()),
///         &TokenKind::LongOption("from".to_string()),
///         &TokenKind::Equals,
///         &TokenKind::Value("Bob".to_string()),
///     ]
/// );
/// ```
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Vec<Token> {
    let classified: Vec<Token> = args
        .iter()
        .enumerate()
        .flat_map(|(index, arg)| classify(index, arg.as_ref()))
        .collect();
    let tokens = rewrite_after_options_end(classified);

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Tokenized {} arguments into {} tokens.",
            args.len(),
            tokens.len()
        );
    }

    tokens
}

fn classify(index: usize, arg: &str) -> Vec<Token> {
    if arg == OPTIONS_END {
        return vec![Token::options_end(Location::new(index, 0, length(arg)))];
    }

    if let Some(rest) = arg.strip_prefix(LONG_PREFIX) {
        match rest.split_once(EQUALS) {
            Some((name, value)) if !name.is_empty() => {
                let name_length = length(name) + LONG_PREFIX.len();
                return vec![
                    Token::long_option(name, Location::new(index, 0, name_length)),
                    Token::equals(Location::new(index, name_length, 1)),
                    Token::value(value, Location::new(index, name_length + 1, length(value))),
                ];
            }
            None if !rest.is_empty() => {
                return vec![Token::long_option(
                    rest,
                    Location::new(index, 0, length(arg)),
                )];
            }
            _ => {
                // Malformed switches (ex: `--=x`) fall through to plain values.
            }
        }
    }

    vec![Token::value(arg, Location::new(index, 0, length(arg)))]
}

fn rewrite_after_options_end(tokens: Vec<Token>) -> Vec<Token> {
    let mut past_options_end = false;

    tokens
        .into_iter()
        .map(|token| match token.kind() {
            TokenKind::LongOption(name) if past_options_end => {
                let text = format!("{LONG_PREFIX}{name}");

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Rewriting '{text}' as a value (after options-end).");
                }

                Token::value(text, *token.location())
            }
            TokenKind::OptionsEnd => {
                past_options_end = true;
                token
            }
            _ => token,
        })
        .collect()
}

/// Reconstruct a single line from the tokens.
///
/// Tokens which came from the same argument are concatenated, and arguments are joined by a single space.
/// This is intended for display only - it is never re-parsed.
pub fn untokenize(tokens: &[Token]) -> String {
    arguments(tokens)
        .into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Produce the line which underlines `target` (with `~`) beneath the [`untokenize`]d `tokens`.
///
/// When `target` is `None` (ex: the failure happened at the end of input), a single `^` is placed past the end of the line.
pub fn underline(tokens: &[Token], target: Option<&Token>) -> String {
    underline_with(tokens, target, UNDERLINE_CHAR)
}

/// Like [`underline`], using `underline_char` rather than `~`.
pub fn underline_with(tokens: &[Token], target: Option<&Token>, underline_char: char) -> String {
    let arguments = arguments(tokens);

    match target {
        Some(token) => {
            let location = token.location();
            let prefix: usize = arguments
                .iter()
                .filter(|(arg_index, _)| *arg_index < location.arg_index)
                .map(|(_, text)| length(text) + 1)
                .sum();
            format!(
                "{:white_space$}{}",
                "",
                underline_char.to_string().repeat(location.length),
                white_space = prefix + location.start,
            )
        }
        None => {
            let line_length: usize = arguments
                .iter()
                .map(|(_, text)| length(text))
                .sum::<usize>()
                + arguments.len().saturating_sub(1);
            format!("{:white_space$}{END_MARKER}", "", white_space = line_length + 1)
        }
    }
}

// Group the tokens back into their originating arguments.
fn arguments(tokens: &[Token]) -> Vec<(usize, String)> {
    let mut out: Vec<(usize, String)> = Vec::default();

    for token in tokens {
        let arg_index = token.location().arg_index;

        match out.last_mut() {
            Some((last_index, text)) if *last_index == arg_index => {
                text.push_str(&token.to_string());
            }
            _ => out.push((arg_index, token.to_string())),
        }
    }

    out
}

fn length(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hello_dear_world() -> Vec<Token> {
        vec![
            Token::value("hello", Location::new(0, 0, 5)),
            Token::value("dear", Location::new(1, 0, 4)),
            Token::value("world", Location::new(2, 0, 5)),
        ]
    }

    #[test]
    fn tokenize_empty() {
        let args: &[&str] = empty::slice();
        assert_eq!(tokenize(args), Vec::<Token>::new());
    }

    #[test]
    fn tokenize_values() {
        // Execute
        let tokens = tokenize(&["hello", "world"]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::value("hello", Location::new(0, 0, 5)),
                Token::value("world", Location::new(1, 0, 5)),
            ]
        );
    }

    #[test]
    fn tokenize_long_option() {
        // Execute
        let tokens = tokenize(&["hello", "--arg"]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::value("hello", Location::new(0, 0, 5)),
                Token::long_option("arg", Location::new(1, 0, 5)),
            ]
        );
    }

    #[test]
    fn tokenize_long_option_equals() {
        // Execute
        let tokens = tokenize(&["hello", "--keyword=value"]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::value("hello", Location::new(0, 0, 5)),
                Token::long_option("keyword", Location::new(1, 0, 9)),
                Token::equals(Location::new(1, 9, 1)),
                Token::value("value", Location::new(1, 10, 5)),
            ]
        );
    }

    #[test]
    fn tokenize_long_option_equals_empty() {
        // Execute
        let tokens = tokenize(&["--keyword="]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::long_option("keyword", Location::new(0, 0, 9)),
                Token::equals(Location::new(0, 9, 1)),
                Token::value("", Location::new(0, 10, 0)),
            ]
        );
    }

    #[test]
    fn tokenize_options_end() {
        // Execute
        let tokens = tokenize(&["hello", "--"]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::value("hello", Location::new(0, 0, 5)),
                Token::options_end(Location::new(1, 0, 2)),
            ]
        );
    }

    #[rstest]
    #[case("--=x")]
    #[case("-x")]
    #[case("-")]
    #[case("")]
    fn tokenize_malformed_as_value(#[case] arg: &str) {
        let tokens = tokenize(&[arg]);
        assert_eq!(
            tokens,
            vec![Token::value(arg, Location::new(0, 0, arg.chars().count()))]
        );
    }

    #[test]
    fn tokenize_after_options_end() {
        // Execute
        let tokens = tokenize(&["--a", "--", "--b", "--c=d", "--"]);

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::long_option("a", Location::new(0, 0, 3)),
                Token::options_end(Location::new(1, 0, 2)),
                Token::value("--b", Location::new(2, 0, 3)),
                Token::value("--c", Location::new(3, 0, 3)),
                Token::equals(Location::new(3, 3, 1)),
                Token::value("d", Location::new(3, 4, 1)),
                Token::options_end(Location::new(4, 0, 2)),
            ]
        );
    }

    #[test]
    fn tokenize_after_options_end_keeps_equals() {
        // Execute
        let tokens = tokenize(&["--", "--c=d"]);

        // Verify
        let kinds: Vec<&TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                &TokenKind::OptionsEnd,
                &TokenKind::Value("--c".to_string()),
                &TokenKind::Equals,
                &TokenKind::Value("d".to_string()),
            ]
        );
        assert_eq!(untokenize(&tokens), "-- --c=d");
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec!["hello"])]
    #[case(vec!["hello", "dear", "world"])]
    #[case(vec!["cli", "--from", "Bob", "greet"])]
    #[case(vec!["cli", "--from=Bob", "greet"])]
    #[case(vec!["cli", "--", "--from=Bob"])]
    #[case(vec!["ünïcödé", "x"])]
    fn untokenize_round_trip(#[case] args: Vec<&str>) {
        assert_eq!(untokenize(&tokenize(&args)), args.join(" "));
    }

    #[test]
    fn untokenize_values() {
        assert_eq!(untokenize(&hello_dear_world()), "hello dear world");
    }

    #[rstest]
    #[case(0, "~~~~~")]
    #[case(1, "      ~~~~")]
    #[case(2, "           ~~~~~")]
    fn underline_token(#[case] index: usize, #[case] expected: &str) {
        let tokens = hello_dear_world();
        assert_eq!(underline(&tokens, Some(&tokens[index])), expected);
    }

    #[test]
    fn underline_end() {
        let tokens = hello_dear_world();
        assert_eq!(underline(&tokens, None), "                 ^");
    }

    #[test]
    fn underline_empty() {
        assert_eq!(underline(&[], None), " ^");
    }

    #[test]
    fn underline_custom_char() {
        let tokens = hello_dear_world();
        assert_eq!(underline_with(&tokens, Some(&tokens[0]), '-'), "-----");
    }

    #[test]
    fn underline_within_argument() {
        // Setup
        let tokens = tokenize(&["cli", "--from=Bob"]);

        // Execute
        let name = underline(&tokens, Some(&tokens[1]));
        let value = underline(&tokens, Some(&tokens[3]));

        // Verify
        assert_eq!(untokenize(&tokens), "cli --from=Bob");
        assert_eq!(name, "    ~~~~~~");
        assert_eq!(value, "           ~~~");
    }
}
