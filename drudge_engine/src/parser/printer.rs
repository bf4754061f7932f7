use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::parser::interface::{
    chunk, ColumnRenderer, DescriptionWidth, NameWidth, PaddingWidth, TotalWidth,
};
use crate::tokens::{underline, untokenize, Token};

const PADDING_WIDTH: usize = 2;
const MAIN_INDENT: usize = 1;

/// The two diagnostic lines of a failed parse: the reconstructed command line,
/// and a line underlining the offending token (or a `^` past the end, when the parse ran out of input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    tokens: Vec<Token>,
    target: Option<Token>,
}

impl ErrorContext {
    pub(crate) fn new(tokens: Vec<Token>, target: Option<Token>) -> Self {
        Self { tokens, target }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            untokenize(&self.tokens),
            underline(&self.tokens, self.target.as_ref())
        )
    }
}

/// A row in the table section of a help message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HelpRow {
    pub(crate) name: String,
    pub(crate) description: String,
}

/// Renders help messages, wrapped to the terminal width.
pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    fn total_width(&self) -> usize {
        self.terminal_width.unwrap_or(FALLBACK_TERMINAL_WIDTH)
    }

    /// Render:
    /// ```text
    /// usage: <usage>
    ///
    /// <about>
    ///
    /// <section>:
    ///  <name>  <description>
    /// ```
    /// The about paragraph and the section are left out when empty.
    pub(crate) fn help(&self, usage: &str, about: &str, section: &str, rows: &[HelpRow]) -> String {
        let mut lines = vec![format!("usage: {usage}")];

        let about_lines = chunk(about, self.total_width());
        if !about_lines.is_empty() {
            lines.push(String::default());
            lines.extend(about_lines);
        }

        if !rows.is_empty() {
            let name_width = rows
                .iter()
                .map(|row| row.name.chars().count())
                .max()
                .unwrap_or(1);
            let description_width = rows
                .iter()
                .map(|row| row.description.chars().count())
                .max()
                .unwrap_or(2);
            let column_renderer = ColumnRenderer::guided(
                PaddingWidth::new(PADDING_WIDTH)
                    .unwrap_or_else(|_| unreachable!("internal error - padding must be positive")),
                NameWidth::new(std::cmp::max(1, name_width))
                    .unwrap_or_else(|_| unreachable!("internal error - name width must be positive")),
                DescriptionWidth::new(std::cmp::max(2, description_width)).unwrap_or_else(|_| {
                    unreachable!("internal error - description width must be at least 2")
                }),
                TotalWidth(self.total_width().saturating_sub(MAIN_INDENT)),
            );

            lines.push(String::default());
            lines.push(format!("{section}:"));

            for HelpRow { name, description } in rows {
                lines.extend(column_renderer.render(MAIN_INDENT, name, description));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::tokenize;
    use rstest::rstest;

    fn row(name: &str, description: &str) -> HelpRow {
        HelpRow {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[rstest]
    #[case(vec![], None, "\n ^")]
    #[case(vec!["abc"], None, "abc\n    ^")]
    #[case(vec!["abc"], Some(0), "abc\n~~~")]
    #[case(vec!["abc", "123"], Some(1), "abc 123\n    ~~~")]
    #[case(vec!["abc", "--x=123"], Some(2), "abc --x=123\n       ~")]
    fn error_context(
        #[case] args: Vec<&str>,
        #[case] target: Option<usize>,
        #[case] expected: &str,
    ) {
        // Setup
        let tokens = tokenize(&args);
        let target = target.map(|index| tokens[index].clone());

        // Execute
        let context = ErrorContext::new(tokens, target);

        // Verify
        assert_eq!(context.to_string(), expected);
    }

    #[test]
    fn help_usage_only() {
        let printer = Printer::new(Some(80));
        assert_eq!(printer.help("cli", "", "commands", &[]), "usage: cli");
    }

    #[test]
    fn help() {
        // Setup
        let printer = Printer::new(Some(80));
        let rows = vec![row("hello", "Say hello."), row("bye", "")];

        // Execute
        let message = printer.help("cli <command>", "A greeter.", "commands", &rows);

        // Verify
        assert_eq!(
            message,
            r#"usage: cli <command>

A greeter.

commands:
 hello  Say hello.
 bye"#
        );
    }

    #[test]
    fn help_wraps() {
        // Setup
        let printer = Printer::new(Some(20));
        let rows = vec![row(
            "hello",
            "Say hello to someone, or to everyone when nobody is named.",
        )];

        // Execute
        let message = printer.help("cli", "", "commands", &rows);

        // Verify
        assert_eq!(
            message,
            r#"usage: cli

commands:
 hello  Say hello to
        someone, or to
        everyone when
        nobody is named."#
        );
    }

    #[test]
    fn help_without_terminal() {
        // Setup
        let printer = Printer::new(None);
        let about = "word ".repeat(20);

        // Execute
        let message = printer.help("cli", &about, "commands", &[]);

        // Verify
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].chars().count() <= FALLBACK_TERMINAL_WIDTH);
    }
}
