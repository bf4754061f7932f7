use std::collections::HashSet;

use thiserror::Error;

use crate::api::{Arg, Arguments, Command};
use crate::parser::{command, commit, ConfigError, HelpRow, ParseError, Parser, Printer};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for a failed invocation of a [`Kit`].
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line didn't match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// No command with this name in the kit.
    #[error("error: unknown command '{command}' for {kit}")]
    UnknownCommand {
        /// The kit name.
        kit: String,
        /// The requested command.
        command: String,
    },
    /// The command was matched, but declares no handler.
    #[error("error: command '{command}' has no handler")]
    MissingHandler {
        /// The matched command.
        command: String,
    },
    /// The handler rejected its arguments.
    #[error("error: {message} for command '{command}'")]
    CommandArgument {
        /// The matched command.
        command: String,
        /// The handler's message.
        message: String,
    },
}

/// A named group of [`Command`]s: a program invoked as `<kit> <command> [<args> ...]`.
///
/// ### Example
/// ```
/// # use drudge_engine as drudge;
/// use drudge::{Command, Kit, Param, TypeRegistry};
///
/// let registry = TypeRegistry::default();
/// let kit = Kit::new(
///     "cli",
///     vec![
///         Command::builder("hello").param(Param::required("name")).build(&registry).unwrap(),
///         Command::builder("goodbye").build(&registry).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// let arguments = kit.parse_or_error(&["cli", "hello", "Alice"]).unwrap();
/// assert_eq!(arguments.command(), Some("hello"));
///
/// let error = kit.parse_or_error(&["cli", "bogus"]).unwrap_err();
/// assert_eq!(error.diagnostic(), "error: unknown command 'bogus'\ncli bogus\n    ~~~~~");
/// ```
#[derive(Debug, Clone)]
pub struct Kit {
    name: String,
    about: String,
    commands: Vec<Command>,
    parser: Parser<Arguments>,
}

impl Kit {
    /// Group `commands` under the program name `name`.
    /// Fails when there are no commands, or when two share a name.
    pub fn new(name: impl Into<String>, commands: Vec<Command>) -> Result<Self, ConfigError> {
        let name = name.into();

        if commands.is_empty() {
            return Err(ConfigError(format!("kit '{name}' contains no commands.")));
        }

        let mut names = HashSet::new();

        for c in &commands {
            if !names.insert(c.name()) {
                return Err(ConfigError(format!(
                    "kit '{name}' contains duplicate command '{}'.",
                    c.name()
                )));
            }
        }

        let parser = commands
            .iter()
            .map(|c| {
                (command_arg(&name) + command_arg(c.name()) + commit(c.argument_parser()))
                    .collated()
            })
            .reduce(|a, b| a | b)
            .unwrap_or_else(|| unreachable!("internal error - kit commands are non-empty"));

        Ok(Self {
            name,
            about: String::default(),
            commands,
            parser,
        })
    }

    /// Document the about message for this kit.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about = description.into();
        self
    }

    /// The program name, matched as the first argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The commands, in declaration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up the command called `name`.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// The parser for a full command line: the kit name, a command name, then that command's arguments.
    pub fn argument_parser(&self) -> Parser<Arguments> {
        self.parser.clone()
    }

    /// Parse a full command line (ex: `["cli", "hello", "Alice"]`).
    pub fn parse_or_error<S: AsRef<str>>(&self, argv: &[S]) -> Result<Arguments, ParseError> {
        self.parser
            .parse_or_error(argv)
            .map(|value| value.into_single().unwrap_or_default())
    }

    /// Invoke the handler of the command `name`.
    pub fn invoke(&self, name: &str, arguments: &Arguments) -> Result<(), CliError> {
        match self.get(name) {
            Some(c) => c.dispatch(arguments),
            None => Err(CliError::UnknownCommand {
                kit: self.name.clone(),
                command: name.to_string(),
            }),
        }
    }

    /// Parse a full command line, and invoke the matched command's handler.
    pub fn dispatch<S: AsRef<str>>(&self, argv: &[S]) -> Result<(), CliError> {
        let arguments = self.parse_or_error(argv)?;
        let name = arguments.command().unwrap_or_default();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching '{name}' in kit '{}'.", self.name);
        }

        self.invoke(name, &arguments)
    }

    /// The help message, listing each command with its about message.
    pub fn help(&self) -> String {
        self.help_with(&Printer::terminal())
    }

    pub(crate) fn help_with(&self, printer: &Printer) -> String {
        let rows: Vec<HelpRow> = self
            .commands
            .iter()
            .map(|c| HelpRow {
                name: c.name().to_string(),
                description: c.about().to_string(),
            })
            .collect();

        printer.help(
            &format!("{} <command> [<args> ...]", self.name),
            &self.about,
            "commands",
            &rows,
        )
    }

    /// The usage message for the command `name`, if it exists.
    pub fn usage(&self, name: &str) -> Option<String> {
        self.get(name).map(|c| c.usage(&self.name))
    }
}

fn command_arg(name: &str) -> Parser<Arg> {
    command(name).map_value(|token| Arg::Command(token.to_string()))
}
