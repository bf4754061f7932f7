use std::collections::HashSet;
use std::sync::Arc;

use crate::api::{Arg, Arguments, CliError, KeywordParam, Param};
use crate::constant::*;
use crate::model::{Modifier, Repetition};
use crate::parser::{
    arg, eos, keyword_arg, options_end, ConfigError, ParseError, Parser, Printer,
};
use crate::types::TypeRegistry;

/// The body of a command, invoked with the parsed arguments.
/// An `Err` reports a problem with the arguments which the grammar could not catch.
pub type CommandHandler = Arc<dyn Fn(&Arguments) -> Result<(), String> + Send + Sync>;

/// Declares a [`Command`].
///
/// ### Example
/// ```
/// # use drudge_engine as drudge;
/// use drudge::{Command, KeywordParam, Param, TypeRegistry, Value};
///
/// let hello = Command::builder("hello")
///     .about("Say hello.")
///     .keyword(KeywordParam::new("from"))
///     .param(Param::required("name"))
///     .param(Param::optional("times").typed("integer"))
///     .build(&TypeRegistry::default())
///     .unwrap();
///
/// let arguments = hello.parse_or_error(&["--from=Bob", "Alice", "3"]).unwrap();
/// assert_eq!(arguments.get("name"), Some(&Value::from("Alice")));
/// assert_eq!(arguments.get("times"), Some(&Value::Integer(3)));
/// assert_eq!(arguments.keyword("from"), Some(&Value::from("Bob")));
/// ```
pub struct CommandBuilder {
    name: String,
    about: String,
    params: Vec<Param>,
    keywords: Vec<KeywordParam>,
    handler: Option<CommandHandler>,
}

impl CommandBuilder {
    /// Document the about message for this command.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about = description.into();
        self
    }

    /// Add a positional parameter; positional parameters bind in the order they are added.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Add a keyword parameter.
    pub fn keyword(mut self, keyword: KeywordParam) -> Self {
        self.keywords.push(keyword);
        self
    }

    /// Set the body of the command.
    pub fn handler(
        mut self,
        handler: impl Fn(&Arguments) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.handler.replace(Arc::new(handler));
        self
    }

    /// Build the command, compiling its argument grammar.
    /// This checks the declarations for errors (ex: a variadic parameter which isn't last, or an unknown type).
    pub fn build(self, registry: &TypeRegistry) -> Result<Command, ConfigError> {
        self.validate()?;
        let parser = argument_parser(&self.name, &self.params, &self.keywords, registry)?;
        let CommandBuilder {
            name,
            about,
            params,
            keywords,
            handler,
        } = self;

        Ok(Command {
            name,
            about,
            params,
            keywords,
            handler,
            collated: parser.clone().collated(),
            parser,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.name;

        if name.is_empty() {
            return Err(ConfigError("command name must not be empty".to_string()));
        }

        let variadics: Vec<&Param> = self
            .params
            .iter()
            .filter(|param| param.modifier() == Modifier::Variadic)
            .collect();

        if variadics.len() > 1 {
            return Err(ConfigError(format!(
                "command '{name}' contains more than one variadic parameter."
            )));
        }

        if let Some(variadic) = variadics.first() {
            let last = self.params.last().map(|param| param.name());

            if last != Some(variadic.name()) {
                return Err(ConfigError(format!(
                    "command '{name}' contains variadic parameter '{}' which is not the last positional parameter.",
                    variadic.name()
                )));
            }
        }

        let mut names = HashSet::new();

        for parameter_name in self
            .params
            .iter()
            .map(Param::name)
            .chain(self.keywords.iter().map(KeywordParam::name))
        {
            if !names.insert(parameter_name) {
                return Err(ConfigError(format!(
                    "command '{name}' contains duplicate parameter '{parameter_name}'."
                )));
            }
        }

        Ok(())
    }
}

/// A named command, with its compiled argument grammar.
///
/// The grammar is: the keyword arguments (in any order), an optional `--`, then the positional arguments, then the end of input.
#[derive(Clone)]
pub struct Command {
    name: String,
    about: String,
    params: Vec<Param>,
    keywords: Vec<KeywordParam>,
    handler: Option<CommandHandler>,
    parser: Parser<Arg>,
    collated: Parser<Arguments>,
}

impl Command {
    /// Declare a command called `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            about: String::default(),
            params: Vec::default(),
            keywords: Vec::default(),
            handler: None,
        }
    }

    /// The command name, as matched on the command line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The about message (empty when not documented).
    pub fn about(&self) -> &str {
        &self.about
    }

    /// The positional parameters, in binding order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The keyword parameters.
    pub fn keywords(&self) -> &[KeywordParam] {
        &self.keywords
    }

    /// The parser for this command's arguments (not including the command name).
    pub fn argument_parser(&self) -> Parser<Arg> {
        self.parser.clone()
    }

    /// Parse this command's arguments (not including the command name).
    pub fn parse_or_error<S: AsRef<str>>(&self, args: &[S]) -> Result<Arguments, ParseError> {
        self.collated
            .parse_or_error(args)
            .map(|value| value.into_single().unwrap_or_default())
    }

    /// Invoke the handler.
    pub fn dispatch(&self, arguments: &Arguments) -> Result<(), CliError> {
        match &self.handler {
            Some(handler) => handler(arguments).map_err(|message| CliError::CommandArgument {
                command: self.name.clone(),
                message,
            }),
            None => Err(CliError::MissingHandler {
                command: self.name.clone(),
            }),
        }
    }

    /// The usage message for this command, invoked via `program`.
    pub fn usage(&self, program: &str) -> String {
        self.usage_with(program, &Printer::terminal())
    }

    pub(crate) fn usage_with(&self, program: &str, printer: &Printer) -> String {
        printer.help(&self.synopsis(program), &self.about, "", &[])
    }

    fn synopsis(&self, program: &str) -> String {
        format!("{program} {} {}", self.name, self.parser)
            .trim()
            .to_string()
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("keywords", &self.keywords)
            .field("grammar", &self.parser.to_string())
            .finish()
    }
}

// Build right to left: each positional parameter wraps the parser for everything after it.
fn argument_parser(
    name: &str,
    params: &[Param],
    keywords: &[KeywordParam],
    registry: &TypeRegistry,
) -> Result<Parser<Arg>, ConfigError> {
    let mut rest: Parser<Arg> = eos(EXTRA_ARGUMENTS);

    for param in params.iter().rev() {
        let type_parser = registry
            .resolve(param.type_ref())
            .map_err(|error| in_command(name, param.name(), error))?;
        let p = arg(param.name(), type_parser);

        rest = match param.modifier() {
            Modifier::Required => p + rest,
            Modifier::Optional => {
                let description = format!("[{p}] {rest}").trim_end().to_string();
                ((p + rest.clone()) | rest).describe(description)
            }
            Modifier::Variadic => {
                let description = format!("[{p} ...] {rest}").trim_end().to_string();
                (p.repeat_until(Repetition::ZeroOrMore, rest.clone()) + rest).describe(description)
            }
        };
    }

    let mut alternatives = Vec::default();

    for keyword in keywords {
        let type_parser = registry
            .resolve(keyword.type_ref())
            .map_err(|error| in_command(name, keyword.name(), error))?;
        alternatives.push(keyword_arg(keyword.name(), type_parser));
    }

    let options_end = options_end().optional().discard::<Arg>().describe("");

    Ok(match alternatives.into_iter().reduce(|a, b| a | b) {
        Some(keyword_block) => keyword_block.repeat(Repetition::ZeroOrMore) + options_end + rest,
        None => options_end + rest,
    })
}

fn in_command(command: &str, parameter: &str, error: ConfigError) -> ConfigError {
    let ConfigError(message) = error;
    ConfigError(format!(
        "command '{command}' parameter '{parameter}': {message}."
    ))
}
