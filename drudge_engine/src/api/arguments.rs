use std::collections::HashMap;

use crate::parser::{ParseValue, Parser};
use crate::types::Value;

/// A single tagged item produced by the argument grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A matched command name (including the kit's own name).
    Command(String),
    /// A bound positional parameter.
    Positional {
        /// The parameter name.
        name: String,
        /// The converted value.
        value: Value,
    },
    /// A bound keyword parameter.
    Keyword {
        /// The parameter name.
        name: String,
        /// The converted value.
        value: Value,
    },
}

/// The structured result of a successful command line parse.
///
/// Positional arguments keep their command line order; keyword arguments are keyed by their declared name,
/// and the last occurrence of a repeated keyword wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    commands: Vec<String>,
    positional: Vec<(String, Value)>,
    keyword: HashMap<String, Value>,
}

impl Arguments {
    pub(crate) fn collate(args: Vec<Arg>) -> Self {
        args.into_iter()
            .fold(Arguments::default(), |mut arguments, arg| {
                match arg {
                    Arg::Command(name) => arguments.commands.push(name),
                    Arg::Positional { name, value } => arguments.positional.push((name, value)),
                    Arg::Keyword { name, value } => {
                        arguments.keyword.insert(name, value);
                    }
                }

                arguments
            })
    }

    /// The matched command: the innermost command name on the command line.
    pub fn command(&self) -> Option<&str> {
        self.commands.last().map(String::as_str)
    }

    /// Every matched command name, outermost first (ex: `["cli", "hello"]`).
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// The positional arguments, in command line order.
    pub fn positional(&self) -> &[(String, Value)] {
        &self.positional
    }

    /// The keyword arguments, keyed by declared name.
    pub fn keywords(&self) -> &HashMap<String, Value> {
        &self.keyword
    }

    /// The first positional value for the parameter `name`, or else its keyword value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.positional
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .or_else(|| self.keyword.get(name))
    }

    /// All the positional values for the parameter `name` (ex: a variadic parameter).
    pub fn get_all(&self, name: &str) -> Vec<&Value> {
        self.positional
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value)
            .collect()
    }

    /// The value of the keyword parameter `name`.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// The positional values alone, in command line order.
    pub fn values(&self) -> Vec<&Value> {
        self.positional.iter().map(|(_, value)| value).collect()
    }
}

impl Parser<Arg> {
    /// Fold the tagged items of this parser into [`Arguments`].
    pub fn collated(self) -> Parser<Arguments> {
        self.map_result(|value| ParseValue::Single(Arguments::collate(value.into_vec())))
    }
}
