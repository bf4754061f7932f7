use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::matcher::Matcher;
use crate::parser::ConfigError;
use crate::types::builtin;
use crate::types::Value;

/// A single string-to-value conversion.
pub type TypeHandler = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// The source of "today", for the relative date keywords.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

const DEFAULT_DATE_FORMATS: [&str; 4] = ["%d.%m.%y", "%d.%m.%Y", "%m/%d/%y", "%m/%d/%Y"];

/// A resolved type: the conversions registered under one name.
///
/// Handlers are tried latest-registered first; the first successful conversion wins.
/// When every handler fails, the message of the earliest-registered handler is reported.
#[derive(Clone)]
pub struct TypeParser {
    name: String,
    handlers: Vec<TypeHandler>,
}

impl TypeParser {
    /// A type called `name` with the single conversion `handler`.
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            handlers: vec![Arc::new(handler)],
        }
    }

    fn from_handlers(name: impl Into<String>, handlers: Vec<TypeHandler>) -> Self {
        Self {
            name: name.into(),
            handlers,
        }
    }

    /// The type name (ex: `integer`), shown in grammar descriptions.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert `text`.
    pub fn parse(&self, text: &str) -> Result<Value, String> {
        let mut message = None;

        for handler in self.handlers.iter().rev() {
            match handler(text) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    message.replace(error);
                }
            }
        }

        Err(message.unwrap_or_else(|| format!("'{text}' is not a {}", self.name)))
    }
}

impl From<Matcher> for TypeParser {
    /// Accept (as a string) only the text which `matcher` matches.
    fn from(matcher: Matcher) -> Self {
        let name = matcher.to_string();
        TypeParser::new(name, move |text| {
            if matcher.matches(text) {
                Ok(Value::from(text))
            } else {
                Err(format!("'{text}' doesn't match {matcher}"))
            }
        })
    }
}

impl std::fmt::Debug for TypeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeParser")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl std::fmt::Display for TypeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// How a parameter names its type: by registered name, by matcher, or with a ready-made parser.
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// A type registered by name (ex: `integer`).
    Named(String),
    /// Strings accepted by a matcher.
    Matcher(Matcher),
    /// A ready-made parser.
    Parser(TypeParser),
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Named(builtin::STRING.to_string())
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        TypeRef::Named(value.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        TypeRef::Named(value)
    }
}

impl From<Matcher> for TypeRef {
    fn from(value: Matcher) -> Self {
        TypeRef::Matcher(value)
    }
}

impl From<Regex> for TypeRef {
    fn from(value: Regex) -> Self {
        TypeRef::Matcher(Matcher::Pattern(value))
    }
}

impl From<TypeParser> for TypeRef {
    fn from(value: TypeParser) -> Self {
        TypeRef::Parser(value)
    }
}

/// The named string-to-value conversions available to parameters.
///
/// Registering a handler under an existing name *extends* that type:
/// the new handler is tried first, and the earlier ones remain as fallbacks.
///
/// ### Example
/// ```
/// # use drudge_engine as drudge;
/// use drudge::{TypeRef, TypeRegistry, Value};
///
/// let registry = TypeRegistry::default().define_type("integer", |text| match text {
///     "dozen" => Ok(Value::Integer(12)),
///     _ => Err(format!("'{text}' is not a number word")),
/// });
/// let integer = registry.resolve(&TypeRef::from("integer")).unwrap();
///
/// assert_eq!(integer.parse("dozen"), Ok(Value::Integer(12)));
/// assert_eq!(integer.parse("7"), Ok(Value::Integer(7)));
/// assert_eq!(integer.parse("x"), Err("'x' is not an integer".to_string()));
/// ```
#[derive(Clone)]
pub struct TypeRegistry {
    built_in: bool,
    date_formats: Vec<String>,
    today: Clock,
    defined: HashMap<String, Vec<TypeHandler>>,
}

impl Default for TypeRegistry {
    /// A registry with the built-in types: `string`, `integer`, `float`, `bool`, and `date`.
    fn default() -> Self {
        Self {
            built_in: true,
            date_formats: DEFAULT_DATE_FORMATS
                .iter()
                .map(|format| format.to_string())
                .collect(),
            today: Arc::new(|| chrono::Local::now().date_naive()),
            defined: HashMap::default(),
        }
    }
}

impl TypeRegistry {
    /// A registry without any types.
    pub fn empty() -> Self {
        Self {
            built_in: false,
            ..Self::default()
        }
    }

    /// Register `handler` under `name`, extending any existing conversions for that name.
    pub fn define_type(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        self.defined
            .entry(name.into())
            .or_default()
            .push(Arc::new(handler));
        self
    }

    /// Replace the locale date formats (`chrono` strftime syntax) tried by `date`, after ISO-8601.
    pub fn with_date_formats<S: AsRef<str>>(mut self, formats: &[S]) -> Self {
        self.date_formats = formats
            .iter()
            .map(|format| format.as_ref().to_string())
            .collect();
        self
    }

    /// Pin the date which `today` and `yesterday` are relative to.
    #[cfg(any(test, feature = "unit_test"))]
    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    /// Whether `name` resolves to a type.
    pub fn contains(&self, name: &str) -> bool {
        self.defined.contains_key(name) || (self.built_in && builtin::BUILT_IN.contains(&name))
    }

    /// Resolve a type reference into its parser.
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<TypeParser, ConfigError> {
        match type_ref {
            TypeRef::Named(name) => {
                let mut handlers = if self.built_in {
                    builtin::handlers(name, &self.date_formats, &self.today)
                } else {
                    Vec::default()
                };

                if let Some(defined) = self.defined.get(name) {
                    handlers.extend(defined.iter().cloned());
                }

                if handlers.is_empty() {
                    Err(ConfigError(format!("unknown type '{name}'")))
                } else {
                    Ok(TypeParser::from_handlers(name.clone(), handlers))
                }
            }
            TypeRef::Matcher(matcher) => Ok(TypeParser::from(matcher.clone())),
            TypeRef::Parser(parser) => Ok(parser.clone()),
        }
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut defined: Vec<&String> = self.defined.keys().collect();
        defined.sort();
        f.debug_struct("TypeRegistry")
            .field("built_in", &self.built_in)
            .field("date_formats", &self.date_formats)
            .field("defined", &defined)
            .finish()
    }
}
