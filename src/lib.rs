//! `drudge` is a parser-combinator command line engine for Rust.
//!
//! Declare your commands and their parameters; `drudge` compiles each declaration into a grammar of small, composable parsers.
//! A command line either parses into typed [`Arguments`], or fails with a [`ParseError`] that points at the offending token.
//! `drudge` prioritizes the following design concerns:
//! * *Typed arguments*:
//! Each parameter names a type (ex: `integer`, `date`) or a [`Matcher`], and values arrive already converted into a [`Value`].
//! * *Located diagnostics*:
//! Every failure reports a message, the reconstructed command line, and an underline beneath the token responsible.
//! * *Composable grammar*:
//! The same [`Parser`] building blocks behind [`Command`] are public; build your own grammars from them if the declarative Api doesn't fit.
//! * *Shareable*:
//! Parsers are immutable once built, and may be shared across threads.
//!
//! # Usage
//! ```
//! use drudge::{Command, KeywordParam, Kit, Param, TypeRegistry, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TypeRegistry::default();
//! let greeter = Kit::new(
//!     "greeter",
//!     vec![Command::builder("hello")
//!         .about("Say hello.")
//!         .keyword(KeywordParam::new("from"))
//!         .param(Param::required("name"))
//!         .param(Param::optional("times").typed("integer"))
//!         .handler(|arguments| {
//!             let times = arguments.get("times").and_then(Value::as_integer).unwrap_or(1);
//!             for _ in 0..times {
//!                 println!("Hello {}!", arguments.get("name").map(Value::to_string).unwrap_or_default());
//!             }
//!             Ok(())
//!         })
//!         .build(&registry)?],
//! )?;
//!
//! greeter.dispatch(&["greeter", "hello", "--from=Bob", "Alice", "2"])?;
//! # Ok(())
//! # }
//! ```
//!
//! ```console
//! $ greeter hello Alice twice
//! error: 'twice' is not an integer for argument <times>
//! greeter hello Alice twice
//!                     ~~~~~
//!
//! $ greeter hello Alice 2 extra
//! error: extra command line arguments provided
//! greeter hello Alice 2 extra
//!                       ~~~~~
//!
//! $ greeter hello
//! error: expected a value for argument <name>
//! greeter hello
//!               ^
//! ```
//!
//! # Commands
//! A [`Command`] is declared via [`Command::builder`], and compiled against a [`TypeRegistry`] with `build`.
//! Its grammar is:
//! ```console
//! <command> [--keyword <type> ...] [--] <positional> ...
//! ```
//!
//! **Keyword parameters** ([`KeywordParam`]) may be given in any order, before the positional arguments, as either `--name value` or `--name=value`.
//! Underscores in the name are given as dashes (ex: `dry_run` is `--dry-run`).
//! When a keyword is repeated, the last occurrence wins.
//! Once a keyword's flag matches, its value *must* follow; `--from` alone is an error, rather than a reason to try something else.
//!
//! **Positional parameters** ([`Param`]) bind in declaration order:
//! ```console
//! Modifier  | Cardinality | Syntax         | Description
//! -----------------------------------------------------------------------------
//! Required  | [1]         | <name>         | precisely 1
//! Optional  | [0, 1]      | [<name>]       | used only if what follows still parses
//! Variadic  | [0, ∞)      | [<name> ...]   | stops as soon as what follows parses
//! ```
//! At most one parameter may be variadic, and it must be the last.
//! An optional `--` ends the keyword section; everything after it binds positionally, even when it looks like a switch.
//!
//! # Types
//! The built-in types are `string` (the default), `integer`, `float`, `bool` (`yes`/`true`/`1`, `no`/`false`/`0`), and `date`.
//! Dates accept ISO-8601 (`2024-03-15`), `today`, `yesterday`, and the formats configured with [`TypeRegistry::with_date_formats`].
//!
//! Define your own with [`TypeRegistry::define_type`].
//! A later definition for a name is tried before earlier ones (including the built-in), so definitions extend rather than replace.
//! ```
//! use drudge::{Param, TypeRegistry, TypeRef, Value};
//!
//! let registry = TypeRegistry::default().define_type("colour", |text: &str| match text {
//!     "red" | "green" | "blue" => Ok(Value::from(text)),
//!     _ => Err(format!("'{text}' is not a colour")),
//! });
//! let colour = registry.resolve(&TypeRef::from("colour")).unwrap();
//! assert_eq!(colour.parse("red"), Ok(Value::from("red")));
//! assert_eq!(colour.parse("pink"), Err("'pink' is not a colour".to_string()));
//! ```
//!
//! # Combinators
//! The grammar underneath is built from [`Parser`]s, with sequencing (`a + b`), alternation (`a | b`), [`Parser::optional`], [`Parser::repeat`], and [`Parser::commit`].
//! Parsers produce a [`ParseResult`]:
//! * `Success`: the values, and the remaining input.
//! * `Failure`: recoverable; alternation will try the next option.
//! When both options fail, the failure which got further through the input is reported.
//! * `Error`: unrecoverable; propagates through every combinator.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing (ex: a fixed clock for relative dates).
//! * `tracing_debug`: Emit `tracing` debug events from the engine.
pub use drudge_engine::*;
