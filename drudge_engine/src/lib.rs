//! Engine module for `drudge`.
//! See [documentation root](https://docs.rs/drudge/latest/drudge/index.html) for full details.
//!
//! The layers, bottom up:
//! * [`tokenize`]: raw arguments into located [`Token`]s.
//! * [`Input`]: an immutable cursor over the tokens.
//! * [`Parser`]: composable parsers yielding a [`ParseResult`], with sequencing (`+`), alternation (`|`), repetition, and commit.
//! * [`TypeRegistry`]: named conversions from text into [`Value`]s.
//! * [`Command`] & [`Kit`]: declared parameters compiled into a grammar, parsed into [`Arguments`].
#![deny(missing_docs)]
mod api;
mod constant;
mod input;
mod matcher;
mod model;
mod parser;
mod tokens;
mod types;

pub use api::*;
pub use input::*;
pub use matcher::*;
pub use model::*;
pub use parser::*;
pub use tokens::*;
pub use types::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
