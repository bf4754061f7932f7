mod base;
mod interface;
mod primitives;
mod printer;
mod result;

pub use base::*;
pub use primitives::*;
pub use printer::ErrorContext;
pub(crate) use printer::{HelpRow, Printer};
pub use result::*;
