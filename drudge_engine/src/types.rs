mod builtin;
mod registry;
mod value;

pub use registry::*;
pub use value::*;
