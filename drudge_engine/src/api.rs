mod arguments;
mod command;
mod kit;
mod parameter;

pub use arguments::*;
pub use command::*;
pub use kit::*;
pub use parameter::*;
