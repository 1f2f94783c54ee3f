mod encoder;
mod error;
pub mod parser;
pub mod symbol;
pub mod util;

pub use encoder::{assemble, Format, Listed, Program};
pub use error::{Error, ErrorKind};
pub use symbol::SymbolTable;
