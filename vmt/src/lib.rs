pub mod codegen;
mod error;
pub mod linker;
pub mod parser;
pub mod segment;

pub use codegen::{bootstrap, CodeGen, LabelCounter};
pub use error::{Error, ErrorKind};
pub use linker::{translate, Module, Translator};
pub use parser::{ArithOp, Command, Segment};
