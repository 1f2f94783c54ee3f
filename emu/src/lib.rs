mod error;
pub mod hooks;
pub mod model;
pub mod preset;

pub use error::Error;
pub use model::State;
