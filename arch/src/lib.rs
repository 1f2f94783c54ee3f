pub mod alu;
pub mod cli;
pub mod dest;
pub mod inst;
pub mod jump;
pub mod reg;
pub mod source;
