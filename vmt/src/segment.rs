//! Where each VM memory segment lives in Hack RAM.

use crate::{error::Error, parser::Segment};
use arch::reg::Reg;

/// `temp i` is `R(5 + i)`.
pub const TEMP_BASE: u16 = 5;
pub const TEMP_SIZE: u16 = 8;

/// Static cells per module. The assembler hands out RAM 16..255 to variables.
pub const STATIC_SLOTS: u16 = 240;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// Immediate value, push only.
    Constant(u16),
    /// `RAM[RAM[reg] + offset]`
    Indirect(Reg, u16),
    /// A named cell: a predefined register or a module static.
    Direct(String),
}

/// Bounds shared by push and pop.
pub fn check(segment: Segment, offset: u16) -> Result<(), Error> {
    match segment {
        Segment::Static if offset >= STATIC_SLOTS => Err(Error::StaticRange(offset)),
        Segment::Temp if offset >= TEMP_SIZE => Err(Error::TempRange(offset)),
        Segment::Pointer if offset > 1 => Err(Error::PointerRange(offset)),
        _ => Ok(()),
    }
}

pub fn resolve(segment: Segment, offset: u16, module: &str) -> Result<Addressing, Error> {
    check(segment, offset)?;
    Ok(match segment {
        Segment::Constant => Addressing::Constant(offset),
        Segment::Local => Addressing::Indirect(Reg::LCL, offset),
        Segment::Argument => Addressing::Indirect(Reg::ARG, offset),
        Segment::This => Addressing::Indirect(Reg::THIS, offset),
        Segment::That => Addressing::Indirect(Reg::THAT, offset),
        Segment::Static => Addressing::Direct(format!("{}.{}", module, offset)),
        Segment::Temp => Addressing::Direct(format!("R{}", TEMP_BASE + offset)),
        Segment::Pointer if offset == 0 => Addressing::Direct(Reg::THIS.to_string()),
        Segment::Pointer => Addressing::Direct(Reg::THAT.to_string()),
    })
}
