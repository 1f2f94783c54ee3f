use crate::{alu::Comp, dest::Dest, jump::Jump};

use color_print::cformat;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    A(u16),
    C { dest: Dest, comp: Comp, jump: Jump },
}

impl Inst {
    /// `111a cccc ccdd djjj` for C-instructions, `0vvv vvvv vvvv vvvv` for A-instructions.
    pub fn to_bin(self) -> u16 {
        match self {
            Inst::A(value) => value & 0x7FFF,
            Inst::C { dest, comp, jump } => {
                0b111 << 13
                    | (comp.bits() as u16) << 6
                    | (dest.bits() as u16) << 3
                    | jump.bits() as u16
            }
        }
    }

    pub fn from_bin(bin: u16) -> Inst {
        if bin & 0x8000 == 0 {
            return Inst::A(bin);
        }
        Inst::C {
            dest: Dest::from_bits((bin >> 3) as u8),
            comp: Comp::from_bits((bin >> 6) as u8),
            jump: Jump::from_bits(bin as u8),
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::A(value) => write!(f, "@{value}"),
            Inst::C { dest, comp, jump } => {
                if dest.bits() != 0 {
                    write!(f, "{dest}=")?;
                }
                match comp.mnemonic() {
                    Some(mnemonic) => write!(f, "{mnemonic}")?,
                    None => write!(f, "?{:07b}", comp.bits())?,
                }
                if *jump != Jump::Null {
                    write!(f, ";{jump}")?;
                }
                Ok(())
            }
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self {
            Inst::A(value) => cformat!("<r>@</><y>{}</>", value),
            Inst::C { dest, comp, jump } => {
                let dest = match dest.bits() {
                    0 => String::new(),
                    _ => cformat!("<b>{}</>=", dest),
                };
                let comp = match comp.mnemonic() {
                    Some(mnemonic) => mnemonic.to_string(),
                    None => cformat!("<r,u>?{:07b}</>", comp.bits()),
                };
                let jump = match jump {
                    Jump::Null => String::new(),
                    _ => cformat!(";<m>{}</>", jump),
                };
                format!("{dest}{comp}{jump}")
            }
        }
    }
}
