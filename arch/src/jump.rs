use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumString};

/// The 3-bit jump field. Bits are (lt, eq, gt).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, FromPrimitive, IntoPrimitive, EnumString, Display,
)]
#[repr(u8)]
pub enum Jump {
    #[default]
    #[strum(serialize = "")]
    Null,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    pub fn parse(s: &str) -> Option<Jump> {
        s.parse().ok()
    }

    pub fn from_bits(bits: u8) -> Jump {
        Jump::from(bits & 0b111)
    }

    pub fn bits(self) -> u8 {
        self.into()
    }

    /// Whether the jump is taken for the ALU output `out`, read as two's complement.
    pub fn taken(self, out: u16) -> bool {
        let bits = self.bits();
        let out = out as i16;
        (bits & 0b100 != 0 && out < 0)
            || (bits & 0b010 != 0 && out == 0)
            || (bits & 0b001 != 0 && out > 0)
    }
}
