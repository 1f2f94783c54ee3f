use num_enum::IntoPrimitive;
use strum::{Display, EnumString};

/// Virtual registers holding the stack pointer and the segment bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, EnumString, Display)]
#[repr(u16)]
pub enum Reg {
    SP,
    LCL,
    ARG,
    THIS,
    THAT,
}

pub const SCREEN: u16 = 16384;
pub const KBD: u16 = 24576;

/// Largest value an A-instruction can load.
pub const MAX_ADDRESS: u16 = 32767;

/// First register handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

pub const PREDEFINED: [(&str, u16); 23] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", SCREEN),
    ("KBD", KBD),
];

impl Reg {
    pub fn addr(self) -> u16 {
        self.into()
    }
}

#[test]
fn test() {
    assert_eq!(Reg::THAT.addr(), 4);
    assert_eq!(Reg::LCL.to_string(), "LCL");
    assert_eq!("ARG".parse::<Reg>(), Ok(Reg::ARG));
    for reg in [Reg::SP, Reg::LCL, Reg::ARG, Reg::THIS, Reg::THAT] {
        assert!(PREDEFINED
            .iter()
            .any(|&(name, addr)| name == reg.to_string() && addr == reg.addr()));
    }
}
