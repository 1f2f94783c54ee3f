use std::fmt;

/// The 3-bit dest field: A=100, D=010, M=001.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dest(u8);

impl Dest {
    const A: u8 = 0b100;
    const D: u8 = 0b010;
    const M: u8 = 0b001;

    /// Accepts any ordering of distinct letters from `A`, `M`, `D`, including the empty string.
    pub fn parse(s: &str) -> Option<Dest> {
        let mut bits = 0;
        for c in s.chars() {
            let bit = match c {
                'A' => Self::A,
                'D' => Self::D,
                'M' => Self::M,
                _ => return None,
            };
            if bits & bit != 0 {
                return None;
            }
            bits |= bit;
        }
        Some(Dest(bits))
    }

    pub fn from_bits(bits: u8) -> Dest {
        Dest(bits & 0b111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn a(self) -> bool {
        self.0 & Self::A != 0
    }

    pub fn d(self) -> bool {
        self.0 & Self::D != 0
    }

    pub fn m(self) -> bool {
        self.0 & Self::M != 0
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (set, c) in [(self.a(), 'A'), (self.m(), 'M'), (self.d(), 'D')] {
            if set {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
