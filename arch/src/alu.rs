use bimap::BiMap;
use once_cell::sync::Lazy;

// a zx nx zy ny f no
static COMP: Lazy<BiMap<&'static str, u8>> = Lazy::new(|| {
    BiMap::from_iter([
        ("0", 0b0101010),
        ("1", 0b0111111),
        ("-1", 0b0111010),
        ("D", 0b0001100),
        ("A", 0b0110000),
        ("M", 0b1110000),
        ("!D", 0b0001101),
        ("!A", 0b0110001),
        ("!M", 0b1110001),
        ("-D", 0b0001111),
        ("-A", 0b0110011),
        ("-M", 0b1110011),
        ("D+1", 0b0011111),
        ("A+1", 0b0110111),
        ("M+1", 0b1110111),
        ("D-1", 0b0001110),
        ("A-1", 0b0110010),
        ("M-1", 0b1110010),
        ("D+A", 0b0000010),
        ("D+M", 0b1000010),
        ("D-A", 0b0010011),
        ("D-M", 0b1010011),
        ("A-D", 0b0000111),
        ("M-D", 0b1000111),
        ("D&A", 0b0000000),
        ("D&M", 0b1000000),
        ("D|A", 0b0010101),
        ("D|M", 0b1010101),
    ])
});

/// The 7-bit comp field of a C-instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comp(u8);

impl Comp {
    pub fn parse(s: &str) -> Option<Comp> {
        COMP.get_by_left(s).map(|&bits| Comp(bits))
    }

    pub fn from_bits(bits: u8) -> Comp {
        Comp(bits & 0b111_1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// `None` for control bit patterns that have no mnemonic.
    pub fn mnemonic(self) -> Option<&'static str> {
        COMP.get_by_right(&self.0).copied()
    }

    pub fn reads_m(self) -> bool {
        self.0 & 0b100_0000 != 0
    }
}

/// ALU output for `comp` with `d` as x and either `a` or `m` as y.
pub fn compute(comp: Comp, d: u16, a: u16, m: u16) -> u16 {
    let bits = comp.bits();
    let flag = |mask: u8| bits & mask != 0;

    let mut x = d;
    let mut y = if comp.reads_m() { m } else { a };
    if flag(0b10_0000) {
        x = 0;
    }
    if flag(0b01_0000) {
        x = !x;
    }
    if flag(0b00_1000) {
        y = 0;
    }
    if flag(0b00_0100) {
        y = !y;
    }
    let out = if flag(0b00_0010) { x.wrapping_add(y) } else { x & y };
    if flag(0b00_0001) {
        !out
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: u16 = 0x1234;
    const A: u16 = 0x00F0;
    const M: u16 = 0xFF0F;

    macro_rules! test_comp {
        ($($name:ident: $mnemonic:expr => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let comp = Comp::parse($mnemonic).unwrap();
                    assert_eq!(comp.mnemonic(), Some($mnemonic));
                    assert_eq!(compute(comp, D, A, M), $expect);
                }
            )*
        }
    }

    test_comp! {
        comp_zero: "0" => 0,
        comp_one: "1" => 1,
        comp_minus_one: "-1" => 0xFFFF,
        comp_d: "D" => D,
        comp_a: "A" => A,
        comp_m: "M" => M,
        comp_not_d: "!D" => !D,
        comp_not_m: "!M" => !M,
        comp_neg_d: "-D" => D.wrapping_neg(),
        comp_neg_a: "-A" => A.wrapping_neg(),
        comp_d_plus_1: "D+1" => D + 1,
        comp_m_plus_1: "M+1" => M + 1,
        comp_a_minus_1: "A-1" => A - 1,
        comp_m_minus_1: "M-1" => M - 1,
        comp_d_plus_a: "D+A" => D + A,
        comp_d_plus_m: "D+M" => D.wrapping_add(M),
        comp_d_minus_a: "D-A" => D - A,
        comp_d_minus_m: "D-M" => D.wrapping_sub(M),
        comp_a_minus_d: "A-D" => A.wrapping_sub(D),
        comp_m_minus_d: "M-D" => M - D,
        comp_d_and_a: "D&A" => D & A,
        comp_d_and_m: "D&M" => D & M,
        comp_d_or_a: "D|A" => D | A,
        comp_d_or_m: "D|M" => D | M,
    }

    #[test]
    fn unknown_mnemonic() {
        assert_eq!(Comp::parse("D+D"), None);
        assert_eq!(Comp::parse("M+D"), None);
        assert_eq!(Comp::from_bits(0b0000001).mnemonic(), None);
    }
}
