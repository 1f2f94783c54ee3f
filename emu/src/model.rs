use crate::error::Error;
use arch::{alu, inst::Inst, jump::Jump, reg::Reg};
use tracing::trace;

pub const ROM_SIZE: usize = 32768;
pub const RAM_SIZE: usize = 32768;

pub struct State {
    rom: Vec<u16>,
    len: usize,
    ram: Vec<u16>,
    a: u16,
    d: u16,
    pc: u16,
    halted: bool,
}

// Memory access
impl State {
    pub fn get(&self, addr: u16) -> u16 {
        self.ram[addr as usize % RAM_SIZE]
    }

    pub fn set(&mut self, addr: u16, val: u16) {
        self.ram[addr as usize % RAM_SIZE] = val;
    }

    pub fn reg(&self, reg: Reg) -> u16 {
        self.get(reg.addr())
    }

    pub fn a(&self) -> u16 {
        self.a
    }

    pub fn d(&self) -> u16 {
        self.d
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }
}

impl State {
    pub fn new() -> Self {
        State {
            rom: vec![0; ROM_SIZE],
            len: 0,
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            halted: false,
        }
    }

    pub fn load_words(&mut self, words: &[u16]) -> Result<(), Error> {
        if words.len() > ROM_SIZE {
            return Err(Error::RomOverflow(words.len()));
        }
        self.rom[..words.len()].copy_from_slice(words);
        self.len = words.len();
        Ok(())
    }

    /// One `0`/`1` string of 16 characters per line, as written by the assembler.
    pub fn load_hack_text(&mut self, text: &str) -> Result<(), Error> {
        let mut words = vec![];
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let word = (line.len() == 16)
                .then(|| u16::from_str_radix(line, 2).ok())
                .flatten()
                .ok_or_else(|| Error::InvalidWord(idx + 1, line.to_string()))?;
            words.push(word);
        }
        self.load_words(&words)
    }

    pub fn load_bin(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let words: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();
        self.load_words(&words)
    }

    /// `.bin` files are read as little endian words, anything else as text.
    pub fn load_rom_file(&mut self, fname: &str) -> Result<(), Error> {
        let open = |e| Error::FileOpen(fname.to_string(), e);
        if fname.ends_with(".bin") {
            self.load_bin(&std::fs::read(fname).map_err(open)?)
        } else {
            self.load_hack_text(&std::fs::read_to_string(fname).map_err(open)?)
        }
    }

    /// PC has left the loaded program or entered an `(L) @L 0;JMP` loop.
    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc as usize >= self.len
    }

    pub fn exec(&mut self, time: u64) -> (u16, Inst) {
        let pc = self.pc;
        let inst = Inst::from_bin(self.rom[pc as usize % ROM_SIZE]);
        trace!("[{:0>6}] {:05}: {}", time, pc, inst);

        match inst {
            Inst::A(value) => {
                self.a = value;
                self.pc = pc + 1;
            }
            Inst::C { dest, comp, jump } => {
                // M and the jump target both use A as it was before this instruction.
                let addr = self.a;
                let out = alu::compute(comp, self.d, addr, self.get(addr));
                if dest.m() {
                    self.set(addr, out);
                }
                if dest.d() {
                    self.d = out;
                }
                if dest.a() {
                    self.a = out;
                }
                if jump.taken(out) {
                    self.halted = jump == Jump::JMP
                        && pc > 0
                        && addr == pc - 1
                        && self.rom[addr as usize] == Inst::A(addr).to_bin();
                    self.pc = addr;
                } else {
                    self.pc = pc + 1;
                }
            }
        }
        (pc, inst)
    }

    /// Execute until terminated or `limit` instructions have run. Returns the count executed.
    pub fn run(&mut self, limit: u64) -> u64 {
        let mut time = 0;
        while time < limit && !self.is_terminated() {
            self.exec(time);
            time += 1;
        }
        time
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> State {
        let mut state = State::new();
        state.load_hack_text(text).unwrap();
        state
    }

    #[test]
    fn add() {
        // @2 D=A @3 D=D+A @0 M=D
        let mut state = load(
            "0000000000000010\n1110110000010000\n0000000000000011\n\
             1110000010010000\n0000000000000000\n1110001100001000\n",
        );
        assert_eq!(state.run(100), 6);
        assert!(state.is_terminated());
        assert_eq!(state.get(0), 5);
    }

    #[test]
    fn max() {
        // R2 = max(R0, R1), ending in an (END) @END 0;JMP loop
        let words = [
            0b0000000000000000, // @R0
            0b1111110000010000, // D=M
            0b0000000000000001, // @R1
            0b1111010011010000, // D=D-M
            0b0000000000001010, // @10
            0b1110001100000001, // D;JGT
            0b0000000000000001, // @R1
            0b1111110000010000, // D=M
            0b0000000000001100, // @12
            0b1110101010000111, // 0;JMP
            0b0000000000000000, // @R0
            0b1111110000010000, // D=M
            0b0000000000000010, // @R2
            0b1110001100001000, // M=D
            0b0000000000001110, // @14
            0b1110101010000111, // 0;JMP
        ];
        for (r0, r1, expect) in [(3, 9, 9), (12, 5, 12), (7, 7, 7)] {
            let mut state = State::new();
            state.load_words(&words).unwrap();
            state.set(0, r0);
            state.set(1, r1);
            state.run(1000);
            assert!(state.is_terminated());
            assert_eq!(state.get(2), expect);
            assert_eq!(state.pc(), 14);
        }
    }

    #[test]
    fn m_uses_previous_a() {
        // @100 AM=M+1 : RAM[100] incremented, A takes the new value
        let mut state = load("0000000001100100\n1111110111101000\n");
        state.set(100, 41);
        state.run(2);
        assert_eq!(state.get(100), 42);
        assert_eq!(state.a(), 42);
    }

    #[test]
    fn rejects_bad_words() {
        let mut state = State::new();
        assert!(matches!(
            state.load_hack_text("0000000000000010\n00102\n"),
            Err(Error::InvalidWord(2, _))
        ));
    }
}
