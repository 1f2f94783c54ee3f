use crate::{
    error::Error,
    parser::{Code, Operand, Stmt},
    symbol::SymbolTable,
};
use arch::{alu::Comp, dest::Dest, inst::Inst, jump::Jump, reg::MAX_ADDRESS, source};
use tracing::{debug, info, trace, warn};

/// Assembled words together with what is needed to print a listing.
#[derive(Debug, Clone)]
pub struct Program {
    pub words: Vec<u16>,
    pub symbols: SymbolTable,
    pub listing: Vec<Listed>,
}

/// One source line with code; `pc` is set for instructions, `None` for labels.
#[derive(Debug, Clone)]
pub struct Listed {
    pub no: usize,
    pub raw: String,
    pub pc: Option<u16>,
}

/// Assemble a whole source text. Stops at the first error.
pub fn assemble(src: &str) -> Result<Program, Error> {
    let mut symbols = SymbolTable::new();
    let mut listing = Vec::new();
    let mut codes = Vec::new();

    // 1. Parse lines and bind labels to the index of the next instruction
    for (no, raw, line) in source::lines(src) {
        trace!(">>> {}", line);
        let stmt = Stmt::parse(line).map_err(|e| e.at(no, raw))?;
        let pc = u16::try_from(codes.len())
            .ok()
            .filter(|&pc| pc <= MAX_ADDRESS)
            .ok_or_else(|| Error::ProgramSize.at(no, raw))?;
        match stmt {
            Stmt::Label(name) => {
                if let Some(prev) = symbols.define(&name, pc) {
                    warn!(
                        "line {}: re-defined label `{}` (was {}, now {})",
                        no, name, prev, pc
                    );
                }
                debug!("label `{}` -> {}", name, pc);
                listing.push(Listed {
                    no,
                    raw: raw.to_string(),
                    pc: None,
                });
            }
            Stmt::Code(code) => {
                listing.push(Listed {
                    no,
                    raw: raw.to_string(),
                    pc: Some(pc),
                });
                codes.push((no, raw, code));
            }
        }
    }

    // 2. Resolve symbols and encode
    let mut words = Vec::with_capacity(codes.len());
    for (no, raw, code) in &codes {
        let inst = resolve(code, &mut symbols).map_err(|e| e.at(*no, raw))?;
        trace!("{:>5}: {} -> {:016b}", words.len(), inst, inst.to_bin());
        words.push(inst.to_bin());
    }

    info!(
        "Generated {} words of hack ({} variables)",
        words.len(),
        symbols.variables()
    );
    Ok(Program {
        words,
        symbols,
        listing,
    })
}

fn resolve(code: &Code, symbols: &mut SymbolTable) -> Result<Inst, Error> {
    match code {
        Code::A(Operand::Literal(value)) => Ok(Inst::A(*value)),
        Code::A(Operand::Symbol(name)) => Ok(Inst::A(symbols.resolve(name)?)),
        Code::C { dest, comp, jump } => {
            let undefined = |field, raw: &String| Error::UndefinedOperand {
                field,
                raw: raw.clone(),
            };
            let comp = Comp::parse(comp).ok_or_else(|| undefined("COMP", comp))?;
            let dest = Dest::parse(dest).ok_or_else(|| undefined("DEST", dest))?;
            let jump = Jump::parse(jump).ok_or_else(|| undefined("JUMP", jump))?;
            Ok(Inst::C { dest, comp, jump })
        }
    }
}

/// Serialization of the assembled words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// One 16-character binary string per line
    #[default]
    Text,
    /// Two bytes per word, little endian
    Binary,
}

impl Format {
    pub fn serialize(self, words: &[u16]) -> Vec<u8> {
        match self {
            Format::Text => words
                .iter()
                .flat_map(|word| format!("{word:016b}\n").into_bytes())
                .collect(),
            Format::Binary => words.iter().flat_map(|word| word.to_le_bytes()).collect(),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => "hack",
            Format::Binary => "bin",
        }
    }
}
