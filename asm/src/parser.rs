use crate::error::Error;
use arch::reg::MAX_ADDRESS;

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Label(String),
    Code(Code),
}

impl Stmt {
    /// Classify a normalized, non-empty line.
    pub fn parse(code: &str) -> Result<Stmt, Error> {
        if let Some(value) = code.strip_prefix('@') {
            return Ok(Stmt::Code(Code::A(Operand::parse(value)?)));
        }

        // (LOOP)
        if let Some(rest) = code.strip_prefix('(') {
            return match rest.strip_suffix(')') {
                Some(name) if !name.is_empty() => Ok(Stmt::Label(name.to_string())),
                _ => Err(Error::Syntax(code.to_string())),
            };
        }

        // dest=comp;jump
        let (dest, rest) = code.split_once('=').unwrap_or(("", code));
        let (comp, jump) = rest.rsplit_once(';').unwrap_or((rest, ""));
        Ok(Stmt::Code(Code::C {
            dest: strip(dest),
            comp: strip(comp),
            jump: strip(jump),
        }))
    }
}

fn strip(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r'))
        .collect()
}

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    A(Operand),
    C {
        dest: String,
        comp: String,
        jump: String,
    },
}

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(u16),
    Symbol(String),
}

impl Operand {
    fn parse(s: &str) -> Result<Operand, Error> {
        match s.chars().next() {
            None => Err(Error::Syntax(format!("@{s}"))),
            Some(head) if head.is_ascii_digit() => {
                if !s.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::Syntax(format!("@{s}")));
                }
                match s.parse::<u64>() {
                    Ok(v) if v <= MAX_ADDRESS as u64 => Ok(Operand::Literal(v as u16)),
                    _ => Err(Error::ConstantRange(s.to_string())),
                }
            }
            Some(_) => Ok(Operand::Symbol(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn c(dest: &str, comp: &str, jump: &str) -> Stmt {
        Stmt::Code(Code::C {
            dest: dest.to_string(),
            comp: comp.to_string(),
            jump: jump.to_string(),
        })
    }

    macro_rules! case {
        ($name:ident, $code:expr, $expect:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Stmt::parse($code).unwrap(), $expect);
            }
        };
    }

    case!(a_literal, "@42", Stmt::Code(Code::A(Operand::Literal(42))));
    case!(a_symbol, "@LOOP", Stmt::Code(Code::A(Operand::Symbol("LOOP".into()))));
    case!(a_dotted, "@Main.0", Stmt::Code(Code::A(Operand::Symbol("Main.0".into()))));
    case!(label, "(Sys.init$ret.0)", Stmt::Label("Sys.init$ret.0".into()));
    case!(c_full, "AM=M+1;JMP", c("AM", "M+1", "JMP"));
    case!(c_no_jump, "D=M", c("D", "M", ""));
    case!(c_no_dest, "D;JGT", c("", "D", "JGT"));
    case!(c_comp_only, "0", c("", "0", ""));
    case!(c_spaces, "D = D + A ; JNE", c("D", "D+A", "JNE"));
    case!(c_first_eq_last_semi, "M=D;J;JMP", c("M", "D;J", "JMP"));

    macro_rules! fail {
        ($name:ident, $code:expr, $kind:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Stmt::parse($code).unwrap_err().kind(), $kind);
            }
        };
    }

    fail!(label_unclosed, "(LOOP", ErrorKind::Syntax);
    fail!(label_empty, "()", ErrorKind::Syntax);
    fail!(a_empty, "@", ErrorKind::Syntax);
    fail!(a_digit_symbol, "@1abc", ErrorKind::Syntax);
    fail!(a_too_large, "@32768", ErrorKind::Range);
    fail!(a_huge, "@99999999999999999999999", ErrorKind::Range);
}
