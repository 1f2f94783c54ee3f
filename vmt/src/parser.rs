use crate::{error::Error, segment};
use std::fmt;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Local,
    Argument,
    This,
    That,
    Constant,
    Static,
    Pointer,
    Temp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arithmetic(ArithOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u8),
    Call(String, u8),
    Return,
}

const MAX_OFFSET: u16 = 32767;
const MAX_COUNT: u16 = 127;

impl Command {
    /// Parses one normalized line.
    pub fn parse(code: &str) -> Result<Command, Error> {
        let tokens: Vec<&str> = code.split_whitespace().collect();
        match tokens.as_slice() {
            ["return"] => Ok(Command::Return),
            [op] => op
                .parse()
                .map(Command::Arithmetic)
                .map_err(|_| Error::UnknownCommand(code.to_string())),
            ["push", seg, off] => {
                let (seg, off) = access(seg, off)?;
                Ok(Command::Push(seg, off))
            }
            ["pop", seg, off] => {
                let (seg, off) = access(seg, off)?;
                if seg == Segment::Constant {
                    return Err(Error::PopConstant);
                }
                Ok(Command::Pop(seg, off))
            }
            ["label", name] => Ok(Command::Label(name.to_string())),
            ["goto", name] => Ok(Command::Goto(name.to_string())),
            ["if-goto", name] => Ok(Command::IfGoto(name.to_string())),
            ["function", name, n] => Ok(Command::Function(name.to_string(), count(n)?)),
            ["call", name, n] => Ok(Command::Call(name.to_string(), count(n)?)),
            _ => Err(Error::UnknownCommand(code.to_string())),
        }
    }
}

fn access(seg: &str, off: &str) -> Result<(Segment, u16), Error> {
    let seg: Segment = seg
        .parse()
        .map_err(|_| Error::InvalidSegment(seg.to_string()))?;
    let off = number(off, MAX_OFFSET, Error::OffsetRange)?;
    segment::check(seg, off)?;
    Ok((seg, off))
}

fn count(tok: &str) -> Result<u8, Error> {
    number(tok, MAX_COUNT, Error::CountRange).map(|n| n as u8)
}

/// Integers outside `0..=max` (negatives included) are range errors,
/// anything that is not an integer is a syntax error.
fn number(tok: &str, max: u16, range: fn(String) -> Error) -> Result<u16, Error> {
    let digits = tok.strip_prefix('-').unwrap_or(tok);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidNumber(tok.to_string()));
    }
    match tok.parse::<i64>() {
        Ok(n) if (0..=max as i64).contains(&n) => Ok(n as u16),
        _ => Err(range(tok.to_string())),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Arithmetic(op) => write!(f, "{}", op),
            Command::Push(seg, off) => write!(f, "push {} {}", seg, off),
            Command::Pop(seg, off) => write!(f, "pop {} {}", seg, off),
            Command::Label(name) => write!(f, "label {}", name),
            Command::Goto(name) => write!(f, "goto {}", name),
            Command::IfGoto(name) => write!(f, "if-goto {}", name),
            Command::Function(name, n) => write!(f, "function {} {}", name, n),
            Command::Call(name, n) => write!(f, "call {} {}", name, n),
            Command::Return => write!(f, "return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! case {
        ($name:ident, $code:expr, $expect:expr) => {
            #[test]
            fn $name() {
                let cmd = Command::parse($code).unwrap();
                assert_eq!(cmd, $expect);
                assert_eq!(cmd.to_string(), $code.split_whitespace().collect::<Vec<_>>().join(" "));
            }
        };
    }

    macro_rules! fail {
        ($name:ident, $code:expr, $err:pat) => {
            #[test]
            fn $name() {
                let res = Command::parse($code);
                assert!(matches!(res, Err($err)), "{:?}", res);
            }
        };
    }

    case!(add, "add", Command::Arithmetic(ArithOp::Add));
    case!(not, "not", Command::Arithmetic(ArithOp::Not));
    case!(push_const, "push constant 7", Command::Push(Segment::Constant, 7));
    case!(push_max, "push constant 32767", Command::Push(Segment::Constant, 32767));
    case!(pop_local, "pop  local\t2", Command::Pop(Segment::Local, 2));
    case!(pop_temp, "pop temp 7", Command::Pop(Segment::Temp, 7));
    case!(pop_pointer, "pop pointer 1", Command::Pop(Segment::Pointer, 1));
    case!(label, "label LOOP_START", Command::Label("LOOP_START".into()));
    case!(goto, "goto END", Command::Goto("END".into()));
    case!(if_goto, "if-goto N_LT_2", Command::IfGoto("N_LT_2".into()));
    case!(function, "function Main.fib 127", Command::Function("Main.fib".into(), 127));
    case!(call, "call Math.multiply 2", Command::Call("Math.multiply".into(), 2));
    case!(ret, "return", Command::Return);

    fail!(unknown_op, "mul", Error::UnknownCommand(_));
    fail!(extra_token, "add 1", Error::UnknownCommand(_));
    fail!(missing_offset, "push constant", Error::UnknownCommand(_));
    fail!(return_arg, "return 0", Error::UnknownCommand(_));
    fail!(upper_case, "Add", Error::UnknownCommand(_));
    fail!(bad_segment, "push heap 0", Error::InvalidSegment(_));
    fail!(bad_offset, "push local x", Error::InvalidNumber(_));
    fail!(offset_range, "push constant 32768", Error::OffsetRange(_));
    fail!(negative_offset, "push local -1", Error::OffsetRange(_));
    fail!(count_range, "function f 128", Error::CountRange(_));
    fail!(negative_count, "call f -1", Error::CountRange(_));
    fail!(pop_constant, "pop constant 5", Error::PopConstant);
    fail!(push_pointer, "push pointer 2", Error::PointerRange(2));
    fail!(pop_pointer_range, "pop pointer 2", Error::PointerRange(2));
    fail!(pop_temp_range, "pop temp 8", Error::TempRange(8));
    fail!(static_range, "push static 240", Error::StaticRange(240));
}
