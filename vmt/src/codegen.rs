use crate::{
    error::Error,
    parser::{ArithOp, Command, Segment},
    segment::{self, Addressing},
};
use arch::reg::Reg;
use std::collections::BTreeSet;

/// Source of label numbers, shared by every module of one program.
#[derive(Debug, Default)]
pub struct LabelCounter(usize);

impl LabelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> usize {
        let n = self.0;
        self.0 += 1;
        n
    }

    pub fn count(&self) -> usize {
        self.0
    }
}

macro_rules! emit {
    ($gen:expr; $($line:expr),+ $(,)?) => {{
        $( $gen.emit($line); )+
    }};
}

/// Emits the assembly for the commands of one module.
///
/// Every command starts with a `// <command>` comment and ends with a blank line.
/// R13 and R14 are used as scratch registers. Labels inside a function are
/// emitted as `<function>$<label>`.
pub struct CodeGen<'a> {
    module: &'a str,
    labels: &'a mut LabelCounter,
    function: Option<String>,
    output: Vec<String>,
    statics: BTreeSet<u16>,
}

impl<'a> CodeGen<'a> {
    pub fn new(module: &'a str, labels: &'a mut LabelCounter) -> Self {
        CodeGen {
            module,
            labels,
            function: None,
            output: Vec::new(),
            statics: BTreeSet::new(),
        }
    }

    /// Emitted lines and the number of distinct static slots used.
    pub fn finish(self) -> (Vec<String>, usize) {
        (self.output, self.statics.len())
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    fn fresh_label(&mut self, prefix: &str) -> String {
        format!("{}.{}", prefix, self.labels.next())
    }

    fn scoped(&self, label: &str) -> String {
        match &self.function {
            Some(function) => format!("{}${}", function, label),
            None => label.to_string(),
        }
    }

    pub fn gen(&mut self, cmd: &Command) -> Result<(), Error> {
        self.emit(format!("// {}", cmd));
        match cmd {
            Command::Arithmetic(op) => self.gen_arith(*op),
            Command::Push(seg, off) => self.gen_push(*seg, *off)?,
            Command::Pop(seg, off) => self.gen_pop(*seg, *off)?,
            Command::Label(name) => self.emit(format!("({})", self.scoped(name))),
            Command::Goto(name) => emit!(self; format!("@{}", self.scoped(name)), "0;JMP"),
            Command::IfGoto(name) => {
                self.pop_d();
                emit!(self; format!("@{}", self.scoped(name)), "D;JNE");
            }
            Command::Function(name, locals) => self.gen_function(name, *locals),
            Command::Call(name, args) => self.gen_call(name, *args),
            Command::Return => self.gen_return(),
        }
        self.emit("");
        Ok(())
    }

    /// RAM[SP++] = D
    fn push_d(&mut self) {
        emit!(self; "@SP", "A=M", "M=D", "@SP", "M=M+1");
    }

    /// D = RAM[--SP]
    fn pop_d(&mut self) {
        emit!(self; "@SP", "AM=M-1", "D=M");
    }

    fn resolve(&mut self, seg: Segment, off: u16) -> Result<Addressing, Error> {
        let addressing = segment::resolve(seg, off, self.module)?;
        if seg == Segment::Static {
            self.statics.insert(off);
        }
        Ok(addressing)
    }

    fn gen_push(&mut self, seg: Segment, off: u16) -> Result<(), Error> {
        match self.resolve(seg, off)? {
            Addressing::Constant(n) => emit!(self; format!("@{}", n), "D=A"),
            Addressing::Indirect(reg, n) => {
                emit!(self; format!("@{}", reg), "D=M", format!("@{}", n), "A=D+A", "D=M")
            }
            Addressing::Direct(symbol) => emit!(self; format!("@{}", symbol), "D=M"),
        }
        self.push_d();
        Ok(())
    }

    fn gen_pop(&mut self, seg: Segment, off: u16) -> Result<(), Error> {
        match self.resolve(seg, off)? {
            Addressing::Constant(_) => return Err(Error::PopConstant),
            Addressing::Indirect(reg, n) => {
                emit!(self; format!("@{}", reg), "D=M", format!("@{}", n), "D=D+A", "@R13", "M=D");
                self.pop_d();
                emit!(self; "@R13", "A=M", "M=D");
            }
            Addressing::Direct(symbol) => {
                self.pop_d();
                emit!(self; format!("@{}", symbol), "M=D");
            }
        }
        Ok(())
    }

    fn gen_arith(&mut self, op: ArithOp) {
        match op {
            ArithOp::Add => self.binary("M=D+M"),
            ArithOp::Sub => self.binary("M=M-D"),
            ArithOp::And => self.binary("M=D&M"),
            ArithOp::Or => self.binary("M=D|M"),
            ArithOp::Neg => emit!(self; "@SP", "A=M-1", "M=-M"),
            ArithOp::Not => emit!(self; "@SP", "A=M-1", "M=!M"),
            ArithOp::Eq => self.compare("EQ", "D;JEQ"),
            ArithOp::Gt => self.compare("GT", "D;JGT"),
            ArithOp::Lt => self.compare("LT", "D;JLT"),
        }
    }

    /// Pops y, leaves A on x and applies `store` to M = x, D = y.
    fn binary(&mut self, store: &str) {
        emit!(self; "@SP", "AM=M-1", "D=M", "A=A-1", store);
    }

    /// Replaces x, y with -1 when `jump` holds for x - y, else 0.
    fn compare(&mut self, tag: &str, jump: &str) {
        let label = self.fresh_label(tag);
        let end = format!("{}.end", label);
        emit!(self;
            "@SP", "AM=M-1", "D=M", "A=A-1", "D=M-D",
            format!("@{}", label), jump,
            "@SP", "A=M-1", "M=0",
            format!("@{}", end), "0;JMP",
            format!("({})", label),
            "@SP", "A=M-1", "M=-1",
            format!("({})", end),
        );
    }

    fn gen_function(&mut self, name: &str, locals: u8) {
        self.function = Some(name.to_string());
        self.emit(format!("({})", name));
        for _ in 0..locals {
            emit!(self; "@SP", "A=M", "M=0", "@SP", "M=M+1");
        }
    }

    fn gen_call(&mut self, name: &str, args: u8) {
        let ret = self.fresh_label(&format!("{}$ret", name));
        emit!(self; format!("@{}", ret), "D=A");
        self.push_d();
        for reg in [Reg::LCL, Reg::ARG, Reg::THIS, Reg::THAT] {
            emit!(self; format!("@{}", reg), "D=M");
            self.push_d();
        }
        // ARG = SP - 5 - args, LCL = SP
        emit!(self;
            "@SP", "D=M", format!("@{}", 5 + args as u16), "D=D-A", "@ARG", "M=D",
            "@SP", "D=M", "@LCL", "M=D",
            format!("@{}", name), "0;JMP",
            format!("({})", ret),
        );
    }

    fn gen_return(&mut self) {
        // R13 = frame, R14 = return address
        emit!(self;
            "@LCL", "D=M", "@R13", "M=D",
            "@5", "A=D-A", "D=M", "@R14", "M=D",
        );
        self.pop_d();
        emit!(self; "@ARG", "A=M", "M=D", "@ARG", "D=M+1", "@SP", "M=D");
        // ARG and LCL go last, the frame is read through R13
        for (n, reg) in [(1, Reg::THAT), (2, Reg::THIS), (3, Reg::ARG), (4, Reg::LCL)] {
            emit!(self; "@R13", "D=M", format!("@{}", n), "A=D-A", "D=M", format!("@{}", reg), "M=D");
        }
        emit!(self; "@R14", "A=M", "0;JMP");
    }
}

pub const HALT_LABEL: &str = "BOOTSTRAP.halt";

/// Sets SP to 256, calls `entry` and parks in a halt loop if it ever returns.
pub fn bootstrap(entry: &str, labels: &mut LabelCounter) -> Vec<String> {
    let mut code = CodeGen::new("BOOTSTRAP", labels);
    emit!(code; "// bootstrap", "@256", "D=A", "@SP", "M=D", "");
    code.gen_call(entry, 0);
    emit!(code;
        format!("({})", HALT_LABEL),
        format!("@{}", HALT_LABEL),
        "0;JMP",
        "",
    );
    code.finish().0
}
