use color_print::ceprintln;
use thiserror::Error;

/// Coarse classification of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Range,
    UndefinedOperand,
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unexpected instruction: `{0}`")]
    Syntax(String),

    #[error("A-instruction constant value `{0}` exceeds maximum 32767")]
    ConstantRange(String),

    #[error("No free register left for variable `{0}`")]
    AddressSpace(String),

    #[error("Program exceeds 32768 instructions")]
    ProgramSize,

    #[error("Invalid {field}: `{raw}`")]
    UndefinedOperand { field: &'static str, raw: String },

    #[error("line {no}: {source}")]
    Line {
        no: usize,
        raw: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Attach the source line the error was raised on.
    pub fn at(self, no: usize, raw: &str) -> Error {
        Error::Line {
            no,
            raw: raw.to_string(),
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::ConstantRange(_) | Error::AddressSpace(_) | Error::ProgramSize => {
                ErrorKind::Range
            }
            Error::UndefinedOperand { .. } => ErrorKind::UndefinedOperand,
            Error::Line { source, .. } => source.kind(),
            Error::FileOpen(..) | Error::FileWrite(..) => ErrorKind::Io,
        }
    }

    /// Line number of the offending line, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Line { no, .. } => Some(*no),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str) {
        match self {
            Error::Line { no, raw, source } => {
                ceprintln!("<red,bold>error</>: {}", source);
                ceprintln!("     <blue>--></> <underline>{}:{}</>", file, no);
                ceprintln!("      <blue>|</>");
                ceprintln!(" <blue>{:>4} |</> {}", no, raw);
                ceprintln!("      <blue>|</>");
            }
            _ => ceprintln!("<red,bold>error</>: {}", self),
        }
    }
}
