use color_print::ceprintln;
use thiserror::Error;

/// Coarse classification of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Range,
    UndefinedOperand,
    Semantic,
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Invalid segment: `{0}`")]
    InvalidSegment(String),

    #[error("Invalid number: `{0}`")]
    InvalidNumber(String),

    #[error("Value `{0}` exceeds maximum 32767")]
    OffsetRange(String),

    #[error("Count `{0}` exceeds maximum 127")]
    CountRange(String),

    #[error("Static slot {0} exceeds maximum 239")]
    StaticRange(u16),

    #[error("Temp slot {0} exceeds maximum 7")]
    TempRange(u16),

    #[error("Pointer offset {0} must be 0 or 1")]
    PointerRange(u16),

    #[error("Constant segment cannot be used with pop command")]
    PopConstant,

    #[error("{module}:{no}: {source}")]
    Line {
        module: String,
        no: usize,
        raw: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to read {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("No .vm files found in {0}")]
    NoModules(String),
}

impl Error {
    /// Attach the module and source line the error was raised on.
    pub fn at(self, module: &str, no: usize, raw: &str) -> Error {
        Error::Line {
            module: module.to_string(),
            no,
            raw: raw.to_string(),
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownCommand(_) | Error::InvalidNumber(_) => ErrorKind::Syntax,
            Error::OffsetRange(_)
            | Error::CountRange(_)
            | Error::StaticRange(_)
            | Error::TempRange(_)
            | Error::PointerRange(_) => ErrorKind::Range,
            Error::InvalidSegment(_) => ErrorKind::UndefinedOperand,
            Error::PopConstant => ErrorKind::Semantic,
            Error::Line { source, .. } => source.kind(),
            Error::FileRead(..) | Error::FileWrite(..) | Error::NoModules(_) => ErrorKind::Io,
        }
    }

    /// Module a line error was raised in.
    pub fn module(&self) -> Option<&str> {
        match self {
            Error::Line { module, .. } => Some(module.as_str()),
            _ => None,
        }
    }

    /// `<file>:<line>` of a line error, naming the module when the file is unknown.
    pub fn location(&self, file: Option<&str>) -> Option<String> {
        match self {
            Error::Line { module, no, .. } => {
                Some(format!("{}:{}", file.unwrap_or(module.as_str()), no))
            }
            _ => None,
        }
    }

    pub fn print_diag(&self, file: Option<&str>) {
        match (self, self.location(file)) {
            (
                Error::Line {
                    no, raw, source, ..
                },
                Some(location),
            ) => {
                ceprintln!("<red,bold>error</>: {}", source);
                ceprintln!("     <blue>--></> <underline>{}</>", location);
                ceprintln!("      <blue>|</>");
                ceprintln!(" <blue>{:>4} |</> {}", no, raw);
                ceprintln!("      <blue>|</>");
            }
            _ => ceprintln!("<red,bold>error</>: {}", self),
        }
    }
}
