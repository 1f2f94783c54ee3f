use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("line {0}: `{1}` is not a 16-bit binary word")]
    InvalidWord(usize, String),

    #[error("Program of {0} words does not fit in ROM")]
    RomOverflow(usize),
}
