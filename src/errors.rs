use thiserror::Error;

/// The result type for the `dfamin` crate.
pub type Result<T> = std::result::Result<T, DfaminError>;

/// The error type for the `dfamin` crate.
#[derive(Error, Debug)]
pub struct DfaminError {
    /// The source of the error.
    pub source: Box<DfaminErrorKind>,
}

impl DfaminError {
    /// Create a new `DfaminError`.
    pub fn new(kind: DfaminErrorKind) -> Self {
        DfaminError {
            source: Box::new(kind),
        }
    }
}

impl std::fmt::Display for DfaminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum DfaminErrorKind {
    /// The input stream did not tokenize into the expected shape (wrong
    /// arity, a non-integer token, a truncated stream, or a negative
    /// `n`/`m`/`f` count — counts are parsed as `usize`, so a negative value
    /// is a token-shape failure, not a semantic one).
    #[error("malformed input: {0}")]
    Parse(String),

    /// The input tokenized correctly but describes an inconsistent
    /// automaton (an out-of-range state index).
    #[error("inconsistent automaton: {0}")]
    Invalid(String),

    /// A std::io error occurred while reading or writing.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<std::io::Error> for DfaminError {
    fn from(error: std::io::Error) -> Self {
        DfaminError::new(DfaminErrorKind::Io(error))
    }
}

impl From<DfaminErrorKind> for DfaminError {
    fn from(kind: DfaminErrorKind) -> Self {
        DfaminError::new(kind)
    }
}
