use thiserror::Error;

/// The result of a formula operation that can fail (reading, converting literals).
///
/// Encoders never fail: they only append clauses and variables to formulas.
pub type Result<T> = std::result::Result<T, FormulaError>;

/// Error returned when building a formula from external data failed.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// `0` terminates DIMACS clauses, it is not a literal.
    #[error("0 is not a valid literal in DIMACS format")]
    ZeroLiteral,

    /// The DIMACS literal does not fit the variable range.
    #[error("literal {0} is out of the supported variable range")]
    VariableOutOfRange(i64),

    /// Just forwarding a [`ParserError`].
    #[error("{0}")]
    ParserError(#[from] ParserError),
}

/// Error returned when parsing a DIMACS file failed.
#[derive(Debug, Error)]
pub enum ParserError {
    /// A clause was found before any `p cnf` line.
    #[error("missing `p cnf <vars> <clauses>` header before line {0}")]
    MissingHeader(usize),

    /// The header line is malformed.
    #[error("invalid header on line {line}: {content}")]
    InvalidHeader { line: usize, content: String },

    /// Invalid token, an integer literal was expected.
    #[error("invalid token on line {line}: {token}")]
    InvalidToken { line: usize, token: String },

    /// The input ended in the middle of a clause (no terminating `0`).
    #[error("last clause is not terminated by 0")]
    UnterminatedClause,

    /// An IO error occured (file doesn't exist, truncated gzip stream, ...).
    #[error("io error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ParserError {
    fn from(value: std::io::Error) -> Self {
        ParserError::IoError(value.to_string())
    }
}
