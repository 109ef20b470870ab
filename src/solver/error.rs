/// Error taxonomy for the solver core (§7): the only condition the core
/// surfaces to its caller instead of handling internally is a malformed
/// clause handed to `add_clause`.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClauseError {
    #[error("clause contains the zero sentinel, which is not a valid literal")]
    ZeroLiteral,
    #[error("clause contains literal {0} twice")]
    DuplicateLiteral(i32),
    #[error("clause contains both {0} and its complement")]
    ComplementaryLiterals(i32),
}
