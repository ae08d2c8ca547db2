use thiserror::Error;

pub type EfResult<T> = Result<T, EfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Value {value:e} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },

    #[error("Parse error: could not read '{input}' as {what}")]
    Parse { input: String, what: &'static str },
}
