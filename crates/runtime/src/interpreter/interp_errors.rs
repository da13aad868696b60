use colored::*;
use thiserror::Error;

use crate::environment::EnvError;
use crate::values::ValueError;
use tools::errors::ReportRunErr;

#[derive(Error, Debug, PartialEq)]
pub enum InterpreterError {
    // Declarations
    #[error("{} declaring -{0}-: expected value of type -{1}-, found -{2}-", "Error".red().bold())]
    TypeMismatch(String, String, &'static str),

    #[error("{} declaring array -{0}-: initializer has {2} elements but capacity is {1}", "Error".red().bold())]
    ArraySizeExceeded(String, usize, usize),

    // Conditions
    #[error("{} condition must be a bool, found -{0}-", "Error".red().bold())]
    NotABoolean(&'static str),

    // Calls
    #[error("{} -{0}- is not callable", "Error".red().bold())]
    NotCallable(String),

    #[error("{} calling -{0}-: expected {1} arguments, found {2}", "Error".red().bold())]
    ArityMismatch(String, usize, usize),

    #[error("{} in native function: {0}", "Error".red().bold())]
    NativeCall(String),

    // Arrays
    #[error("{} indexing non array variable -{0}-", "Error".red().bold())]
    NonArrayIndexing(String),

    #[error("{} array index must be an int, found -{0}-", "Error".red().bold())]
    NonIntegerIndex(&'static str),

    #[error("{} during array access -{0}-: {1}", "Error".red().bold())]
    ArrayAccess(String, ValueError),

    // Operators and lookups carry their own report
    #[error("{0}")]
    Operation(#[from] ValueError),

    #[error("{0}")]
    FromEnv(#[from] EnvError),
}

// Implement global trait for the final, line-tagged error
impl ReportRunErr for InterpreterError {}
