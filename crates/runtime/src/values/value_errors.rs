use colored::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("{} operator '{0}' not supported between -{1}- and -{2}-", "Error".red().bold())]
    UnsupportedOperands(String, &'static str, &'static str),

    #[error("{} division by zero", "Error".red().bold())]
    DivisionByZero,

    // Wrapped with the array name at the interpreter level
    #[error("index {0} is out of bounds of extent -{1}-")]
    IndexOutOfBounds(i64, usize),
}
