pub mod environment;
pub mod interpreter;
pub mod native_functions;
pub mod values;

extern crate ast;
extern crate tools;

use ast::ASTNode;
use environment::Env;
use interpreter::Interpreter;
use tools::errors::RunError;

// Entry point: one interpreter with the default builtins, one fresh
// environment, stops at the first error.
pub fn run(program: Vec<ASTNode>) -> Result<(), RunError> {
    let interpreter = Interpreter::new();
    let mut env = Env::new();

    interpreter.execute_program(program, &mut env)?;

    Ok(())
}
