mod expr;
mod interp_errors;
mod stmt;

use tools::errors::{ReportRunErr, RunError};

pub use interp_errors::InterpreterError;

use super::environment::Env;
use super::native_functions::NativeRegistry;
use super::values::RuntimeVal;
use ast::{ASTNode, ASTNodeKind};

pub struct Interpreter {
    natives: NativeRegistry,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            natives: NativeRegistry::with_defaults(),
        }
    }

    // Embedders swap in their own registry, e.g. to capture `write` output
    pub fn with_natives(natives: NativeRegistry) -> Self {
        Self { natives }
    }

    pub fn execute_program(
        &self,
        nodes: Vec<ASTNode>,
        env: &mut Env,
    ) -> Result<RuntimeVal, RunError> {
        let mut result = RuntimeVal::Undefined;

        for n in nodes {
            result = self
                .interpret_node(n.node, env)
                .map_err(|e| e.to_run_err(n.line))?;
        }

        Ok(result)
    }

    fn interpret_node(
        &self,
        node: ASTNodeKind,
        env: &mut Env,
    ) -> Result<RuntimeVal, InterpreterError> {
        match node {
            ASTNodeKind::Expression(expr) => self.evaluate(expr, env),
            ASTNodeKind::Statement(stmt) => self.resolve(stmt, env),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
