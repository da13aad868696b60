use colored::*;
use std::collections::HashMap;
use thiserror::Error;

use super::values::RuntimeVal;

// Reserved binding a `return` writes into; the call dispatcher reads it back
// out of the frame once the body has run.
pub const RETURN_BINDING: &str = "_returnValue";

#[derive(Error, Debug, PartialEq)]
pub enum EnvError {
    #[error("{} undefined variable: {0}", "Error".red().bold())]
    UndefinedVariable(String),
}

// One flat scope: no parent link, no shadowing rules, last write wins.
// Builtins live in the native registry, never here.
#[derive(Debug, PartialEq, Default)]
pub struct Env {
    vars: HashMap<String, RuntimeVal>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    // Everything a callee gets to see: its parameters
    pub fn call_frame(bindings: impl IntoIterator<Item = (String, RuntimeVal)>) -> Self {
        Self {
            vars: bindings.into_iter().collect(),
        }
    }

    // Declarations insert or overwrite unconditionally
    pub fn declare_var(&mut self, var: String, value: RuntimeVal) {
        self.vars.insert(var, value);
    }

    // Assignments too: no prior-declaration requirement, no type re-check
    pub fn assign_var(&mut self, var: &str, value: RuntimeVal) {
        self.vars.insert(var.to_string(), value);
    }

    // Reading is the only operation that requires a prior binding
    pub fn lookup_var(&self, var: &str) -> Result<&RuntimeVal, EnvError> {
        self.vars
            .get(var)
            .ok_or_else(|| EnvError::UndefinedVariable(var.to_string()))
    }

    pub fn take_return_value(&mut self) -> RuntimeVal {
        self.vars
            .remove(RETURN_BINDING)
            .unwrap_or(RuntimeVal::Undefined)
    }
}
