use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use super::values::RuntimeVal;

#[derive(Debug, PartialEq, Error)]
pub enum NativeFnError {
    #[error("Function {0}: expected {1} arguments, found {2}")]
    WrongArgNumber(String, usize, usize),
}

pub type NativeFn = Rc<dyn Fn(&[RuntimeVal]) -> Result<RuntimeVal, NativeFnError>>;

// Builtins live here rather than in any environment, so they stay resolvable
// inside the parameter-only frame a call executes in and cannot be shadowed.
pub struct NativeRegistry {
    funcs: HashMap<String, NativeFn>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self {
            funcs: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("write", Rc::new(native_write));

        registry
    }

    // Registering an existing name replaces it: embedders and tests redirect
    // `write` into a sink this way
    pub fn register(&mut self, name: &str, func: NativeFn) {
        self.funcs.insert(name.to_string(), func);
    }

    pub fn get(&self, name: &str) -> Option<&NativeFn> {
        self.funcs.get(name)
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// Prints each value on its own line, in argument order. Accepts any number
// of arguments and never touches the environment
pub fn native_write(args: &[RuntimeVal]) -> Result<RuntimeVal, NativeFnError> {
    for arg in args {
        println!("{}", arg);
    }

    Ok(RuntimeVal::Undefined)
}
