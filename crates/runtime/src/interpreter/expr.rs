use ast::{ASTNodeKind, ArrayIndexing, ExpressionKind};

use super::{Interpreter, InterpreterError};
use crate::environment::Env;
use crate::values::RuntimeVal;

impl Interpreter {
    pub(super) fn evaluate(
        &self,
        expr: ExpressionKind,
        env: &mut Env,
    ) -> Result<RuntimeVal, InterpreterError> {
        match expr {
            ExpressionKind::IntLiteral { value } => Ok(RuntimeVal::Int(value)),
            ExpressionKind::RealLiteral { value } => Ok(RuntimeVal::Real(value)),
            ExpressionKind::TextLiteral { value } => {
                Ok(RuntimeVal::Text(strip_delimiters(&value)))
            }
            ExpressionKind::BoolLiteral { value } => Ok(RuntimeVal::Bool(value)),
            ExpressionKind::Identifier { symbol } => Ok(env.lookup_var(&symbol)?.clone()),
            ExpressionKind::Additive {
                left,
                right,
                operator,
            } => {
                let lhs = self.evaluate(*left, env)?;
                let rhs = self.evaluate(*right, env)?;

                Ok(lhs.apply_additive(rhs, operator)?)
            }
            ExpressionKind::Multiplicative {
                left,
                right,
                operator,
            } => {
                let lhs = self.evaluate(*left, env)?;
                let rhs = self.evaluate(*right, env)?;

                Ok(lhs.apply_multiplicative(rhs, operator)?)
            }
            ExpressionKind::Comparison {
                left,
                right,
                operator,
            } => {
                let lhs = self.evaluate(*left, env)?;
                let rhs = self.evaluate(*right, env)?;

                Ok(lhs.compare(rhs, operator)?)
            }
            ExpressionKind::ArrayAccess { name, index } => {
                self.evaluate_array_access(name, index, env)
            }
            ExpressionKind::Call { name, args } => {
                // Arguments are evaluated in the caller's environment
                let args = self.evaluate_args(args, env)?;

                self.call(&name, args, env)
            }
        }
    }

    fn evaluate_args(
        &self,
        exprs: Vec<ExpressionKind>,
        env: &mut Env,
    ) -> Result<Vec<RuntimeVal>, InterpreterError> {
        let mut args = vec![];
        for expr in exprs {
            args.push(self.evaluate(expr, env)?);
        }

        Ok(args)
    }

    fn evaluate_array_access(
        &self,
        name: String,
        index: ArrayIndexing,
        env: &mut Env,
    ) -> Result<RuntimeVal, InterpreterError> {
        let array = env.lookup_var(&name)?.clone();

        let (first, second) = match index {
            ArrayIndexing::Single(i) => (self.evaluate_index(*i, env)?, None),
            ArrayIndexing::Pair(i, j) => (
                self.evaluate_index(*i, env)?,
                Some(self.evaluate_index(*j, env)?),
            ),
        };

        let read = match (&array, second) {
            (RuntimeVal::Array1D(arr), None) => arr.get(first),
            (RuntimeVal::Array1D(arr), Some(j)) => arr.get_pair(first, j),
            (RuntimeVal::Array2D(arr), None) => arr.get_single(first),
            (RuntimeVal::Array2D(arr), Some(j)) => arr.get(first, j),
            _ => return Err(InterpreterError::NonArrayIndexing(name)),
        };

        read.map_err(|e| InterpreterError::ArrayAccess(name, e))
    }

    fn evaluate_index(
        &self,
        expr: ExpressionKind,
        env: &mut Env,
    ) -> Result<i64, InterpreterError> {
        match self.evaluate(expr, env)? {
            RuntimeVal::Int(idx) => Ok(idx),
            other => Err(InterpreterError::NonIntegerIndex(other.type_name())),
        }
    }

    // Call dispatch: the native registry resolves first, whatever the active
    // scope holds, then the environment.
    pub(super) fn call(
        &self,
        name: &str,
        args: Vec<RuntimeVal>,
        env: &mut Env,
    ) -> Result<RuntimeVal, InterpreterError> {
        if let Some(native) = self.natives.get(name) {
            return native(&args).map_err(|e| InterpreterError::NativeCall(e.to_string()));
        }

        // An unbound call target is a call error, not a variable error
        let callee = match env.lookup_var(name) {
            Ok(val) => val.clone(),
            Err(_) => return Err(InterpreterError::NotCallable(name.to_string())),
        };

        match callee {
            RuntimeVal::NativeFunction { func } => {
                func(&args).map_err(|e| InterpreterError::NativeCall(e.to_string()))
            }
            RuntimeVal::Function { params, body, .. } => {
                self.execute_callable(name, &params, &body, args)
            }
            _ => Err(InterpreterError::NotCallable(name.to_string())),
        }
    }

    // Runs a user callable against a frame holding only its parameters. The
    // caller's environment stays untouched for the whole call: no closures,
    // no visibility of globals inside the body
    fn execute_callable(
        &self,
        name: &str,
        params: &[String],
        body: &[ASTNodeKind],
        args: Vec<RuntimeVal>,
    ) -> Result<RuntimeVal, InterpreterError> {
        if params.len() != args.len() {
            return Err(InterpreterError::ArityMismatch(
                name.to_string(),
                params.len(),
                args.len(),
            ));
        }

        let mut frame = Env::call_frame(params.iter().cloned().zip(args));

        for node in body {
            self.interpret_node(node.clone(), &mut frame)?;
        }

        // Whatever the last executed `return` recorded, else undefined
        Ok(frame.take_return_value())
    }
}

// Text literals arrive with the quote delimiters still attached
fn strip_delimiters(raw: &str) -> String {
    let bytes = raw.as_bytes();

    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        raw[1..raw.len() - 1].to_string()
    } else {
        raw.to_string()
    }
}
