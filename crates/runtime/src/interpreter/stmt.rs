use std::rc::Rc;

use ast::{ASTNodeKind, ArrayExtents, ExpressionKind, StatementKind};

use super::{Interpreter, InterpreterError};
use crate::environment::{Env, RETURN_BINDING};
use crate::values::{Array1D, Array2D, FnKind, RuntimeVal};

impl Interpreter {
    pub(super) fn resolve(
        &self,
        stmt: StatementKind,
        env: &mut Env,
    ) -> Result<RuntimeVal, InterpreterError> {
        match stmt {
            StatementKind::VarDeclaration {
                name,
                var_type,
                value,
            } => {
                // The declared tag is checked against the initializer here,
                // once, and never again
                let declaration_value = match value {
                    Some(expr) => {
                        let val = self.evaluate(expr, env)?;

                        if !val.matches_type(var_type) {
                            return Err(InterpreterError::TypeMismatch(
                                name,
                                var_type.to_string(),
                                val.type_name(),
                            ));
                        }

                        val
                    }
                    None => RuntimeVal::Undefined,
                };

                env.declare_var(name, declaration_value);

                Ok(RuntimeVal::Undefined)
            }
            StatementKind::Assignment { name, value } => {
                let assignment_value = self.evaluate(value, env)?;

                env.assign_var(&name, assignment_value);

                Ok(RuntimeVal::Undefined)
            }
            StatementKind::IfBlock {
                condition,
                body,
                else_branch,
            } => {
                if self.evaluate_condition(condition, env)? {
                    self.execute_block(body, env)?;
                } else if let Some(else_body) = else_branch {
                    // An else-if chain is an IfBlock nested in here
                    self.execute_block(else_body, env)?;
                }

                Ok(RuntimeVal::Undefined)
            }
            StatementKind::WhileBlock { condition, body } => {
                // Guarded do-while: the first check gates entry, afterwards
                // the body always runs before the condition is re-checked
                if self.evaluate_condition(condition.clone(), env)? {
                    loop {
                        self.execute_block(body.clone(), env)?;

                        if !self.evaluate_condition(condition.clone(), env)? {
                            break;
                        }
                    }
                }

                Ok(RuntimeVal::Undefined)
            }
            StatementKind::ArrayDeclaration {
                name,
                elem_type,
                extents,
                init,
            } => {
                let values = match init {
                    Some(exprs) => {
                        // Rejected before any element is evaluated
                        if exprs.len() > extents.capacity() {
                            return Err(InterpreterError::ArraySizeExceeded(
                                name,
                                extents.capacity(),
                                exprs.len(),
                            ));
                        }

                        let mut values = vec![];
                        for expr in exprs {
                            let val = self.evaluate(expr, env)?;

                            if !val.matches_type(elem_type) {
                                return Err(InterpreterError::TypeMismatch(
                                    name,
                                    elem_type.to_string(),
                                    val.type_name(),
                                ));
                            }

                            values.push(val);
                        }

                        values
                    }
                    None => vec![],
                };

                let array = match extents {
                    ArrayExtents::One(len) => {
                        let mut arr = Array1D::new(len);
                        arr.fill(values);

                        RuntimeVal::Array1D(Rc::new(arr))
                    }
                    ArrayExtents::Two(rows, cols) => {
                        let mut arr = Array2D::new(rows, cols);
                        arr.fill(values);

                        RuntimeVal::Array2D(Rc::new(arr))
                    }
                };

                env.declare_var(name, array);

                Ok(RuntimeVal::Undefined)
            }
            StatementKind::FnDeclaration { name, params, body } => {
                self.declare_callable(name, params, body, FnKind::Function, env)
            }
            StatementKind::ProcDeclaration { name, params, body } => {
                self.declare_callable(name, params, body, FnKind::Procedure, env)
            }
            StatementKind::Return { value } => {
                let return_value = self.evaluate(value, env)?;

                // Recorded in the current, possibly call-local, environment
                // and also yielded as the statement's own result
                env.assign_var(RETURN_BINDING, return_value.clone());

                Ok(return_value)
            }
        }
    }

    // Declaring binds the callable; the body only runs when called
    fn declare_callable(
        &self,
        name: String,
        params: Vec<String>,
        body: Vec<ASTNodeKind>,
        kind: FnKind,
        env: &mut Env,
    ) -> Result<RuntimeVal, InterpreterError> {
        env.declare_var(
            name,
            RuntimeVal::Function {
                params,
                body: Rc::new(body),
                kind,
            },
        );

        Ok(RuntimeVal::Undefined)
    }

    fn evaluate_condition(
        &self,
        condition: ExpressionKind,
        env: &mut Env,
    ) -> Result<bool, InterpreterError> {
        match self.evaluate(condition, env)? {
            RuntimeVal::Bool(b) => Ok(b),
            other => Err(InterpreterError::NotABoolean(other.type_name())),
        }
    }

    fn execute_block(&self, body: Vec<ASTNodeKind>, env: &mut Env) -> Result<(), InterpreterError> {
        for node in body {
            self.interpret_node(node, env)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{AdditiveOp, ArrayIndexing, ComparisonOp, VarType};

    fn run_nodes(
        interp: &Interpreter,
        env: &mut Env,
        nodes: Vec<ASTNodeKind>,
    ) -> Result<RuntimeVal, InterpreterError> {
        let mut result = RuntimeVal::Undefined;
        for node in nodes {
            result = interp.interpret_node(node, env)?;
        }

        Ok(result)
    }

    fn int(value: i64) -> ExpressionKind {
        ExpressionKind::IntLiteral { value }
    }

    fn ident(symbol: &str) -> ExpressionKind {
        ExpressionKind::Identifier {
            symbol: symbol.into(),
        }
    }

    fn text(value: &str) -> ExpressionKind {
        ExpressionKind::TextLiteral {
            value: value.into(),
        }
    }

    #[test]
    fn declaration_checks_the_initializer_type() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl = StatementKind::VarDeclaration {
            name: "x".into(),
            var_type: VarType::Int,
            value: Some(int(5)),
        };
        interp.resolve(decl, &mut env).unwrap();
        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Int(5)));

        let bad = StatementKind::VarDeclaration {
            name: "y".into(),
            var_type: VarType::Int,
            value: Some(text("\"hello\"")),
        };
        assert_eq!(
            interp.resolve(bad, &mut env),
            Err(InterpreterError::TypeMismatch(
                "y".into(),
                "int".into(),
                "text"
            ))
        );
    }

    #[test]
    fn declaration_without_initializer_binds_undefined() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl = StatementKind::VarDeclaration {
            name: "x".into(),
            var_type: VarType::Real,
            value: None,
        };
        interp.resolve(decl, &mut env).unwrap();

        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Undefined));
    }

    #[test]
    fn assignment_rechecks_nothing() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        // int x = 5; x = "hello" succeeds: the tag died with the declaration
        let nodes: Vec<ASTNodeKind> = vec![
            StatementKind::VarDeclaration {
                name: "x".into(),
                var_type: VarType::Int,
                value: Some(int(5)),
            }
            .into(),
            StatementKind::Assignment {
                name: "x".into(),
                value: text("\"hello\""),
            }
            .into(),
        ];

        run_nodes(&interp, &mut env, nodes).unwrap();
        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Text("hello".into())));
    }

    #[test]
    fn if_takes_the_first_true_branch() {
        let interp = Interpreter::new();
        let mut env = Env::new();
        env.declare_var("x".into(), RuntimeVal::Int(7));

        // if x < 5 { r = "low" } else if x < 10 { r = "mid" } else { r = "high" }
        let chain = StatementKind::IfBlock {
            condition: ExpressionKind::Comparison {
                left: Box::new(ident("x")),
                right: Box::new(int(5)),
                operator: ComparisonOp::Lt,
            },
            body: vec![StatementKind::Assignment {
                name: "r".into(),
                value: text("low"),
            }
            .into()],
            else_branch: Some(vec![StatementKind::IfBlock {
                condition: ExpressionKind::Comparison {
                    left: Box::new(ident("x")),
                    right: Box::new(int(10)),
                    operator: ComparisonOp::Lt,
                },
                body: vec![StatementKind::Assignment {
                    name: "r".into(),
                    value: text("mid"),
                }
                .into()],
                else_branch: Some(vec![StatementKind::Assignment {
                    name: "r".into(),
                    value: text("high"),
                }
                .into()]),
            }
            .into()]),
        };

        interp.resolve(chain, &mut env).unwrap();
        assert_eq!(env.lookup_var("r"), Ok(&RuntimeVal::Text("mid".into())));
    }

    #[test]
    fn condition_must_be_a_bool() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let block = StatementKind::IfBlock {
            condition: int(1),
            body: vec![],
            else_branch: None,
        };

        assert_eq!(
            interp.resolve(block, &mut env),
            Err(InterpreterError::NotABoolean("int"))
        );
    }

    #[test]
    fn while_with_false_condition_never_enters() {
        let interp = Interpreter::new();
        let mut env = Env::new();
        env.declare_var("hits".into(), RuntimeVal::Int(0));

        let block = StatementKind::WhileBlock {
            condition: ExpressionKind::BoolLiteral { value: false },
            body: vec![StatementKind::Assignment {
                name: "hits".into(),
                value: int(99),
            }
            .into()],
        };

        interp.resolve(block, &mut env).unwrap();
        assert_eq!(env.lookup_var("hits"), Ok(&RuntimeVal::Int(0)));
    }

    #[test]
    fn while_counts_down() {
        let interp = Interpreter::new();
        let mut env = Env::new();
        env.declare_var("n".into(), RuntimeVal::Int(3));
        env.declare_var("sum".into(), RuntimeVal::Int(0));

        // while n > 0 { sum = sum + n; n = n - 1 }
        let block = StatementKind::WhileBlock {
            condition: ExpressionKind::Comparison {
                left: Box::new(ident("n")),
                right: Box::new(int(0)),
                operator: ComparisonOp::Gt,
            },
            body: vec![
                StatementKind::Assignment {
                    name: "sum".into(),
                    value: ExpressionKind::Additive {
                        left: Box::new(ident("sum")),
                        right: Box::new(ident("n")),
                        operator: AdditiveOp::Add,
                    },
                }
                .into(),
                StatementKind::Assignment {
                    name: "n".into(),
                    value: ExpressionKind::Additive {
                        left: Box::new(ident("n")),
                        right: Box::new(int(1)),
                        operator: AdditiveOp::Sub,
                    },
                }
                .into(),
            ],
        };

        interp.resolve(block, &mut env).unwrap();
        assert_eq!(env.lookup_var("sum"), Ok(&RuntimeVal::Int(6)));
        assert_eq!(env.lookup_var("n"), Ok(&RuntimeVal::Int(0)));
    }

    #[test]
    fn grid_declaration_fills_column_major() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl: ASTNodeKind = StatementKind::ArrayDeclaration {
            name: "grid".into(),
            elem_type: VarType::Int,
            extents: ArrayExtents::Two(2, 3),
            init: Some((1..=6).map(int).collect()),
        }
        .into();

        // [i, j] holds initializer index i + j * 2
        let access: ASTNodeKind = ExpressionKind::ArrayAccess {
            name: "grid".into(),
            index: ArrayIndexing::Pair(Box::new(int(1)), Box::new(int(2))),
        }
        .into();

        assert_eq!(
            run_nodes(&interp, &mut env, vec![decl, access]),
            Ok(RuntimeVal::Int(6))
        );
    }

    #[test]
    fn oversized_initializer_is_rejected_up_front() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl = StatementKind::ArrayDeclaration {
            name: "arr".into(),
            elem_type: VarType::Int,
            extents: ArrayExtents::One(2),
            init: Some(vec![int(1), int(2), int(3)]),
        };

        assert_eq!(
            interp.resolve(decl, &mut env),
            Err(InterpreterError::ArraySizeExceeded("arr".into(), 2, 3))
        );
    }

    #[test]
    fn array_elements_are_checked_against_the_tag() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl = StatementKind::ArrayDeclaration {
            name: "arr".into(),
            elem_type: VarType::Int,
            extents: ArrayExtents::One(3),
            init: Some(vec![int(1), text("\"two\""), int(3)]),
        };

        assert_eq!(
            interp.resolve(decl, &mut env),
            Err(InterpreterError::TypeMismatch(
                "arr".into(),
                "int".into(),
                "text"
            ))
        );
    }

    #[test]
    fn declaring_a_function_does_not_execute_it() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl = StatementKind::FnDeclaration {
            name: "boom".into(),
            params: vec![],
            body: vec![ExpressionKind::Identifier {
                symbol: "missing".into(),
            }
            .into()],
        };

        interp.resolve(decl, &mut env).unwrap();

        assert!(matches!(
            env.lookup_var("boom"),
            Ok(RuntimeVal::Function {
                kind: FnKind::Function,
                ..
            })
        ));
    }

    #[test]
    fn procedures_carry_their_own_tag() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let decl = StatementKind::ProcDeclaration {
            name: "step".into(),
            params: vec!["dt".into()],
            body: vec![],
        };

        interp.resolve(decl, &mut env).unwrap();

        assert!(matches!(
            env.lookup_var("step"),
            Ok(RuntimeVal::Function {
                kind: FnKind::Procedure,
                ..
            })
        ));
    }

    #[test]
    fn return_records_and_yields_its_value() {
        let interp = Interpreter::new();
        let mut env = Env::new();

        let ret = StatementKind::Return { value: int(9) };

        assert_eq!(interp.resolve(ret, &mut env), Ok(RuntimeVal::Int(9)));
        assert_eq!(env.lookup_var(RETURN_BINDING), Ok(&RuntimeVal::Int(9)));
    }
}
