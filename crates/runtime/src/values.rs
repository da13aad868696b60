use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};
use std::rc::Rc;

mod array;
mod value_errors;

pub use array::{Array1D, Array2D};
pub use value_errors::ValueError;

use ast::{ASTNodeKind, AdditiveOp, ComparisonOp, MultiplicativeOp, VarType};

use super::native_functions::NativeFn;

#[derive(Clone)]
pub enum RuntimeVal {
    Undefined,
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    // Arrays sit behind Rc so clones coming out of the environment are the
    // same allocation: equality is identity, as in the source runtime
    Array1D(Rc<Array1D>),
    Array2D(Rc<Array2D>),
    NativeFunction {
        func: NativeFn,
    },
    // User callable: parameter names + shared body subtree. Declaring binds,
    // it never executes the body
    Function {
        params: Vec<String>,
        body: Rc<Vec<ASTNodeKind>>,
        kind: FnKind,
    },
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FnKind {
    Function,
    Procedure,
}

impl Debug for RuntimeVal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RuntimeVal::Undefined => write!(f, "undefined"),
            RuntimeVal::Int(nb) => write!(f, "{}", nb),
            RuntimeVal::Real(nb) => write!(f, "{}", nb),
            RuntimeVal::Text(txt) => write!(f, "{:?}", txt),
            RuntimeVal::Bool(b) => write!(f, "{}", b),
            RuntimeVal::Array1D(arr) => write!(f, "{}", arr),
            RuntimeVal::Array2D(arr) => write!(f, "{}", arr),
            RuntimeVal::NativeFunction { .. } => write!(f, "native function"),
            RuntimeVal::Function { kind, .. } => write!(f, "{}", kind_name(*kind)),
        }
    }
}

impl Display for RuntimeVal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeVal::Undefined => write!(f, "undefined"),
            RuntimeVal::Int(nb) => write!(f, "{}", nb),
            RuntimeVal::Real(nb) => write!(f, "{}", nb),
            RuntimeVal::Text(txt) => write!(f, "{}", txt),
            RuntimeVal::Bool(b) => write!(f, "{}", b),
            RuntimeVal::Array1D(arr) => write!(f, "{}", arr),
            RuntimeVal::Array2D(arr) => write!(f, "{}", arr),
            RuntimeVal::NativeFunction { .. } => write!(f, "native function"),
            RuntimeVal::Function { kind, .. } => write!(f, "{}", kind_name(*kind)),
        }
    }
}

fn kind_name(kind: FnKind) -> &'static str {
    match kind {
        FnKind::Function => "function",
        FnKind::Procedure => "procedure",
    }
}

// Equality is structural per variant, without numeric promotion. Arrays and
// callables compare by identity: two lookups of the same binding are equal,
// distinct allocations never are.
impl PartialEq for RuntimeVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeVal::Undefined, RuntimeVal::Undefined) => true,
            (RuntimeVal::Int(a), RuntimeVal::Int(b)) => a == b,
            (RuntimeVal::Real(a), RuntimeVal::Real(b)) => a == b,
            (RuntimeVal::Text(a), RuntimeVal::Text(b)) => a == b,
            (RuntimeVal::Bool(a), RuntimeVal::Bool(b)) => a == b,
            (RuntimeVal::Array1D(a), RuntimeVal::Array1D(b)) => Rc::ptr_eq(a, b),
            (RuntimeVal::Array2D(a), RuntimeVal::Array2D(b)) => Rc::ptr_eq(a, b),
            (
                RuntimeVal::NativeFunction { func: fa },
                RuntimeVal::NativeFunction { func: fb },
            ) => Rc::ptr_eq(fa, fb),
            (RuntimeVal::Function { body: b1, .. }, RuntimeVal::Function { body: b2, .. }) => {
                Rc::ptr_eq(b1, b2)
            }
            _ => false,
        }
    }
}

// Internal operator shared by the additive and multiplicative evaluators
#[derive(Debug, PartialEq, Clone, Copy)]
enum NumericOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for NumericOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericOp::Add => write!(f, "+"),
            NumericOp::Sub => write!(f, "-"),
            NumericOp::Mul => write!(f, "*"),
            NumericOp::Div => write!(f, "/"),
        }
    }
}

impl From<AdditiveOp> for NumericOp {
    fn from(op: AdditiveOp) -> Self {
        match op {
            AdditiveOp::Add => NumericOp::Add,
            AdditiveOp::Sub => NumericOp::Sub,
        }
    }
}

impl From<MultiplicativeOp> for NumericOp {
    fn from(op: MultiplicativeOp) -> Self {
        match op {
            MultiplicativeOp::Mul => NumericOp::Mul,
            MultiplicativeOp::Div => NumericOp::Div,
        }
    }
}

impl RuntimeVal {
    // Type label used in error reports
    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeVal::Undefined => "undefined",
            RuntimeVal::Int(_) => "int",
            RuntimeVal::Real(_) => "real",
            RuntimeVal::Text(_) => "text",
            RuntimeVal::Bool(_) => "bool",
            RuntimeVal::Array1D(_) | RuntimeVal::Array2D(_) => "array",
            RuntimeVal::NativeFunction { .. } => "native function",
            RuntimeVal::Function { kind, .. } => kind_name(*kind),
        }
    }

    // Declaration-time check of a value against the declared type tag. The
    // tag is consulted once, here, and not retained on the binding
    pub fn matches_type(&self, tag: VarType) -> bool {
        matches!(
            (self, tag),
            (RuntimeVal::Int(_), VarType::Int)
                | (RuntimeVal::Real(_), VarType::Real)
                | (RuntimeVal::Text(_), VarType::Text)
                | (RuntimeVal::Bool(_), VarType::Bool)
        )
    }

    pub fn apply_additive(self, rhs: RuntimeVal, op: AdditiveOp) -> Result<RuntimeVal, ValueError> {
        // '+' concatenates as soon as either side is text, whatever the
        // other operand is. '-' has no text form
        let either_text =
            matches!(self, RuntimeVal::Text(_)) || matches!(rhs, RuntimeVal::Text(_));

        if op == AdditiveOp::Add && either_text {
            return Ok(RuntimeVal::Text(format!("{}{}", self, rhs)));
        }

        self.calculate(rhs, op.into())
    }

    pub fn apply_multiplicative(
        self,
        rhs: RuntimeVal,
        op: MultiplicativeOp,
    ) -> Result<RuntimeVal, ValueError> {
        // Checked before promotion so 4 / 0 and 4 / 0.0 fail the same way
        if op == MultiplicativeOp::Div && rhs.is_zero() {
            return Err(ValueError::DivisionByZero);
        }

        self.calculate(rhs, op.into())
    }

    fn is_zero(&self) -> bool {
        matches!(self, RuntimeVal::Int(0)) || matches!(self, RuntimeVal::Real(nb) if *nb == 0.)
    }

    // Numeric promotion rule: int stays int until a real joins in
    fn calculate(self, rhs: RuntimeVal, op: NumericOp) -> Result<RuntimeVal, ValueError> {
        match (self, rhs) {
            (RuntimeVal::Int(lhs), RuntimeVal::Int(rhs)) => Ok(RuntimeVal::Int(compute(lhs, rhs, op))),
            (RuntimeVal::Int(lhs), RuntimeVal::Real(rhs)) => {
                Ok(RuntimeVal::Real(compute(lhs as f64, rhs, op)))
            }
            (RuntimeVal::Real(lhs), RuntimeVal::Int(rhs)) => {
                Ok(RuntimeVal::Real(compute(lhs, rhs as f64, op)))
            }
            (RuntimeVal::Real(lhs), RuntimeVal::Real(rhs)) => {
                Ok(RuntimeVal::Real(compute(lhs, rhs, op)))
            }
            (lhs, rhs) => Err(ValueError::UnsupportedOperands(
                op.to_string(),
                lhs.type_name(),
                rhs.type_name(),
            )),
        }
    }

    pub fn compare(self, rhs: RuntimeVal, op: ComparisonOp) -> Result<RuntimeVal, ValueError> {
        // Equality is defined for every variant pair and never promotes;
        // the ordering operators are numeric only
        match op {
            ComparisonOp::Eq => Ok(RuntimeVal::Bool(self == rhs)),
            ComparisonOp::Ne => Ok(RuntimeVal::Bool(self != rhs)),
            _ => match (&self, &rhs) {
                (RuntimeVal::Int(lhs), RuntimeVal::Int(rhs)) => {
                    Ok(RuntimeVal::Bool(ordered(lhs, rhs, op)))
                }
                (RuntimeVal::Int(lhs), RuntimeVal::Real(rhs)) => {
                    Ok(RuntimeVal::Bool(ordered(&(*lhs as f64), rhs, op)))
                }
                (RuntimeVal::Real(lhs), RuntimeVal::Int(rhs)) => {
                    Ok(RuntimeVal::Bool(ordered(lhs, &(*rhs as f64), op)))
                }
                (RuntimeVal::Real(lhs), RuntimeVal::Real(rhs)) => {
                    Ok(RuntimeVal::Bool(ordered(lhs, rhs, op)))
                }
                _ => Err(ValueError::UnsupportedOperands(
                    op.to_string(),
                    self.type_name(),
                    rhs.type_name(),
                )),
            },
        }
    }
}

// Any type that has the four operators
fn compute<T>(val1: T, val2: T, op: NumericOp) -> T
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    match op {
        NumericOp::Add => val1 + val2,
        NumericOp::Sub => val1 - val2,
        NumericOp::Mul => val1 * val2,
        NumericOp::Div => val1 / val2,
    }
}

fn ordered<T: PartialOrd>(lhs: &T, rhs: &T, op: ComparisonOp) -> bool {
    match op {
        ComparisonOp::Lt => lhs < rhs,
        ComparisonOp::Le => lhs <= rhs,
        ComparisonOp::Gt => lhs > rhs,
        ComparisonOp::Ge => lhs >= rhs,
        // Eq and Ne are dispatched before the numeric path
        ComparisonOp::Eq | ComparisonOp::Ne => unreachable!("equality handled structurally"),
    }
}
