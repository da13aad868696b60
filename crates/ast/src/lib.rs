use std::fmt::Display;

#[derive(Debug, PartialEq, Clone)]
pub struct ASTNode {
    pub node: ASTNodeKind,
    pub line: u64,
}

impl ASTNode {
    pub fn new(node: ASTNodeKind, line: u64) -> Self {
        Self { node, line }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ASTNodeKind {
    Statement(StatementKind),
    Expression(ExpressionKind),
}

impl From<ExpressionKind> for ASTNodeKind {
    fn from(value: ExpressionKind) -> Self {
        ASTNodeKind::Expression(value)
    }
}

impl From<StatementKind> for ASTNodeKind {
    fn from(value: StatementKind) -> Self {
        ASTNodeKind::Statement(value)
    }
}

// Type tag carried by variable and array declarations. Checked once against
// the initializer, then forgotten: bindings themselves are untyped.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum VarType {
    Int,
    Real,
    Text,
    Bool,
}

impl Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarType::Int => write!(f, "int"),
            VarType::Real => write!(f, "real"),
            VarType::Text => write!(f, "text"),
            VarType::Bool => write!(f, "bool"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind {
    VarDeclaration {
        name: String,
        var_type: VarType,
        // None means 'int x' without initializer: the binding starts undefined
        value: Option<ExpressionKind>,
    },
    ArrayDeclaration {
        name: String,
        elem_type: VarType,
        extents: ArrayExtents,
        init: Option<Vec<ExpressionKind>>,
    },
    Assignment {
        name: String,
        value: ExpressionKind,
    },
    IfBlock {
        condition: ExpressionKind,
        body: Vec<ASTNodeKind>,
        // An else-if chain is an IfBlock statement inside the else branch
        else_branch: Option<Vec<ASTNodeKind>>,
    },
    WhileBlock {
        condition: ExpressionKind,
        body: Vec<ASTNodeKind>,
    },
    FnDeclaration {
        name: String,
        params: Vec<String>,
        body: Vec<ASTNodeKind>,
    },
    ProcDeclaration {
        name: String,
        params: Vec<String>,
        body: Vec<ASTNodeKind>,
    },
    Return {
        value: ExpressionKind,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExpressionKind {
    IntLiteral {
        value: i64,
    },
    RealLiteral {
        value: f64,
    },
    // Carries the raw token text; the evaluator strips the quote delimiters
    TextLiteral {
        value: String,
    },
    BoolLiteral {
        value: bool,
    },
    Identifier {
        symbol: String,
    },
    // Box needed to avoid recursion. Left and right are built while parsing,
    // working with owned boxes is simpler than tracking references
    Additive {
        left: Box<ExpressionKind>,
        right: Box<ExpressionKind>,
        operator: AdditiveOp,
    },
    Multiplicative {
        left: Box<ExpressionKind>,
        right: Box<ExpressionKind>,
        operator: MultiplicativeOp,
    },
    Comparison {
        left: Box<ExpressionKind>,
        right: Box<ExpressionKind>,
        operator: ComparisonOp,
    },
    // Index can be any expr: val[5+6], val[i, j-1]
    ArrayAccess {
        name: String,
        index: ArrayIndexing,
    },
    Call {
        name: String,
        args: Vec<ExpressionKind>,
    },
}

// Declared extents of an array: length, or rows x cols
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ArrayExtents {
    One(usize),
    Two(usize, usize),
}

impl ArrayExtents {
    pub fn capacity(&self) -> usize {
        match self {
            ArrayExtents::One(len) => *len,
            ArrayExtents::Two(rows, cols) => rows * cols,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ArrayIndexing {
    Single(Box<ExpressionKind>),
    Pair(Box<ExpressionKind>, Box<ExpressionKind>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AdditiveOp {
    Add,
    Sub,
}

impl Display for AdditiveOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdditiveOp::Add => write!(f, "+"),
            AdditiveOp::Sub => write!(f, "-"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MultiplicativeOp {
    Mul,
    Div,
}

impl Display for MultiplicativeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultiplicativeOp::Mul => write!(f, "*"),
            MultiplicativeOp::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ComparisonOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonOp::Lt => write!(f, "<"),
            ComparisonOp::Le => write!(f, "<="),
            ComparisonOp::Gt => write!(f, ">"),
            ComparisonOp::Ge => write!(f, ">="),
            ComparisonOp::Eq => write!(f, "=="),
            ComparisonOp::Ne => write!(f, "!="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_conversions() {
        let expr = ExpressionKind::IntLiteral { value: 4 };
        assert_eq!(
            ASTNodeKind::from(expr.clone()),
            ASTNodeKind::Expression(expr)
        );

        let stmt = StatementKind::Assignment {
            name: "x".into(),
            value: ExpressionKind::IntLiteral { value: 4 },
        };
        assert_eq!(
            ASTNodeKind::from(stmt.clone()),
            ASTNodeKind::Statement(stmt)
        );
    }

    #[test]
    fn extents_capacity() {
        assert_eq!(ArrayExtents::One(5).capacity(), 5);
        assert_eq!(ArrayExtents::Two(2, 3).capacity(), 6);
    }

    #[test]
    fn operator_display() {
        assert_eq!(AdditiveOp::Sub.to_string(), "-");
        assert_eq!(MultiplicativeOp::Div.to_string(), "/");
        assert_eq!(ComparisonOp::Le.to_string(), "<=");
        assert_eq!(ComparisonOp::Ne.to_string(), "!=");
    }
}
