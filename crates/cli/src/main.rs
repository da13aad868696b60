use clap::Parser as ClapParser;
use colored::*;

extern crate ast;
extern crate runtime;

use ast::{
    ASTNode, ASTNodeKind, AdditiveOp, ArrayExtents, ArrayIndexing, ComparisonOp, ExpressionKind,
    MultiplicativeOp, StatementKind, VarType,
};


// --------
//   CLI
// --------

#[derive(ClapParser)]
#[command(version)]
#[command(about = "Demo runner for the A60 evaluator")]
struct CLI {
    /// Demo program to run (default: all)
    #[arg(short, long)]
    demo: Option<String>,

    /// List the available demo programs
    #[arg(short, long)]
    list: bool,

    /// Prints the AST tree before running
    #[arg(short, long)]
    ast_print: bool,
}


// -----------------
//   AST building
// -----------------
// The front end is an external collaborator; these helpers stand in for it
// when assembling the embedded demo programs.

fn program(nodes: Vec<ASTNodeKind>) -> Vec<ASTNode> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(line, node)| ASTNode::new(node, line as u64))
        .collect()
}

fn int(value: i64) -> ExpressionKind {
    ExpressionKind::IntLiteral { value }
}

fn real(value: f64) -> ExpressionKind {
    ExpressionKind::RealLiteral { value }
}

fn txt(value: &str) -> ExpressionKind {
    // Literals reach the evaluator with their delimiters still attached
    ExpressionKind::TextLiteral {
        value: format!("\"{}\"", value),
    }
}

fn ident(symbol: &str) -> ExpressionKind {
    ExpressionKind::Identifier {
        symbol: symbol.into(),
    }
}

fn additive(left: ExpressionKind, right: ExpressionKind, operator: AdditiveOp) -> ExpressionKind {
    ExpressionKind::Additive {
        left: Box::new(left),
        right: Box::new(right),
        operator,
    }
}

fn compare(left: ExpressionKind, right: ExpressionKind, operator: ComparisonOp) -> ExpressionKind {
    ExpressionKind::Comparison {
        left: Box::new(left),
        right: Box::new(right),
        operator,
    }
}

fn call(name: &str, args: Vec<ExpressionKind>) -> ExpressionKind {
    ExpressionKind::Call {
        name: name.into(),
        args,
    }
}

fn write(args: Vec<ExpressionKind>) -> ASTNodeKind {
    call("write", args).into()
}

fn assign(name: &str, value: ExpressionKind) -> ASTNodeKind {
    StatementKind::Assignment {
        name: name.into(),
        value,
    }
    .into()
}


// -------------------
//   Demo programs
// -------------------

fn demo_arith() -> Vec<ASTNode> {
    program(vec![
        StatementKind::VarDeclaration {
            name: "x".into(),
            var_type: VarType::Int,
            value: Some(int(7)),
        }
        .into(),
        StatementKind::VarDeclaration {
            name: "y".into(),
            var_type: VarType::Real,
            value: Some(real(2.5)),
        }
        .into(),
        write(vec![
            additive(txt("x = "), ident("x"), AdditiveOp::Add),
            ExpressionKind::Multiplicative {
                left: Box::new(ident("y")),
                right: Box::new(int(2)),
                operator: MultiplicativeOp::Mul,
            },
        ]),
        StatementKind::IfBlock {
            condition: compare(ident("x"), int(5), ComparisonOp::Gt),
            body: vec![write(vec![txt("x is big")])],
            else_branch: Some(vec![write(vec![txt("x is small")])]),
        }
        .into(),
    ])
}

fn demo_arrays() -> Vec<ASTNode> {
    program(vec![
        StatementKind::ArrayDeclaration {
            name: "fib".into(),
            elem_type: VarType::Int,
            extents: ArrayExtents::One(8),
            init: Some(vec![
                int(0),
                int(1),
                int(1),
                int(2),
                int(3),
                int(5),
                int(8),
                int(13),
            ]),
        }
        .into(),
        StatementKind::VarDeclaration {
            name: "i".into(),
            var_type: VarType::Int,
            value: Some(int(0)),
        }
        .into(),
        StatementKind::WhileBlock {
            condition: compare(ident("i"), int(8), ComparisonOp::Lt),
            body: vec![
                write(vec![ExpressionKind::ArrayAccess {
                    name: "fib".into(),
                    index: ArrayIndexing::Single(Box::new(ident("i"))),
                }]),
                assign("i", additive(ident("i"), int(1), AdditiveOp::Add)),
            ],
        }
        .into(),
        StatementKind::ArrayDeclaration {
            name: "grid".into(),
            elem_type: VarType::Int,
            extents: ArrayExtents::Two(2, 3),
            init: Some(vec![int(1), int(2), int(3), int(4), int(5), int(6)]),
        }
        .into(),
        write(vec![ExpressionKind::ArrayAccess {
            name: "grid".into(),
            index: ArrayIndexing::Pair(Box::new(int(1)), Box::new(int(2))),
        }]),
    ])
}

fn demo_calls() -> Vec<ASTNode> {
    program(vec![
        StatementKind::FnDeclaration {
            name: "add".into(),
            params: vec!["a".into(), "b".into()],
            body: vec![StatementKind::Return {
                value: additive(ident("a"), ident("b"), AdditiveOp::Add),
            }
            .into()],
        }
        .into(),
        StatementKind::ProcDeclaration {
            name: "greet".into(),
            params: vec!["name".into()],
            body: vec![write(vec![additive(
                txt("hello, "),
                ident("name"),
                AdditiveOp::Add,
            )])],
        }
        .into(),
        write(vec![call("add", vec![int(2), int(3)])]),
        call("greet", vec![txt("world")]).into(),
    ])
}

fn main() {
    let cli = CLI::parse();

    // Beginning of program
    println!("\n       --- {} evaluator v0.1 ---", "A60".cyan().bold());

    let demos: Vec<(&str, fn() -> Vec<ASTNode>)> = vec![
        ("arith", demo_arith),
        ("arrays", demo_arrays),
        ("calls", demo_calls),
    ];

    if cli.list {
        for (name, _) in &demos {
            println!("  {}", name);
        }

        return;
    }

    let mut found = false;

    for (name, build) in &demos {
        if let Some(chosen) = &cli.demo {
            if chosen != name {
                continue;
            }
        }

        found = true;
        println!("\nRunning demo {}...", name.green());

        let demo_program = build();

        if cli.ast_print {
            println!("\n{:#?}", demo_program);
        }

        match runtime::run(demo_program) {
            Ok(_) => {}
            Err(e) => println!("{e}"),
        }
    }

    if !found {
        println!(
            "{} unknown demo: {}",
            "Error".red().bold(),
            cli.demo.as_deref().unwrap_or("")
        );
    }
}
