//! A four-function arithmetic calculator grammar, demonstrating `ahead`
//! for recursive rules and `keep` for capturing numeric literals.
//!
//! Grammar (informally):
//! ```text
//! expr   = term  (("+" | "-") term)*
//! term   = factor (("*" | "/") factor)*
//! factor = number | "(" expr ")"
//! number = digit+ ("." digit+)?
//! ```

use synthax::rule::{ahead, capture, keep};
use synthax::wrappers::{maybe, many, some};
use synthax::{apply_tree, ApplyOptions, Rule, Tree};

pub fn grammar() -> Rule {
    let expr = ahead();

    let digit = Rule::from_range('0', '9', false);
    let number = keep(
        many(digit.clone()).then(maybe(Rule::from_char('.').then(many(digit)))),
        "number",
    );
    let number = capture(number, "number");

    let factor = ahead();
    factor.put(
        number
            .clone()
            .or(capture(
                Rule::from_char('(')
                    .then(expr.clone())
                    .then(Rule::from_char(')')),
                "paren",
            )),
    );

    let mul_op = capture(Rule::from_char('*'), "mul").or(capture(Rule::from_char('/'), "div"));
    let term = capture(
        factor.clone().then(some(mul_op.then(factor.clone()))),
        "term",
    );

    let add_op = capture(Rule::from_char('+'), "add").or(capture(Rule::from_char('-'), "sub"));
    let expr_body = capture(term.clone().then(some(add_op.then(term))), "expr");
    expr.put(expr_body.clone());

    expr_body
}

/// Fold a parsed calculator tree into its numeric value.
pub fn evaluate(tree: &Tree) -> f64 {
    fold(tree)
}

fn fold(tree: &Tree) -> f64 {
    match tree.id() {
        "expr" | "term" => {
            let mut children = tree.children().iter();
            let mut acc = fold(children.next().expect("expr/term has a leading operand"));
            let mut pending = children.next();
            while let Some(op) = pending {
                let rhs = children.next().expect("operator without a right operand");
                let rhs_val = fold(rhs);
                acc = match op.id() {
                    "add" => acc + rhs_val,
                    "sub" => acc - rhs_val,
                    "mul" => acc * rhs_val,
                    "div" => acc / rhs_val,
                    other => panic!("unexpected operator node {other:?}"),
                };
                pending = children.next();
            }
            acc
        }
        "number" => tree.getattr("number").parse().expect("keep() guarantees digits"),
        "paren" => fold(&tree.children()[0]),
        other => panic!("unexpected node in calculator tree: {other:?}"),
    }
}

pub fn run(input: &str) -> Result<f64, String> {
    let tree = apply_tree(
        input,
        &grammar(),
        &ApplyOptions {
            exact: true,
            ..Default::default()
        },
    )
    .ok_or_else(|| format!("could not parse {input:?} as an arithmetic expression"))?;
    Ok(evaluate(&tree))
}
