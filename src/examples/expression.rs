//! Arithmetic expressions over single characters.
//!
//! Two renditions of the same language: a left-recursive grammar with semantic actions
//! building an [ExprAst] (for the LR parsers), and a right-recursive variant without actions
//! (for the predictive and top-down parsers, which cannot handle left recursion).
use crate::{ConstructImpl, Grammar, Production, SemanticAction, Symbol};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
/// Abstract syntax of an arithmetic expression; [Term](ExprAst::Term) carries a shifted
/// character that an action has not consumed yet.
pub enum ExprAst {
    Null,
    Term(char),
    Var(char),
    Constant(i64),
    BinOp(Box<ExprAst>, char, Box<ExprAst>),
}

impl ConstructImpl<char> for ExprAst {
    fn null() -> Self {
        ExprAst::Null
    }

    fn terminal(term: &char) -> Self {
        ExprAst::Term(*term)
    }
}

/// The left-recursive LR(1) expression grammar with semantic actions.
///
/// ```text
/// T -> E | T '+' E
/// E -> F | E '*' F
/// F -> 'x' | '2' | '(' T ')'
/// ```
pub fn expression_grammar() -> Grammar<&'static str, char, ExprAst> {
    let keep: SemanticAction<ExprAst> =
        Rc::new(|mut args: Vec<ExprAst>| args.pop().unwrap_or(ExprAst::Null));
    let bin_op: SemanticAction<ExprAst> = Rc::new(|mut args: Vec<ExprAst>| {
        let right = args.pop();
        let op = args.pop();
        let left = args.pop();
        match (left, op, right) {
            (Some(l), Some(ExprAst::Term(op)), Some(r)) => {
                ExprAst::BinOp(Box::new(l), op, Box::new(r))
            }
            _ => ExprAst::Null,
        }
    });
    let var: SemanticAction<ExprAst> = Rc::new(|mut args: Vec<ExprAst>| match args.pop() {
        Some(ExprAst::Term(c)) => ExprAst::Var(c),
        _ => ExprAst::Null,
    });
    let constant: SemanticAction<ExprAst> = Rc::new(|mut args: Vec<ExprAst>| match args.pop() {
        Some(ExprAst::Term(c)) => ExprAst::Constant(c.to_digit(10).map_or(0, i64::from)),
        _ => ExprAst::Null,
    });
    let parenthesised: SemanticAction<ExprAst> = Rc::new(|mut args: Vec<ExprAst>| {
        args.pop();
        args.pop().unwrap_or(ExprAst::Null)
    });

    match Grammar::new(
        vec!["T", "E", "F"],
        vec!['x', '2', '(', ')', '+', '*'],
        vec![
            Production::new("T", vec![Symbol::NT("E")]).with_action(keep.clone()),
            Production::new(
                "T",
                vec![Symbol::NT("T"), Symbol::Term('+'), Symbol::NT("E")],
            )
            .with_action(bin_op.clone()),
            Production::new("E", vec![Symbol::NT("F")]).with_action(keep),
            Production::new(
                "E",
                vec![Symbol::NT("E"), Symbol::Term('*'), Symbol::NT("F")],
            )
            .with_action(bin_op),
            Production::new("F", vec![Symbol::Term('x')]).with_action(var),
            Production::new("F", vec![Symbol::Term('2')]).with_action(constant),
            Production::new(
                "F",
                vec![Symbol::Term('('), Symbol::NT("T"), Symbol::Term(')')],
            )
            .with_action(parenthesised),
        ],
        "T",
    ) {
        Ok(grammar) => grammar,
        Err(err) => panic!("{}", err),
    }
}

/// The right-recursive LL(1) variant of [expression_grammar], without semantic actions.
///
/// ```text
/// T  -> E T'
/// T' -> '+' E T' | ()
/// E  -> F E'
/// E' -> '*' F E' | ()
/// F  -> 'x' | '2' | '(' T ')'
/// ```
pub fn ll_expression_grammar() -> Grammar<&'static str, char> {
    match Grammar::new(
        vec!["T", "T'", "E", "E'", "F"],
        vec!['x', '2', '(', ')', '+', '*'],
        vec![
            Production::new("T", vec![Symbol::NT("E"), Symbol::NT("T'")]),
            Production::new(
                "T'",
                vec![Symbol::Term('+'), Symbol::NT("E"), Symbol::NT("T'")],
            ),
            Production::new("T'", vec![]),
            Production::new("E", vec![Symbol::NT("F"), Symbol::NT("E'")]),
            Production::new(
                "E'",
                vec![Symbol::Term('*'), Symbol::NT("F"), Symbol::NT("E'")],
            ),
            Production::new("E'", vec![]),
            Production::new("F", vec![Symbol::Term('x')]),
            Production::new("F", vec![Symbol::Term('2')]),
            Production::new(
                "F",
                vec![Symbol::Term('('), Symbol::NT("T"), Symbol::Term(')')],
            ),
        ],
        "T",
    ) {
        Ok(grammar) => grammar,
        Err(err) => panic!("{}", err),
    }
}
