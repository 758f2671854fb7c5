use crate::diagnostic::CollectorSink;
use crate::examples::expression::{expression_grammar, ll_expression_grammar, ExprAst};
use crate::examples::statement::{arith_expression_grammar, statement_scanner};
use crate::grammar::token_equality;
use crate::{LLParser, LR0Parser, LRParser};
use std::rc::Rc;

#[test]
fn predictive_parsing() {
    let collector = Rc::new(CollectorSink::new());
    let mut parser = LLParser::new(Rc::new(ll_expression_grammar()), 1);
    parser.set_diagnostic_sink(collector.clone());

    assert!(!parser.accepts_str(""));
    assert!(parser.accepts_str("x"));
    assert!(parser.accepts_str("x+2*x"));
    assert!(parser.accepts_str("(x+2)*x"));
    assert!(!parser.accepts_str("x+"));
    assert!(!parser.accepts_str("x++2"));
    assert!(!collector.contains("not LL(1)"));
}

#[test]
fn builds_the_expression_tree() {
    let collector = Rc::new(CollectorSink::new());
    let mut parser =
        LRParser::new(Rc::new(expression_grammar().start_separated("S'")), 1).unwrap();
    parser.set_diagnostic_sink(collector.clone());

    let (accepted, root) = parser.parse_str("x+2*x");
    assert!(accepted);
    assert_eq!(
        root,
        Some(ExprAst::BinOp(
            Box::new(ExprAst::Var('x')),
            '+',
            Box::new(ExprAst::BinOp(
                Box::new(ExprAst::Constant(2)),
                '*',
                Box::new(ExprAst::Var('x'))
            ))
        ))
    );

    assert_eq!(parser.parse_str("x+"), (false, None));
    assert!(!collector.contains("not LR(1)"));
}

#[test]
fn parenthesised_grouping_wins() {
    let parser =
        LRParser::new(Rc::new(expression_grammar().start_separated("S'")), 1).unwrap();
    let (accepted, root) = parser.parse_str("(x+2)*x");
    assert!(accepted);
    assert_eq!(
        root,
        Some(ExprAst::BinOp(
            Box::new(ExprAst::BinOp(
                Box::new(ExprAst::Var('x')),
                '+',
                Box::new(ExprAst::Constant(2))
            )),
            '*',
            Box::new(ExprAst::Var('x'))
        ))
    );
}

#[test]
fn token_level_arithmetic() {
    let scan = statement_scanner();
    let collector = Rc::new(CollectorSink::new());
    let mut parser = LLParser::new(Rc::new(arith_expression_grammar()), 1);
    parser.set_equality(Rc::new(token_equality));
    parser.set_diagnostic_sink(collector.clone());

    let accepts = |inp: &str| parser.accepts(&scan.tokenize(inp).unwrap());

    assert!(!accepts(""));
    assert!(accepts("10 + hello"));
    assert!(accepts("10 + hello - 0"));
    assert!(accepts("10 + hello - (a - a)"));
    assert!(accepts("0 * ((1 * (2)) * 3)"));
    assert!(accepts("0*((1*(2))*3)"));
    assert!(accepts("0*   (\t(1*\n(2))    \n *3)"));
    assert!(accepts("(0 * ((1 * (2)) * 3))"));
    assert!(!accepts("0 * ((1 * (2)) * 3) <="));
    assert!(!accepts("0 * ((1 * (2)) * 3) 4"));
    assert!(!accepts("(0 * ((1 * (2)) * 3)"));
    assert!(!accepts("(0 * ((1 ** (2)) * 3))"));
    assert!(!collector.contains("not LL(1)"));
}

#[test]
fn token_level_arithmetic_without_lookahead() {
    let scan = statement_scanner();
    let collector = Rc::new(CollectorSink::new());
    let mut parser = LLParser::new(Rc::new(arith_expression_grammar()), 0);
    parser.set_equality(Rc::new(token_equality));
    parser.set_diagnostic_sink(collector.clone());

    parser.accepts(&scan.tokenize("(0 * ((1 * (2)) * 3))").unwrap());
    assert!(collector.contains("Grammar is not LL(0)"));
}

#[test]
fn shift_reduce_parsing_of_tokens() {
    let scan = statement_scanner();
    let collector = Rc::new(CollectorSink::new());
    let mut parser =
        LR0Parser::new(Rc::new(arith_expression_grammar().start_separated("S'"))).unwrap();
    parser.set_equality(Rc::new(token_equality));
    parser.set_diagnostic_sink(collector.clone());

    assert!(parser.accepts(&scan.tokenize("10 + hello").unwrap()));
    assert!(collector.contains("Grammar is not LR(0)"));
}

#[test]
fn conflict_reporting_is_deterministic() {
    let scan = statement_scanner();
    let input = scan.tokenize("10 + hello - 0").unwrap();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let collector = Rc::new(CollectorSink::new());
        let mut parser =
            LR0Parser::new(Rc::new(arith_expression_grammar().start_separated("S'"))).unwrap();
        parser.set_equality(Rc::new(token_equality));
        parser.set_diagnostic_sink(collector.clone());
        let accepted = parser.accepts(&input);
        runs.push((accepted, collector.lines()));
    }
    assert_eq!(runs[0], runs[1]);
    assert!(!runs[0].1.is_empty());
}
