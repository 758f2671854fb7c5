use crate::diagnostic::CollectorSink;
use crate::examples::statement::{statement_grammar, statement_scanner, StmtAst, StmtToken};
use crate::grammar::token_equality;
use crate::{LRParser, Scan};
use std::rc::Rc;

fn cst(value: i64) -> StmtAst {
    StmtAst::Const(value)
}

fn var(name: &str) -> StmtAst {
    StmtAst::Var(name.to_string())
}

fn bin_op(left: StmtAst, op: &str, right: StmtAst) -> StmtAst {
    StmtAst::BinOp(Box::new(left), op.to_string(), Box::new(right))
}

fn bin_rel(left: StmtAst, rel: &str, right: StmtAst) -> StmtAst {
    StmtAst::BinRel(Box::new(left), rel.to_string(), Box::new(right))
}

fn if_exp(cond: StmtAst, then_exp: StmtAst, else_exp: StmtAst) -> StmtAst {
    StmtAst::IfExp(Box::new(cond), Box::new(then_exp), Box::new(else_exp))
}

fn let_stmt(name: &str, exp: StmtAst) -> StmtAst {
    StmtAst::Let(name.to_string(), Box::new(exp))
}

fn module(stmts: Vec<StmtAst>) -> StmtAst {
    StmtAst::Module(stmts)
}

fn setup() -> (
    Scan<StmtToken>,
    LRParser<&'static str, StmtToken, StmtAst>,
    Rc<CollectorSink>,
) {
    let scan = statement_scanner();
    let collector = Rc::new(CollectorSink::new());
    let mut parser =
        LRParser::new(Rc::new(statement_grammar().start_separated("S'")), 1).unwrap();
    parser.set_equality(Rc::new(token_equality));
    parser.set_diagnostic_sink(collector.clone());
    (scan, parser, collector)
}

#[test]
fn builds_statement_modules() {
    let (scan, parser, collector) = setup();
    let parse = |inp: &str| parser.parse(&scan.tokenize(inp).unwrap());

    assert_eq!(parse(""), (true, Some(module(vec![]))));
    assert_eq!(
        parse("print hi;"),
        (true, Some(module(vec![StmtAst::Prnt(Box::new(var("hi")))])))
    );
    assert_eq!(
        parse("return 1;"),
        (true, Some(module(vec![StmtAst::Ret(Box::new(cst(1)))])))
    );
    assert_eq!(
        parse("hi := 1;"),
        (true, Some(module(vec![let_stmt("hi", cst(1))])))
    );
    assert_eq!(
        parse("hi := 1;\nprint(hi + 1);"),
        (
            true,
            Some(module(vec![
                let_stmt("hi", cst(1)),
                StmtAst::Prnt(Box::new(bin_op(var("hi"), "+", cst(1)))),
            ]))
        )
    );
    assert!(!collector.contains("not LR(1)"));
}

#[test]
fn nested_conditionals() {
    let (scan, parser, collector) = setup();
    let parse = |inp: &str| parser.parse(&scan.tokenize(inp).unwrap());

    assert_eq!(
        parse("hi := if hi == 0 then 1 else 0;"),
        (
            true,
            Some(module(vec![let_stmt(
                "hi",
                if_exp(bin_rel(var("hi"), "==", cst(0)), cst(1), cst(0)),
            )]))
        )
    );
    assert_eq!(
        parse("hi := if if hi == 0 then 0 else 1 then 1 else 0;"),
        (
            true,
            Some(module(vec![let_stmt(
                "hi",
                if_exp(
                    if_exp(bin_rel(var("hi"), "==", cst(0)), cst(0), cst(1)),
                    cst(1),
                    cst(0),
                ),
            )]))
        )
    );
    assert_eq!(
        parse("hi := if if hi == 0 then 0 else 1 then 1 else (0 * (1 / 2));"),
        (
            true,
            Some(module(vec![let_stmt(
                "hi",
                if_exp(
                    if_exp(bin_rel(var("hi"), "==", cst(0)), cst(0), cst(1)),
                    cst(1),
                    bin_op(cst(0), "*", bin_op(cst(1), "/", cst(2))),
                ),
            )]))
        )
    );
    assert_eq!(
        parse("hi := if hi == 0 then 1 else if i then 1 else 0;"),
        (
            true,
            Some(module(vec![let_stmt(
                "hi",
                if_exp(
                    bin_rel(var("hi"), "==", cst(0)),
                    cst(1),
                    if_exp(var("i"), cst(1), cst(0)),
                ),
            )]))
        )
    );
    assert!(!collector.contains("not LR(1)"));
}

#[test]
fn relations_and_grouping() {
    let (scan, parser, collector) = setup();
    let parse = |inp: &str| parser.parse(&scan.tokenize(inp).unwrap());

    assert_eq!(
        parse("return 1 + (2 <= 3);"),
        (
            true,
            Some(module(vec![StmtAst::Ret(Box::new(bin_op(
                cst(1),
                "+",
                bin_rel(cst(2), "<=", cst(3)),
            )))]))
        )
    );
    assert_eq!(
        parse("    return 1 + (2 <= 3);    "),
        (
            true,
            Some(module(vec![StmtAst::Ret(Box::new(bin_op(
                cst(1),
                "+",
                bin_rel(cst(2), "<=", cst(3)),
            )))]))
        )
    );
    assert_eq!(
        parse("return 1 + (2 <= 3);return 1+1;;;;"),
        (
            true,
            Some(module(vec![
                StmtAst::Ret(Box::new(bin_op(cst(1), "+", bin_rel(cst(2), "<=", cst(3))))),
                StmtAst::Ret(Box::new(bin_op(cst(1), "+", cst(1)))),
            ]))
        )
    );
    assert_eq!(
        parse("return (1 + 2) <= 3;"),
        (
            true,
            Some(module(vec![StmtAst::Ret(Box::new(bin_rel(
                bin_op(cst(1), "+", cst(2)),
                "<=",
                cst(3),
            )))]))
        )
    );
    assert_eq!(
        parse("return((1)+(2))<=(3);"),
        (
            true,
            Some(module(vec![StmtAst::Ret(Box::new(bin_rel(
                bin_op(cst(1), "+", cst(2)),
                "<=",
                cst(3),
            )))]))
        )
    );
    assert!(!collector.contains("not LR(1)"));
}

#[test]
fn rejections_return_no_construct() {
    let (scan, parser, _collector) = setup();
    let parse = |inp: &str| parser.parse(&scan.tokenize(inp).unwrap());

    assert_eq!(parse("print hi"), (false, None));
    assert_eq!(parse("return 1 + (2 <= print 3);"), (false, None));
    assert_eq!(parse("return 1 + (2 <= 4 := 3);"), (false, None));
    assert_eq!(parse("return 1 + (2 <= 4));"), (false, None));
    assert_eq!(parse("return 1 ++ (2 <= 4);"), (false, None));
    assert_eq!(parse("return <= (2 + 4);"), (false, None));
    assert_eq!(parse("return 1 + (2 <= 3) return 1+1;;;;"), (false, None));
    assert_eq!(parse("return if i then if j then 0 else 1;"), (false, None));
}

#[test]
fn zero_lookahead_conflicts_are_reported() {
    let scan = statement_scanner();
    let collector = Rc::new(CollectorSink::new());
    let mut parser =
        LRParser::new(Rc::new(statement_grammar().start_separated("S'")), 0).unwrap();
    parser.set_equality(Rc::new(token_equality));
    parser.set_diagnostic_sink(collector.clone());

    parser.parse(&scan.tokenize("return (0 * ((1 * (2)) * 3))").unwrap());
    assert!(collector.contains("Grammar is not LR(0)"));
}
