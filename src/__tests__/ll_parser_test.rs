use super::{empty_grammar, epsilon_grammar, recursive_grammar, single_grammar};
use crate::diagnostic::CollectorSink;
use crate::LLParser;
use std::rc::Rc;

#[test]
fn base_case() {
    let empty = LLParser::new(Rc::new(empty_grammar()), 0);
    assert!(!empty.accepts_str(""));
    assert!(!empty.accepts_str("x"));

    let epsilon = LLParser::new(Rc::new(epsilon_grammar()), 0);
    assert!(epsilon.accepts_str(""));
    assert!(!epsilon.accepts_str("x"));

    let single = LLParser::new(Rc::new(single_grammar()), 0);
    assert!(!single.accepts_str(""));
    assert!(single.accepts_str("x"));
    assert!(!single.accepts_str("xx"));
}

#[test]
fn recursive_language() {
    let collector = Rc::new(CollectorSink::new());
    let mut parser = LLParser::new(Rc::new(recursive_grammar()), 1);
    parser.set_diagnostic_sink(collector.clone());

    assert!(!parser.accepts_str(""));
    assert!(!parser.accepts_str("ba"));
    assert!(parser.accepts_str("ab"));
    assert!(parser.accepts_str("bab"));
    assert!(parser.accepts_str("bbab"));
    assert!(!parser.accepts_str("bcab"));
    assert!(!parser.accepts_str("bbabb"));
    assert!(!collector.contains("not LL(1)"));
}

#[test]
fn zero_lookahead_conflicts_are_reported() {
    let collector = Rc::new(CollectorSink::new());
    let mut parser = LLParser::new(Rc::new(recursive_grammar()), 0);
    parser.set_diagnostic_sink(collector.clone());

    parser.accepts_str("bbab");
    assert!(collector.contains("Grammar is not LL(0)"));
}
