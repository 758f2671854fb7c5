use super::{empty_grammar, epsilon_grammar, recursive_grammar, single_grammar};
use crate::diagnostic::CollectorSink;
use crate::LR0Parser;
use std::rc::Rc;

#[test]
fn requires_start_separation() {
    assert!(LR0Parser::new(Rc::new(recursive_grammar())).is_err());
    assert!(LR0Parser::new(Rc::new(empty_grammar())).is_err());
}

#[test]
fn base_case() {
    let empty = LR0Parser::new(Rc::new(empty_grammar().start_separated("S'"))).unwrap();
    assert!(!empty.accepts_str(""));
    assert!(!empty.accepts_str("x"));

    let epsilon = LR0Parser::new(Rc::new(epsilon_grammar().start_separated("S'"))).unwrap();
    assert!(epsilon.accepts_str(""));
    assert!(!epsilon.accepts_str("x"));

    let single = LR0Parser::new(Rc::new(single_grammar().start_separated("S'"))).unwrap();
    assert!(!single.accepts_str(""));
    assert!(single.accepts_str("x"));
    assert!(!single.accepts_str("xx"));
}

#[test]
fn recursive_language() {
    let collector = Rc::new(CollectorSink::new());
    let mut parser =
        LR0Parser::new(Rc::new(recursive_grammar().start_separated("S'"))).unwrap();
    parser.set_diagnostic_sink(collector.clone());

    assert!(!parser.accepts_str(""));
    assert!(!parser.accepts_str("ba"));
    assert!(parser.accepts_str("ab"));
    assert!(parser.accepts_str("bab"));
    assert!(parser.accepts_str("bbab"));
    assert!(!parser.accepts_str("bcab"));
    assert!(!parser.accepts_str("bbabb"));
    assert!(!collector.contains("not LR(0)"));
}
