use super::{recursive_grammar, single_grammar};
use crate::examples::expression::ll_expression_grammar;
use crate::{Grammar, LLParser, LRParser, Production, Symbol, TopDownParser};
use std::rc::Rc;

#[test]
fn base_case() {
    let parser = TopDownParser::new(Rc::new(single_grammar()));
    assert!(!parser.accepts(&[]));
    assert!(parser.accepts(&['x']));
    assert!(!parser.accepts(&['x', 'x']));
}

#[test]
fn yields_every_derivation() {
    let grammar: Grammar<&'static str, char> = Grammar::new(
        vec!["S"],
        vec!['a'],
        vec![
            Production::new("S", vec![Symbol::Term('a'), Symbol::NT("S")]),
            Production::new("S", vec![Symbol::Term('a')]),
        ],
        "S",
    )
    .unwrap();
    let parser = TopDownParser::new(Rc::new(grammar));

    let input = ['a', 'a'];
    let suffixes: Vec<&[char]> = parser.suffixes(vec![Symbol::NT("S")], &input).collect();
    let expected: Vec<&[char]> = vec![&[], &['a']];
    assert_eq!(suffixes, expected);
}

#[test]
fn recursive_language() {
    let parser = TopDownParser::new(Rc::new(recursive_grammar()));
    assert!(!parser.accepts(&[]));
    assert!(!parser.accepts(&['b', 'a']));
    assert!(parser.accepts(&['a', 'b']));
    assert!(parser.accepts(&['b', 'a', 'b']));
    assert!(parser.accepts(&['b', 'b', 'a', 'b']));
    assert!(!parser.accepts(&['b', 'b', 'a', 'b', 'b']));
}

#[test]
fn agrees_with_the_deterministic_parsers() {
    let grammar = Rc::new(ll_expression_grammar());
    let td = TopDownParser::new(grammar.clone());
    let ll = LLParser::new(grammar.clone(), 1);
    let lr = LRParser::new(Rc::new(grammar.start_separated("S'")), 1).unwrap();

    for input in ["", "x", "x+", "x+2", "x+2*x", "(x+2)*x", "x)", "((x))", "2*"] {
        let terms: Vec<char> = input.chars().collect();
        assert_eq!(td.accepts(&terms), ll.accepts(&terms), "input {:?}", input);
        assert_eq!(td.accepts(&terms), lr.accepts(&terms), "input {:?}", input);
    }
}
