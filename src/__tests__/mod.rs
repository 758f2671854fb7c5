mod analysis_test;
mod ll_parser_test;
mod lr_0_parser_test;
mod scanner_test;
mod td_parser_test;

use crate::{Grammar, Production, Symbol};

pub(crate) fn empty_grammar() -> Grammar<&'static str, char> {
    Grammar::new(vec!["S"], vec![], vec![], "S").unwrap()
}

pub(crate) fn epsilon_grammar() -> Grammar<&'static str, char> {
    Grammar::new(vec!["S"], vec![], vec![Production::new("S", vec![])], "S").unwrap()
}

pub(crate) fn single_grammar() -> Grammar<&'static str, char> {
    Grammar::new(
        vec!["S"],
        vec!['x'],
        vec![Production::new("S", vec![Symbol::Term('x')])],
        "S",
    )
    .unwrap()
}

pub(crate) fn recursive_grammar() -> Grammar<&'static str, char> {
    Grammar::new(
        vec!["S", "T"],
        vec!['a', 'b'],
        vec![
            Production::new("S", vec![Symbol::NT("T"), Symbol::NT("S")]),
            Production::new("S", vec![Symbol::Term('a'), Symbol::NT("T")]),
            Production::new("T", vec![Symbol::Term('b')]),
        ],
        "S",
    )
    .unwrap()
}
