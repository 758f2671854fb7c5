use crate::analysis::{
    calculate_empty, calculate_first, first_k, fixed_point, follow_k, map_eq,
};
use crate::examples::expression::ll_expression_grammar;
use crate::{FirstKAnalysis, FollowKAnalysis, IGrammarAnalysis, Lookaheads, Symbol};
use std::collections::{BTreeSet, HashMap};

fn las(seqs: &[&str]) -> Lookaheads<char> {
    seqs.iter().map(|s| s.chars().collect()).collect()
}

#[test]
fn fixed_point_base() {
    let result = fixed_point(0, |n| if *n < 5 { n + 1 } else { *n }, |a, b| a == b);
    assert_eq!(result, 5);

    let mut env = HashMap::new();
    env.insert("n", 1);
    assert!(map_eq(&env, &env.clone(), |x, y| x == y));
    let mut other = env.clone();
    other.insert("n", 2);
    assert!(!map_eq(&env, &other, |x, y| x == y));
}

#[test]
fn first_1_of_expression_grammar() {
    let g = ll_expression_grammar();
    let first_env = first_k(&g, 1);

    assert_eq!(first_env["T"], las(&["x", "2", "("]));
    assert_eq!(first_env["E"], las(&["x", "2", "("]));
    assert_eq!(first_env["F"], las(&["x", "2", "("]));
    assert_eq!(first_env["T'"], las(&["+", ""]));
    assert_eq!(first_env["E'"], las(&["*", ""]));
}

#[test]
fn follow_1_of_expression_grammar() {
    let g = ll_expression_grammar();
    let first_env = first_k(&g, 1);
    let follow_env = follow_k(&g, 1, first_env);

    assert_eq!(follow_env["F"], las(&["*", "+", ")", ""]));
    assert_eq!(follow_env["T"], las(&[")", ""]));
}

#[test]
fn first_k_monotone_containment() {
    let g = ll_expression_grammar();
    let fika = FirstKAnalysis::new(1);
    let first_env = fika.run(&g);

    // At the fixed point the environment absorbs every rule's right-hand side value.
    for rule in g.rules() {
        let value = fika.rhs_analysis(&first_env, &rule.rhs);
        assert!(first_env[&rule.lhs].is_superset(&value), "{}", rule);
    }
}

#[test]
fn follow_k_containment() {
    let g = ll_expression_grammar();
    let fika = FirstKAnalysis::new(1);
    let first_env = fika.run(&g);
    let follow_env = FollowKAnalysis::new(1, first_env.clone()).run(&g);

    for rule in g.rules() {
        for (position, sym) in rule.rhs.iter().enumerate() {
            if let Symbol::NT(nt) = sym {
                let rest = fika.rhs_analysis(&first_env, &rule.rhs[position + 1..]);
                let tail = fika.concat_k(&rest, &follow_env[&rule.lhs]);
                assert!(follow_env[nt].is_superset(&tail), "{}", rule);
            }
        }
    }
}

#[test]
fn first_2_keeps_two_symbol_prefixes() {
    let g = ll_expression_grammar();
    let first_env = first_k(&g, 2);

    let t = &first_env["T"];
    assert!(t.contains(&vec!['x']));
    assert!(t.contains(&vec!['x', '+']));
    assert!(t.contains(&vec!['x', '*']));
    assert!(t.contains(&vec!['(', 'x']));
    assert!(!t.contains(&vec!['+']));
    assert!(t.iter().all(|seq| seq.len() <= 2));
}

#[test]
fn legacy_first_1_agrees_with_first_k() {
    let g = ll_expression_grammar();
    let es = calculate_empty(&g);

    assert!(es["T'"]);
    assert!(es["E'"]);
    assert!(!es["T"]);
    assert!(!es["F"]);

    let legacy = calculate_first(&g, &es);
    let first_env = first_k(&g, 1);
    for nt in g.nonterminals() {
        let converted: Lookaheads<char> = legacy[nt]
            .iter()
            .map(|entry| match entry {
                Some(term) => vec![*term],
                None => Vec::new(),
            })
            .collect();
        assert_eq!(converted, first_env[nt], "first_1({:?})", nt);
    }
}

#[test]
fn lookahead_concat_truncates() {
    let fika = FirstKAnalysis::new(2);
    let x: Lookaheads<char> = BTreeSet::from([vec!['a'], vec!['b', 'c']]);
    let y: Lookaheads<char> = BTreeSet::from([vec!['d'], Vec::new()]);
    assert_eq!(
        fika.concat_k(&x, &y),
        BTreeSet::from([vec!['a'], vec!['a', 'd'], vec!['b', 'c']])
    );
}
