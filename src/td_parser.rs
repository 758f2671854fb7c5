//! The nondeterministic top-down reference parser.
//!
//! [TopDownParser::suffixes] enumerates, lazily and depth-first, every input suffix left after
//! a sentential form derives some prefix of the input. It recognises all derivations of a
//! grammar and serves as an oracle for the deterministic parsers; it is not a production
//! parser and need not terminate on left-recursive grammars.
use crate::{Grammar, Symbol, TopDownParser};
use std::hash::Hash;
use std::rc::Rc;

impl<TNt, TTerm, TAst> TopDownParser<TNt, TTerm, TAst>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Eq,
{
    pub fn new(grammar: Rc<Grammar<TNt, TTerm, TAst>>) -> Self {
        Self { grammar }
    }

    /// Every suffix `rest` of `inp` such that `alpha` derives the prefix of `inp` before
    /// `rest`, explored depth-first with productions in declaration order. A suffix is yielded
    /// once per derivation.
    pub fn suffixes<'parser, 'inp>(
        &'parser self,
        alpha: Vec<Symbol<TNt, TTerm>>,
        inp: &'inp [TTerm],
    ) -> Derivations<'parser, 'inp, TNt, TTerm, TAst> {
        Derivations {
            grammar: self.grammar.as_ref(),
            inp,
            frontier: vec![(alpha, 0)],
        }
    }

    /// Whether some derivation of the start symbol consumes exactly `inp`.
    pub fn accepts(&self, inp: &[TTerm]) -> bool {
        self.suffixes(vec![Symbol::NT(*self.grammar.start())], inp)
            .any(|rest| rest.is_empty())
    }
}

impl<TNt, TAst> TopDownParser<TNt, char, TAst>
where
    TNt: Copy + Eq + Hash,
{
    /// [accepts](TopDownParser::accepts) over the characters of a string.
    pub fn accepts_str(&self, inp: &str) -> bool {
        let terms: Vec<char> = inp.chars().collect();
        self.accepts(&terms)
    }
}

/// The lazy sequence of remaining-input suffixes produced by [TopDownParser::suffixes].
///
/// The iterator keeps an explicit frontier of `(sentential form, consumed length)` frames and
/// expands them depth-first.
pub struct Derivations<'parser, 'inp, TNt, TTerm, TAst> {
    grammar: &'parser Grammar<TNt, TTerm, TAst>,
    inp: &'inp [TTerm],
    frontier: Vec<(Vec<Symbol<TNt, TTerm>>, usize)>,
}

impl<'parser, 'inp, TNt, TTerm, TAst> Iterator for Derivations<'parser, 'inp, TNt, TTerm, TAst>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Eq,
{
    type Item = &'inp [TTerm];

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((alpha, consumed)) = self.frontier.pop() {
            match alpha.split_first() {
                None => return Some(&self.inp[consumed..]),
                Some((Symbol::NT(nt), rest_alpha)) => {
                    // Reverse so that the earliest production is expanded first.
                    for rule_index in self.grammar.rule_indices_with_lhs(nt).iter().rev() {
                        let rule = &self.grammar.rules()[*rule_index];
                        let mut expanded = rule.rhs.clone();
                        expanded.extend_from_slice(rest_alpha);
                        self.frontier.push((expanded, consumed));
                    }
                }
                Some((Symbol::Term(term), rest_alpha)) => {
                    if self.inp.get(consumed) == Some(term) {
                        self.frontier.push((rest_alpha.to_vec(), consumed + 1));
                    }
                }
            }
        }
        None
    }
}
