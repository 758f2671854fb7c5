//! The predictive LL(k) parser.
//!
//! The parser predicts productions from the next `k` input terminals. Per production
//! `A -> alpha` the lookahead set is `first_k(alpha) . follow_k(A)`; a production is a
//! candidate when its lookahead set holds a sequence of the same length as the input prefix
//! that is equal to it under the injected terminal equality. Several candidates mean the
//! grammar is not LL(k): the conflict is reported and the earliest production wins. The parser
//! decides full-string membership only; lookahead sequences may be shorter than the remaining
//! input, so longest-prefix acceptance would be ambiguous.
use crate::diagnostic::StdoutSink;
use crate::{
    FirstKAnalysis, FollowKAnalysis, Grammar, IDiagnosticSink, IGrammarAnalysis, LLParser, Log,
    Lookaheads, Symbol, TermEq,
};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

impl<TNt, TTerm, TAst> LLParser<TNt, TTerm, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
    TTerm: Clone + Debug + Eq + Ord + 'static,
{
    /// Create an LL(k) parser. Terminals compare by value until
    /// [set_equality](LLParser::set_equality) installs another policy.
    pub fn new(grammar: Rc<Grammar<TNt, TTerm, TAst>>, k: usize) -> Self {
        Self {
            grammar,
            k,
            eq: Rc::new(|x: &TTerm, y: &TTerm| x == y),
            sink: Rc::new(StdoutSink),
            lookaheads: OnceCell::new(),
            debug: OnceCell::new(),
        }
    }

    /// Install a terminal equality policy, e.g.
    /// [token_equality](crate::grammar::token_equality) for token grammars.
    pub fn set_equality(&mut self, eq: TermEq<TTerm>) {
        self.eq = eq;
    }

    /// Install the sink receiving `Grammar is not LL(k)` diagnostics.
    pub fn set_diagnostic_sink(&mut self, sink: Rc<dyn IDiagnosticSink>) {
        self.sink = sink;
    }

    /// Set a log label to debug the parser.
    pub fn set_log(&self, log_label: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log_label)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// The lookahead set of every production, indexed by declaration order.
    fn obtain_lookaheads(&self) -> &Vec<Lookaheads<TTerm>> {
        self.lookaheads.get_or_init(|| {
            let fika = FirstKAnalysis::new(self.k);
            let first_env = fika.run(self.grammar.as_ref());
            let foka = FollowKAnalysis::new(self.k, first_env.clone());
            let follow_env = foka.run(self.grammar.as_ref());
            self.grammar
                .rules()
                .iter()
                .map(|rule| {
                    let first_rhs = fika.rhs_analysis(&first_env, &rule.rhs);
                    fika.concat_k(&first_rhs, &follow_env[&rule.lhs])
                })
                .collect()
        })
    }

    fn accept_symbol<'inp>(
        &self,
        sym: &Symbol<TNt, TTerm>,
        inp: &'inp [TTerm],
    ) -> Option<&'inp [TTerm]> {
        match sym {
            Symbol::NT(nt) => {
                let lookaheads = self.obtain_lookaheads();
                let prefix = &inp[..self.k.min(inp.len())];
                let mut candidates: Vec<usize> = Vec::new();
                for rule_index in self.grammar.rule_indices_with_lhs(nt) {
                    let matched = lookaheads[*rule_index].iter().any(|la| {
                        la.len() == prefix.len()
                            && la.iter().zip(prefix.iter()).all(|(l, p)| (self.eq)(l, p))
                    });
                    if matched {
                        candidates.push(*rule_index);
                    }
                }
                if candidates.len() > 1 {
                    self.sink.report(&format!("Grammar is not LL({})", self.k));
                }
                let chosen = *candidates.first()?;
                #[cfg(debug_assertions)]
                if let Some(debug) = self.debug.get() {
                    if debug.order() >= Log::Verbose(()).order() {
                        println!(
                            "[{}; Predict]: {} on prefix {:?}",
                            debug,
                            self.grammar.rules()[chosen],
                            prefix
                        );
                    }
                }
                self.accept_list(&self.grammar.rules()[chosen].rhs, inp)
            }
            Symbol::Term(term) => match inp.split_first() {
                Some((first, rest)) if (self.eq)(term, first) => Some(rest),
                _ => None,
            },
        }
    }

    fn accept_list<'inp>(
        &self,
        alpha: &[Symbol<TNt, TTerm>],
        mut inp: &'inp [TTerm],
    ) -> Option<&'inp [TTerm]> {
        for sym in alpha {
            inp = self.accept_symbol(sym, inp)?;
        }
        Some(inp)
    }

    /// Whether the grammar derives exactly `inp` from its start symbol.
    pub fn accepts(&self, inp: &[TTerm]) -> bool {
        let remaining = self.accept_symbol(&Symbol::NT(*self.grammar.start()), inp);
        remaining.map_or(false, |rest| rest.is_empty())
    }
}

impl<TNt, TAst> LLParser<TNt, char, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
{
    /// [accepts](LLParser::accepts) over the characters of a string.
    pub fn accepts_str(&self, inp: &str) -> bool {
        let terms: Vec<char> = inp.chars().collect();
        self.accepts(&terms)
    }
}
