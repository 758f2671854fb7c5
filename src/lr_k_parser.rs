//! The LR(k) parser with bottom-up semantic construction.
//!
//! Items carry lookahead sequences of length at most `k`; a complete item is reducable only
//! when its lookahead equals the next `k` input terminals under the injected equality. The
//! continuation list of the recursive formulation is interpreted here as shared [Frame]s
//! driven by a loop: a frame pairs a state with the continuations visible from it, each being
//! the frame of one ancestor state. Entering a state narrows the visible list to `nactive`
//! entries, the longest active prefix of the entered state, but an ancestor frame keeps its
//! own full list and restores it when a reduction returns there. A reduction by `A -> alpha`
//! invokes the continuation `|alpha|` levels up and performs the goto on `A` from that frame's
//! state.
//!
//! A parallel construct stack builds the semantic value: shifts push the terminal, reductions
//! pop one value per right-hand side symbol and push the action's result (or the null
//! placeholder when the production carries no action). On acceptance the single remaining
//! construct is the semantic root.
use crate::diagnostic::StdoutSink;
use crate::lr_0_parser::{can_shift, is_final};
use crate::{
    ConstructImpl, FirstKAnalysis, Grammar, IDiagnosticSink, IGrammarAnalysis,
    ImplementationError, Item, LRParser, Log, Lookaheads, State, Symbol, TermEq,
};
use once_cell::unsync::OnceCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// The active prefix length of a state: the maximum dot position over its items.
pub(crate) fn nactive<TTerm>(state: &State<TTerm>) -> usize {
    state.iter().map(|item| item.position()).max().unwrap_or(0)
}

/// A parse frame: an automaton state together with the continuations visible from it, one per
/// live ancestor state. Frames are shared; `parents[n]` of the current frame is where a
/// reduction of arity `n + 1` resumes.
struct Frame<TTerm> {
    state: State<TTerm>,
    parents: Vec<Rc<Frame<TTerm>>>,
}

impl<TNt, TTerm, TAst> LRParser<TNt, TTerm, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
    TTerm: Clone + Debug + Eq + Ord + 'static,
    TAst: ConstructImpl<TTerm>,
{
    /// Create an LR(k) parser over a start-separated grammar. Fails when the start symbol has
    /// more than one production (or none).
    pub fn new(
        grammar: Rc<Grammar<TNt, TTerm, TAst>>,
        k: usize,
    ) -> Result<Self, ImplementationError> {
        if grammar.rule_indices_with_lhs(grammar.start()).len() != 1 {
            return Err(ImplementationError::new(
                "LRParser".to_string(),
                "Grammar is not start-separated. (use Grammar::start_separated)".to_string(),
            ));
        }
        Ok(Self {
            grammar,
            k,
            eq: Rc::new(|x: &TTerm, y: &TTerm| x == y),
            sink: Rc::new(StdoutSink),
            first_env: OnceCell::new(),
            debug: OnceCell::new(),
        })
    }

    /// Install a terminal equality policy, e.g.
    /// [token_equality](crate::grammar::token_equality) for token grammars.
    pub fn set_equality(&mut self, eq: TermEq<TTerm>) {
        self.eq = eq;
    }

    /// Install the sink receiving `Grammar is not LR(k)` diagnostics.
    pub fn set_diagnostic_sink(&mut self, sink: Rc<dyn IDiagnosticSink>) {
        self.sink = sink;
    }

    /// Set a log label to debug the parser.
    pub fn set_log(&self, log_label: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log_label)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    fn obtain_first_env(&self) -> &HashMap<TNt, Lookaheads<TTerm>> {
        self.first_env
            .get_or_init(|| FirstKAnalysis::new(self.k).run(self.grammar.as_ref()))
    }

    /// The least item set containing `seed`, closed under prediction: for `A -> alpha . B beta`
    /// with lookahead `l`, every initial item of `B` is added once per sequence in
    /// `first_k(beta . l)`.
    fn compute_closure(&self, seed: State<TTerm>) -> State<TTerm> {
        let fika = FirstKAnalysis::new(self.k);
        let mut closure: State<TTerm> = BTreeSet::new();
        let mut new_closure = seed;
        while closure != new_closure {
            closure = new_closure.clone();
            for item in &closure {
                let rhs = &self.grammar.rules()[item.rule()].rhs;
                if let Some(Symbol::NT(nt)) = rhs.get(item.position()) {
                    let mut tail: Vec<Symbol<TNt, TTerm>> = rhs[item.position() + 1..].to_vec();
                    tail.extend(item.lookahead().iter().cloned().map(Symbol::Term));
                    for lookahead in fika.rhs_analysis(self.obtain_first_env(), &tail) {
                        for rule_index in self.grammar.rule_indices_with_lhs(nt) {
                            new_closure.insert(Item::with_lookahead(
                                *rule_index,
                                0,
                                lookahead.clone(),
                            ));
                        }
                    }
                }
            }
        }
        new_closure
    }

    fn goto(&self, state: &State<TTerm>, symbol: &Symbol<TNt, TTerm>) -> State<TTerm> {
        let seed: State<TTerm> = state
            .iter()
            .filter(|item| can_shift(self.grammar.as_ref(), item, symbol, &self.eq))
            .map(|item| item.shifted())
            .collect();
        self.compute_closure(seed)
    }

    fn initial_state(&self) -> State<TTerm> {
        let start_rules = self.grammar.rule_indices_with_lhs(self.grammar.start());
        self.compute_closure(BTreeSet::from([Item::new(start_rules[0], 0)]))
    }

    /// The complete items whose lookahead equals the input prefix (same length, elementwise
    /// under the injected equality).
    fn reducable_items<'state>(
        &self,
        state: &'state State<TTerm>,
        prefix: &[TTerm],
    ) -> Vec<&'state Item<TTerm>> {
        state
            .iter()
            .filter(|item| {
                self.grammar.rules()[item.rule()].rhs.len() == item.position()
                    && item.lookahead().len() == prefix.len()
                    && item
                        .lookahead()
                        .iter()
                        .zip(prefix.iter())
                        .all(|(l, p)| (self.eq)(l, p))
            })
            .collect()
    }

    /// The continuation of `base`: enter `goto(base.state, symbol)` with the visible ancestor
    /// list narrowed to the active prefix of the new state. Ancestors beyond `nactive` can
    /// never be returned to by a reduction from there.
    fn enter(&self, base: &Rc<Frame<TTerm>>, symbol: &Symbol<TNt, TTerm>) -> Rc<Frame<TTerm>> {
        let state = self.goto(&base.state, symbol);
        let active = nactive(&state);
        let mut parents = Vec::with_capacity(active.max(1));
        parents.push(base.clone());
        parents.extend(base.parents.iter().take(active.saturating_sub(1)).cloned());
        Rc::new(Frame { state, parents })
    }

    /// Parse `inp`, returning the verdict and, on acceptance, the semantic root.
    pub fn parse(&self, inp: &[TTerm]) -> (bool, Option<TAst>) {
        let mut constructs: Vec<TAst> = Vec::new();
        let mut current = Rc::new(Frame {
            state: self.initial_state(),
            parents: Vec::new(),
        });
        let mut pointer = 0;

        let accepted = loop {
            if is_final(self.grammar.as_ref(), &current.state) && pointer == inp.len() {
                break true;
            }

            let shiftable: Vec<&Item<TTerm>> = if pointer < inp.len() {
                let symbol = Symbol::Term(inp[pointer].clone());
                current
                    .state
                    .iter()
                    .filter(|item| can_shift(self.grammar.as_ref(), item, &symbol, &self.eq))
                    .collect()
            } else {
                Vec::new()
            };
            let prefix = &inp[pointer..(pointer + self.k).min(inp.len())];
            let reducable = self.reducable_items(&current.state, prefix);
            if reducable.len() + usize::from(!shiftable.is_empty()) > 1 {
                self.sink.report(&format!("Grammar is not LR({})", self.k));
            }

            if !shiftable.is_empty() {
                constructs.push(TAst::terminal(&inp[pointer]));
                let symbol = Symbol::Term(inp[pointer].clone());
                pointer += 1;
                current = self.enter(&current, &symbol);
            } else if let Some(item) = reducable.first() {
                let rule = &self.grammar.rules()[item.rule()];
                let arity = rule.arity();
                if arity > constructs.len() {
                    break false;
                }
                let args: Vec<TAst> = constructs.split_off(constructs.len() - arity);
                let construct = match rule.action() {
                    Some(action) => action(args),
                    None => TAst::null(),
                };
                #[cfg(debug_assertions)]
                if let Some(debug) = self.debug.get() {
                    if debug.order() >= Log::Verbose(()).order() {
                        println!("[{}; Reduce]: {} => {:?}", debug, rule, construct);
                    }
                }
                constructs.push(construct);
                let lhs = rule.lhs;
                let target = if arity == 0 {
                    current.clone()
                } else {
                    match current.parents.get(arity - 1) {
                        Some(parent) => parent.clone(),
                        None => break false,
                    }
                };
                current = self.enter(&target, &Symbol::NT(lhs));
            } else {
                break false;
            }
        };

        if accepted {
            (true, constructs.pop())
        } else {
            (false, None)
        }
    }

    /// The bare verdict of [parse](LRParser::parse).
    pub fn accepts(&self, inp: &[TTerm]) -> bool {
        self.parse(inp).0
    }
}

impl<TNt, TAst> LRParser<TNt, char, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
    TAst: ConstructImpl<char>,
{
    /// [parse](LRParser::parse) over the characters of a string.
    pub fn parse_str(&self, inp: &str) -> (bool, Option<TAst>) {
        let terms: Vec<char> = inp.chars().collect();
        self.parse(&terms)
    }
}
