//! LR items and the stack-based LR(0) parser.
//!
//! Items reference productions by declaration index, so states are plain ordered sets and the
//! tie-break on conflicts (earliest production first) falls out of state iteration order.
//! States are built on demand by closure and goto; no table is precomputed.
use crate::diagnostic::StdoutSink;
use crate::{
    Grammar, IDiagnosticSink, ImplementationError, Item, LR0Parser, Log, State, Symbol, TermEq,
};
use once_cell::unsync::OnceCell;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

impl<TTerm> Item<TTerm> {
    /// An item with the dot at `position` and no lookahead.
    pub fn new(rule: usize, position: usize) -> Self {
        Self {
            rule,
            position,
            lookahead: Vec::new(),
        }
    }

    /// An item carrying a lookahead sequence.
    pub fn with_lookahead(rule: usize, position: usize, lookahead: Vec<TTerm>) -> Self {
        Self {
            rule,
            position,
            lookahead,
        }
    }

    /// Index of the item's production in the grammar's declaration order.
    pub fn rule(&self) -> usize {
        self.rule
    }

    /// Position of the dot within the right-hand side.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn lookahead(&self) -> &[TTerm] {
        &self.lookahead
    }
}

impl<TTerm: Clone> Item<TTerm> {
    /// The item with the dot moved one symbol to the right.
    pub(crate) fn shifted(&self) -> Self {
        Self {
            rule: self.rule,
            position: self.position + 1,
            lookahead: self.lookahead.clone(),
        }
    }
}

/// Whether the item can shift `symbol`: a nonterminal at the dot matches by value, a terminal
/// at the dot matches under `eq`.
pub(crate) fn can_shift<TNt, TTerm, TAst>(
    g: &Grammar<TNt, TTerm, TAst>,
    item: &Item<TTerm>,
    symbol: &Symbol<TNt, TTerm>,
    eq: &TermEq<TTerm>,
) -> bool
where
    TNt: Copy + Eq + Hash,
{
    match g.rules()[item.rule].rhs.get(item.position) {
        Some(Symbol::NT(nt1)) => matches!(symbol, Symbol::NT(nt2) if nt1 == nt2),
        Some(Symbol::Term(t1)) => matches!(symbol, Symbol::Term(t2) if eq(t1, t2)),
        None => false,
    }
}

/// Whether the state holds a completed item of the start production.
pub(crate) fn is_final<TNt, TTerm, TAst>(g: &Grammar<TNt, TTerm, TAst>, state: &State<TTerm>) -> bool
where
    TNt: Copy + Eq + Hash,
{
    state.iter().any(|item| {
        let rule = &g.rules()[item.rule];
        rule.lhs == *g.start() && item.position == rule.rhs.len()
    })
}

impl<TNt, TTerm, TAst> LR0Parser<TNt, TTerm, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
    TTerm: Clone + Debug + Eq + Ord + 'static,
{
    /// Create an LR(0) parser over a start-separated grammar. Fails when the start symbol has
    /// more than one production (or none).
    pub fn new(grammar: Rc<Grammar<TNt, TTerm, TAst>>) -> Result<Self, ImplementationError> {
        if grammar.rule_indices_with_lhs(grammar.start()).len() != 1 {
            return Err(ImplementationError::new(
                "LR0Parser".to_string(),
                "Grammar is not start-separated. (use Grammar::start_separated)".to_string(),
            ));
        }
        Ok(Self {
            grammar,
            eq: Rc::new(|x: &TTerm, y: &TTerm| x == y),
            sink: Rc::new(StdoutSink),
            debug: OnceCell::new(),
        })
    }

    /// Install a terminal equality policy, e.g.
    /// [token_equality](crate::grammar::token_equality) for token grammars.
    pub fn set_equality(&mut self, eq: TermEq<TTerm>) {
        self.eq = eq;
    }

    /// Install the sink receiving `Grammar is not LR(0)` diagnostics.
    pub fn set_diagnostic_sink(&mut self, sink: Rc<dyn IDiagnosticSink>) {
        self.sink = sink;
    }

    /// Set a log label to debug the parser.
    pub fn set_log(&self, log_label: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log_label)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// The least item set containing `seed` and, for every dot before a nonterminal, all of
    /// that nonterminal's initial items.
    fn compute_closure(&self, seed: State<TTerm>) -> State<TTerm> {
        let mut closure: State<TTerm> = BTreeSet::new();
        let mut new_closure = seed;
        while closure != new_closure {
            closure = new_closure.clone();
            for item in &closure {
                if let Some(Symbol::NT(nt)) =
                    self.grammar.rules()[item.rule].rhs.get(item.position)
                {
                    for rule_index in self.grammar.rule_indices_with_lhs(nt) {
                        new_closure.insert(Item::new(*rule_index, 0));
                    }
                }
            }
        }
        new_closure
    }

    /// The closure of shifting every item of `state` that can accept `symbol`.
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

    /// Whether the grammar derives exactly `inp` from its original (pre-separation) start
    /// symbol.
    pub fn accepts(&self, inp: &[TTerm]) -> bool {
        let mut stack: Vec<State<TTerm>> = vec![self.initial_state()];
        let mut pointer = 0;
        loop {
            let state = match stack.last() {
                Some(state) => state.clone(),
                None => return false,
            };
            // The start item completes after exactly one shift, so acceptance is a two-state
            // stack with exhausted input.
            if is_final(self.grammar.as_ref(), &state) && stack.len() == 2 && pointer == inp.len()
            {
                return true;
            }

            let shiftable: Vec<&Item<TTerm>> = if pointer < inp.len() {
                let symbol = Symbol::Term(inp[pointer].clone());
                state
                    .iter()
                    .filter(|item| can_shift(self.grammar.as_ref(), item, &symbol, &self.eq))
                    .collect()
            } else {
                Vec::new()
            };
            let reducable: Vec<&Item<TTerm>> = state
                .iter()
                .filter(|item| self.grammar.rules()[item.rule].rhs.len() == item.position)
                .collect();
            if reducable.len() + usize::from(!shiftable.is_empty()) > 1 {
                self.sink.report("Grammar is not LR(0)");
            }

            if let Some(item) = shiftable.first() {
                #[cfg(debug_assertions)]
                self.log_step("Shift", item);
                let symbol = self.grammar.rules()[item.rule].rhs[item.position].clone();
                let next = self.goto(&state, &symbol);
                stack.push(next);
                pointer += 1;
            } else if let Some(item) = reducable.first() {
                #[cfg(debug_assertions)]
                self.log_step("Reduce", item);
                let lhs = self.grammar.rules()[item.rule].lhs;
                stack.truncate(stack.len() - item.position);
                let top = match stack.last() {
                    Some(state) => state.clone(),
                    None => return false,
                };
                stack.push(self.goto(&top, &Symbol::NT(lhs)));
            } else {
                return false;
            }
        }
    }

    #[cfg(debug_assertions)]
    fn log_step(&self, step: &str, item: &Item<TTerm>) {
        if let Some(debug) = self.debug.get() {
            if debug.order() >= Log::Verbose(()).order() {
                println!(
                    "[{}; {}]: {} @ {}",
                    debug,
                    step,
                    self.grammar.rules()[item.rule],
                    item.position
                );
            }
        }
    }
}

impl<TNt, TAst> LR0Parser<TNt, char, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
{
    /// [accepts](LR0Parser::accepts) over the characters of a string.
    pub fn accepts_str(&self, inp: &str) -> bool {
        let terms: Vec<char> = inp.chars().collect();
        self.accepts(&terms)
    }
}
