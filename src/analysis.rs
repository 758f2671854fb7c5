//! Grammar analyses computed by monotone fixed-point iteration.
//!
//! All set analyses share one machine: an environment mapping nonterminals to semilattice
//! elements is updated rule by rule, in declaration order, until it stops changing. Each round
//! works on a copy of the environment so that the equality check compares the previous and the
//! next map unambiguously. [FirstKAnalysis] and [FollowKAnalysis] are the two instances of
//! [IGrammarAnalysis]; the `first_1` functions at the bottom are the classic shortcut
//! (a nullable bit map plus symbolic first sets), subsumed by `first_k` at `k = 1`.
use crate::{
    FirstKAnalysis, FollowKAnalysis, Grammar, IGrammarAnalysis, Lookaheads, Symbol,
};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Pointwise equality of two environments under an element equality.
pub fn map_eq<Key, Value, FEq>(
    old: &HashMap<Key, Value>,
    current: &HashMap<Key, Value>,
    eq: FEq,
) -> bool
where
    Key: Eq + Hash,
    FEq: Fn(&Value, &Value) -> bool,
{
    old.iter()
        .all(|(key, value)| current.get(key).map_or(false, |c| eq(value, c)))
}

/// Iterate `update` from `initial` until two successive values are equal, and return the fixed
/// point.
pub fn fixed_point<T, FUpdate, FEq>(initial: T, update: FUpdate, eq: FEq) -> T
where
    FUpdate: Fn(&T) -> T,
    FEq: Fn(&T, &T) -> bool,
{
    let mut current = initial;
    loop {
        let next = update(&current);
        if eq(&current, &next) {
            break next;
        }
        current = next;
    }
}

impl FirstKAnalysis {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Pairwise concatenation of two lookahead sets, truncated to `k`.
    pub fn concat_k<TTerm: Clone + Ord>(
        &self,
        x: &Lookaheads<TTerm>,
        y: &Lookaheads<TTerm>,
    ) -> Lookaheads<TTerm> {
        x.iter()
            .flat_map(|sx| {
                y.iter().map(move |sy| {
                    let mut sequence = sx.clone();
                    sequence.extend(sy.iter().cloned());
                    sequence.truncate(self.k);
                    sequence
                })
            })
            .collect()
    }
}

impl<TNt, TTerm> IGrammarAnalysis<TNt, TTerm> for FirstKAnalysis
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Ord,
{
    type Element = Lookaheads<TTerm>;

    fn bottom(&self) -> Self::Element {
        BTreeSet::new()
    }

    fn empty(&self) -> Self::Element {
        BTreeSet::from([Vec::new()])
    }

    fn singleton(&self, term: &TTerm) -> Self::Element {
        BTreeSet::from([vec![term.clone()]])
    }

    fn join(&self, x: Self::Element, y: Self::Element) -> Self::Element {
        let mut joined = x;
        joined.extend(y);
        joined
    }

    fn concat(&self, x: &Self::Element, y: &Self::Element) -> Self::Element {
        self.concat_k(x, y)
    }

    fn equal(&self, x: &Self::Element, y: &Self::Element) -> bool {
        x == y
    }

    fn initial_analysis<TAst>(
        &self,
        g: &Grammar<TNt, TTerm, TAst>,
    ) -> HashMap<TNt, Self::Element> {
        g.nonterminals()
            .iter()
            .map(|nt| (*nt, <Self as IGrammarAnalysis<TNt, TTerm>>::bottom(self)))
            .collect()
    }

    fn update_analysis<TAst>(
        &self,
        g: &Grammar<TNt, TTerm, TAst>,
        env: &HashMap<TNt, Self::Element>,
    ) -> HashMap<TNt, Self::Element> {
        let mut next = env.clone();
        for rule in g.rules() {
            let value = self.rhs_analysis(&next, &rule.rhs);
            let joined = <Self as IGrammarAnalysis<TNt, TTerm>>::join(self, value, next[&rule.lhs].clone());
            next.insert(rule.lhs, joined);
        }
        next
    }
}

impl<TNt, TTerm> FollowKAnalysis<TNt, TTerm> {
    /// Create a `follow_k` analysis over a precomputed `first_k` environment.
    pub fn new(k: usize, first_env: HashMap<TNt, Lookaheads<TTerm>>) -> Self {
        Self {
            first_k: FirstKAnalysis::new(k),
            first_env,
        }
    }
}

impl<TNt, TTerm> IGrammarAnalysis<TNt, TTerm> for FollowKAnalysis<TNt, TTerm>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Ord,
{
    type Element = Lookaheads<TTerm>;

    fn bottom(&self) -> Self::Element {
        BTreeSet::new()
    }

    fn empty(&self) -> Self::Element {
        BTreeSet::from([Vec::new()])
    }

    fn singleton(&self, term: &TTerm) -> Self::Element {
        BTreeSet::from([vec![term.clone()]])
    }

    fn join(&self, x: Self::Element, y: Self::Element) -> Self::Element {
        let mut joined = x;
        joined.extend(y);
        joined
    }

    fn concat(&self, x: &Self::Element, y: &Self::Element) -> Self::Element {
        self.first_k.concat_k(x, y)
    }

    fn equal(&self, x: &Self::Element, y: &Self::Element) -> bool {
        x == y
    }

    fn initial_analysis<TAst>(
        &self,
        g: &Grammar<TNt, TTerm, TAst>,
    ) -> HashMap<TNt, Self::Element> {
        let mut env: HashMap<TNt, Self::Element> = self.first_k.initial_analysis(g);
        env.insert(*g.start(), self.empty());
        env
    }

    fn update_analysis<TAst>(
        &self,
        g: &Grammar<TNt, TTerm, TAst>,
        env: &HashMap<TNt, Self::Element>,
    ) -> HashMap<TNt, Self::Element> {
        let mut next = env.clone();
        for rule in g.rules() {
            for (position, sym) in rule.rhs.iter().enumerate() {
                if let Symbol::NT(nt) = sym {
                    let rest = self
                        .first_k
                        .rhs_analysis(&self.first_env, &rule.rhs[position + 1..]);
                    let tail = self.concat(&rest, &next[&rule.lhs]);
                    let joined = self.join(next[nt].clone(), tail);
                    next.insert(*nt, joined);
                }
            }
        }
        next
    }
}

/// Compute the `first_k` environment of a grammar.
pub fn first_k<TNt, TTerm, TAst>(
    g: &Grammar<TNt, TTerm, TAst>,
    k: usize,
) -> HashMap<TNt, Lookaheads<TTerm>>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Ord,
{
    FirstKAnalysis::new(k).run(g)
}

/// Compute the `follow_k` environment of a grammar from a precomputed `first_k` environment.
pub fn follow_k<TNt, TTerm, TAst>(
    g: &Grammar<TNt, TTerm, TAst>,
    k: usize,
    first_env: HashMap<TNt, Lookaheads<TTerm>>,
) -> HashMap<TNt, Lookaheads<TTerm>>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Ord,
{
    FollowKAnalysis::new(k, first_env).run(g)
}

/// Environment of the nullability analysis: which nonterminals derive the empty word.
pub type EmptyEnv<TNt> = HashMap<TNt, bool>;

/// Environment of the symbolic `first_1` analysis; `None` stands for the empty word.
pub type FirstEnv<TNt, TTerm> = HashMap<TNt, BTreeSet<Option<TTerm>>>;

/// Whether the symbol sequence `alpha` derives the empty word under the nullability
/// environment.
pub fn derives_empty<TNt, TTerm>(env: &EmptyEnv<TNt>, alpha: &[Symbol<TNt, TTerm>]) -> bool
where
    TNt: Copy + Eq + Hash,
{
    match alpha.split_first() {
        None => true,
        Some((Symbol::NT(nt), rest)) => env[nt] && derives_empty(env, rest),
        Some((Symbol::Term(_), _)) => false,
    }
}

/// Compute the nullability environment of a grammar.
pub fn calculate_empty<TNt, TTerm, TAst>(g: &Grammar<TNt, TTerm, TAst>) -> EmptyEnv<TNt>
where
    TNt: Copy + Debug + Eq + Hash,
    TTerm: Clone + Debug + Eq,
{
    let initial: EmptyEnv<TNt> = g.nonterminals().iter().map(|nt| (*nt, false)).collect();
    fixed_point(
        initial,
        |env| {
            let mut next = env.clone();
            for nt in g.nonterminals() {
                let mut nullable = next[nt];
                for rule in g.productions_with_lhs(nt) {
                    nullable = nullable || derives_empty(&next, &rule.rhs);
                }
                next.insert(*nt, nullable);
            }
            next
        },
        |old, next| map_eq(old, next, |x, y| x == y),
    )
}

/// The symbolic first set of the symbol sequence `alpha`.
pub fn first_1<TNt, TTerm>(
    es: &EmptyEnv<TNt>,
    fs: &FirstEnv<TNt, TTerm>,
    alpha: &[Symbol<TNt, TTerm>],
) -> BTreeSet<Option<TTerm>>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone + Ord,
{
    match alpha.split_first() {
        Some((Symbol::NT(nt), rest)) if es[nt] => {
            let mut set = fs[nt].clone();
            set.extend(first_1(es, fs, rest));
            set
        }
        Some((Symbol::NT(nt), _)) => fs[nt].clone(),
        Some((Symbol::Term(term), _)) => BTreeSet::from([Some(term.clone())]),
        None => BTreeSet::from([None]),
    }
}

/// Compute the symbolic `first_1` environment of a grammar from its nullability environment.
pub fn calculate_first<TNt, TTerm, TAst>(
    g: &Grammar<TNt, TTerm, TAst>,
    es: &EmptyEnv<TNt>,
) -> FirstEnv<TNt, TTerm>
where
    TNt: Copy + Debug + Eq + Hash,
    TTerm: Clone + Debug + Eq + Ord,
{
    let initial: FirstEnv<TNt, TTerm> = g
        .nonterminals()
        .iter()
        .map(|nt| (*nt, BTreeSet::new()))
        .collect();
    fixed_point(
        initial,
        |env| {
            let mut next = env.clone();
            for nt in g.nonterminals() {
                let mut set = next[nt].clone();
                for rule in g.productions_with_lhs(nt) {
                    set.extend(first_1(es, &next, &rule.rhs));
                }
                next.insert(*nt, set);
            }
            next
        },
        |old, next| map_eq(old, next, |x, y| x == y),
    )
}
