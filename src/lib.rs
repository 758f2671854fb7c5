//! synkit is a construction kit for compiler front ends: a regular expression engine based on
//! Brzozowski derivatives, a maximum munch scanner driving several expressions in parallel,
//! a grammar analysis framework computing `first_k`/`follow_k` sets by fixed-point iteration,
//! and a family of parsers (nondeterministic top-down, predictive LL(k), LR(0) and LR(k)) that
//! share the analysis machinery.
//!
//! # Overview
//!
//! A language front end is usually split into a scanner turning text into tokens and a parser
//! turning tokens into a verdict or a syntax tree. This library keeps both halves programmable
//! from Rust: a lexical specification is a list of [LexRule] values combining a [Regexp] with an
//! action, and a grammar is a plain [Grammar] value listing [Production]s over any nonterminal
//! and terminal types. The scanner needs no generated tables; the derivative of a regular
//! expression is its transition function. The parsers likewise compute their item sets and
//! lookahead tables on demand from the grammar.
//!
//! Semantic values are built bottom-up by the LR(k) parser: each production may carry a
//! [SemanticAction] which receives the values of its right-hand side in source order. The
//! carrier type implements [ConstructImpl] so that shifted terminals and actionless reductions
//! can be injected uniformly.
//!
//! Grammar conflicts (a grammar that is not LL(k) or not LR(k)) are reported through an
//! injectable [IDiagnosticSink] and resolved deterministically: shift is preferred over reduce,
//! and earlier productions over later ones.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use synkit::{ConstructImpl, Grammar, LRParser, Production, SemanticAction, Symbol};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Expr {
//!     Null,
//!     Term(char),
//!     Var(char),
//!     BinOp(Box<Expr>, char, Box<Expr>),
//! }
//!
//! impl ConstructImpl<char> for Expr {
//!     fn null() -> Self {
//!         Expr::Null
//!     }
//!     fn terminal(term: &char) -> Self {
//!         Expr::Term(*term)
//!     }
//! }
//!
//! let bin_op: SemanticAction<Expr> = Rc::new(|mut args: Vec<Expr>| {
//!     let right = args.pop();
//!     let op = args.pop();
//!     let left = args.pop();
//!     match (left, op, right) {
//!         (Some(l), Some(Expr::Term(op)), Some(r)) => Expr::BinOp(Box::new(l), op, Box::new(r)),
//!         _ => Expr::Null,
//!     }
//! });
//! let var: SemanticAction<Expr> = Rc::new(|mut args: Vec<Expr>| match args.pop() {
//!     Some(Expr::Term(c)) => Expr::Var(c),
//!     _ => Expr::Null,
//! });
//! let keep: SemanticAction<Expr> = Rc::new(|mut args: Vec<Expr>| args.pop().unwrap_or(Expr::Null));
//!
//! let grammar = Grammar::new(
//!     vec!["E", "F"],
//!     vec!['x', 'y', '+'],
//!     vec![
//!         Production::new("E", vec![Symbol::NT("F")]).with_action(keep),
//!         Production::new("E", vec![Symbol::NT("E"), Symbol::Term('+'), Symbol::NT("F")])
//!             .with_action(bin_op),
//!         Production::new("F", vec![Symbol::Term('x')]).with_action(var.clone()),
//!         Production::new("F", vec![Symbol::Term('y')]).with_action(var),
//!     ],
//!     "E",
//! )
//! .unwrap()
//! .start_separated("S'");
//!
//! let parser = LRParser::new(Rc::new(grammar), 1).unwrap();
//! let input: Vec<char> = "x+y".chars().collect();
//! let (accepted, root) = parser.parse(&input);
//! assert!(accepted);
//! assert_eq!(
//!     root,
//!     Some(Expr::BinOp(
//!         Box::new(Expr::Var('x')),
//!         '+',
//!         Box::new(Expr::Var('y'))
//!     ))
//! );
//! ```
pub mod analysis;
pub mod diagnostic;
mod error;
pub mod examples;
pub mod grammar;
mod impl_default;
mod ll_parser;
mod logger;
mod lr_0_parser;
mod lr_k_parser;
pub mod regexp;
pub mod scanner;
pub mod td_parser;

#[cfg(test)]
mod __tests__;

use once_cell::unsync::OnceCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Abstract syntax tree of a regular expression.
///
/// Values are kept in a normal form by the smart constructors in [regexp]:
/// [Null](Regexp::Null) absorbs concatenation and is the identity of alternation,
/// [Epsilon](Regexp::Epsilon) is the identity of concatenation, concatenation and alternation
/// nest to the right, and nested repetitions collapse. The normal form keeps derivative chains
/// small for the inputs a scanner sees.
pub enum Regexp {
    /// The empty language `{}`.
    Null,
    /// The empty word `{ "" }`.
    Epsilon,
    /// A single symbol.
    Symbol(char),
    /// Concatenation `r1 . r2`.
    Concat(Rc<Regexp>, Rc<Regexp>),
    /// Alternative `r1 | r2`.
    Alternative(Rc<Regexp>, Rc<Regexp>),
    /// Kleene star `r*`.
    Repeat(Rc<Regexp>),
}

/// A scanned token together with the position where scanning resumes.
pub type LexResult<TToken> = (TToken, usize);

/// An action invoked when a lexer rule wins the maximum munch race.
///
/// The action receives the scanner itself, the source, and the lexeme bounds `(i, j)`; it
/// consumes the lexeme `&source[i..j]` and returns a token with the position where scanning
/// continues. The returned position may lie beyond `j`: a whitespace or comment rule will
/// typically call back into [Scan::scan_one_token] at `j` instead of producing a token of its
/// own, and a rule may run a nested [Scan] over the matched slice.
pub type LexAction<TToken> =
    Rc<dyn Fn(&Scan<TToken>, &str, usize, usize) -> Result<LexResult<TToken>, ScanError>>;

/// A lexer rule pairing a regular expression with the action run on its lexemes.
pub struct LexRule<TToken> {
    re: Regexp,
    action: LexAction<TToken>,
}

/// A maximum munch scanner.
///
/// A [Scan] drives all of its rules in parallel by taking the derivative of every live rule for
/// each consumed character, remembering the last position at which some rule matched. Rule
/// order is significant: among rules matching the same longest lexeme, the earliest rule in the
/// specification wins.
pub struct Scan<TToken> {
    spec: Vec<LexRule<TToken>>,
    debug: OnceCell<Log<&'static str>>,
}

#[derive(Debug, Clone)]
/// An error returned when no rule matched a lexeme at the scan position.
///
/// The message carries the unconsumed suffix of the input.
pub struct ScanError {
    pub pointer: usize,
    pub message: String,
}

#[derive(Debug)]
/// An error returned due to failed validation of a grammar or a parser setup.
pub struct ImplementationError {
    message: String,
    what: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A grammar symbol: either a nonterminal tag or a terminal.
pub enum Symbol<TNt, TTerm> {
    NT(TNt),
    Term(TTerm),
}

/// A semantic constructor attached to a [Production].
///
/// The action receives exactly as many values as the production has right-hand side symbols,
/// in left-to-right source order, and returns the value of the left-hand side.
pub type SemanticAction<TAst> = Rc<dyn Fn(Vec<TAst>) -> TAst>;

/// An equality policy over terminals injected into the parsers.
///
/// Character terminals compare by value; structured tokens conventionally compare by variant
/// only (see [token_equality](grammar::token_equality)).
pub type TermEq<TTerm> = Rc<dyn Fn(&TTerm, &TTerm) -> bool>;

/// A production `lhs -> rhs` with an optional semantic action.
pub struct Production<TNt, TTerm, TAst = ()> {
    pub lhs: TNt,
    pub rhs: Vec<Symbol<TNt, TTerm>>,
    action: Option<SemanticAction<TAst>>,
}

/// A context-free grammar.
///
/// Grammars are immutable once built; [Grammar::new] validates that the start symbol and every
/// production left-hand side are declared nonterminals and that every right-hand side symbol is
/// a declared terminal or nonterminal. Productions keep their declaration order, which decides
/// conflict tie-breaks in the parsers.
pub struct Grammar<TNt, TTerm, TAst = ()> {
    nonterminals: Vec<TNt>,
    terminals: Vec<TTerm>,
    rules: Vec<Production<TNt, TTerm, TAst>>,
    start: TNt,
    lhs_index: OnceCell<HashMap<TNt, Vec<usize>>>,
}

/// A set of terminal sequences of length at most `k`.
///
/// This is the carrier of the lookahead semilattice: bottom is the empty set, the identity of
/// concatenation is `{ε}` (the set holding the empty sequence), join is union, and
/// concatenation is pairwise concatenation truncated to `k`.
pub type Lookaheads<TTerm> = BTreeSet<Vec<TTerm>>;

/// An interface of a monotone grammar analysis over a semilattice.
///
/// An implementation provides the semilattice operations and the per-round update; the
/// framework supplies [rhs_analysis](IGrammarAnalysis::rhs_analysis), which evaluates a symbol
/// sequence by concatenating per-symbol contributions, and [run](IGrammarAnalysis::run), which
/// iterates the update from the initial environment until a fixed point is reached. Termination
/// follows from monotonicity and the finiteness of the carrier.
pub trait IGrammarAnalysis<TNt: Copy + Eq + Hash, TTerm> {
    /// Element of the analysis semilattice.
    type Element: Clone;

    fn bottom(&self) -> Self::Element;
    /// Identity of [concat](IGrammarAnalysis::concat).
    fn empty(&self) -> Self::Element;
    fn singleton(&self, term: &TTerm) -> Self::Element;
    fn join(&self, x: Self::Element, y: Self::Element) -> Self::Element;
    fn concat(&self, x: &Self::Element, y: &Self::Element) -> Self::Element;
    fn equal(&self, x: &Self::Element, y: &Self::Element) -> bool;

    fn initial_analysis<TAst>(&self, g: &Grammar<TNt, TTerm, TAst>)
        -> HashMap<TNt, Self::Element>;
    fn update_analysis<TAst>(
        &self,
        g: &Grammar<TNt, TTerm, TAst>,
        env: &HashMap<TNt, Self::Element>,
    ) -> HashMap<TNt, Self::Element>;

    /// Evaluate a symbol sequence in the environment `env`.
    fn rhs_analysis(
        &self,
        env: &HashMap<TNt, Self::Element>,
        alpha: &[Symbol<TNt, TTerm>],
    ) -> Self::Element {
        let mut value = self.empty();
        for sym in alpha {
            let operand = match sym {
                Symbol::NT(nt) => env[nt].clone(),
                Symbol::Term(term) => self.singleton(term),
            };
            value = self.concat(&value, &operand);
        }
        value
    }

    /// Iterate [update_analysis](IGrammarAnalysis::update_analysis) from
    /// [initial_analysis](IGrammarAnalysis::initial_analysis) until the environment is stable
    /// pointwise.
    fn run<TAst>(&self, g: &Grammar<TNt, TTerm, TAst>) -> HashMap<TNt, Self::Element> {
        let initial = self.initial_analysis(g);
        crate::analysis::fixed_point(
            initial,
            |env| self.update_analysis(g, env),
            |old, next| crate::analysis::map_eq(old, next, |x, y| self.equal(x, y)),
        )
    }
}

/// The `first_k` analysis: for each nonterminal, the set of length-`<= k` terminal prefixes of
/// its derivable words.
pub struct FirstKAnalysis {
    k: usize,
}

/// The `follow_k` analysis: for each nonterminal, the set of length-`<= k` terminal sequences
/// that may immediately follow it in a sentential form. Depends on a precomputed `first_k`
/// environment.
pub struct FollowKAnalysis<TNt, TTerm> {
    first_k: FirstKAnalysis,
    first_env: HashMap<TNt, Lookaheads<TTerm>>,
}

/// A trait implemented by the carrier of the LR(k) construct stack.
///
/// The parser pushes [terminal](ConstructImpl::terminal) values on shift and the
/// [null](ConstructImpl::null) placeholder when a reduced production carries no semantic
/// action. A grammar's actions enforce consistency beyond that.
pub trait ConstructImpl<TTerm>: Debug + Clone {
    /// Placeholder for a reduction without a semantic action.
    fn null() -> Self;
    /// Injection of a shifted terminal.
    fn terminal(term: &TTerm) -> Self;
}

/// A sink receiving grammar conflict diagnostics such as `Grammar is not LR(0)`.
///
/// The channel is advisory: a reported conflict never changes the parse verdict, which is kept
/// deterministic by preferring shift over reduce and earlier productions over later ones.
pub trait IDiagnosticSink {
    fn report(&self, line: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// An LR item: a production (by declaration index), a dot position, and a lookahead of at most
/// `k` terminals. LR(0) items carry an empty lookahead.
pub struct Item<TTerm> {
    rule: usize,
    position: usize,
    lookahead: Vec<TTerm>,
}

/// An LR automaton state: a closed set of items. States are ordered sets so that iteration, and
/// with it conflict tie-breaking, follows production declaration order.
pub type State<TTerm> = BTreeSet<Item<TTerm>>;

/// The nondeterministic top-down reference parser.
///
/// [suffixes](TopDownParser::suffixes) enumerates every way a sentential form can derive a
/// prefix of the input. The parser is an oracle for testing the deterministic parsers, not a
/// production parser; it need not terminate on left-recursive grammars.
pub struct TopDownParser<TNt, TTerm, TAst = ()> {
    grammar: Rc<Grammar<TNt, TTerm, TAst>>,
}

/// A predictive LL(k) parser.
///
/// The lookahead set of a production `A -> alpha` is `first_k(alpha) . follow_k(A)`, computed
/// lazily on first use. Parsing selects the productions whose lookahead set contains a sequence
/// equal to the input prefix under the injected terminal equality; ambiguity is reported and
/// resolved in favour of the earliest production. Only full-string membership is decided.
pub struct LLParser<TNt, TTerm, TAst = ()> {
    grammar: Rc<Grammar<TNt, TTerm, TAst>>,
    k: usize,
    eq: TermEq<TTerm>,
    sink: Rc<dyn IDiagnosticSink>,
    lookaheads: OnceCell<Vec<Lookaheads<TTerm>>>,
    debug: OnceCell<Log<&'static str>>,
}

/// A shift/reduce LR(0) parser over a start-separated grammar.
pub struct LR0Parser<TNt, TTerm, TAst = ()> {
    grammar: Rc<Grammar<TNt, TTerm, TAst>>,
    eq: TermEq<TTerm>,
    sink: Rc<dyn IDiagnosticSink>,
    debug: OnceCell<Log<&'static str>>,
}

/// An LR(k) parser over a start-separated grammar, building semantic values bottom-up.
///
/// Items carry lookahead sequences; a complete item is reducable only when its lookahead equals
/// the next `k` input terminals under the injected equality. The driver threads a list of
/// continuations, one per live ancestor state, narrowed to the active prefix length of the
/// current state; a reduction by `A -> alpha` resumes the continuation `|alpha|` levels up. A
/// parallel construct stack accumulates the semantic values.
pub struct LRParser<TNt, TTerm, TAst = ()> {
    grammar: Rc<Grammar<TNt, TTerm, TAst>>,
    k: usize,
    eq: TermEq<TTerm>,
    sink: Rc<dyn IDiagnosticSink>,
    first_env: OnceCell<HashMap<TNt, Lookaheads<TTerm>>>,
    debug: OnceCell<Log<&'static str>>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A enum structure to assign multiple level debugging to the scanner and parser utilities.
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}
