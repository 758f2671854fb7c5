//! The context-free grammar model: [Symbol], [Production], [Grammar], start separation and the
//! terminal equality policies shared by the parsers.
use crate::{Grammar, ImplementationError, Production, SemanticAction, Symbol};
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter, Write};
use std::hash::Hash;
use std::mem::discriminant;

/// Value equality over terminals; the default policy for character grammars.
pub fn equality<TTerm: PartialEq>(x: &TTerm, y: &TTerm) -> bool {
    x == y
}

/// Variant equality over terminals: two tokens are equal when they are the same variant,
/// regardless of attached data. The conventional policy for token grammars, whose terminal
/// declarations are representative values such as `Number(0)`.
pub fn token_equality<TTerm>(x: &TTerm, y: &TTerm) -> bool {
    discriminant(x) == discriminant(y)
}

impl<TNt, TTerm, TAst> Production<TNt, TTerm, TAst> {
    /// Create a production `lhs -> rhs` without a semantic action.
    pub fn new(lhs: TNt, rhs: Vec<Symbol<TNt, TTerm>>) -> Self {
        Self {
            lhs,
            rhs,
            action: None,
        }
    }

    /// Attach the semantic action run when this production is reduced. The action receives one
    /// value per right-hand side symbol, in source order.
    pub fn with_action(mut self, action: SemanticAction<TAst>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn arity(&self) -> usize {
        self.rhs.len()
    }

    pub(crate) fn action(&self) -> Option<&SemanticAction<TAst>> {
        self.action.as_ref()
    }
}

impl<TNt: Clone, TTerm: Clone, TAst> Clone for Production<TNt, TTerm, TAst> {
    fn clone(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            action: self.action.clone(),
        }
    }
}

impl<TNt: Debug, TTerm: Debug, TAst> Debug for Production<TNt, TTerm, TAst> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Production")
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .finish()
    }
}

impl<TNt: Debug, TTerm: Debug, TAst> Display for Production<TNt, TTerm, TAst> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ->", self.lhs)?;
        for sym in &self.rhs {
            match sym {
                Symbol::NT(nt) => write!(f, " {:?}", nt)?,
                Symbol::Term(term) => write!(f, " '{:?}'", term)?,
            }
        }
        Ok(())
    }
}

impl<TNt, TTerm, TAst> Grammar<TNt, TTerm, TAst>
where
    TNt: Copy + Eq + Hash,
{
    pub fn start(&self) -> &TNt {
        &self.start
    }

    pub fn nonterminals(&self) -> &[TNt] {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &[TTerm] {
        &self.terminals
    }

    pub fn rules(&self) -> &[Production<TNt, TTerm, TAst>] {
        &self.rules
    }

    fn obtain_lhs_index(&self) -> &HashMap<TNt, Vec<usize>> {
        self.lhs_index.get_or_init(|| {
            let mut index: HashMap<TNt, Vec<usize>> = HashMap::new();
            for (rule_index, rule) in self.rules.iter().enumerate() {
                index.entry(rule.lhs).or_default().push(rule_index);
            }
            index
        })
    }

    /// Indices of the productions with left-hand side `nt`, in declaration order.
    pub fn rule_indices_with_lhs(&self, nt: &TNt) -> &[usize] {
        self.obtain_lhs_index()
            .get(nt)
            .map_or(&[], |indices| indices.as_slice())
    }

    /// The productions with left-hand side `nt`, in declaration order.
    pub fn productions_with_lhs(
        &self,
        nt: &TNt,
    ) -> impl Iterator<Item = &Production<TNt, TTerm, TAst>> {
        self.rule_indices_with_lhs(nt)
            .iter()
            .map(move |rule_index| &self.rules[*rule_index])
    }
}

impl<TNt, TTerm, TAst> Grammar<TNt, TTerm, TAst>
where
    TNt: Copy + Eq + Hash,
    TTerm: Clone,
{
    /// Extend the grammar with a fresh start symbol `new_start` and the single production
    /// `new_start -> start`. LR parsers require a grammar of this shape so that acceptance is a
    /// unique, recognisable item.
    pub fn start_separated(&self, new_start: TNt) -> Self {
        let mut nonterminals = self.nonterminals.clone();
        nonterminals.push(new_start);
        let mut rules = self.rules.clone();
        rules.push(Production::new(new_start, vec![Symbol::NT(self.start)]));
        Self {
            nonterminals,
            terminals: self.terminals.clone(),
            rules,
            start: new_start,
            lhs_index: OnceCell::new(),
        }
    }
}

impl<TNt, TTerm, TAst> Grammar<TNt, TTerm, TAst>
where
    TNt: Copy + Debug + Eq + Hash,
    TTerm: Clone + Debug + Eq,
{
    /// Create a grammar and validate its invariants: the start symbol and every production
    /// left-hand side must be declared nonterminals, and every right-hand side symbol must be a
    /// declared terminal or nonterminal.
    pub fn new(
        nonterminals: Vec<TNt>,
        terminals: Vec<TTerm>,
        rules: Vec<Production<TNt, TTerm, TAst>>,
        start: TNt,
    ) -> Result<Self, ImplementationError> {
        if !nonterminals.contains(&start) {
            return Err(ImplementationError::new(
                "Grammar".to_string(),
                format!("Start symbol {:?} is not a declared nonterminal.", start),
            ));
        }
        for rule in &rules {
            if !nonterminals.contains(&rule.lhs) {
                return Err(ImplementationError::new(
                    "Grammar".to_string(),
                    format!(
                        "Production left-hand side {:?} is not a declared nonterminal.",
                        rule.lhs
                    ),
                ));
            }
            for sym in &rule.rhs {
                let declared = match sym {
                    Symbol::NT(nt) => nonterminals.contains(nt),
                    Symbol::Term(term) => terminals.contains(term),
                };
                if !declared {
                    return Err(ImplementationError::new(
                        "Grammar".to_string(),
                        format!("Symbol {:?} in production '{}' is not declared.", sym, rule),
                    ));
                }
            }
        }
        Ok(Self {
            nonterminals,
            terminals,
            rules,
            start,
            lhs_index: OnceCell::new(),
        })
    }

    /// Write the productions as text, one rule per line.
    pub fn build_grammar(&self) -> Result<String, std::fmt::Error> {
        let mut writer = String::new();
        for rule in &self.rules {
            writeln!(writer, "{}", rule)?;
        }
        Ok(writer)
    }
}

impl<TNt: Clone, TTerm: Clone, TAst> Clone for Grammar<TNt, TTerm, TAst> {
    fn clone(&self) -> Self {
        Self {
            nonterminals: self.nonterminals.clone(),
            terminals: self.terminals.clone(),
            rules: self.rules.clone(),
            start: self.start.clone(),
            lhs_index: OnceCell::new(),
        }
    }
}

impl<TNt: Debug, TTerm: Debug, TAst> Debug for Grammar<TNt, TTerm, TAst> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("nonterminals", &self.nonterminals)
            .field("terminals", &self.terminals)
            .field("rules", &self.rules)
            .field("start", &self.start)
            .finish()
    }
}
