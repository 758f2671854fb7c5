//! Smart constructors and derivative operations for [Regexp].
//!
//! The constructors keep regular expressions in normal form so that repeated derivation stays
//! cheap: dead branches collapse to [Null](Regexp::Null) immediately instead of accumulating.
//!
//! # Example
//!
//! ```
//! use synkit::regexp::{char_range, concat, repeat};
//!
//! let letter = char_range('a', 'z');
//! let word = concat(letter.clone(), repeat(letter));
//! assert!(word.matches("hello"));
//! assert!(!word.matches("hello7"));
//! assert!(!word.matches(""));
//! ```
use crate::Regexp;
use ptree::TreeItem;
use std::borrow::Cow;
use std::io::Write;
use std::rc::Rc;

/// Concatenation `r1 . r2` in normal form: `Null` absorbs, `Epsilon` is dropped, and chains
/// nest to the right.
pub fn concat(r1: Regexp, r2: Regexp) -> Regexp {
    match (r1, r2) {
        (Regexp::Null, _) | (_, Regexp::Null) => Regexp::Null,
        (Regexp::Epsilon, r2) => r2,
        (r1, Regexp::Epsilon) => r1,
        (Regexp::Concat(r11, r12), r2) => {
            Regexp::Concat(r11, Rc::new(concat((*r12).clone(), r2)))
        }
        (r1, r2) => Regexp::Concat(Rc::new(r1), Rc::new(r2)),
    }
}

/// Alternation `r1 | r2` in normal form: `Null` is dropped and chains nest to the right.
pub fn alternative(r1: Regexp, r2: Regexp) -> Regexp {
    match (r1, r2) {
        (Regexp::Null, r2) => r2,
        (r1, Regexp::Null) => r1,
        (Regexp::Alternative(r11, r12), r2) => {
            Regexp::Alternative(r11, Rc::new(alternative((*r12).clone(), r2)))
        }
        (r1, r2) => Regexp::Alternative(Rc::new(r1), Rc::new(r2)),
    }
}

/// Kleene star `r*` in normal form: repetitions of `Null` or `Epsilon` are `Epsilon`, and
/// nested repetitions collapse.
pub fn repeat(r: Regexp) -> Regexp {
    match r {
        Regexp::Null | Regexp::Epsilon => Regexp::Epsilon,
        Regexp::Repeat(_) => r,
        r => Regexp::Repeat(Rc::new(r)),
    }
}

/// `r?`
pub fn optional(r: Regexp) -> Regexp {
    alternative(r, Regexp::Epsilon)
}

/// `r+`
pub fn repeat_one(r: Regexp) -> Regexp {
    concat(r.clone(), repeat(r))
}

/// Concatenation of a sequence of expressions; the empty sequence yields `Epsilon`.
pub fn concat_list<I: IntoIterator<Item = Regexp>>(rs: I) -> Regexp {
    rs.into_iter().fold(Regexp::Epsilon, concat)
}

/// Alternation of a sequence of expressions; the empty sequence yields `Null`.
pub fn alternative_list<I: IntoIterator<Item = Regexp>>(rs: I) -> Regexp {
    rs.into_iter().fold(Regexp::Null, alternative)
}

/// Any symbol in the inclusive range `c1..=c2`.
pub fn char_range(c1: char, c2: char) -> Regexp {
    alternative_list((c1..=c2).map(Regexp::Symbol))
}

/// The literal word `s`.
pub fn string_regexp(s: &str) -> Regexp {
    concat_list(s.chars().map(Regexp::Symbol))
}

/// Any symbol of `s`.
pub fn class_regexp(s: &str) -> Regexp {
    alternative_list(s.chars().map(Regexp::Symbol))
}

impl Regexp {
    /// Whether self is the exact `Null` node. After smart construction this detects a dead
    /// derivative state.
    pub fn is_null(&self) -> bool {
        matches!(self, Regexp::Null)
    }

    /// Whether the language of self contains the empty word.
    pub fn accepts_empty(&self) -> bool {
        match self {
            Regexp::Null => false,
            Regexp::Epsilon => true,
            Regexp::Symbol(_) => false,
            Regexp::Concat(r1, r2) => r1.accepts_empty() && r2.accepts_empty(),
            Regexp::Alternative(r1, r2) => r1.accepts_empty() || r2.accepts_empty(),
            Regexp::Repeat(_) => true,
        }
    }

    /// The Brzozowski derivative: the expression left after self consumes the symbol `sym`.
    pub fn after_symbol(&self, sym: char) -> Regexp {
        match self {
            Regexp::Null | Regexp::Epsilon => Regexp::Null,
            Regexp::Symbol(expected) => {
                if *expected == sym {
                    Regexp::Epsilon
                } else {
                    Regexp::Null
                }
            }
            Regexp::Alternative(r1, r2) => {
                alternative(r1.after_symbol(sym), r2.after_symbol(sym))
            }
            Regexp::Concat(r1, r2) => alternative(
                concat(r1.after_symbol(sym), (**r2).clone()),
                if r1.accepts_empty() {
                    r2.after_symbol(sym)
                } else {
                    Regexp::Null
                },
            ),
            Regexp::Repeat(r1) => concat(r1.after_symbol(sym), Regexp::Repeat(r1.clone())),
        }
    }

    /// Whether self matches the whole input: fold [after_symbol](Regexp::after_symbol) over the
    /// characters, short-circuiting on a dead state, and finish with
    /// [accepts_empty](Regexp::accepts_empty).
    pub fn matches(&self, input: &str) -> bool {
        let mut current = self.clone();
        for c in input.chars() {
            current = current.after_symbol(c);
            if current.is_null() {
                return false;
            }
        }
        current.accepts_empty()
    }
}

impl TreeItem for Regexp {
    type Child = Self;

    fn write_self<W: Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            Regexp::Null => write!(f, "Null"),
            Regexp::Epsilon => write!(f, "Epsilon"),
            Regexp::Symbol(c) => write!(f, "Symbol {:?}", c),
            Regexp::Concat(_, _) => write!(f, "Concat"),
            Regexp::Alternative(_, _) => write!(f, "Alternative"),
            Regexp::Repeat(_) => write!(f, "Repeat"),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            Regexp::Concat(r1, r2) | Regexp::Alternative(r1, r2) => {
                Cow::from(vec![(**r1).clone(), (**r2).clone()])
            }
            Regexp::Repeat(r1) => Cow::from(vec![(**r1).clone()]),
            _ => Cow::from(Vec::new()),
        }
    }
}

impl Regexp {
    /// Print the expression tree for debugging.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}
