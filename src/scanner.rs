//! The maximum munch scanner.
//!
//! A [Scan] classifies the next lexeme among several regular expressions at once. It keeps a
//! parallel state, the list of rules whose expression is still alive, and derives every live
//! expression for each consumed character. The last position at which some rule accepted is
//! remembered together with that rule's action; among rules accepting at the same position the
//! earliest rule of the specification wins. When the parallel state dies or the input ends, the
//! remembered action is invoked on the lexeme.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use synkit::regexp::{char_range, repeat_one, string_regexp};
//! use synkit::{LexRule, Scan};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Token {
//!     If,
//!     Ident(String),
//! }
//!
//! let letter = char_range('a', 'z');
//! let scan = Scan::new(vec![
//!     LexRule::new(string_regexp("if"), Rc::new(|_, _, _, j| Ok((Token::If, j)))),
//!     LexRule::new(
//!         repeat_one(letter),
//!         Rc::new(|_, ss: &str, i, j| Ok((Token::Ident(ss[i..j].to_string()), j))),
//!     ),
//! ]);
//!
//! // `if` is a keyword, but maximum munch keeps `ifoundsalvation` a single identifier.
//! assert_eq!(scan.tokenize("if").unwrap(), vec![Token::If]);
//! assert_eq!(
//!     scan.tokenize("ifoundsalvation").unwrap(),
//!     vec![Token::Ident("ifoundsalvation".to_string())]
//! );
//! ```
use crate::{LexAction, LexResult, LexRule, Log, Regexp, Scan, ScanError};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

impl<TToken> LexRule<TToken> {
    /// Create a rule from a regular expression and the action run on its lexemes.
    pub fn new(re: Regexp, action: LexAction<TToken>) -> Self {
        Self { re, action }
    }

    fn derived(&self, sym: char) -> Self {
        Self {
            re: self.re.after_symbol(sym),
            action: self.action.clone(),
        }
    }
}

impl<TToken> Clone for LexRule<TToken> {
    fn clone(&self) -> Self {
        Self {
            re: self.re.clone(),
            action: self.action.clone(),
        }
    }
}

impl ScanError {
    pub fn new(pointer: usize, message: String) -> Self {
        Self { pointer, message }
    }

    fn no_lexeme(ss: &str, pointer: usize) -> Self {
        Self::new(
            pointer,
            format!("no lexeme found: '{}'", &ss[pointer..]),
        )
    }
}

impl<TToken: Debug> Scan<TToken> {
    /// Create a scanner from an ordered rule specification.
    pub fn new(spec: Vec<LexRule<TToken>>) -> Self {
        Self {
            spec,
            debug: OnceCell::new(),
        }
    }

    /// Set a log label to debug the scanner.
    pub fn set_log(&self, log_label: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log_label)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// Scan a single token starting at byte position `index`.
    ///
    /// Returns the token produced by the winning rule's action together with the position where
    /// scanning resumes, or a [ScanError] holding the unconsumed suffix when no rule ever
    /// matched.
    pub fn scan_one_token(&self, ss: &str, index: usize) -> Result<LexResult<TToken>, ScanError> {
        let mut state: Vec<LexRule<TToken>> = self.spec.clone();
        let mut last_match: Option<(LexAction<TToken>, usize)> = None;

        for (offset, sym) in ss[index..].char_indices() {
            state = state
                .iter()
                .map(|rule| rule.derived(sym))
                .filter(|rule| !rule.re.is_null())
                .collect();
            let final_position = index + offset + sym.len_utf8();
            if let Some(rule) = state.iter().find(|rule| rule.re.accepts_empty()) {
                last_match = Some((rule.action.clone(), final_position));
            }
            if state.is_empty() {
                break;
            }
        }

        match last_match {
            Some((action, final_position)) => {
                let result = action(self, ss, index, final_position);
                #[cfg(debug_assertions)]
                if let Some(debug) = self.debug.get() {
                    match &result {
                        Ok((token, next)) => {
                            if debug.order() >= Log::Success(()).order() {
                                println!(
                                    "[{}; LexemeSuccess]: token {:?} at {}..{}",
                                    debug, token, index, next
                                );
                            }
                        }
                        Err(err) => {
                            if debug.order() >= Log::Default(()).order() {
                                println!("[{}; LexemeError]: at {}", debug, err.pointer);
                            }
                        }
                    }
                }
                result
            }
            None => {
                #[cfg(debug_assertions)]
                if let Some(debug) = self.debug.get() {
                    if debug.order() >= Log::Default(()).order() {
                        println!("[{}; LexemeError]: no lexeme at {}", debug, index);
                    }
                }
                Err(ScanError::no_lexeme(ss, index))
            }
        }
    }

    /// Iterate the tokens of `ss`, resuming after each action's returned position.
    ///
    /// The iterator yields `Err` once on a failed scan and is fused afterwards.
    pub fn iter_tokens<'scan, 'ss>(&'scan self, ss: &'ss str) -> TokenIter<'scan, 'ss, TToken> {
        TokenIter {
            scan: self,
            ss,
            pointer: 0,
            failed: false,
        }
    }

    /// Collect the tokens of `ss`.
    pub fn tokenize(&self, ss: &str) -> Result<Vec<TToken>, ScanError> {
        self.iter_tokens(ss).collect()
    }
}

/// An iterator over the tokens of an input, produced by [Scan::iter_tokens].
pub struct TokenIter<'scan, 'ss, TToken> {
    scan: &'scan Scan<TToken>,
    ss: &'ss str,
    pointer: usize,
    failed: bool,
}

impl<'scan, 'ss, TToken: Debug> Iterator for TokenIter<'scan, 'ss, TToken> {
    type Item = Result<TToken, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pointer >= self.ss.len() {
            return None;
        }
        match self.scan.scan_one_token(self.ss, self.pointer) {
            Ok((token, next_position)) => {
                self.pointer = next_position;
                Some(Ok(token))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
