use crate::{LexRule, Regexp, Scan};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Identifier(String),
}

#[test]
fn scan_nothing() {
    let scan_nothing: Scan<Token> = Scan::new(vec![]);
    assert_eq!(scan_nothing.tokenize("").unwrap(), Vec::<Token>::new());
    assert!(scan_nothing.scan_one_token("", 0).is_err());
    assert!(scan_nothing.tokenize("a").is_err());
}

#[test]
fn scan_one_rule() {
    let scan_one = Scan::new(vec![LexRule::new(
        Regexp::Symbol('a'),
        Rc::new(|_, ss: &str, i, j| Ok((Token::Identifier(ss[i..j].to_string()), j))),
    )]);
    assert_eq!(scan_one.tokenize("").unwrap(), Vec::<Token>::new());
    assert_eq!(
        scan_one.tokenize("a").unwrap(),
        vec![Token::Identifier("a".to_string())]
    );
    assert_eq!(
        scan_one.tokenize("aa").unwrap(),
        vec![
            Token::Identifier("a".to_string()),
            Token::Identifier("a".to_string())
        ]
    );
    assert!(scan_one.tokenize("b").is_err());
}

#[test]
fn scan_error_holds_suffix() {
    let scan_one = Scan::new(vec![LexRule::new(
        Regexp::Symbol('a'),
        Rc::new(|_, ss: &str, i, j| Ok((Token::Identifier(ss[i..j].to_string()), j))),
    )]);
    let err = match scan_one.tokenize("aab!cd") {
        Err(err) => err,
        Ok(tokens) => panic!("unexpected tokens {:?}", tokens),
    };
    assert_eq!(err.pointer, 2);
    assert!(err.message.contains("b!cd"));
}
