use crate::examples::javascript::{javascript_scanner, JsToken};

#[test]
fn skips_leading_whitespace() {
    let scan = javascript_scanner();
    assert_eq!(
        scan.scan_one_token("   42...", 0).unwrap(),
        (JsToken::Intlit(42), 5)
    );
}

#[test]
fn tokenizes_a_return_expression() {
    let scan = javascript_scanner();
    assert_eq!(
        scan.tokenize("return Segment (pi / 2)").unwrap(),
        vec![
            JsToken::Return,
            JsToken::Ident("Segment".to_string()),
            JsToken::Lparen,
            JsToken::Ident("pi".to_string()),
            JsToken::BinaryOp("/".to_string()),
            JsToken::Intlit(2),
            JsToken::Rparen,
        ]
    );
}

#[test]
fn integer_literals() {
    let scan = javascript_scanner();
    assert_eq!(scan.tokenize("0x2A").unwrap(), vec![JsToken::Intlit(42)]);
    assert_eq!(scan.tokenize("-7").unwrap(), vec![JsToken::Intlit(-7)]);
}

#[test]
fn unescapes_string_literals_with_a_nested_scanner() {
    let scan = javascript_scanner();
    assert_eq!(
        scan.tokenize(r#"return "foobar\"...""#).unwrap(),
        vec![
            JsToken::Return,
            JsToken::Strlit("foobar\"...".to_string()),
        ]
    );
    assert_eq!(
        scan.tokenize(r#""a\\b""#).unwrap(),
        vec![JsToken::Strlit("a\\b".to_string())]
    );
}
