//! A JavaScript flavoured scanner.
//!
//! Covers keywords, identifiers, decimal and hex integer literals, operators, parentheses,
//! whitespace, and double-quoted string literals. String contents are unescaped by a nested
//! scanner run over the matched slice, so the emitted token already carries the literal value.
use crate::regexp::{
    alternative, alternative_list, char_range, class_regexp, concat, concat_list, optional,
    repeat, repeat_one, string_regexp,
};
use crate::{LexAction, LexRule, Regexp, Scan};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsToken {
    Return,
    Intlit(i64),
    Ident(String),
    Lparen,
    Rparen,
    BinaryOp(String),
    Strlit(String),
}

fn parse_int_literal(lexeme: &str) -> i64 {
    let (negative, digits) = match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).unwrap_or_default(),
        None => digits.parse().unwrap_or_default(),
    };
    if negative {
        -value
    } else {
        value
    }
}

/// The JavaScript scanner.
pub fn javascript_scanner() -> Scan<JsToken> {
    // minus is excluded to avoid ambiguities with the literal sign
    let binop = class_regexp("+*/");
    let digit = char_range('0', '9');
    let hexdigit = alternative_list([
        digit.clone(),
        char_range('A', 'F'),
        char_range('a', 'f'),
    ]);
    let hexprefix = alternative(string_regexp("0x"), string_regexp("0X"));
    let sign = optional(Regexp::Symbol('-'));
    let integer_literal = alternative(
        concat(sign.clone(), repeat_one(digit.clone())),
        concat_list([sign, hexprefix, repeat_one(hexdigit)]),
    );
    let letter = alternative(char_range('A', 'Z'), char_range('a', 'z'));
    let identifier_start = alternative_list([letter, Regexp::Symbol('$'), Regexp::Symbol('_')]);
    let identifier_part = alternative(identifier_start.clone(), digit);
    let identifier = concat(identifier_start, repeat(identifier_part));
    let white_space = repeat_one(class_regexp(" \t\n\r"));

    let escaped_char = concat(
        Regexp::Symbol('\\'),
        alternative(Regexp::Symbol('\\'), Regexp::Symbol('"')),
    );
    let content_char = alternative_list(
        (' '..='\u{7f}')
            .filter(|c| *c != '\\' && *c != '"')
            .map(Regexp::Symbol),
    );
    let string_literal = concat_list([
        Regexp::Symbol('"'),
        repeat(alternative(escaped_char.clone(), content_char.clone())),
        Regexp::Symbol('"'),
    ]);

    // Subsidiary scanner transforming raw string content into its unescaped pieces.
    let string_scan = Rc::new(Scan::new(vec![
        LexRule::new(
            escaped_char,
            Rc::new(|_, ss: &str, i, j| Ok((JsToken::Strlit(ss[i + 1..j].to_string()), j))),
        ),
        LexRule::new(
            content_char,
            Rc::new(|_, ss: &str, i, j| Ok((JsToken::Strlit(ss[i..j].to_string()), j))),
        ),
    ]));
    let string_action: LexAction<JsToken> = {
        let string_scan = string_scan.clone();
        Rc::new(move |_, ss: &str, i, j| {
            let mut value = String::new();
            for piece in string_scan.iter_tokens(&ss[i + 1..j - 1]) {
                if let JsToken::Strlit(part) = piece? {
                    value.push_str(&part);
                }
            }
            Ok((JsToken::Strlit(value), j))
        })
    };

    Scan::new(vec![
        LexRule::new(
            string_regexp("return"),
            Rc::new(|_, _, _, j| Ok((JsToken::Return, j))),
        ),
        LexRule::new(
            integer_literal,
            Rc::new(|_, ss: &str, i, j| Ok((JsToken::Intlit(parse_int_literal(&ss[i..j])), j))),
        ),
        LexRule::new(
            identifier,
            Rc::new(|_, ss: &str, i, j| Ok((JsToken::Ident(ss[i..j].to_string()), j))),
        ),
        LexRule::new(
            white_space,
            Rc::new(|scan: &Scan<JsToken>, ss: &str, _, j| scan.scan_one_token(ss, j)),
        ),
        LexRule::new(
            Regexp::Symbol('('),
            Rc::new(|_, _, _, j| Ok((JsToken::Lparen, j))),
        ),
        LexRule::new(
            Regexp::Symbol(')'),
            Rc::new(|_, _, _, j| Ok((JsToken::Rparen, j))),
        ),
        LexRule::new(
            binop,
            Rc::new(|_, ss: &str, i, j| Ok((JsToken::BinaryOp(ss[i..j].to_string()), j))),
        ),
        LexRule::new(string_literal, string_action),
    ])
}
