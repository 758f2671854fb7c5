//! A small statement language over scanned tokens.
//!
//! The module bundles the token type, its maximum munch scanner specification, a token-level
//! arithmetic grammar for the recognising parsers, and the LR(1) statement grammar whose
//! semantic actions build a [StmtAst] module.
use crate::regexp::{
    alternative, alternative_list, char_range, class_regexp, concat, repeat, repeat_one,
    string_regexp,
};
use crate::{
    ConstructImpl, Grammar, LexRule, Production, Regexp, Scan, SemanticAction, Symbol,
};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Token of the statement language. Grammars over these tokens declare representative values
/// such as `Number(0)` and compare terminals by variant
/// ([token_equality](crate::grammar::token_equality)).
pub enum StmtToken {
    Number(i64),
    Identifier(String),
    Operator(String),
    Relation(String),
    Left,
    Right,
    End,
    If,
    Then,
    Else,
    Return,
    Print,
    Assign,
    WhiteSpace,
}

/// The scanner of the statement language.
///
/// Keyword rules precede the identifier rule; maximum munch still keeps `returnSegment` a
/// single identifier. The whitespace rule resumes scanning at its end instead of producing a
/// token, except at the end of input where it falls back to an `End` token.
pub fn statement_scanner() -> Scan<StmtToken> {
    let digit = char_range('0', '9');
    let number = alternative(
        digit.clone(),
        concat(char_range('1', '9'), repeat_one(digit.clone())),
    );
    let alphabet = alternative(char_range('a', 'z'), char_range('A', 'Z'));
    let identifier = concat(
        alphabet.clone(),
        repeat(alternative(alphabet, digit)),
    );
    let operator = class_regexp("+-*/");
    let relation = alternative_list(["<=", ">=", "==", "!="].into_iter().map(string_regexp));
    let white_space = repeat_one(class_regexp(" \t\n"));

    Scan::new(vec![
        LexRule::new(Regexp::Symbol('('), Rc::new(|_, _, _, j| Ok((StmtToken::Left, j)))),
        LexRule::new(Regexp::Symbol(')'), Rc::new(|_, _, _, j| Ok((StmtToken::Right, j)))),
        LexRule::new(Regexp::Symbol(';'), Rc::new(|_, _, _, j| Ok((StmtToken::End, j)))),
        LexRule::new(string_regexp("if"), Rc::new(|_, _, _, j| Ok((StmtToken::If, j)))),
        LexRule::new(string_regexp("then"), Rc::new(|_, _, _, j| Ok((StmtToken::Then, j)))),
        LexRule::new(string_regexp("else"), Rc::new(|_, _, _, j| Ok((StmtToken::Else, j)))),
        LexRule::new(
            string_regexp("return"),
            Rc::new(|_, _, _, j| Ok((StmtToken::Return, j))),
        ),
        LexRule::new(
            string_regexp("print"),
            Rc::new(|_, _, _, j| Ok((StmtToken::Print, j))),
        ),
        LexRule::new(
            string_regexp(":="),
            Rc::new(|_, _, _, j| Ok((StmtToken::Assign, j))),
        ),
        LexRule::new(
            white_space,
            Rc::new(|scan: &Scan<StmtToken>, ss: &str, _, j| {
                if ss.len() > j {
                    scan.scan_one_token(ss, j)
                } else {
                    Ok((StmtToken::End, j))
                }
            }),
        ),
        LexRule::new(
            number,
            Rc::new(|_, ss: &str, i, j| {
                Ok((StmtToken::Number(ss[i..j].parse().unwrap_or_default()), j))
            }),
        ),
        LexRule::new(
            identifier,
            Rc::new(|_, ss: &str, i, j| Ok((StmtToken::Identifier(ss[i..j].to_string()), j))),
        ),
        LexRule::new(
            operator,
            Rc::new(|_, ss: &str, i, j| Ok((StmtToken::Operator(ss[i..j].to_string()), j))),
        ),
        LexRule::new(
            relation,
            Rc::new(|_, ss: &str, i, j| Ok((StmtToken::Relation(ss[i..j].to_string()), j))),
        ),
    ])
}

/// A token-level arithmetic grammar for the recognising parsers: right-recursive, LL(1).
///
/// ```text
/// S    -> Arg Cont
/// Cont -> Op Arg Cont | ()
/// Op   -> Operator
/// Arg  -> Number | Identifier | '(' S ')'
/// ```
pub fn arith_expression_grammar() -> Grammar<&'static str, StmtToken> {
    let number = StmtToken::Number(0);
    let identifier = StmtToken::Identifier(String::new());
    let operator = StmtToken::Operator(String::new());
    match Grammar::new(
        vec!["S", "Cont", "Arg", "Op"],
        vec![
            number.clone(),
            identifier.clone(),
            operator.clone(),
            StmtToken::Left,
            StmtToken::Right,
        ],
        vec![
            Production::new("S", vec![Symbol::NT("Arg"), Symbol::NT("Cont")]),
            Production::new(
                "Cont",
                vec![Symbol::NT("Op"), Symbol::NT("Arg"), Symbol::NT("Cont")],
            ),
            Production::new("Cont", vec![]),
            Production::new("Op", vec![Symbol::Term(operator)]),
            Production::new("Arg", vec![Symbol::Term(number)]),
            Production::new("Arg", vec![Symbol::Term(identifier)]),
            Production::new(
                "Arg",
                vec![
                    Symbol::Term(StmtToken::Left),
                    Symbol::NT("S"),
                    Symbol::Term(StmtToken::Right),
                ],
            ),
        ],
        "S",
    ) {
        Ok(grammar) => grammar,
        Err(err) => panic!("{}", err),
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Abstract syntax of the statement language. [Token](StmtAst::Token) carries a shifted token
/// that an action has not consumed yet; [Seq](StmtAst::Seq) is the statement list a single
/// `Stmt` contributes (empty for a bare `;`).
pub enum StmtAst {
    Null,
    Token(StmtToken),
    Const(i64),
    Var(String),
    BinOp(Box<StmtAst>, String, Box<StmtAst>),
    BinRel(Box<StmtAst>, String, Box<StmtAst>),
    IfExp(Box<StmtAst>, Box<StmtAst>, Box<StmtAst>),
    Ret(Box<StmtAst>),
    Prnt(Box<StmtAst>),
    Let(String, Box<StmtAst>),
    Seq(Vec<StmtAst>),
    Module(Vec<StmtAst>),
}

impl ConstructImpl<StmtToken> for StmtAst {
    fn null() -> Self {
        StmtAst::Null
    }

    fn terminal(term: &StmtToken) -> Self {
        StmtAst::Token(term.clone())
    }
}

/// The LR(1) statement grammar building [StmtAst] modules.
///
/// ```text
/// Module -> Stmt Module | ()
/// Stmt   -> ';' | 'print' Exp ';' | 'return' Exp ';' | Identifier ':=' Exp ';'
/// Exp    -> Number | Identifier | Exp Operator Exp | Exp Relation Exp
///         | 'if' Exp 'then' Exp 'else' Exp | '(' Exp ')'
/// ```
pub fn statement_grammar() -> Grammar<&'static str, StmtToken, StmtAst> {
    let number = StmtToken::Number(0);
    let identifier = StmtToken::Identifier(String::new());
    let operator = StmtToken::Operator(String::new());
    let relation = StmtToken::Relation(String::new());

    let module_cons: SemanticAction<StmtAst> = Rc::new(|mut args| {
        let module = args.pop();
        let stmt = args.pop();
        match (stmt, module) {
            (Some(StmtAst::Seq(mut stmts)), Some(StmtAst::Module(rest))) => {
                stmts.extend(rest);
                StmtAst::Module(stmts)
            }
            _ => StmtAst::Null,
        }
    });
    let module_empty: SemanticAction<StmtAst> = Rc::new(|_| StmtAst::Module(Vec::new()));
    let stmt_empty: SemanticAction<StmtAst> = Rc::new(|_| StmtAst::Seq(Vec::new()));
    let stmt_print: SemanticAction<StmtAst> = Rc::new(|mut args| {
        args.pop();
        match args.pop() {
            Some(exp) => StmtAst::Seq(vec![StmtAst::Prnt(Box::new(exp))]),
            None => StmtAst::Null,
        }
    });
    let stmt_return: SemanticAction<StmtAst> = Rc::new(|mut args| {
        args.pop();
        match args.pop() {
            Some(exp) => StmtAst::Seq(vec![StmtAst::Ret(Box::new(exp))]),
            None => StmtAst::Null,
        }
    });
    let stmt_assign: SemanticAction<StmtAst> = Rc::new(|mut args| {
        args.pop();
        let exp = args.pop();
        args.pop();
        match (args.pop(), exp) {
            (Some(StmtAst::Token(StmtToken::Identifier(name))), Some(exp)) => {
                StmtAst::Seq(vec![StmtAst::Let(name, Box::new(exp))])
            }
            _ => StmtAst::Null,
        }
    });
    let exp_number: SemanticAction<StmtAst> = Rc::new(|mut args| match args.pop() {
        Some(StmtAst::Token(StmtToken::Number(value))) => StmtAst::Const(value),
        _ => StmtAst::Null,
    });
    let exp_var: SemanticAction<StmtAst> = Rc::new(|mut args| match args.pop() {
        Some(StmtAst::Token(StmtToken::Identifier(name))) => StmtAst::Var(name),
        _ => StmtAst::Null,
    });
    let exp_bin_op: SemanticAction<StmtAst> = Rc::new(|mut args| {
        let right = args.pop();
        let op = args.pop();
        let left = args.pop();
        match (left, op, right) {
            (Some(l), Some(StmtAst::Token(StmtToken::Operator(op))), Some(r)) => {
                StmtAst::BinOp(Box::new(l), op, Box::new(r))
            }
            _ => StmtAst::Null,
        }
    });
    let exp_bin_rel: SemanticAction<StmtAst> = Rc::new(|mut args| {
        let right = args.pop();
        let rel = args.pop();
        let left = args.pop();
        match (left, rel, right) {
            (Some(l), Some(StmtAst::Token(StmtToken::Relation(rel))), Some(r)) => {
                StmtAst::BinRel(Box::new(l), rel, Box::new(r))
            }
            _ => StmtAst::Null,
        }
    });
    let exp_if: SemanticAction<StmtAst> = Rc::new(|mut args| {
        let else_exp = args.pop();
        args.pop();
        let then_exp = args.pop();
        args.pop();
        let cond = args.pop();
        match (cond, then_exp, else_exp) {
            (Some(c), Some(t), Some(e)) => {
                StmtAst::IfExp(Box::new(c), Box::new(t), Box::new(e))
            }
            _ => StmtAst::Null,
        }
    });
    let exp_parenthesised: SemanticAction<StmtAst> = Rc::new(|mut args| {
        args.pop();
        args.pop().unwrap_or(StmtAst::Null)
    });

    match Grammar::new(
        vec!["Module", "Stmt", "Exp"],
        vec![
            number.clone(),
            identifier.clone(),
            operator.clone(),
            relation.clone(),
            StmtToken::Left,
            StmtToken::Right,
            StmtToken::End,
            StmtToken::If,
            StmtToken::Then,
            StmtToken::Else,
            StmtToken::Return,
            StmtToken::Print,
            StmtToken::Assign,
            StmtToken::WhiteSpace,
        ],
        vec![
            Production::new("Module", vec![Symbol::NT("Stmt"), Symbol::NT("Module")])
                .with_action(module_cons),
            Production::new("Module", vec![]).with_action(module_empty),
            Production::new("Stmt", vec![Symbol::Term(StmtToken::End)]).with_action(stmt_empty),
            Production::new(
                "Stmt",
                vec![
                    Symbol::Term(StmtToken::Print),
                    Symbol::NT("Exp"),
                    Symbol::Term(StmtToken::End),
                ],
            )
            .with_action(stmt_print),
            Production::new(
                "Stmt",
                vec![
                    Symbol::Term(StmtToken::Return),
                    Symbol::NT("Exp"),
                    Symbol::Term(StmtToken::End),
                ],
            )
            .with_action(stmt_return),
            Production::new(
                "Stmt",
                vec![
                    Symbol::Term(identifier.clone()),
                    Symbol::Term(StmtToken::Assign),
                    Symbol::NT("Exp"),
                    Symbol::Term(StmtToken::End),
                ],
            )
            .with_action(stmt_assign),
            Production::new("Exp", vec![Symbol::Term(number)]).with_action(exp_number),
            Production::new("Exp", vec![Symbol::Term(identifier)]).with_action(exp_var),
            Production::new(
                "Exp",
                vec![Symbol::NT("Exp"), Symbol::Term(operator), Symbol::NT("Exp")],
            )
            .with_action(exp_bin_op),
            Production::new(
                "Exp",
                vec![Symbol::NT("Exp"), Symbol::Term(relation), Symbol::NT("Exp")],
            )
            .with_action(exp_bin_rel),
            Production::new(
                "Exp",
                vec![
                    Symbol::Term(StmtToken::If),
                    Symbol::NT("Exp"),
                    Symbol::Term(StmtToken::Then),
                    Symbol::NT("Exp"),
                    Symbol::Term(StmtToken::Else),
                    Symbol::NT("Exp"),
                ],
            )
            .with_action(exp_if),
            Production::new(
                "Exp",
                vec![
                    Symbol::Term(StmtToken::Left),
                    Symbol::NT("Exp"),
                    Symbol::Term(StmtToken::Right),
                ],
            )
            .with_action(exp_parenthesised),
        ],
        "Module",
    ) {
        Ok(grammar) => grammar,
        Err(err) => panic!("{}", err),
    }
}
