//! Demo languages exercising the scanner and the parser family end to end.
pub mod expression;
pub mod javascript;
pub mod statement;

#[cfg(test)]
mod __tests__;
