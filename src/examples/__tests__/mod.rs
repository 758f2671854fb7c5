mod expression_test;
mod javascript_test;
mod statement_test;
