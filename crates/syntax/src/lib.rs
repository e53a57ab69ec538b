//! Generic expression syntax: identifiers, literals, binary and unary
//! operators, and call expressions.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{BasicLit, BinaryOp, Expr, LitKind, UnaryOp};
pub use lexer::{tokenize, LexError, Span, SpannedToken, Token};
pub use parser::{parse, ParseError};
