use crate::ast::{BasicLit, BinaryOp, Expr, LitKind, UnaryOp};
use crate::lexer::{tokenize, LexError, SpannedToken, Token};

/// Parser error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("unexpected token: {found} at position {position}, expected: {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: usize,
    },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expression nested too deeply at position {position}")]
    NestingTooDeep { position: usize },
}

/// Deepest nesting of groups, unary operators and operator chains accepted.
pub const MAX_DEPTH: usize = 256;

/// Parse an expression string into a generic syntax tree.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr(0)?;
    parser.expect(&Token::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: self.position(),
            });
        }
        Ok(())
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&Token::Eof)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.span.start)
            .unwrap_or(0)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        self.pos += 1;
        token
    }

    fn unexpected(&self, found: &Token, expected: &str) -> ParseError {
        if *found == Token::Eof {
            return ParseError::UnexpectedEof;
        }
        ParseError::UnexpectedToken {
            found: found.to_string(),
            expected: expected.to_string(),
            position: self.position(),
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(self.peek(), &expected.to_string()))
        }
    }

    /// Precedence climbing over the binary operators.
    ///
    /// Every operator folded into `left` nests it one level deeper, so long
    /// chains count against [`MAX_DEPTH`] like explicit grouping does.
    fn parse_expr(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;

        while let Some(op) = binary_op(self.peek()) {
            if op.precedence() <= min_prec {
                break;
            }
            self.enter()?;
            self.advance();
            let right = self.parse_expr(op.precedence())?;
            left = Expr::binary(op, left, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let expr = self.parse_unary_inner();
        self.depth -= 1;
        expr
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Not => {
                self.advance();
                let expr = self.parse_unary()?;
                Ok(Expr::unary(UnaryOp::Not, expr))
            }
            Token::Minus => {
                self.advance();
                let expr = self.parse_unary()?;
                Ok(Expr::unary(UnaryOp::Neg, expr))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.peek() == &Token::LParen {
            self.advance();
            let mut args = Vec::new();
            if self.peek() != &Token::RParen {
                args.push(self.parse_expr(0)?);
                while self.peek() == &Token::Comma {
                    self.advance();
                    args.push(self.parse_expr(0)?);
                }
            }
            self.expect(&Token::RParen)?;
            expr = Expr::Call {
                func: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let expr = self.parse_primary_inner();
        self.depth -= 1;
        expr
    }

    fn parse_primary_inner(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Ident(name))
            }
            Token::String(value) => {
                self.advance();
                Ok(lit(LitKind::String, value))
            }
            Token::Integer(value) => {
                self.advance();
                Ok(lit(LitKind::Int, value))
            }
            Token::Float(value) => {
                self.advance();
                Ok(lit(LitKind::Float, value))
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr(0)?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            other => Err(self.unexpected(&other, "expression")),
        }
    }
}

fn lit(kind: LitKind, value: String) -> Expr {
    Expr::Lit(BasicLit { kind, value })
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    let op = match token {
        Token::Eq => BinaryOp::Eq,
        Token::Neq => BinaryOp::Neq,
        Token::Percent => BinaryOp::Rem,
        Token::Gt => BinaryOp::Gt,
        Token::Gte => BinaryOp::Gte,
        Token::Lt => BinaryOp::Lt,
        Token::Lte => BinaryOp::Lte,
        Token::And => BinaryOp::And,
        Token::Or => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}
