use std::fmt;

use serde::{Deserialize, Serialize};

/// Token types produced by the expression lexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// A string literal, raw text including its quotes.
    String(String),
    /// An integer literal, raw text (may carry a leading `-`).
    Integer(String),
    /// A floating-point literal, raw text.
    Float(String),

    /// An identifier.
    Ident(String),

    Eq,  // ==
    Neq, // !=
    Lt,  // <
    Gt,  // >
    Lte, // <=
    Gte, // >=
    And, // &&
    Or,  // ||
    /// `!` or the keyword `not`.
    Not,
    Percent, // %
    Minus,   // -

    Comma,  // ,
    LParen, // (
    RParen, // )

    /// The end of the input.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) | Token::Integer(s) | Token::Float(s) | Token::Ident(s) => {
                write!(f, "{s}")
            }
            Token::Eq => write!(f, "=="),
            Token::Neq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Lte => write!(f, "<="),
            Token::Gte => write!(f, ">="),
            Token::And => write!(f, "&&"),
            Token::Or => write!(f, "||"),
            Token::Not => write!(f, "!"),
            Token::Percent => write!(f, "%"),
            Token::Minus => write!(f, "-"),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Position in source code for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Lexer error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),
}

/// Tokenize an expression string into a sequence of tokens.
///
/// Positions are byte offsets into `input`.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let offset = |i: usize| chars.get(i).map(|(o, _)| *o).unwrap_or(input.len());
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos].1;
        let next = chars.get(pos + 1).map(|(_, c)| *c);

        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;

        let token = match ch {
            ',' => {
                pos += 1;
                Token::Comma
            }
            '(' => {
                pos += 1;
                Token::LParen
            }
            ')' => {
                pos += 1;
                Token::RParen
            }
            '%' => {
                pos += 1;
                Token::Percent
            }
            '=' => {
                if next == Some('=') {
                    pos += 2;
                    Token::Eq
                } else {
                    return Err(LexError::UnexpectedChar(ch, offset(pos)));
                }
            }
            '!' => {
                if next == Some('=') {
                    pos += 2;
                    Token::Neq
                } else {
                    pos += 1;
                    Token::Not
                }
            }
            '<' => {
                if next == Some('=') {
                    pos += 2;
                    Token::Lte
                } else {
                    pos += 1;
                    Token::Lt
                }
            }
            '>' => {
                if next == Some('=') {
                    pos += 2;
                    Token::Gte
                } else {
                    pos += 1;
                    Token::Gt
                }
            }
            '&' => {
                if next == Some('&') {
                    pos += 2;
                    Token::And
                } else {
                    return Err(LexError::UnexpectedChar(ch, offset(pos)));
                }
            }
            '|' => {
                if next == Some('|') {
                    pos += 2;
                    Token::Or
                } else {
                    return Err(LexError::UnexpectedChar(ch, offset(pos)));
                }
            }
            '-' => {
                if next.is_some_and(|c| c.is_ascii_digit()) {
                    // Negative number
                    pos += 1;
                    let is_float = scan_number(&chars, &mut pos);
                    let text = input[offset(start)..offset(pos)].to_string();
                    if is_float {
                        Token::Float(text)
                    } else {
                        Token::Integer(text)
                    }
                } else {
                    pos += 1;
                    Token::Minus
                }
            }
            '"' | '\'' | '`' => {
                let quote = ch;
                pos += 1;
                while pos < chars.len() && chars[pos].1 != quote {
                    if chars[pos].1 == '\\' && quote != '`' {
                        pos += 1; // skip escaped char
                    }
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(LexError::UnterminatedString(offset(start)));
                }
                pos += 1; // skip closing quote
                Token::String(input[offset(start)..offset(pos)].to_string())
            }
            c if c.is_ascii_digit() => {
                let is_float = scan_number(&chars, &mut pos);
                let text = input[offset(start)..offset(pos)].to_string();
                if is_float {
                    Token::Float(text)
                } else {
                    Token::Integer(text)
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                while pos < chars.len() && (chars[pos].1.is_alphanumeric() || chars[pos].1 == '_') {
                    pos += 1;
                }
                match &input[offset(start)..offset(pos)] {
                    "not" => Token::Not,
                    word => Token::Ident(word.to_string()),
                }
            }
            _ => return Err(LexError::UnexpectedChar(ch, offset(pos))),
        };

        tokens.push(SpannedToken {
            token,
            span: Span {
                start: offset(start),
                end: offset(pos),
            },
        });
    }

    tokens.push(SpannedToken {
        token: Token::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });

    Ok(tokens)
}

/// Advance over the digits of a number, returning whether it had a fraction.
fn scan_number(chars: &[(usize, char)], pos: &mut usize) -> bool {
    let mut is_float = false;
    while *pos < chars.len() {
        let c = chars[*pos].1;
        if c.is_ascii_digit() {
            *pos += 1;
        } else if c == '.' && !is_float && chars.get(*pos + 1).is_some_and(|(_, n)| n.is_ascii_digit()) {
            is_float = true;
            *pos += 1;
        } else {
            break;
        }
    }
    is_float
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn tokenize_simple_filter() {
        let tokens = tok("title == \"Dune\"");
        assert_eq!(tokens[0], Token::Ident("title".into()));
        assert_eq!(tokens[1], Token::Eq);
        assert_eq!(tokens[2], Token::String("\"Dune\"".into()));
        assert_eq!(tokens[3], Token::Eof);
    }

    #[test]
    fn tokenize_call() {
        let tokens = tok("hasTag(\"a\", 'b')");
        assert_eq!(tokens[0], Token::Ident("hasTag".into()));
        assert_eq!(tokens[1], Token::LParen);
        assert_eq!(tokens[2], Token::String("\"a\"".into()));
        assert_eq!(tokens[3], Token::Comma);
        assert_eq!(tokens[4], Token::String("'b'".into()));
        assert_eq!(tokens[5], Token::RParen);
    }

    #[test]
    fn tokenize_numbers() {
        let tokens = tok("42 3.125 -7 x-1");
        assert_eq!(tokens[0], Token::Integer("42".into()));
        assert_eq!(tokens[1], Token::Float("3.125".into()));
        assert_eq!(tokens[2], Token::Integer("-7".into()));
        assert_eq!(tokens[3], Token::Ident("x".into()));
        assert_eq!(tokens[4], Token::Integer("-1".into()));
    }

    #[test]
    fn tokenize_operators() {
        let tokens = tok("< > <= >= == != ! % && || - not");
        assert_eq!(
            tokens,
            vec![
                Token::Lt,
                Token::Gt,
                Token::Lte,
                Token::Gte,
                Token::Eq,
                Token::Neq,
                Token::Not,
                Token::Percent,
                Token::And,
                Token::Or,
                Token::Minus,
                Token::Not,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn string_keeps_escapes_raw() {
        let tokens = tok(r#""a\"b" `c\d`"#);
        assert_eq!(tokens[0], Token::String(r#""a\"b""#.into()));
        assert_eq!(tokens[1], Token::String(r"`c\d`".into()));
    }

    #[test]
    fn spans_are_byte_offsets() {
        let tokens = tokenize("é == 1").unwrap();
        assert_eq!(tokens[0].span, Span { start: 0, end: 2 });
        assert_eq!(tokens[1].span, Span { start: 3, end: 5 });
    }

    #[test]
    fn unterminated_string_error() {
        assert_eq!(tokenize("\"hello"), Err(LexError::UnterminatedString(0)));
    }

    #[test]
    fn single_equals_is_rejected() {
        assert_eq!(tokenize("a = 1"), Err(LexError::UnexpectedChar('=', 2)));
    }
}
