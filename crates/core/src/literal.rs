//! Extraction of typed values from generic syntax nodes.

use filterql_syntax::{BasicLit, Expr, LitKind};

use crate::error::FilterError;

/// The name of a plain identifier.
pub fn ident(expr: &Expr) -> Result<&str, FilterError> {
    match expr {
        Expr::Ident(name) => Ok(name),
        Expr::Lit(lit) => Err(mismatch("identifier", &lit.value)),
        other => Err(internal_mismatch("identifier", other)),
    }
}

/// The unescaped contents of a string literal.
pub fn string(expr: &Expr) -> Result<String, FilterError> {
    let lit = literal(expr, "string")?;
    if lit.kind != LitKind::String {
        return Err(mismatch("string", &lit.value));
    }

    unquote(&lit.value).ok_or_else(|| FilterError::Unquote(lit.value.clone()))
}

/// The value of a base-10 integer literal.
pub fn number(expr: &Expr) -> Result<i64, FilterError> {
    let lit = literal(expr, "number")?;
    if lit.kind != LitKind::Int {
        return Err(mismatch("number", &lit.value));
    }

    lit.value
        .parse::<i64>()
        .map_err(|_| FilterError::InvalidNumber(lit.value.clone()))
}

fn literal<'a>(expr: &'a Expr, expected: &'static str) -> Result<&'a BasicLit, FilterError> {
    match expr {
        Expr::Lit(lit) => Ok(lit),
        Expr::Ident(name) => Err(mismatch(expected, name)),
        other => Err(internal_mismatch(expected, other)),
    }
}

fn mismatch(expected: &'static str, got: &str) -> FilterError {
    FilterError::Mismatch {
        expected,
        got: got.to_string(),
    }
}

fn internal_mismatch(expected: &'static str, got: &Expr) -> FilterError {
    FilterError::internal(format!("expected {expected} got {}", got.kind()))
}

/// Strip the quotes of a raw string literal and process its escapes.
///
/// Backtick strings are raw. `\xNN` yields the character U+00NN rather than a
/// raw byte, so the result is always valid UTF-8. Returns `None` for
/// malformed input.
pub fn unquote(raw: &str) -> Option<String> {
    let quote = raw.chars().next()?;
    if !matches!(quote, '"' | '\'' | '`') || raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];

    if quote == '`' {
        return (!inner.contains('`')).then(|| inner.to_string());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == quote {
            return None;
        }
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'v' => '\x0b',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'x' => hex_char(&mut chars, 2)?,
            'U' => hex_char(&mut chars, 8)?,
            'u' => {
                if chars.as_str().starts_with('{') {
                    chars.next();
                    let mut digits = String::new();
                    loop {
                        match chars.next()? {
                            '}' => break,
                            c => digits.push(c),
                        }
                    }
                    if digits.is_empty() || digits.len() > 6 {
                        return None;
                    }
                    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)?
                } else {
                    hex_char(&mut chars, 4)?
                }
            }
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, len: usize) -> Option<char> {
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len {
        return None;
    }
    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)
}
