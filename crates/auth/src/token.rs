//! Lexical scanning of normalized expressions.

use core::fmt;

/// A lexical token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    And,
    Or,
    /// `true` / `false`.
    Literal(bool),
    /// Any other identifier: an exact permission name or a glob.
    Pattern(String),
    /// First character outside every token class. Always the final token.
    Unrecognized(char),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::And => f.write_str("&&"),
            TokenKind::Or => f.write_str("||"),
            TokenKind::Literal(b) => write!(f, "{b}"),
            TokenKind::Pattern(p) => f.write_str(p),
            TokenKind::Unrecognized(c) => write!(f, "{c}"),
        }
    }
}

/// Identifier character class.
///
/// Hyphen belongs here: `user-profile.edit` is one identifier, never an
/// operator boundary.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '*' | '?')
}

/// Scan `normalized` into tokens.
///
/// Never fails. Scanning stops at the first character that starts no token and
/// emits it as [`TokenKind::Unrecognized`], which the parser always rejects.
pub fn tokenize(normalized: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let bytes = normalized.as_bytes();
    let mut iter = normalized.char_indices().peekable();

    while let Some(&(position, c)) = iter.peek() {
        if c.is_whitespace() {
            iter.next();
            continue;
        }

        let kind = match c {
            '(' => {
                iter.next();
                TokenKind::LParen
            }
            ')' => {
                iter.next();
                TokenKind::RParen
            }
            '|' | '&' if bytes.get(position + 1) == Some(&(c as u8)) => {
                iter.next();
                iter.next();
                if c == '|' { TokenKind::Or } else { TokenKind::And }
            }
            c if is_ident_char(c) => {
                let mut end = position;
                while let Some(&(i, ch)) = iter.peek() {
                    if !is_ident_char(ch) {
                        break;
                    }
                    end = i + ch.len_utf8();
                    iter.next();
                }
                match &normalized[position..end] {
                    "true" => TokenKind::Literal(true),
                    "false" => TokenKind::Literal(false),
                    ident => TokenKind::Pattern(ident.to_string()),
                }
            }
            other => {
                tokens.push(Token {
                    kind: TokenKind::Unrecognized(other),
                    position,
                });
                break;
            }
        };

        tokens.push(Token { kind, position });
    }

    tokens
}
