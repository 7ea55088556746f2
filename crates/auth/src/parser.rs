//! Recursive-descent parser.
//!
//! ```text
//! expr    := or
//! or      := and ( '||' and )*
//! and     := atom ( '&&' atom )*
//! atom    := '(' expr ')' | IDENT
//! ```
//!
//! `||` binds looser than `&&`; both are left-associative. There is no
//! implicit operator: two adjacent identifiers are an error.

use permgate_core::{ExprResult, SyntaxError};

use crate::EngineConfig;
use crate::expr::Expr;
use crate::normalize::normalize;
use crate::token::{Token, TokenKind, tokenize};

const EXPECTED_TERM: &str = "a permission, literal, or '('";

/// Default nesting limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parse a token stream with the default nesting limit.
pub fn parse(tokens: &[Token]) -> ExprResult<Expr> {
    parse_with_depth(tokens, DEFAULT_MAX_DEPTH)
}

/// Parse a token stream, rejecting groups nested deeper than `max_depth`.
pub fn parse_with_depth(tokens: &[Token], max_depth: usize) -> ExprResult<Expr> {
    if tokens.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };
    let expr = parser.or_expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(Token {
            kind: TokenKind::Unrecognized(ch),
            position,
        }) => Err(SyntaxError::UnrecognizedCharacter {
            ch: *ch,
            position: *position,
        }),
        Some(token) => Err(SyntaxError::TrailingInput {
            position: token.position,
        }),
    }
}

/// Full front end: length check, normalize, tokenize, parse.
pub fn parse_expression(raw: &str, config: &EngineConfig) -> ExprResult<Expr> {
    if raw.len() > config.max_expression_len {
        return Err(SyntaxError::TooLong {
            len: raw.len(),
            max: config.max_expression_len,
        });
    }
    let normalized = normalize(raw);
    let tokens = tokenize(&normalized);
    parse_with_depth(&tokens, config.max_nesting_depth)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or_expr(&mut self) -> ExprResult<Expr> {
        let mut left = self.and_expr()?;
        while self.eat(&TokenKind::Or) {
            let right = self.and_expr()?;
            left = Expr::or(left, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> ExprResult<Expr> {
        let mut left = self.atom()?;
        while self.eat(&TokenKind::And) {
            let right = self.atom()?;
            left = Expr::and(left, right);
        }
        Ok(left)
    }

    fn atom(&mut self) -> ExprResult<Expr> {
        let Some(token) = self.next() else {
            return Err(SyntaxError::UnexpectedEnd {
                expected: EXPECTED_TERM,
            });
        };

        match &token.kind {
            TokenKind::Literal(b) => Ok(Expr::Literal(*b)),
            TokenKind::Pattern(p) => Ok(Expr::Pattern(p.clone())),
            TokenKind::LParen => self.group(token.position),
            TokenKind::Unrecognized(ch) => Err(SyntaxError::UnrecognizedCharacter {
                ch: *ch,
                position: token.position,
            }),
            other => Err(SyntaxError::unexpected(other.to_string(), token.position)),
        }
    }

    fn group(&mut self, open: usize) -> ExprResult<Expr> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::TooDeep {
                max: self.max_depth,
            });
        }
        self.depth += 1;
        let inner = self.or_expr()?;
        self.depth -= 1;

        match self.next() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(inner),
            None => Err(SyntaxError::UnclosedGroup { position: open }),
            Some(Token {
                kind: TokenKind::Unrecognized(ch),
                position,
            }) => Err(SyntaxError::UnrecognizedCharacter {
                ch: *ch,
                position: *position,
            }),
            Some(token) => Err(SyntaxError::unexpected(
                token.kind.to_string(),
                token.position,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> ExprResult<Expr> {
        parse_expression(text, &EngineConfig::default())
    }

    fn leaf(s: &str) -> Expr {
        Expr::pattern(s)
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            p("a && b || c").unwrap(),
            Expr::or(Expr::and(leaf("a"), leaf("b")), leaf("c"))
        );
        assert_eq!(
            p("a || b && c").unwrap(),
            Expr::or(leaf("a"), Expr::and(leaf("b"), leaf("c")))
        );
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(
            p("a || b || c").unwrap(),
            Expr::or(Expr::or(leaf("a"), leaf("b")), leaf("c"))
        );
        assert_eq!(
            p("a & b & c").unwrap(),
            Expr::and(Expr::and(leaf("a"), leaf("b")), leaf("c"))
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(
            p("(users.create || posts.create) && admin.access").unwrap(),
            Expr::and(
                Expr::or(leaf("users.create"), leaf("posts.create")),
                leaf("admin.access")
            )
        );
    }

    #[test]
    fn literals_become_literal_nodes() {
        assert_eq!(
            p("true && x").unwrap(),
            Expr::and(Expr::Literal(true), leaf("x"))
        );
    }

    #[test]
    fn dangling_operators_are_rejected() {
        assert_eq!(
            p("a &&"),
            Err(SyntaxError::UnexpectedEnd {
                expected: EXPECTED_TERM
            })
        );
        assert_eq!(p("|| a"), Err(SyntaxError::unexpected("||", 0)));
        assert_eq!(p("a && || b"), Err(SyntaxError::unexpected("||", 5)));
    }

    #[test]
    fn unbalanced_groups_are_rejected() {
        assert_eq!(p("(a || b"), Err(SyntaxError::UnclosedGroup { position: 0 }));
        assert_eq!(p("a || b)"), Err(SyntaxError::TrailingInput { position: 6 }));
        assert_eq!(p("()"), Err(SyntaxError::unexpected(")", 1)));
        assert_eq!(p("(a b)"), Err(SyntaxError::unexpected("b", 3)));
    }

    #[test]
    fn adjacent_identifiers_are_not_implicitly_joined() {
        assert_eq!(p("a b"), Err(SyntaxError::TrailingInput { position: 2 }));
    }

    #[test]
    fn empty_and_blank_input_is_rejected() {
        assert_eq!(p(""), Err(SyntaxError::Empty));
        assert_eq!(p("   "), Err(SyntaxError::Empty));
    }

    #[test]
    fn unrecognized_characters_are_rejected_wherever_they_appear() {
        assert_eq!(
            p("a && b $"),
            Err(SyntaxError::UnrecognizedCharacter { ch: '$', position: 7 })
        );
        assert_eq!(
            p("a && !b"),
            Err(SyntaxError::UnrecognizedCharacter { ch: '!', position: 5 })
        );
        assert_eq!(
            p("(a $"),
            Err(SyntaxError::UnrecognizedCharacter { ch: '$', position: 3 })
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let config = EngineConfig {
            max_nesting_depth: 3,
            ..EngineConfig::default()
        };
        assert!(parse_expression("(((a)))", &config).is_ok());
        assert_eq!(
            parse_expression("((((a))))", &config),
            Err(SyntaxError::TooDeep { max: 3 })
        );
    }

    #[test]
    fn length_is_bounded() {
        let config = EngineConfig {
            max_expression_len: 8,
            ..EngineConfig::default()
        };
        assert!(parse_expression("a && b", &config).is_ok());
        assert_eq!(
            parse_expression("abc && def", &config),
            Err(SyntaxError::TooLong { len: 10, max: 8 })
        );
    }

    #[test]
    fn collapsed_operator_runs_parse() {
        assert_eq!(
            p("a |||| b").unwrap(),
            Expr::or(leaf("a"), leaf("b"))
        );
    }
}
