//! Recursive-descent parser for legacy type expressions.
//!
//! Grammar, with alternatives tried in this order at each position:
//!
//! ```text
//! type      := tuple | array | named | slice
//! tuple     := "(" [type ("," type)* [","]] ")"
//! array     := "[" type ";" LEN [";" IDENT] "]"
//! named     := qualified | IDENT ("::" IDENT)* [generics]
//! qualified := "<" type "as" type ">" ["::" IDENT]
//! generics  := "<" param ("," param)* [","] ">"
//! param     := type | "'" IDENT
//! slice     := "&" ["'" IDENT] "[" type "]"
//! ```
//!
//! A handful of historical spellings are rewritten to the names the runtime
//! dictionaries use (`<T::Lookup as StaticLookup>::Source` is `LookupSource`,
//! `<T::Balance as HasCompact>` is `Compact<Balance>`, and so on).

use crate::lexer::{Token, tokenize};
use crate::{ParseError, Span, TypeExpr};

/// Maximum nesting of brackets, generics, and qualified forms.
pub const MAX_DEPTH: usize = 64;

/// Parses a complete type expression.
///
/// # Example
///
/// ```
/// use sable_parser::{parse, TypeExpr};
///
/// let expr = parse("Vec<(AccountId, Balance)>").unwrap();
/// assert_eq!(expr.to_string(), "Vec<(AccountId, Balance)>");
/// assert_eq!(parse("&'static [u8]").unwrap(), parse("Vec<u8>").unwrap());
/// ```
pub fn parse(source: &str) -> Result<TypeExpr, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: source.len(),
        depth: 0,
    };
    let expr = parser.type_expr()?;
    if let Some((token, span)) = parser.peek() {
        return Err(ParseError::TrailingInput {
            found: token.to_string(),
            span,
        });
    }
    tracing::trace!(source, canonical = %expr, "parsed type expression");
    Ok(expr)
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Span)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'src> Parser<'src> {
    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn peek(&self) -> Option<(Token<'src>, Span)> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_token(&self) -> Option<Token<'src>> {
        self.peek().map(|(token, _)| token)
    }

    fn bump(&mut self) -> Option<(Token<'src>, Span)> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn eat(&mut self, expected: Token<'src>) -> bool {
        if self.peek_token() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token<'src>, what: &'static str) -> Result<Span, ParseError> {
        match self.bump() {
            Some((token, span)) if token == expected => Ok(span),
            Some((token, span)) => Err(ParseError::UnexpectedToken {
                expected: what,
                found: token.to_string(),
                span,
            }),
            None => Err(self.unexpected_end(what)),
        }
    }

    fn ident(&mut self, what: &'static str) -> Result<(&'src str, Span), ParseError> {
        match self.bump() {
            Some((Token::Ident(name), span)) => Ok((name, span)),
            Some((token, span)) => Err(ParseError::UnexpectedToken {
                expected: what,
                found: token.to_string(),
                span,
            }),
            None => Err(self.unexpected_end(what)),
        }
    }

    fn unexpected_end(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedEnd {
            expected,
            span: Span(self.end, self.end),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let span = self.peek().map_or(Span(self.end, self.end), |(_, span)| span);
            return Err(ParseError::MaxDepthExceeded {
                max_depth: MAX_DEPTH,
                span,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Productions
    // ========================================================================

    fn type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        self.enter()?;
        let expr = match self.peek() {
            Some((Token::LParen, _)) => self.tuple(),
            Some((Token::LBracket, _)) => self.array(),
            Some((Token::Ident(_) | Token::Lt, _)) => self.named(),
            Some((Token::Amp, _)) => self.slice(),
            Some((token, span)) => Err(ParseError::UnexpectedToken {
                expected: "a type",
                found: token.to_string(),
                span,
            }),
            None => Err(self.unexpected_end("a type")),
        };
        self.depth -= 1;
        expr
    }

    fn tuple(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(Token::LParen, "`(`")?;
        let mut items = Vec::new();
        while !self.eat(Token::RParen) {
            items.push(self.type_expr()?);
            if !self.eat(Token::Comma) {
                self.expect(Token::RParen, "`,` or `)`")?;
                break;
            }
        }
        Ok(TypeExpr::Tuple(items))
    }

    fn array(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(Token::LBracket, "`[`")?;
        let item = self.type_expr()?;
        self.expect(Token::Semi, "`;`")?;
        let (text, span) = self.ident("an array length")?;
        let len = text.parse::<u32>().map_err(|_| ParseError::InvalidLength {
            text: text.to_string(),
            span,
        })?;
        // `[T; N; Name]`: the trailing name is informational only.
        if self.eat(Token::Semi) {
            self.ident("a type name")?;
        }
        self.expect(Token::RBracket, "`]`")?;
        Ok(TypeExpr::array(item, len))
    }

    fn named(&mut self) -> Result<TypeExpr, ParseError> {
        if self.peek_token() == Some(Token::Lt) {
            return self.qualified();
        }

        let (first, _) = self.ident("a type name")?;
        let mut path = vec![first];
        while self.eat(Token::PathSep) {
            path.push(self.ident("a path segment")?.0);
        }

        let params = if self.peek_token() == Some(Token::Lt) {
            self.generics()?
        } else {
            Vec::new()
        };

        Ok(TypeExpr::generic(resolve_path(&path), params))
    }

    fn generics(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        self.expect(Token::Lt, "`<`")?;
        let mut params = Vec::new();
        while !self.eat(Token::Gt) {
            if self.eat(Token::Quote) {
                // Lifetime parameter, e.g. `Cow<'a, T>`.
                self.ident("a lifetime name")?;
            } else {
                params.push(self.type_expr()?);
            }
            if !self.eat(Token::Comma) {
                self.expect(Token::Gt, "`,` or `>`")?;
                break;
            }
        }
        Ok(params)
    }

    fn qualified(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(Token::Lt, "`<`")?;
        let inner = self.type_expr()?;
        match self.ident("`as`")? {
            ("as", _) => {}
            (other, span) => {
                return Err(ParseError::UnexpectedToken {
                    expected: "`as`",
                    found: format!("`{}`", other),
                    span,
                });
            }
        }
        let bound = self.type_expr()?;
        self.expect(Token::Gt, "`>`")?;

        let item = if self.eat(Token::PathSep) {
            Some(self.ident("an associated item")?.0)
        } else {
            None
        };

        Ok(resolve_qualified(inner, &bound, item))
    }

    fn slice(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(Token::Amp, "`&`")?;
        if self.eat(Token::Quote) {
            self.ident("a lifetime name")?;
        }
        self.expect(Token::LBracket, "`[`")?;
        let item = self.type_expr()?;
        self.expect(Token::RBracket, "`]`")?;
        Ok(TypeExpr::generic("Vec", vec![item]))
    }
}

/// Collapses a `::`-separated path to the name dictionaries know it by.
fn resolve_path(path: &[&str]) -> String {
    match path {
        [.., "Lookup", "Source"] => "LookupSource".to_string(),
        [.., "Lookup", "Target"] => "LookupTarget".to_string(),
        ["exec", "StorageKey"] => "ContractStorageKey".to_string(),
        [.., last] => last.to_string(),
        [] => String::new(),
    }
}

/// Resolves `<inner as bound>::item`.
fn resolve_qualified(inner: TypeExpr, bound: &TypeExpr, item: Option<&str>) -> TypeExpr {
    let inner_name = inner.name().unwrap_or_default();
    let bound_name = bound.name().unwrap_or_default();
    match (inner_name, bound_name, item) {
        ("Lookup", _, Some("Source")) => TypeExpr::named("LookupSource"),
        ("Lookup", _, Some("Target")) => TypeExpr::named("LookupTarget"),
        ("InherentOfflineReport", "InherentOfflineReport", Some("Inherent")) => {
            TypeExpr::named("InherentOfflineReport")
        }
        (_, "HasCompact", None) => TypeExpr::generic("Compact", vec![inner]),
        (_, _, Some(item)) => TypeExpr::named(resolve_path(&[item])),
        (_, _, None) => inner,
    }
}
