use crate::{ParseError, Span};
use core::fmt;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'src> {
    #[regex(r"[A-Za-z0-9_]+", |lex| lex.slice())]
    Ident(&'src str),

    #[token("::")]
    PathSep,

    #[token(":")]
    Colon,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semi,

    #[token("&")]
    Amp,

    #[token("'")]
    Quote,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "`{}`", name),
            Token::PathSep => f.write_str("`::`"),
            Token::Colon => f.write_str("`:`"),
            Token::Lt => f.write_str("`<`"),
            Token::Gt => f.write_str("`>`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::Comma => f.write_str("`,`"),
            Token::Semi => f.write_str("`;`"),
            Token::Amp => f.write_str("`&`"),
            Token::Quote => f.write_str("`'`"),
        }
    }
}

/// Splits `source` into tokens with their byte spans.
///
/// Any character outside the identifier class and the punctuation set is a
/// hard failure.
pub fn tokenize(source: &str) -> Result<Vec<(Token<'_>, Span)>, ParseError> {
    let mut tokens = Vec::new();
    for (token, range) in Token::lexer(source).spanned() {
        let span = Span(range.start, range.end);
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let ch = source[range.start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::UnexpectedChar { ch, span });
            }
        }
    }
    Ok(tokens)
}
