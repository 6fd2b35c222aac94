//! Tokenization of operation type-expression text using logos.

use logos::Logos;
use std::fmt;
use std::ops::Range;

use crate::error::TypeExprError;

/// Type-expression token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Quoted literal; the payload is the text between the quotes, escapes left as written.
    #[regex(r#"'([^'\\\n]|\\.)*'"#, unquote)]
    #[regex(r#""([^"\\\n]|\\.)*""#, unquote)]
    #[regex(r"`([^`\\]|\\.)*`", unquote)]
    Str(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
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
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("?")]
    Question,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("=>")]
    Arrow,
    #[token("=")]
    Eq,
}

fn unquote(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Str(text) => write!(f, "string '{}'", text),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Ellipsis => f.write_str("'...'"),
            Token::Dot => f.write_str("'.'"),
            Token::Comma => f.write_str("','"),
            Token::Lt => f.write_str("'<'"),
            Token::Gt => f.write_str("'>'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::LBracket => f.write_str("'['"),
            Token::RBracket => f.write_str("']'"),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::Pipe => f.write_str("'|'"),
            Token::Amp => f.write_str("'&'"),
            Token::Colon => f.write_str("':'"),
            Token::Semi => f.write_str("';'"),
            Token::Question => f.write_str("'?'"),
            Token::Minus => f.write_str("'-'"),
            Token::Plus => f.write_str("'+'"),
            Token::Arrow => f.write_str("'=>'"),
            Token::Eq => f.write_str("'='"),
        }
    }
}

/// Lexes the whole input, pairing each token with its byte span.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, TypeExprError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(source).spanned() {
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(TypeExprError::InvalidCharacter {
                    source_text: source.to_string(),
                    position: span.start,
                });
            }
        }
    }
    Ok(tokens)
}
