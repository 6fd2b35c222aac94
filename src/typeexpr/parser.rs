//! Hand-written recursive descent parser for type expressions.
//!
//! Grammar:
//! ```text
//! type         := union ('extends' union '?' type ':' type)?
//! union        := '|'? intersection ('|' intersection)*
//! intersection := '&'? postfix ('&' postfix)*
//! postfix      := primary ('[' type? ']')*
//! primary      := reference | string | '-'? number | tuple | object | function
//!               | '(' type ')' | 'infer' ident
//!               | ('keyof' | 'typeof' | 'readonly' | 'unique') postfix
//! reference    := ident ('.' ident)* ('<' type (',' type)* ','? '>')?
//! function     := 'new'? type_params? params '=>' return
//! type_params  := '<' ident ('extends' type)? ('=' type)? (',' ...)* ','? '>'
//! params       := '(' ('...'? ident '?'? (':' type)? (',' ...)* ','?)? ')'
//! return       := ('asserts'? ident 'is')? type
//! tuple        := '[' (element (',' element)* ','?)? ']'
//! element      := '...'? type '?'?
//! object       := '{' (member (';' | ',')?)* '}'
//! member       := ('+' | '-')? 'readonly'? (property | index | mapped)
//! property     := (ident | string | number) '?'? (':' type | type_params? params (':' return)?)
//! index        := '[' ident ':' type ']' ':' type
//! mapped       := '[' ident 'in' type ('as' type)? ']' ('+' | '-')? '?'? ':' type
//! ```
//!
//! A `(` opens a function type when its matching `)` is followed by `=>`.

use super::{ObjectMember, Param, TypeExpr, TypeParam};
use super::lexer::{Token, tokenize};
use crate::error::TypeExprError;
use std::ops::Range;

/// Nesting limit for generic arguments, tuples, objects and parentheses.
pub const MAX_DEPTH: usize = 128;

const PREFIX_OPERATORS: &[&str] = &["keyof", "typeof", "readonly", "unique"];

/// Parses a complete type expression.
pub fn parse_type_expr(source: &str) -> Result<TypeExpr, TypeExprError> {
    let tokens = tokenize(source)?;
    let mut stream = TokenStream::new(&tokens);
    let expr = parse_type(&mut stream, 0)?;
    if !stream.at_end() {
        return Err(TypeExprError::TrailingInput {
            position: stream.current_position(),
        });
    }
    Ok(expr)
}

/// Token stream with lookahead and byte-position tracking.
struct TokenStream<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
}

impl<'src> TokenStream<'src> {
    fn new(tokens: &'src [(Token, Range<usize>)]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    fn peek_nth(&self, n: usize) -> Option<&'src Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consumes `expected` if it is next.
    fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token, context: &str) -> Result<(), TypeExprError> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("(expected {}) {}", expected, context)))
        }
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(name)) if name == keyword)
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Whether the `(` at the cursor closes on a `)` that is followed by `=>`.
    fn paren_opens_function(&self) -> bool {
        let mut depth = 0usize;
        for (offset, (token, _)) in self.tokens.iter().skip(self.pos).enumerate() {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return matches!(self.peek_nth(offset + 1), Some(Token::Arrow));
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Byte offset of the current token, or the end of the input.
    fn current_position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, span)| if self.at_end() { span.end } else { span.start })
            .unwrap_or(0)
    }

    fn unexpected(&self, context: &str) -> TypeExprError {
        match self.peek() {
            Some(token) => TypeExprError::UnexpectedToken {
                found: token.to_string(),
                position: self.current_position(),
                context: context.to_string(),
            },
            None => TypeExprError::UnexpectedEof {
                context: context.to_string(),
            },
        }
    }
}

fn enter(depth: usize) -> Result<usize, TypeExprError> {
    if depth >= MAX_DEPTH {
        Err(TypeExprError::TooDeep { limit: MAX_DEPTH })
    } else {
        Ok(depth + 1)
    }
}

fn parse_type(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    let depth = enter(depth)?;
    let check = parse_union(stream, depth)?;
    if !stream.eat_keyword("extends") {
        return Ok(check);
    }
    let extends = parse_union(stream, depth)?;
    stream.expect(Token::Question, "in a conditional type")?;
    let then = parse_type(stream, depth)?;
    stream.expect(Token::Colon, "in a conditional type")?;
    let otherwise = parse_type(stream, depth)?;
    Ok(TypeExpr::Conditional {
        check: Box::new(check),
        extends: Box::new(extends),
        then: Box::new(then),
        otherwise: Box::new(otherwise),
    })
}

fn parse_union(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    stream.eat(&Token::Pipe);
    let mut members = vec![parse_intersection(stream, depth)?];
    while stream.eat(&Token::Pipe) {
        members.push(parse_intersection(stream, depth)?);
    }
    Ok(collapse(members, TypeExpr::Union))
}

fn parse_intersection(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    stream.eat(&Token::Amp);
    let mut members = vec![parse_postfix(stream, depth)?];
    while stream.eat(&Token::Amp) {
        members.push(parse_postfix(stream, depth)?);
    }
    Ok(collapse(members, TypeExpr::Intersection))
}

fn collapse(mut members: Vec<TypeExpr>, wrap: fn(Vec<TypeExpr>) -> TypeExpr) -> TypeExpr {
    if members.len() == 1 {
        members.remove(0)
    } else {
        wrap(members)
    }
}

fn parse_postfix(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    let mut expr = parse_primary(stream, depth)?;
    while stream.eat(&Token::LBracket) {
        if stream.eat(&Token::RBracket) {
            expr = TypeExpr::Array(Box::new(expr));
        } else {
            let index = parse_type(stream, depth)?;
            stream.expect(Token::RBracket, "to close an indexed access")?;
            expr = TypeExpr::Indexed {
                object: Box::new(expr),
                index: Box::new(index),
            };
        }
    }
    Ok(expr)
}

fn parse_primary(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    match stream.peek() {
        Some(Token::Ident(keyword)) if keyword == "infer" => match stream.peek_nth(1) {
            Some(Token::Ident(name)) => {
                stream.advance();
                stream.advance();
                Ok(TypeExpr::Infer(name.clone()))
            }
            _ => parse_reference(stream, depth),
        },
        Some(Token::Ident(keyword))
            if keyword == "new" && matches!(stream.peek_nth(1), Some(Token::LParen | Token::Lt)) =>
        {
            stream.advance();
            parse_function(stream, depth)
        }
        Some(Token::Lt) => parse_function(stream, depth),
        Some(Token::LParen) if stream.paren_opens_function() => parse_function(stream, depth),
        Some(Token::Ident(name))
            if PREFIX_OPERATORS.contains(&name.as_str()) && starts_type(stream.peek_nth(1)) =>
        {
            stream.advance();
            let operand = parse_postfix(stream, enter(depth)?)?;
            Ok(TypeExpr::Operator {
                op: name.clone(),
                operand: Box::new(operand),
            })
        }
        Some(Token::Ident(_)) => parse_reference(stream, depth),
        Some(Token::Str(text)) => {
            stream.advance();
            Ok(TypeExpr::StringLiteral(text.clone()))
        }
        Some(Token::Number(n)) => {
            stream.advance();
            Ok(TypeExpr::NumberLiteral(n.clone()))
        }
        Some(Token::Minus) => {
            stream.advance();
            match stream.peek() {
                Some(Token::Number(n)) => {
                    stream.advance();
                    Ok(TypeExpr::NumberLiteral(format!("-{}", n)))
                }
                _ => Err(stream.unexpected("after '-'")),
            }
        }
        Some(Token::LBracket) => parse_tuple(stream, depth),
        Some(Token::LBrace) => parse_object(stream, depth),
        Some(Token::LParen) => {
            stream.advance();
            let inner = parse_type(stream, depth)?;
            stream.expect(Token::RParen, "to close a parenthesized type")?;
            Ok(inner)
        }
        _ => Err(stream.unexpected("in type expression")),
    }
}

/// Whether `token` can begin a type, used to tell `keyof T` from a type named `keyof`.
fn starts_type(token: Option<&Token>) -> bool {
    matches!(
        token,
        Some(
            Token::Ident(_)
                | Token::Str(_)
                | Token::Number(_)
                | Token::Minus
                | Token::LBracket
                | Token::LBrace
                | Token::LParen
        )
    )
}

fn parse_reference(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    let mut path = Vec::new();
    loop {
        match stream.peek() {
            Some(Token::Ident(segment)) => {
                path.push(segment.clone());
                stream.advance();
            }
            _ => return Err(stream.unexpected("in qualified name")),
        }
        if !stream.eat(&Token::Dot) {
            break;
        }
    }

    let mut args = Vec::new();
    if stream.eat(&Token::Lt) {
        let depth = enter(depth)?;
        loop {
            args.push(parse_type(stream, depth)?);
            if !stream.eat(&Token::Comma) || stream.check(&Token::Gt) {
                break;
            }
        }
        stream.expect(Token::Gt, "to close generic arguments")?;
    }

    Ok(TypeExpr::Reference { path, args })
}

fn parse_tuple(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    let depth = enter(depth)?;
    stream.expect(Token::LBracket, "to open a tuple")?;
    let mut elements = Vec::new();
    while !stream.check(&Token::RBracket) {
        let element = if stream.eat(&Token::Ellipsis) {
            TypeExpr::Rest(Box::new(parse_type(stream, depth)?))
        } else {
            parse_type(stream, depth)?
        };
        stream.eat(&Token::Question);
        elements.push(element);
        if !stream.eat(&Token::Comma) {
            break;
        }
    }
    stream.expect(Token::RBracket, "to close a tuple")?;
    Ok(TypeExpr::Tuple(elements))
}

fn parse_object(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    let depth = enter(depth)?;
    stream.expect(Token::LBrace, "to open an object type")?;
    let mut members = Vec::new();
    while !stream.check(&Token::RBrace) {
        members.push(parse_member(stream, depth)?);
        if !(stream.eat(&Token::Semi) || stream.eat(&Token::Comma)) {
            break;
        }
    }
    stream.expect(Token::RBrace, "to close an object type")?;
    Ok(TypeExpr::Object(members))
}

fn parse_member(stream: &mut TokenStream, depth: usize) -> Result<ObjectMember, TypeExprError> {
    if matches!(stream.peek(), Some(Token::Plus | Token::Minus))
        && matches!(stream.peek_nth(1), Some(Token::Ident(m)) if m == "readonly")
    {
        stream.advance();
    }
    if stream.check_keyword("readonly")
        && !matches!(
            stream.peek_nth(1),
            Some(Token::Colon | Token::Question | Token::LParen | Token::Lt)
        )
    {
        stream.advance();
    }

    if stream.eat(&Token::LBracket) {
        return parse_bracketed_member(stream, depth);
    }

    let key = match stream.peek() {
        Some(Token::Ident(key) | Token::Str(key) | Token::Number(key)) => key.clone(),
        _ => return Err(stream.unexpected("as an object key")),
    };
    stream.advance();
    stream.eat(&Token::Question);

    let value = if stream.check(&Token::LParen) || stream.check(&Token::Lt) {
        let type_params = parse_type_params(stream, depth)?;
        let params = parse_params(stream, depth)?;
        let ret = if stream.eat(&Token::Colon) {
            parse_return(stream, depth)?
        } else {
            TypeExpr::Reference {
                path: vec!["any".to_string()],
                args: Vec::new(),
            }
        };
        TypeExpr::Function {
            type_params,
            params,
            ret: Box::new(ret),
        }
    } else {
        stream.expect(Token::Colon, "after an object key")?;
        parse_type(stream, depth)?
    };
    Ok(ObjectMember::Property { key, value })
}

/// An index signature or a mapped member, after its opening `[`.
fn parse_bracketed_member(
    stream: &mut TokenStream,
    depth: usize,
) -> Result<ObjectMember, TypeExprError> {
    let key = match stream.peek() {
        Some(Token::Ident(key)) => key.clone(),
        _ => return Err(stream.unexpected("as an index signature key")),
    };
    stream.advance();

    if stream.eat_keyword("in") {
        let source = parse_type(stream, depth)?;
        let rename = if stream.eat_keyword("as") {
            Some(parse_type(stream, depth)?)
        } else {
            None
        };
        stream.expect(Token::RBracket, "to close a mapped key")?;
        if stream.eat(&Token::Plus) || stream.eat(&Token::Minus) {
            stream.expect(Token::Question, "after a mapped modifier")?;
        } else {
            stream.eat(&Token::Question);
        }
        stream.expect(Token::Colon, "after a mapped key")?;
        let value = parse_type(stream, depth)?;
        return Ok(ObjectMember::Mapped {
            key,
            source,
            rename,
            value,
        });
    }

    stream.expect(Token::Colon, "after an index signature key")?;
    let key_type = parse_type(stream, depth)?;
    stream.expect(Token::RBracket, "to close an index signature")?;
    stream.expect(Token::Colon, "after an index signature")?;
    let value = parse_type(stream, depth)?;
    Ok(ObjectMember::Index {
        key,
        key_type,
        value,
    })
}

fn parse_function(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    let depth = enter(depth)?;
    let type_params = parse_type_params(stream, depth)?;
    let params = parse_params(stream, depth)?;
    stream.expect(Token::Arrow, "after function parameters")?;
    let ret = parse_return(stream, depth)?;
    Ok(TypeExpr::Function {
        type_params,
        params,
        ret: Box::new(ret),
    })
}

/// `<T extends C = D, ...>`, or nothing when no `<` is next.
fn parse_type_params(
    stream: &mut TokenStream,
    depth: usize,
) -> Result<Vec<TypeParam>, TypeExprError> {
    let mut type_params = Vec::new();
    if !stream.eat(&Token::Lt) {
        return Ok(type_params);
    }
    while !stream.check(&Token::Gt) {
        let name = match stream.peek() {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(stream.unexpected("as a type parameter")),
        };
        stream.advance();
        let constraint = if stream.eat_keyword("extends") {
            Some(parse_type(stream, depth)?)
        } else {
            None
        };
        let default = if stream.eat(&Token::Eq) {
            Some(parse_type(stream, depth)?)
        } else {
            None
        };
        type_params.push(TypeParam {
            name,
            constraint,
            default,
        });
        if !stream.eat(&Token::Comma) {
            break;
        }
    }
    stream.expect(Token::Gt, "to close type parameters")?;
    Ok(type_params)
}

fn parse_params(stream: &mut TokenStream, depth: usize) -> Result<Vec<Param>, TypeExprError> {
    stream.expect(Token::LParen, "to open function parameters")?;
    let mut params = Vec::new();
    while !stream.check(&Token::RParen) {
        stream.eat(&Token::Ellipsis);
        let name = match stream.peek() {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(stream.unexpected("as a parameter name")),
        };
        stream.advance();
        stream.eat(&Token::Question);
        let ty = if stream.eat(&Token::Colon) {
            Some(parse_type(stream, depth)?)
        } else {
            None
        };
        params.push(Param { name, ty });
        if !stream.eat(&Token::Comma) {
            break;
        }
    }
    stream.expect(Token::RParen, "to close function parameters")?;
    Ok(params)
}

/// A return type, with any `x is T` or `asserts x is T` predicate reduced to `T`.
fn parse_return(stream: &mut TokenStream, depth: usize) -> Result<TypeExpr, TypeExprError> {
    if stream.check_keyword("asserts") && matches!(stream.peek_nth(1), Some(Token::Ident(_))) {
        stream.advance();
        stream.advance();
        if !stream.eat_keyword("is") {
            return Ok(TypeExpr::Reference {
                path: vec!["void".to_string()],
                args: Vec::new(),
            });
        }
    } else if matches!(stream.peek(), Some(Token::Ident(_)))
        && matches!(stream.peek_nth(1), Some(Token::Ident(kw)) if kw == "is")
    {
        stream.advance();
        stream.advance();
    }
    parse_type(stream, depth)
}
