//! Textual grammar for [`TypeExpr`].
//!
//! ```text
//! expr     := primary ('|' primary)*
//! primary  := 'bool' | 'int' | 'float' | 'str' | 'path' | 'raw' | 'None' | 'any'
//!           | ('list' | 'List' | 'Sequence') '[' expr ']'
//!           | 'Optional' '[' expr ']'
//!           | 'Union' '[' expr (',' expr)* ']'
//!           | ('dict' | 'Dict') '[' expr ',' expr ']'
//!           | 'Annotated' '[' expr ',' STRING ']'
//!           | IDENT '{' IDENT (',' IDENT)* '}'
//! ```
//!
//! Recognizing a form does not mean the classifier supports it; `dict[...]`
//! parses fine and is rejected later.

use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::types::{ScalarType, SymbolSet, TypeExpr};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Pipe,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '[' => tokens.push(Token::LBracket),
            ']' => tokens.push(Token::RBracket),
            '{' => tokens.push(Token::LBrace),
            '}' => tokens.push(Token::RBrace),
            ',' => tokens.push(Token::Comma),
            '|' => tokens.push(Token::Pipe),
            '"' | '\'' => {
                let quote = ch;
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => {
                            if let Some((_, escaped)) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        c => value.push(c),
                    }
                }
                if !closed {
                    return Err(format!("unterminated string starting at offset {idx}"));
                }
                tokens.push(Token::Str(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => return Err(format!("unexpected character '{other}' at offset {idx}")),
        }
    }

    Ok(tokens)
}

struct TypeParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl TypeParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected {expected:?}, found {token:?}")),
            None => Err(format!("expected {expected:?}, found end of input")),
        }
    }

    fn expr(&mut self) -> Result<TypeExpr, String> {
        let mut members = vec![self.primary()?];
        while self.peek() == Some(&Token::Pipe) {
            self.pos += 1;
            members.push(self.primary()?);
        }
        if members.len() == 1 {
            Ok(members.remove(0))
        } else {
            Ok(TypeExpr::Union(members))
        }
    }

    /// Parses `[ expr (, expr)* ]` and returns the members.
    fn bracketed(&mut self) -> Result<Vec<TypeExpr>, String> {
        self.expect(Token::LBracket)?;
        let mut items = vec![self.expr()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            items.push(self.expr()?);
        }
        self.expect(Token::RBracket)?;
        Ok(items)
    }

    fn single_arg(&mut self, form: &str) -> Result<TypeExpr, String> {
        let mut items = self.bracketed()?;
        if items.len() != 1 {
            return Err(format!("{form}[...] takes exactly one type"));
        }
        Ok(items.remove(0))
    }

    fn primary(&mut self) -> Result<TypeExpr, String> {
        let ident = match self.next() {
            Some(Token::Ident(ident)) => ident,
            Some(token) => return Err(format!("expected a type, found {token:?}")),
            None => return Err("expected a type, found end of input".to_string()),
        };

        match ident.as_str() {
            "bool" => Ok(TypeExpr::Bool),
            "int" => Ok(TypeExpr::Scalar(ScalarType::Int)),
            "float" => Ok(TypeExpr::Scalar(ScalarType::Float)),
            "str" => Ok(TypeExpr::Scalar(ScalarType::Str)),
            "path" => Ok(TypeExpr::Scalar(ScalarType::Path)),
            "raw" => Ok(TypeExpr::Raw),
            "None" => Ok(TypeExpr::NoneType),
            "any" => Ok(TypeExpr::Any),
            "list" | "List" | "Sequence" => Ok(TypeExpr::sequence(self.single_arg("list")?)),
            "Optional" => Ok(TypeExpr::optional(self.single_arg("Optional")?)),
            "Union" => Ok(TypeExpr::Union(self.bracketed()?)),
            "dict" | "Dict" => {
                let mut items = self.bracketed()?;
                if items.len() != 2 {
                    return Err("dict[...] takes a key and a value type".to_string());
                }
                let value = items.remove(1);
                let key = items.remove(0);
                Ok(TypeExpr::Mapping(Box::new(key), Box::new(value)))
            }
            "Annotated" => {
                self.expect(Token::LBracket)?;
                let inner = self.expr()?;
                self.expect(Token::Comma)?;
                let doc = match self.next() {
                    Some(Token::Str(doc)) => doc,
                    other => return Err(format!("expected a quoted doc string, found {other:?}")),
                };
                self.expect(Token::RBracket)?;
                Ok(TypeExpr::annotated(inner, doc))
            }
            _ if self.peek() == Some(&Token::LBrace) => self.symbols(ident),
            _ => Err(format!("unknown type `{ident}`")),
        }
    }

    fn symbols(&mut self, name: String) -> Result<TypeExpr, String> {
        self.expect(Token::LBrace)?;
        let mut symbols: Vec<String> = Vec::new();
        loop {
            match self.next() {
                Some(Token::Ident(symbol)) => {
                    if symbols.contains(&symbol) {
                        return Err(format!("duplicate symbol `{symbol}` in `{name}`"));
                    }
                    symbols.push(symbol);
                }
                Some(Token::RBrace) if symbols.is_empty() => {
                    return Err(format!("symbol set `{name}` is empty"));
                }
                other => return Err(format!("expected a symbol name, found {other:?}")),
            }
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RBrace) => break,
                other => return Err(format!("expected ',' or '}}', found {other:?}")),
            }
        }
        Ok(TypeExpr::Symbols(SymbolSet::new(name, symbols)))
    }
}

/// Parses a type expression from its textual form.
///
/// # Examples
///
/// ```
/// use sigparse_core::{parse_type_expr, ScalarType, TypeExpr};
///
/// let ty = parse_type_expr("list[str] | None").unwrap();
/// assert!(ty.is_optional());
///
/// let mode = parse_type_expr("Mode{CREATE, LIST, DELETE}").unwrap();
/// assert_eq!(mode.type_name(), "Mode");
///
/// assert!(parse_type_expr("list[").is_err());
/// ```
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidTypeExpr {
        input: input.to_string(),
        reason,
    };

    let tokens = tokenize(input).map_err(invalid)?;
    let mut parser = TypeParser { tokens, pos: 0 };
    let expr = parser.expr().map_err(invalid)?;
    if let Some(token) = parser.peek() {
        return Err(invalid(format!("unexpected trailing {token:?}")));
    }
    Ok(expr)
}

impl FromStr for TypeExpr {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_expr(s)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_type_expr(&value)
    }
}
