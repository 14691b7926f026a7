//! Recursive descent stylesheet parser.
//!
//! Parses source text into [`StyleRule`]s using the logos-based tokenizer from
//! [`crate::style::tokenizer`]. A rule with a comma-separated selector list
//! expands into one rule per selector, in order, sharing the same properties.
//!
//! Declaration values:
//!
//! | source            | value                       |
//! |-------------------|-----------------------------|
//! | `4`               | `Number(4)`                 |
//! | `10 20`           | `Vec2(10, 20)`              |
//! | `1 0 0` / `1 0 0 0.5` | `Color`                 |
//! | `true` / `false`  | `Bool`                      |
//! | `center`          | `Ident("center")`           |
//! | `"text"`          | `Str("text")`               |

use logos::Logos;

use crate::geometry::{Color, Vec2};

use super::selector::{Selector, SelectorElement};
use super::stylesheet::{StyleProperty, StyleRule};
use super::tokenizer::Token;
use super::value::StyleValue;

/// Errors from stylesheet parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid value for '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Replace each `/* ... */` comment with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            // Unterminated comment consumes the rest of the input.
            None => "",
        };
    }
    result.push_str(rest);
    result
}

fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: tokens.len(),
                byte_start: span.start,
                byte_end: span.end,
            });
        }
    }

    tokens
}

/// Parse stylesheet source into rules, in declaration order.
pub fn parse_rules(input: &str) -> Result<Vec<StyleRule>, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser { tokens, cursor: 0 };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.extend(parser.parse_rule()?);
    }

    Ok(rules)
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Consume an identifier that names a class, id, or property.
    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.text),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token directly follows the previous one
    /// with no whitespace in between.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.byte_start == prev.byte_end)
    }

    /// `selectors { declarations }`, expanded to one rule per selector.
    fn parse_rule(&mut self) -> Result<Vec<StyleRule>, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let properties = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(selectors
            .into_iter()
            .map(|selector| StyleRule::new(selector, properties.clone()))
            .collect())
    }

    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek_is(&Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }
        Ok(selectors)
    }

    /// Compound selectors joined by combinators, folded left to right:
    /// `A B > C` is "C whose parent is a B inside an A".
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut selector = Selector::Element(self.parse_compound_selector()?);

        loop {
            match self.peek().map(|t| &t.token) {
                Some(Token::GreaterThan) => {
                    self.advance();
                    let child = Selector::Element(self.parse_compound_selector()?);
                    selector = Selector::child(selector, child);
                }
                // A selector-starting token separated by whitespace is a
                // descendant combinator; adjacent ones were already consumed.
                Some(Token::Ident | Token::Hash | Token::Dot | Token::Star | Token::PseudoClass) => {
                    let descendant = Selector::Element(self.parse_compound_selector()?);
                    selector = Selector::descendant(selector, descendant);
                }
                _ => break,
            }
        }

        Ok(selector)
    }

    /// `Type#id.class:pseudo` with no whitespace between the parts.
    fn parse_compound_selector(&mut self) -> Result<SelectorElement, ParseError> {
        let mut element = SelectorElement::new();
        let mut parts = 0usize;

        loop {
            if parts > 0 && !self.is_adjacent() {
                break;
            }
            match self.peek().map(|t| t.token.clone()) {
                Some(Token::Ident) if parts == 0 => {
                    element.element_type = self.advance().map(|t| t.text);
                }
                Some(Token::Star) if parts == 0 => {
                    self.advance();
                }
                Some(Token::Dot) => {
                    self.advance();
                    element.classes.push(self.expect_ident("class name after '.'")?);
                }
                Some(Token::Hash) => {
                    self.advance();
                    element.identifier = Some(self.expect_ident("identifier after '#'")?);
                }
                Some(Token::PseudoClass) => {
                    if let Some(tok) = self.advance() {
                        element.pseudo_classes.push(tok.text[1..].to_string());
                    }
                }
                _ => break,
            }
            parts += 1;
        }

        if parts == 0 {
            return Err(ParseError::UnexpectedToken {
                position: self.current_pos(),
                message: "expected selector".into(),
            });
        }

        Ok(element)
    }

    fn parse_declarations(&mut self) -> Result<Vec<StyleProperty>, ParseError> {
        let mut properties = Vec::new();
        while self.peek().is_some_and(|t| t.token != Token::BraceClose) {
            properties.push(self.parse_declaration()?);
        }
        Ok(properties)
    }

    /// `name: value...;`
    fn parse_declaration(&mut self) -> Result<StyleProperty, ParseError> {
        let name = self.expect_ident("property name")?;

        let mut values: Vec<PToken> = Vec::new();
        // `name:value` with no space lexes the value as a pseudo-class.
        match self.advance() {
            Some(tok) if tok.token == Token::Colon => {}
            Some(tok) if tok.token == Token::PseudoClass => {
                values.push(PToken {
                    token: Token::Ident,
                    text: tok.text[1..].to_string(),
                    ..tok
                });
            }
            Some(tok) => {
                return Err(ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("expected ':' after '{name}', got '{}'", tok.text),
                })
            }
            None => return Err(ParseError::UnexpectedEof(format!("expected ':' after '{name}'"))),
        }

        while let Some(tok) = self.peek() {
            if matches!(tok.token, Token::Semicolon | Token::BraceClose) {
                break;
            }
            if let Some(tok) = self.advance() {
                values.push(tok);
            }
        }

        if self.peek_is(&Token::Semicolon) {
            self.advance();
        }

        let value = declaration_value(&name, &values)?;
        Ok(StyleProperty { name, value })
    }
}

/// Interpret the value tokens of one declaration.
fn declaration_value(property: &str, tokens: &[PToken]) -> Result<StyleValue, ParseError> {
    let invalid = |message: String| ParseError::InvalidValue {
        property: property.to_string(),
        message,
    };

    match tokens {
        [] => Err(invalid("missing value".into())),
        [single] if single.token == Token::Ident => Ok(match single.text.as_str() {
            "true" => StyleValue::Bool(true),
            "false" => StyleValue::Bool(false),
            other => StyleValue::Ident(other.to_string()),
        }),
        [single] if matches!(single.token, Token::StringLiteral | Token::StringLiteralSingle) => {
            let text = &single.text;
            Ok(StyleValue::Str(text[1..text.len() - 1].to_string()))
        }
        numbers if numbers.iter().all(|t| t.token == Token::Number) => {
            let parsed = numbers
                .iter()
                .map(|t| {
                    t.text
                        .parse::<f32>()
                        .map_err(|_| invalid(format!("invalid number '{}'", t.text)))
                })
                .collect::<Result<Vec<f32>, ParseError>>()?;
            match parsed.as_slice() {
                [n] => Ok(StyleValue::Number(*n)),
                [x, y] => Ok(StyleValue::Vec2(Vec2::new(*x, *y))),
                [r, g, b] => Ok(StyleValue::Color(Color::rgb(*r, *g, *b))),
                [r, g, b, a] => Ok(StyleValue::Color(Color::new(*r, *g, *b, *a))),
                _ => Err(invalid(format!("expected 1 to 4 numbers, got {}", parsed.len()))),
            }
        }
        other => Err(invalid(format!(
            "cannot combine {}",
            other.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
        ))),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
