/**
 * Binding Expression Parser
 *
 * Recursive descent parser for the restricted binding grammar:
 *
 *   expression := head ('.' name)* ('(' arguments? ')')?
 *   head       := identifier | '$event'
 *   argument   := head ('.' name)* | literal
 *
 * Function literals, computed member access, operators and nested calls are
 * rejected at parse time.
 */
use bitflags::bitflags;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseLocation, ParseSourceSpan};

bitflags! {
    /// Parse flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParseFlags: u8 {
        /// Event handler expression; a trailing `;` is tolerated.
        const ACTION = 1 << 0;
    }
}

/// A syntax error inside a binding expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at column {column} in [{input}]", column = .span.start + 1)]
pub struct ExpressionError {
    pub message: String,
    pub input: String,
    pub span: ParseSpan,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser { lexer: Lexer::new() }
    }

    /// Parse an action expression (event handler). `location` is where the
    /// expression text starts in the template.
    pub fn parse_action(&self, input: &str, location: ParseLocation) -> Result<ASTWithSource, ExpressionError> {
        self.parse(input, location, ParseFlags::ACTION)
    }

    /// Parse a binding expression (property binding or interpolation).
    pub fn parse_binding(&self, input: &str, location: ParseLocation) -> Result<ASTWithSource, ExpressionError> {
        self.parse(input, location, ParseFlags::empty())
    }

    fn parse(&self, input: &str, location: ParseLocation, flags: ParseFlags) -> Result<ASTWithSource, ExpressionError> {
        let tokens = self.lexer.tokenize(input);
        let mut parse_ast = ParseAST {
            input,
            location,
            tokens,
            index: 0,
            flags,
        };
        let ast = parse_ast.parse_expression()?;
        let source_span = ParseSourceSpan::new(location, location.advance(input, input.len()));
        Ok(ASTWithSource::new(ast, input.to_string(), source_span))
    }
}

struct ParseAST<'a> {
    input: &'a str,
    location: ParseLocation,
    tokens: Vec<Token>,
    index: usize,
    flags: ParseFlags,
}

impl<'a> ParseAST<'a> {
    fn next(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn input_index(&self) -> usize {
        self.next().map(|t| t.index).unwrap_or(self.input.len())
    }

    fn source_span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::new(
            self.location.advance(self.input, start),
            self.location.advance(self.input, end),
        )
    }

    fn span(&self, start: usize) -> (ParseSpan, ParseSourceSpan) {
        let end = if self.index > 0 {
            self.tokens[self.index - 1].end
        } else {
            start
        };
        (ParseSpan::new(start, end), self.source_span(start, end))
    }

    fn error_at(&self, message: impl Into<String>, start: usize, end: usize) -> ExpressionError {
        ExpressionError {
            message: message.into(),
            input: self.input.to_string(),
            span: ParseSpan::new(start, end),
            source_span: self.source_span(start, end),
        }
    }

    fn error(&self, message: impl Into<String>) -> ExpressionError {
        match self.next() {
            Some(token) => self.error_at(message, token.index, token.end),
            None => self.error_at(message, self.input.len(), self.input.len()),
        }
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.next().is_some_and(|t| t.is_character(code)) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn parse_expression(&mut self) -> Result<AST, ExpressionError> {
        if self.tokens.is_empty() {
            return Err(self.error("Empty expression"));
        }
        let ast = self.parse_chain(true)?;
        if self.flags.contains(ParseFlags::ACTION) {
            self.consume_optional_character(';');
        }
        if let Some(token) = self.next() {
            let message = if token.is_error() {
                token.str_value.clone()
            } else {
                format!("Unexpected token '{}'", describe(token))
            };
            return Err(self.error(message));
        }
        Ok(ast)
    }

    /// A member chain, optionally ending in a call when `top_level`.
    fn parse_chain(&mut self, top_level: bool) -> Result<AST, ExpressionError> {
        let start = self.input_index();
        let mut result = self.parse_primary(top_level)?;

        loop {
            if self.consume_optional_character(chars::PERIOD) {
                match &result {
                    AST::Call(_) => {
                        return Err(self.error("Member access on a call result is not supported"))
                    }
                    AST::LiteralPrimitive(_) => {
                        return Err(self.error("Member access on a literal is not supported"))
                    }
                    _ => {}
                }
                let Some(token) = self.next().cloned() else {
                    return Err(self.error("Expected identifier for property access"));
                };
                if !(token.is_identifier() || token.is_keyword()) {
                    return Err(self.error("Expected identifier for property access"));
                }
                self.index += 1;
                let (span, source_span) = self.span(start);
                result = AST::PropertyRead(PropertyRead {
                    span,
                    source_span,
                    name_span: self.source_span(token.index, token.end),
                    receiver: Box::new(result),
                    name: token.str_value,
                });
            } else if self.next().is_some_and(|t| t.is_character(chars::LPAREN)) {
                if !top_level {
                    return Err(self.error("Nested calls are not supported in call arguments"));
                }
                match &result {
                    AST::Call(_) => return Err(self.error("Chained calls are not supported")),
                    AST::LiteralPrimitive(_) => return Err(self.error("Literals cannot be called")),
                    _ => {}
                }
                self.index += 1;
                let args = self.parse_call_arguments()?;
                let (span, source_span) = self.span(start);
                result = AST::Call(Call {
                    span,
                    source_span,
                    receiver: Box::new(result),
                    args,
                });
            } else {
                return Ok(result);
            }
        }
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<AST>, ExpressionError> {
        let mut args = Vec::new();
        if self.consume_optional_character(chars::RPAREN) {
            return Ok(args);
        }
        loop {
            if self.next().is_none() {
                return Err(self.error("Missing expected )"));
            }
            args.push(self.parse_chain(false)?);
            if self.consume_optional_character(chars::COMMA) {
                continue;
            }
            if self.consume_optional_character(chars::RPAREN) {
                return Ok(args);
            }
            return Err(self.error("Missing expected )"));
        }
    }

    fn parse_primary(&mut self, top_level: bool) -> Result<AST, ExpressionError> {
        let Some(token) = self.next().cloned() else {
            return Err(self.error("Unexpected end of expression"));
        };
        let start = token.index;

        match token.token_type {
            TokenType::Identifier => {
                self.index += 1;
                let (span, source_span) = self.span(start);
                if token.str_value == EVENT_SENTINEL {
                    return Ok(AST::EventSentinel(EventSentinel { span, source_span }));
                }
                let receiver_span = self.source_span(start, start);
                Ok(AST::PropertyRead(PropertyRead {
                    span,
                    source_span,
                    name_span: source_span,
                    receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
                        span: ParseSpan::new(start, start),
                        source_span: receiver_span,
                    })),
                    name: token.str_value,
                }))
            }
            TokenType::Error => Err(self.error(token.str_value)),
            _ if top_level => Err(self.error(format!(
                "Binding must start with a component member or {}, found '{}'",
                EVENT_SENTINEL,
                describe(&token)
            ))),
            _ => self.parse_literal(),
        }
    }

    fn parse_literal(&mut self) -> Result<AST, ExpressionError> {
        let start = self.input_index();
        let negate = self.consume_optional_character(chars::MINUS);
        let Some(token) = self.next().cloned() else {
            return Err(self.error("Unexpected end of expression"));
        };

        let value = match token.token_type {
            TokenType::Number => {
                if negate {
                    LiteralValue::Number(-token.num_value)
                } else {
                    LiteralValue::Number(token.num_value)
                }
            }
            _ if negate => return Err(self.error("Only numbers can be negated")),
            TokenType::String => LiteralValue::String(token.str_value.clone()),
            TokenType::Keyword => match token.str_value.as_str() {
                "true" => LiteralValue::Boolean(true),
                "false" => LiteralValue::Boolean(false),
                "null" => LiteralValue::Null,
                _ => LiteralValue::Undefined,
            },
            _ => return Err(self.error(format!("Unexpected token '{}'", describe(&token)))),
        };
        self.index += 1;
        let (span, source_span) = self.span(start);
        Ok(AST::LiteralPrimitive(LiteralPrimitive {
            span,
            source_span,
            value,
        }))
    }
}

fn describe(token: &Token) -> String {
    match token.token_type {
        TokenType::Number => token.num_value.to_string(),
        TokenType::String => format!("\"{}\"", token.str_value),
        _ => token.str_value.clone(),
    }
}
