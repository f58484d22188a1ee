//! ML Parser
//!
//! Builds the template AST from markup tokens, classifying attributes into
//! plain attributes, property bindings and event bindings, and parsing every
//! binding expression. The first error aborts the parse.

use super::ast::*;
use super::lexer::tokenize;
use super::tags::{is_void_element, tag_names_match};
use super::tokens::{AttrValue, Token};
use crate::expression_parser::ast::ASTWithSource;
use crate::expression_parser::{ExpressionError, Parser as ExprParser};
use crate::parse_util::{ParseError, ParseErrorKind, ParseSourceFile, ParseSourceSpan};

const BIND_PREFIX: &str = "bind-";
const ON_PREFIX: &str = "on-";

/// Parser options
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub preserve_whitespaces: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            preserve_whitespaces: true,
        }
    }
}

/// Main parser class
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {
    expression_parser: ExprParser,
    options: ParseOptions,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Parser {
            expression_parser: ExprParser::new(),
            options,
        }
    }

    pub fn parse(&self, source: &str, url: &str) -> Result<Template, ParseError> {
        let file = ParseSourceFile::new(source, url);
        let tokens = tokenize(&file)?;
        let mut builder = TreeBuilder {
            file: &file,
            expression_parser: &self.expression_parser,
            options: self.options,
            root_nodes: Vec::new(),
            stack: Vec::new(),
        };
        builder.build(tokens)?;
        let nodes = builder.root_nodes;
        Ok(Template { nodes, file })
    }
}

/// Parse a template with default options.
pub fn parse_template(source: &str, url: &str) -> Result<Template, ParseError> {
    Parser::new().parse(source, url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingKind {
    Property,
    Event,
}

struct TreeBuilder<'a> {
    file: &'a ParseSourceFile,
    expression_parser: &'a ExprParser,
    options: ParseOptions,
    root_nodes: Vec<Node>,
    stack: Vec<Element>,
}

impl<'a> TreeBuilder<'a> {
    fn error(&self, kind: ParseErrorKind, msg: impl Into<String>, span: ParseSourceSpan) -> ParseError {
        ParseError::new(kind, msg, &self.file.url, span)
    }

    fn build(&mut self, tokens: Vec<Token>) -> Result<(), ParseError> {
        let mut tokens = tokens.into_iter();
        while let Some(token) = tokens.next() {
            match token {
                Token::Text { value, start, end } => self.consume_text(value, start, end),
                Token::Interpolation {
                    expression,
                    expr_start,
                    start,
                    end,
                } => self.consume_interpolation(&expression, expr_start, start, end)?,
                Token::TagOpenStart { name, start, end } => {
                    let mut element = Element {
                        name,
                        attributes: Vec::new(),
                        event_bindings: Vec::new(),
                        property_bindings: Vec::new(),
                        children: Vec::new(),
                        source_span: self.file.span(start, end),
                        start_source_span: self.file.span(start, end),
                        end_source_span: None,
                    };
                    let mut self_closing = false;
                    let mut open_end = None;
                    while let Some(next) = tokens.next() {
                        match next {
                            Token::Attr {
                                name,
                                start,
                                name_end,
                                end,
                                value,
                            } => self.consume_attribute(&mut element, name, start, name_end, end, value)?,
                            Token::TagOpenEnd { self_closing: closing, end } => {
                                self_closing = closing;
                                open_end = Some(end);
                                break;
                            }
                            _ => {
                                return Err(self.error(
                                    ParseErrorKind::MalformedTag,
                                    format!("Unterminated start tag <{}>", element.name),
                                    element.start_source_span,
                                ))
                            }
                        }
                    }
                    let Some(open_end) = open_end else {
                        return Err(self.error(
                            ParseErrorKind::MalformedTag,
                            format!("Unterminated start tag <{}>", element.name),
                            element.start_source_span,
                        ));
                    };
                    element.start_source_span = self.file.span(start, open_end);
                    element.source_span = element.start_source_span;
                    if self_closing || is_void_element(&element.name) {
                        self.add_node(Node::Element(element));
                    } else {
                        self.stack.push(element);
                    }
                }
                Token::TagClose { name, start, end } => self.consume_close(&name, start, end)?,
                Token::Attr { start, end, .. } => {
                    return Err(self.error(
                        ParseErrorKind::MalformedTag,
                        "Attribute outside of a start tag",
                        self.file.span(start, end),
                    ))
                }
                Token::TagOpenEnd { end, .. } => {
                    return Err(self.error(
                        ParseErrorKind::MalformedTag,
                        "Unexpected end of start tag",
                        self.file.span(end.saturating_sub(1), end),
                    ))
                }
            }
        }

        if let Some(unclosed) = self.stack.last() {
            return Err(self.error(
                ParseErrorKind::UnclosedElement,
                format!("Unclosed element <{}>", unclosed.name),
                unclosed.start_source_span,
            ));
        }
        Ok(())
    }

    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }

    fn consume_text(&mut self, value: String, start: usize, end: usize) {
        if !self.options.preserve_whitespaces && value.trim().is_empty() {
            return;
        }
        let source_span = self.file.span(start, end);
        self.add_node(Node::Text(Text { value, source_span }));
    }

    fn consume_interpolation(
        &mut self,
        expression: &str,
        expr_start: usize,
        start: usize,
        end: usize,
    ) -> Result<(), ParseError> {
        let location = self.file.location_at(expr_start);
        let parsed = self
            .expression_parser
            .parse_binding(expression, location)
            .map_err(|e| self.binding_error(e))?;
        self.add_node(Node::Interpolation(Interpolation {
            expression: parsed,
            source_span: self.file.span(start, end),
        }));
        Ok(())
    }

    fn consume_close(&mut self, name: &str, start: usize, end: usize) -> Result<(), ParseError> {
        let span = self.file.span(start, end);
        if is_void_element(name) {
            return Err(self.error(
                ParseErrorKind::UnexpectedClosingTag,
                format!("Void element <{}> cannot have a closing tag", name),
                span,
            ));
        }
        match self.stack.iter().rposition(|el| tag_names_match(&el.name, name)) {
            Some(index) if index == self.stack.len() - 1 => {
                if let Some(mut element) = self.stack.pop() {
                    element.end_source_span = Some(span);
                    element.source_span = ParseSourceSpan::new(element.start_source_span.start, span.end);
                    self.add_node(Node::Element(element));
                }
                Ok(())
            }
            Some(_) => {
                let unclosed = &self.stack[self.stack.len() - 1];
                Err(self.error(
                    ParseErrorKind::UnclosedElement,
                    format!("Unclosed element <{}> before </{}>", unclosed.name, name),
                    unclosed.start_source_span,
                ))
            }
            None => Err(self.error(
                ParseErrorKind::UnexpectedClosingTag,
                format!("Unexpected closing tag </{}>", name),
                span,
            )),
        }
    }

    fn consume_attribute(
        &self,
        element: &mut Element,
        name: String,
        start: usize,
        name_end: usize,
        end: usize,
        value: Option<AttrValue>,
    ) -> Result<(), ParseError> {
        let source_span = self.file.span(start, end);
        let key_span = self.file.span(start, name_end);
        let malformed = |msg: String| self.error(ParseErrorKind::MalformedBindingSyntax, msg, key_span);

        let (kind, bound_name) = if name.starts_with("[(") {
            return Err(malformed(format!("Two-way binding {} is not supported", name)));
        } else if let Some(inner) = name.strip_prefix('[') {
            match inner.strip_suffix(']') {
                Some(bound) => (BindingKind::Property, bound),
                None => return Err(malformed(format!("Unterminated property binding {}", name))),
            }
        } else if let Some(inner) = name.strip_prefix('(') {
            match inner.strip_suffix(')') {
                Some(bound) => (BindingKind::Event, bound),
                None => return Err(malformed(format!("Unterminated event binding {}", name))),
            }
        } else if let Some(bound) = name.strip_prefix(BIND_PREFIX) {
            (BindingKind::Property, bound)
        } else if let Some(bound) = name.strip_prefix(ON_PREFIX) {
            (BindingKind::Event, bound)
        } else {
            if name.contains(['[', ']', '(', ')']) {
                return Err(malformed(format!("Unexpected bracket in attribute name {}", name)));
            }
            element.attributes.push(Attribute {
                name,
                value: value.map(|v| v.text),
                source_span,
            });
            return Ok(());
        };

        if !is_valid_binding_name(bound_name) {
            return Err(malformed(format!("Invalid binding name in {}", name)));
        }
        if kind == BindingKind::Event && bound_name.contains('.') {
            return Err(malformed(format!(
                "Event binding {} cannot carry a modifier; the event name is matched against the event's type",
                name
            )));
        }
        let Some(value) = value else {
            return Err(malformed(format!("Binding {} requires an expression", name)));
        };

        let location = self.file.location_at(value.start);
        let parsed: ASTWithSource = match kind {
            BindingKind::Event => self.expression_parser.parse_action(&value.text, location),
            BindingKind::Property => self.expression_parser.parse_binding(&value.text, location),
        }
        .map_err(|e| self.binding_error(e))?;

        match kind {
            BindingKind::Event => element.event_bindings.push(EventBinding {
                name: bound_name.to_string(),
                handler: parsed,
                source_span,
                key_span,
            }),
            BindingKind::Property => element.property_bindings.push(PropertyBinding {
                name: bound_name.to_string(),
                value: parsed,
                source_span,
                key_span,
            }),
        }
        Ok(())
    }

    fn binding_error(&self, error: ExpressionError) -> ParseError {
        let span = error.source_span;
        self.error(ParseErrorKind::MalformedBindingSyntax, error.to_string(), span)
    }
}

/// Property names may carry prefixes (`class.active`, `attr.aria-label`).
/// Event names are checked separately, since a dot there would be a modifier.
fn is_valid_binding_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.ends_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '$'))
}
