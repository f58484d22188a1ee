//! ML Lexer
//!
//! Splits template markup into tags, attributes, literal text and
//! interpolation runs. Comments are skipped.

use super::tokens::{AttrValue, Token};
use crate::chars;
use crate::parse_util::{ParseError, ParseErrorKind, ParseSourceFile};

pub const INTERPOLATION_START: &str = "{{";
pub const INTERPOLATION_END: &str = "}}";
const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

pub fn tokenize(file: &ParseSourceFile) -> Result<Vec<Token>, ParseError> {
    let mut scanner = Scanner {
        file,
        input: &*file.content,
        index: 0,
        tokens: Vec::new(),
    };
    scanner.scan()?;
    Ok(scanner.tokens)
}

struct Scanner<'a> {
    file: &'a ParseSourceFile,
    input: &'a str,
    index: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> char {
        self.input[self.index..].chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, ahead: usize) -> char {
        self.input[self.index..].chars().nth(ahead).unwrap_or(chars::EOF)
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.index..]
    }

    fn advance(&mut self) {
        self.index += self.peek().len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn error(&self, kind: ParseErrorKind, msg: impl Into<String>, start: usize, end: usize) -> ParseError {
        ParseError::new(kind, msg, &self.file.url, self.file.span(start, end))
    }

    fn scan(&mut self) -> Result<(), ParseError> {
        while !self.at_end() {
            if self.rest().starts_with(COMMENT_START) {
                self.scan_comment()?;
            } else if self.rest().starts_with("</") {
                self.scan_tag_close()?;
            } else if self.peek() == chars::LT && self.peek_at(1).is_ascii_alphabetic() {
                self.scan_tag_open()?;
            } else if self.rest().starts_with(INTERPOLATION_START) {
                self.scan_interpolation()?;
            } else {
                self.scan_text();
            }
        }
        Ok(())
    }

    fn starts_markup(&self) -> bool {
        let rest = self.rest();
        rest.starts_with(INTERPOLATION_START)
            || rest.starts_with(COMMENT_START)
            || rest.starts_with("</")
            || (self.peek() == chars::LT && self.peek_at(1).is_ascii_alphabetic())
    }

    fn scan_text(&mut self) {
        let start = self.index;
        // At least one character, so a stray `<` still makes progress.
        self.advance();
        while !self.at_end() && !self.starts_markup() {
            self.advance();
        }
        self.tokens.push(Token::Text {
            value: self.input[start..self.index].to_string(),
            start,
            end: self.index,
        });
    }

    fn scan_comment(&mut self) -> Result<(), ParseError> {
        let start = self.index;
        match self.rest()[COMMENT_START.len()..].find(COMMENT_END) {
            Some(pos) => {
                self.index += COMMENT_START.len() + pos + COMMENT_END.len();
                Ok(())
            }
            None => Err(self.error(
                ParseErrorKind::MalformedTag,
                "Unterminated comment",
                start,
                start + COMMENT_START.len(),
            )),
        }
    }

    fn scan_interpolation(&mut self) -> Result<(), ParseError> {
        let start = self.index;
        let expr_start = start + INTERPOLATION_START.len();
        match self.input[expr_start..].find(INTERPOLATION_END) {
            Some(pos) => {
                let expr_end = expr_start + pos;
                self.index = expr_end + INTERPOLATION_END.len();
                self.tokens.push(Token::Interpolation {
                    expression: self.input[expr_start..expr_end].to_string(),
                    expr_start,
                    start,
                    end: self.index,
                });
                Ok(())
            }
            None => Err(self.error(
                ParseErrorKind::UnterminatedInterpolation,
                format!("Missing closing '{}' for interpolation", INTERPOLATION_END),
                start,
                expr_start,
            )),
        }
    }

    fn scan_name(&mut self) -> String {
        let start = self.index;
        while !self.at_end() && !chars::is_name_end(self.peek()) {
            self.advance();
        }
        self.input[start..self.index].to_string()
    }

    fn scan_tag_close(&mut self) -> Result<(), ParseError> {
        let start = self.index;
        self.index += 2;
        let name = self.scan_name();
        self.skip_whitespace();
        if name.is_empty() || self.peek() != chars::GT {
            return Err(self.error(
                ParseErrorKind::MalformedTag,
                "Malformed closing tag",
                start,
                self.index,
            ));
        }
        self.advance();
        self.tokens.push(Token::TagClose {
            name,
            start,
            end: self.index,
        });
        Ok(())
    }

    fn scan_tag_open(&mut self) -> Result<(), ParseError> {
        let start = self.index;
        self.advance();
        let name = self.scan_name();
        self.tokens.push(Token::TagOpenStart {
            name: name.clone(),
            start,
            end: self.index,
        });

        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Err(self.error(
                    ParseErrorKind::MalformedTag,
                    format!("Unterminated start tag <{}>", name),
                    start,
                    self.index,
                ));
            }
            match self.peek() {
                chars::GT => {
                    self.advance();
                    self.tokens.push(Token::TagOpenEnd {
                        self_closing: false,
                        end: self.index,
                    });
                    return Ok(());
                }
                chars::SLASH if self.peek_at(1) == chars::GT => {
                    self.index += 2;
                    self.tokens.push(Token::TagOpenEnd {
                        self_closing: true,
                        end: self.index,
                    });
                    return Ok(());
                }
                _ => self.scan_attribute()?,
            }
        }
    }

    fn scan_attribute(&mut self) -> Result<(), ParseError> {
        let start = self.index;
        let name = self.scan_name();
        if name.is_empty() {
            let ch = self.peek();
            self.advance();
            return Err(self.error(
                ParseErrorKind::MalformedTag,
                format!("Unexpected character \"{}\" in tag", ch),
                start,
                self.index,
            ));
        }
        let name_end = self.index;
        let before_value = self.index;
        self.skip_whitespace();
        if self.peek() != chars::EQ {
            self.index = before_value;
            self.tokens.push(Token::Attr {
                name,
                start,
                name_end,
                end: name_end,
                value: None,
            });
            return Ok(());
        }
        self.advance();
        self.skip_whitespace();

        let quote = self.peek();
        let value = if chars::is_quote(quote) {
            self.advance();
            let value_start = self.index;
            match self.rest().find(quote) {
                Some(pos) => {
                    let value_end = value_start + pos;
                    self.index = value_end + quote.len_utf8();
                    AttrValue {
                        text: self.input[value_start..value_end].to_string(),
                        start: value_start,
                        end: value_end,
                    }
                }
                None => {
                    return Err(self.error(
                        ParseErrorKind::MalformedTag,
                        format!("Unterminated value for attribute {}", name),
                        start,
                        self.input.len(),
                    ))
                }
            }
        } else {
            let value_start = self.index;
            while !self.at_end() && !chars::is_whitespace(self.peek()) && self.peek() != chars::GT {
                if self.peek() == chars::SLASH && self.peek_at(1) == chars::GT {
                    break;
                }
                self.advance();
            }
            AttrValue {
                text: self.input[value_start..self.index].to_string(),
                start: value_start,
                end: self.index,
            }
        };

        self.tokens.push(Token::Attr {
            name,
            start,
            name_end,
            end: self.index,
            value: Some(value),
        });
        Ok(())
    }
}
