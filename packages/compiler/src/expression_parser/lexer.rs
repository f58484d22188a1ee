/**
 * Binding Expression Lexer
 *
 * Tokenizes the restricted binding grammar. Malformed input produces an
 * `Error` token rather than aborting, so the parser can report a position.
 */
use serde::{Deserialize, Serialize};

use crate::chars;

/// Token types in binding expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    String = 3,
    Number = 4,
    Error = 5,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(index: usize, end: usize, token_type: TokenType, num_value: f64, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }

    pub fn is_keyword_value(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }
}

pub fn new_character_token(index: usize, end: usize, code: char) -> Token {
    Token::new(index, end, TokenType::Character, code as u32 as f64, code.to_string())
}

pub fn new_identifier_token(index: usize, end: usize, text: String) -> Token {
    Token::new(index, end, TokenType::Identifier, 0.0, text)
}

pub fn new_keyword_token(index: usize, end: usize, text: String) -> Token {
    Token::new(index, end, TokenType::Keyword, 0.0, text)
}

pub fn new_string_token(index: usize, end: usize, text: String) -> Token {
    Token::new(index, end, TokenType::String, 0.0, text)
}

pub fn new_number_token(index: usize, end: usize, n: f64) -> Token {
    Token::new(index, end, TokenType::Number, n, String::new())
}

pub fn new_error_token(index: usize, end: usize, message: String) -> Token {
    Token::new(index, end, TokenType::Error, 0.0, message)
}

/// Literal keywords. Everything else is an identifier.
pub const KEYWORDS: &[&str] = &["true", "false", "null", "undefined"];

#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

struct Scanner<'a> {
    input: &'a str,
    index: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner { input, index: 0, peek }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            let stop = token.is_error();
            tokens.push(token);
            // Anything after a lexing error is noise.
            if stop {
                break;
            }
        }
        tokens
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = self.input[self.index..].chars().next().unwrap_or(chars::EOF);
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn scan_token(&mut self) -> Option<Token> {
        while !self.at_end() && chars::is_whitespace(self.peek) {
            self.advance();
        }
        if self.at_end() {
            return None;
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }
        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::PERIOD => {
                self.advance();
                if chars::is_digit(self.peek) {
                    return Some(self.scan_number(start));
                }
                Some(new_character_token(start, self.index, chars::PERIOD))
            }
            chars::LPAREN | chars::RPAREN | chars::COMMA | chars::MINUS | ';' => {
                self.advance();
                Some(new_character_token(start, self.index, ch))
            }
            chars::SQ | chars::DQ => Some(self.scan_string(ch)),
            _ => {
                self.advance();
                Some(new_error_token(
                    start,
                    self.index,
                    format!("Unexpected character [{}]", ch),
                ))
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();
        while chars::is_identifier_part(self.peek) {
            self.advance();
        }
        let text = &self.input[start..self.index];
        if KEYWORDS.contains(&text) {
            new_keyword_token(start, self.index, text.to_string())
        } else {
            new_identifier_token(start, self.index, text.to_string())
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut seen_period = self.input[start..self.index].contains(chars::PERIOD);
        loop {
            if chars::is_digit(self.peek) {
                // keep going
            } else if self.peek == chars::PERIOD && !seen_period {
                seen_period = true;
            } else {
                break;
            }
            self.advance();
        }
        let text = &self.input[start..self.index];
        match text.parse::<f64>() {
            Ok(value) => new_number_token(start, self.index, value),
            Err(_) => new_error_token(start, self.index, format!("Invalid number [{}]", text)),
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start = self.index;
        self.advance();
        let mut buffer = String::new();
        loop {
            if self.at_end() {
                return new_error_token(start, self.index, "Unterminated quote".to_string());
            }
            if self.peek == quote {
                self.advance();
                return new_string_token(start, self.index, buffer);
            }
            if self.peek == chars::BACKSLASH {
                self.advance();
                let escaped = match self.peek {
                    'n' => chars::LF,
                    't' => chars::TAB,
                    'r' => chars::CR,
                    other => other,
                };
                if self.at_end() {
                    return new_error_token(start, self.index, "Unterminated quote".to_string());
                }
                buffer.push(escaped);
                self.advance();
                continue;
            }
            buffer.push(self.peek);
            self.advance();
        }
    }
}
