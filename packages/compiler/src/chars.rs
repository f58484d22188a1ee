//! Character classes shared by the markup scanner and the expression lexer.

// Control and whitespace
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const CR: char = '\r';
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const DOLLAR: char = '$';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const COMMA: char = ',';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const BACKSLASH: char = '\\';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const LBRACKET: char = '[';
pub const RBRACKET: char = ']';
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';
pub const UNDERSCORE: char = '_';

/// Whitespace as understood by both the markup scanner and the expression lexer.
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == LF || ch == CR || ch == NBSP || (ch != EOF && ch < ' ')
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ
}

pub fn is_new_line(ch: char) -> bool {
    ch == LF || ch == CR
}

/// Check if character can start an identifier (`$event` starts with `$`).
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == UNDERSCORE || ch == DOLLAR
}

/// Check if character can be part of an identifier
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}

/// Characters that terminate a tag or attribute name in markup.
pub fn is_name_end(ch: char) -> bool {
    is_whitespace(ch) || ch == GT || ch == LT || ch == SLASH || ch == EQ || ch == SQ || ch == DQ || ch == EOF
}
