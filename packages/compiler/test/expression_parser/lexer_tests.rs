/**
 * Lexer Tests
 *
 * Tokenizing the restricted binding expression language.
 */

#[cfg(test)]
mod tests {
    use view_compiler::expression_parser::lexer::{Lexer, Token, TokenType};

    fn lex(text: &str) -> Vec<Token> {
        Lexer::new().tokenize(text)
    }

    fn expect_token(token: &Token, index: usize, end: usize) {
        assert_eq!(token.index, index, "Token index mismatch");
        assert_eq!(token.end, end, "Token end mismatch");
    }

    fn expect_identifier_token(token: &Token, index: usize, end: usize, identifier: &str) {
        expect_token(token, index, end);
        assert!(token.is_identifier(), "Expected identifier token");
        assert_eq!(token.str_value, identifier);
    }

    fn expect_character_token(token: &Token, index: usize, end: usize, character: char) {
        expect_token(token, index, end);
        assert!(token.is_character(character), "Expected character token '{}'", character);
    }

    mod identifiers {
        use super::*;

        #[test]
        fn should_tokenize_a_simple_identifier() {
            let tokens = lex("message");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 0, 7, "message");
        }

        #[test]
        fn should_tokenize_a_dotted_path() {
            let tokens = lex("user.name");
            assert_eq!(tokens.len(), 3);
            expect_identifier_token(&tokens[0], 0, 4, "user");
            expect_character_token(&tokens[1], 4, 5, '.');
            expect_identifier_token(&tokens[2], 5, 9, "name");
        }

        #[test]
        fn should_tokenize_the_event_sentinel_as_an_identifier() {
            let tokens = lex("$event");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 0, 6, "$event");
        }
    }

    mod calls {
        use super::*;

        #[test]
        fn should_tokenize_a_call_with_arguments() {
            let tokens = lex("onAdd($event, 1)");
            let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
            assert_eq!(
                types,
                vec![
                    TokenType::Identifier,
                    TokenType::Character,
                    TokenType::Identifier,
                    TokenType::Character,
                    TokenType::Number,
                    TokenType::Character,
                ]
            );
            expect_character_token(&tokens[1], 5, 6, '(');
            expect_character_token(&tokens[5], 15, 16, ')');
        }
    }

    mod literals {
        use super::*;

        #[test]
        fn should_tokenize_numbers() {
            let tokens = lex("12.5");
            assert_eq!(tokens.len(), 1);
            assert!(tokens[0].is_number());
            assert!((tokens[0].num_value - 12.5).abs() < f64::EPSILON);
        }

        #[test]
        fn should_tokenize_quoted_strings_with_escapes() {
            let tokens = lex(r#"'it\'s' "two""#);
            assert_eq!(tokens.len(), 2);
            assert!(tokens[0].is_string());
            assert_eq!(tokens[0].str_value, "it's");
            assert_eq!(tokens[1].str_value, "two");
        }

        #[test]
        fn should_tokenize_keywords() {
            let tokens = lex("true false null undefined");
            assert_eq!(tokens.len(), 4);
            assert!(tokens.iter().all(|t| t.is_keyword()));
            assert!(tokens[2].is_keyword_value("null"));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_emit_an_error_token_for_unexpected_characters() {
            let tokens = lex("a + b");
            assert_eq!(tokens.len(), 2);
            assert!(tokens[1].is_error());
            assert!(tokens[1].str_value.contains("Unexpected character [+]"));
        }

        #[test]
        fn should_stop_after_the_first_error() {
            let tokens = lex("a[0] b");
            assert!(tokens.last().is_some_and(|t| t.is_error()));
            assert_eq!(tokens.len(), 2);
        }

        #[test]
        fn should_report_unterminated_quotes() {
            let tokens = lex("'abc");
            assert_eq!(tokens.len(), 1);
            assert!(tokens[0].is_error());
            assert_eq!(tokens[0].str_value, "Unterminated quote");
        }
    }
}
