//! Tokenizer for script expressions.

use logos::Logos;

/// Expression token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'src> {
    // === Literals ===
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
    #[regex(
        r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+",
        |lex| lex.slice().parse::<f64>().ok()
    )]
    Float(f64),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unquote(lex.slice()))]
    Str(String),
    #[token("true")]
    #[token("True")]
    True,
    #[token("false")]
    #[token("False")]
    False,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident(&'src str),

    // === Logical operators ===
    #[token("and")]
    #[token("&&")]
    And,
    #[token("or")]
    #[token("||")]
    Or,
    #[token("not")]
    #[token("!")]
    Not,

    // === Arithmetic ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    #[token("**")]
    Caret,

    // === Comparison ===
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

/// Tokenizes `source`, returning the byte offset of the first unrecognized
/// input on failure.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, usize> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}

fn unquote(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_expression() {
        let tokens = tokenize("hp >= 10 and name == 'Bo' or x ** 2.5").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Ident("hp"),
                Token::Ge,
                Token::Int(10),
                Token::And,
                Token::Ident("name"),
                Token::EqEq,
                Token::Str("Bo".to_owned()),
                Token::Or,
                Token::Ident("x"),
                Token::Caret,
                Token::Float(2.5),
            ]
        );
    }

    #[test]
    fn test_keywords_win_over_identifiers() {
        let tokens = tokenize("true andy").unwrap();

        assert_eq!(tokens, vec![Token::True, Token::Ident("andy")]);
    }

    #[test]
    fn test_decimals_accept_an_exponent() {
        let tokens = tokenize("1e20 + 2.5e-7 * 3E2").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Float(1e20),
                Token::Plus,
                Token::Float(2.5e-7),
                Token::Star,
                Token::Float(300.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_reports_offset_of_bad_input() {
        assert_eq!(tokenize("1 + @"), Err(4));
    }
}
