//! Lexer for the circuit text format.

use logos::Logos;

/// Tokens of the circuit text format.
///
/// Dotted names such as `qref.gate` or `gate.type` are lexed as identifiers
/// separated by [`Token::Dot`]. There is no `>>` token, so
/// nested parameter lists like `#gate.rz<pi>>` close one bracket at a time.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("circuit")]
    Circuit,

    #[token("pi")]
    Pi,

    // Literals
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    // Integers of 20+ digits may not fit in a u64; only angle coefficients
    // can be that large.
    #[regex(r"[0-9]{20,}", |lex| lex.slice().parse::<f64>().ok(), priority = 3)]
    FloatLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    // Names
    #[regex(r"%[a-zA-Z0-9_]+", |lex| lex.slice()[1..].to_string())]
    ValueId(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Sigils
    #[token("#")]
    Hash,

    #[token("!")]
    Bang,

    // Operators and punctuation
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Circuit => write!(f, "circuit"),
            Token::Pi => write!(f, "pi"),
            Token::FloatLiteral(v) => write!(f, "{v}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::ValueId(s) => write!(f, "%{s}"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Hash => write!(f, "#"),
            Token::Bang => write!(f, "!"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Eq => write!(f, "="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
        }
    }
}

/// A token with its span information.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize source code.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_angle_tokens() {
        assert_eq!(lex("0.5pi"), vec![Token::FloatLiteral(0.5), Token::Pi]);
        assert_eq!(lex("-pi"), vec![Token::Minus, Token::Pi]);
        assert_eq!(lex("2pi"), vec![Token::IntLiteral(2), Token::Pi]);
        assert_eq!(lex("1e-3pi"), vec![Token::FloatLiteral(1e-3), Token::Pi]);
    }

    #[test]
    fn test_wide_integer_is_float() {
        assert_eq!(
            lex("99999999999999999999pi"),
            vec![Token::FloatLiteral(1e20), Token::Pi]
        );
        assert_eq!(
            lex("9223372036854775808"),
            vec![Token::IntLiteral(9_223_372_036_854_775_808)]
        );
    }

    #[test]
    fn test_nested_brackets() {
        let tokens = lex("#gate.rz<pi>>");
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[0], Token::Hash);
        assert!(matches!(tokens[1], Token::Identifier(ref s) if s == "gate"));
        assert_eq!(tokens[2], Token::Dot);
        assert!(matches!(tokens[3], Token::Identifier(ref s) if s == "rz"));
        assert_eq!(tokens[4], Token::Lt);
        assert_eq!(tokens[5], Token::Pi);
        assert_eq!(tokens[6], Token::Gt);
        assert_eq!(tokens[7], Token::Gt);
    }

    #[test]
    fn test_instruction_line() {
        let tokens = lex("%q1, %7 = qssa.measure %q0 // trailing");
        assert_eq!(tokens[0], Token::ValueId("q1".into()));
        assert_eq!(tokens[1], Token::Comma);
        assert_eq!(tokens[2], Token::ValueId("7".into()));
        assert_eq!(tokens[3], Token::Eq);
        assert!(matches!(tokens[4], Token::Identifier(ref s) if s == "qssa"));
        assert_eq!(tokens[5], Token::Dot);
        assert!(matches!(tokens[6], Token::Identifier(ref s) if s == "measure"));
        assert_eq!(tokens[7], Token::ValueId("q0".into()));
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_builtin_types_are_identifiers() {
        let tokens = lex("i1 f64 index !qubit");
        assert!(matches!(tokens[0], Token::Identifier(ref s) if s == "i1"));
        assert!(matches!(tokens[1], Token::Identifier(ref s) if s == "f64"));
        assert!(matches!(tokens[2], Token::Identifier(ref s) if s == "index"));
        assert_eq!(tokens[3], Token::Bang);
    }

    #[test]
    fn test_invalid_token() {
        let results = tokenize("qref.gate @");
        assert!(results.last().is_some_and(Result::is_err));
    }
}
