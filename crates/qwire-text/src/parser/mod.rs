//! Parser for the circuit text format.

mod attribute;
mod lowering;
mod statement;

pub(crate) use lowering::lower_to_circuit;

use qwire_ir::{Angle, Attribute, Circuit, Gate, Type};
use tracing::debug;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a circuit from its text form.
pub fn parse_circuit(source: &str) -> ParseResult<Circuit> {
    let program = parse_ast(source)?;
    let circuit = lower_to_circuit(&program)?;
    debug!(
        arguments = circuit.arguments().len(),
        ops = circuit.num_ops(),
        "parsed circuit"
    );
    Ok(circuit)
}

/// Parse a circuit into its syntax tree without resolving value names.
pub fn parse_ast(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    let program = parser.parse_program()?;
    parser.finish()?;
    Ok(program)
}

/// Parse an angle written as `0`, `pi`, `-0.5pi` and so on.
///
/// Empty input is the zero angle.
pub fn parse_angle(source: &str) -> ParseResult<Angle> {
    let mut parser = Parser::new(source)?;
    let angle = parser.parse_angle_body()?;
    parser.finish()?;
    Ok(angle)
}

/// Parse a gate attribute such as `#gate.cnot` or `#gate.rz<0.25pi>`.
pub fn parse_gate(source: &str) -> ParseResult<Gate> {
    let mut parser = Parser::new(source)?;
    let gate = parser.parse_gate()?;
    parser.finish()?;
    Ok(gate)
}

/// Parse a type such as `!qubit`, `i1` or `!gate.type<2>`.
pub fn parse_type(source: &str) -> ParseResult<Type> {
    let mut parser = Parser::new(source)?;
    let ty = parser.parse_type()?;
    parser.finish()?;
    Ok(ty)
}

/// Parse any attribute: a gate, `#gate.angle<..>`, a type, or an integer.
pub fn parse_attribute(source: &str) -> ParseResult<Attribute> {
    let mut parser = Parser::new(source)?;
    let attr = parser.parse_attribute()?;
    parser.finish()?;
    Ok(attr)
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    /// Byte offset at which each source line starts.
    line_starts: Vec<usize>,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let token_results = tokenize(source);
        let mut tokens = Vec::new();

        for result in token_results {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, msg)) => {
                    return Err(ParseError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }

        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Ok(Self {
            tokens,
            pos: 0,
            line_starts,
        })
    }

    /// Line of the most recently consumed token, or of the first token.
    pub(super) fn line(&self) -> usize {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map_or(1, |t| self.line_of(t.span.start))
    }

    /// Line of the next token.
    pub(super) fn next_line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.line(), |t| self.line_of(t.span.start))
    }

    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Peek `n` tokens past the current one.
    pub(super) fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(self.unexpected(expected.to_string(), &found));
        }
        Ok(())
    }

    /// Expect a specific identifier, such as the `gate` in `#gate.h`.
    pub(super) fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        match self.advance() {
            Some(Token::Identifier(s)) if s == keyword => Ok(()),
            Some(other) => Err(self.unexpected(format!("'{keyword}'"), &other)),
            None => Err(ParseError::UnexpectedEof(format!("'{keyword}'"))),
        }
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Fail unless all input has been consumed.
    fn finish(&self) -> ParseResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                line: self.next_line(),
                expected: "end of input".into(),
                found: token.to_string(),
            }),
        }
    }

    pub(super) fn unexpected(&self, expected: impl Into<String>, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line(),
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Parse an identifier.
    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(self.unexpected("identifier", &other)),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    /// Parse an integer literal.
    pub(super) fn parse_int_literal(&mut self) -> ParseResult<u64> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v),
            Some(other) => Err(self.unexpected("integer", &other)),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }

    /// Parse a value name, without the `%`.
    pub(super) fn parse_value_id(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::ValueId(s)) => Ok(s),
            Some(other) => Err(self.unexpected("value", &other)),
            None => Err(ParseError::UnexpectedEof("value".into())),
        }
    }

    /// Parse a comma-separated list of value names.
    pub(super) fn parse_value_list(&mut self) -> ParseResult<Vec<String>> {
        let mut names = vec![self.parse_value_id()?];
        while self.consume(&Token::Comma) {
            names.push(self.parse_value_id()?);
        }
        Ok(names)
    }
}
