//! Circuit and instruction parsing.

use qwire_ir::Type;

use super::Parser;
use crate::ast::{Argument, OpSyntax, Program, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse `circuit(%a : ty, ...) { statements }`.
    pub(super) fn parse_program(&mut self) -> ParseResult<Program> {
        self.expect(Token::Circuit)?;
        self.expect(Token::LParen)?;

        let mut arguments = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                let name = self.parse_value_id()?;
                self.expect(Token::Colon)?;
                let ty = self.parse_type()?;
                arguments.push(Argument { name, ty });
                if !self.consume(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        self.expect(Token::LBrace)?;

        let mut statements = Vec::new();
        while !self.check(&Token::RBrace) {
            if self.is_eof() {
                return Err(ParseError::UnexpectedEof("'}'".into()));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(Token::RBrace)?;

        Ok(Program {
            arguments,
            statements,
        })
    }

    /// Parse one instruction line.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let line = self.next_line();

        let results = if self.check(&Token::ValueId(String::new())) {
            let names = self.parse_value_list()?;
            self.expect(Token::Eq)?;
            names
        } else {
            Vec::new()
        };

        let dialect = self.parse_identifier()?;
        self.expect(Token::Dot)?;
        let name = self.parse_identifier()?;

        let op = match (dialect.as_str(), name.as_str()) {
            ("gate", "constant") => OpSyntax::ConstantGate {
                gate: self.parse_gate()?,
            },
            ("gate", "quaternion") => self.parse_quaternion()?,
            ("gate", "compose") => {
                let lhs = self.parse_value_id()?;
                self.expect(Token::Comma)?;
                let rhs = self.parse_value_id()?;
                self.expect(Token::Colon)?;
                let ty = self.parse_type()?;
                OpSyntax::Compose { lhs, rhs, ty }
            }
            ("gate", "xzs") => {
                let x = self.parse_value_id()?;
                self.expect(Token::Comma)?;
                let z = self.parse_value_id()?;
                self.expect(Token::Comma)?;
                let phase = self.parse_value_id()?;
                OpSyntax::Xzs { x, z, phase }
            }
            ("qref", "gate") => {
                let gate = self.parse_bracketed(Self::parse_attribute)?;
                let (qubits, types) = self.parse_typed_operands()?;
                OpSyntax::QrefGate {
                    gate,
                    qubits,
                    types,
                }
            }
            ("qref", "dyn_gate") => {
                let gate = self.parse_bracketed(Self::parse_value_id)?;
                let (qubits, types) = self.parse_typed_operands()?;
                OpSyntax::QrefDynGate {
                    gate,
                    qubits,
                    types,
                }
            }
            ("qref", "measure") => OpSyntax::QrefMeasure {
                qubit: self.parse_value_id()?,
            },
            ("qssa", "gate") => {
                let gate = self.parse_bracketed(Self::parse_attribute)?;
                let (qubits, types) = self.parse_typed_operands()?;
                OpSyntax::QssaGate {
                    gate,
                    qubits,
                    types,
                }
            }
            ("qssa", "measure") => OpSyntax::QssaMeasure {
                qubit: self.parse_value_id()?,
            },
            _ => return Err(ParseError::UnknownOperation(format!("{dialect}.{name}"))),
        };

        Ok(Statement { results, op, line })
    }

    /// Parse `<T> %real + %i i + %j j + %k k`.
    fn parse_quaternion(&mut self) -> ParseResult<OpSyntax> {
        let ty = self.parse_bracketed(Self::parse_type)?;
        let real = self.parse_value_id()?;
        self.expect(Token::Plus)?;
        let i = self.parse_value_id()?;
        self.expect_keyword("i")?;
        self.expect(Token::Plus)?;
        let j = self.parse_value_id()?;
        self.expect_keyword("j")?;
        self.expect(Token::Plus)?;
        let k = self.parse_value_id()?;
        self.expect_keyword("k")?;
        Ok(OpSyntax::Quaternion { ty, real, i, j, k })
    }

    /// Parse `<item>`.
    fn parse_bracketed<T>(&mut self, item: fn(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.expect(Token::Lt)?;
        let value = item(self)?;
        self.expect(Token::Gt)?;
        Ok(value)
    }

    /// Parse an optional `%a, %b : ty, ty` operand list.
    ///
    /// An instruction without operands omits the list entirely, so a value
    /// name only starts the list if the names are followed by `:`.
    fn parse_typed_operands(&mut self) -> ParseResult<(Vec<String>, Vec<Type>)> {
        if !self.at_typed_operands() {
            return Ok((Vec::new(), Vec::new()));
        }
        let names = self.parse_value_list()?;
        self.expect(Token::Colon)?;
        let types = self.parse_type_list()?;
        Ok((names, types))
    }

    fn at_typed_operands(&self) -> bool {
        let mut n = 0;
        loop {
            if !matches!(self.peek_nth(n), Some(Token::ValueId(_))) {
                return false;
            }
            match self.peek_nth(n + 1) {
                Some(Token::Comma) => n += 2,
                Some(Token::Colon) => return true,
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_ast;
    use super::*;
    use qwire_ir::{Attribute, Gate};

    #[test]
    fn test_statement_shapes() {
        let source = r"
            circuit(%0 : !qubit, %1 : !qubit, %2 : i1, %3 : f64) {
              %4 = gate.constant #gate.h
              qref.gate<#gate.cnot> %0, %1 : !qubit, !qubit
              qref.dyn_gate<%4> %0 : !qubit
              %5 = qref.measure %0
              %6 = qssa.gate<#gate.rz<0.5pi>> %1 : !qubit
              %7, %8 = qssa.measure %6
              %9 = gate.quaternion<f64> %3 + %3 i + %3 j + %3 k
              %10 = gate.compose %4, %9 : !gate.type<1>
              %11 = gate.xzs %2, %2, %2
            }
        ";

        let program = parse_ast(source).unwrap();
        assert_eq!(program.arguments.len(), 4);
        assert_eq!(program.arguments[3].ty, Type::F64);

        let names: Vec<_> = program.statements.iter().map(|s| s.op.name()).collect();
        assert_eq!(
            names,
            vec![
                "gate.constant",
                "qref.gate",
                "qref.dyn_gate",
                "qref.measure",
                "qssa.gate",
                "qssa.measure",
                "gate.quaternion",
                "gate.compose",
                "gate.xzs",
            ]
        );

        assert_eq!(program.statements[1].results, Vec::<String>::new());
        assert_eq!(program.statements[5].results, vec!["7", "8"]);
        assert_eq!(program.statements[0].line, 3);
        assert_eq!(
            program.statements[4].op,
            OpSyntax::QssaGate {
                gate: Attribute::Gate(Gate::rz(0.5)),
                qubits: vec!["1".into()],
                types: vec![Type::Qubit],
            }
        );
    }

    #[test]
    fn test_gate_without_operands() {
        let source = r"
            circuit(%0 : !qubit) {
              qref.gate<#gate.h>
              %1 = qref.measure %0
            }
        ";

        let program = parse_ast(source).unwrap();
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            &program.statements[0].op,
            OpSyntax::QrefGate { qubits, .. } if qubits.is_empty()
        ));
    }

    #[test]
    fn test_unknown_operation() {
        let source = "circuit(%0 : !qubit) { qref.reset %0 }";
        assert!(matches!(
            parse_ast(source),
            Err(ParseError::UnknownOperation(ref name)) if name == "qref.reset"
        ));
    }

    #[test]
    fn test_missing_brace() {
        let source = "circuit(%0 : !qubit) { %1 = qref.measure %0";
        assert!(matches!(parse_ast(source), Err(ParseError::UnexpectedEof(_))));
    }
}
