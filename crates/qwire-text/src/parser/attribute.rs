//! Angle, gate, type and attribute parsing.

use qwire_ir::{Angle, Attribute, FloatWidth, Gate, Type};

use super::Parser;
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse an angle body: `[-][coefficient][pi]`.
    ///
    /// `pi` alone means a coefficient of 1; nothing at all means 0. A
    /// nonzero coefficient must be followed by `pi`.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn parse_angle_body(&mut self) -> ParseResult<Angle> {
        let negative = self.consume(&Token::Minus);

        let coefficient = match self.peek() {
            Some(&Token::FloatLiteral(v)) => {
                self.advance();
                Some(v)
            }
            Some(&Token::IntLiteral(v)) => {
                self.advance();
                Some(v as f64)
            }
            _ => None,
        };
        let has_pi = self.consume(&Token::Pi);

        let coefficient = match (coefficient, has_pi) {
            (Some(c), true) => c,
            (None, true) => 1.0,
            (Some(c), false) if c == 0.0 => 0.0,
            (Some(c), false) => {
                return Err(ParseError::InvalidAngle {
                    line: self.line(),
                    coefficient: c,
                });
            }
            (None, false) => 0.0,
        };

        Ok(Angle::new(if negative { -coefficient } else { coefficient }))
    }

    /// Parse `<angle>`.
    fn parse_angle_param(&mut self) -> ParseResult<Angle> {
        self.expect(Token::Lt)?;
        let angle = self.parse_angle_body()?;
        self.expect(Token::Gt)?;
        Ok(angle)
    }

    /// Parse a `#gate.` attribute: a gate or a standalone angle.
    fn parse_gate_dialect_attribute(&mut self) -> ParseResult<Attribute> {
        self.expect(Token::Hash)?;
        self.expect_keyword("gate")?;
        self.expect(Token::Dot)?;
        let name = self.parse_identifier()?;

        match name.as_str() {
            "rz" => Ok(Attribute::Gate(Gate::Rz(self.parse_angle_param()?))),
            "angle" => Ok(Attribute::Angle(self.parse_angle_param()?)),
            _ => Gate::fixed_from_name(&name)
                .map(Attribute::Gate)
                .ok_or(ParseError::UnknownGate(name)),
        }
    }

    /// Parse a gate attribute.
    pub(super) fn parse_gate(&mut self) -> ParseResult<Gate> {
        match self.parse_gate_dialect_attribute()? {
            Attribute::Gate(gate) => Ok(gate),
            other => Err(ParseError::UnexpectedToken {
                line: self.line(),
                expected: "gate attribute".into(),
                found: other.to_string(),
            }),
        }
    }

    /// Parse a type.
    pub(super) fn parse_type(&mut self) -> ParseResult<Type> {
        match self.advance() {
            Some(Token::Bang) => {
                let name = self.parse_identifier()?;
                match name.as_str() {
                    "qubit" => Ok(Type::Qubit),
                    "gate" => {
                        self.expect(Token::Dot)?;
                        self.expect_keyword("type")?;
                        self.expect(Token::Lt)?;
                        let n = self.parse_u32()?;
                        self.expect(Token::Gt)?;
                        Ok(Type::gate(n))
                    }
                    _ => Err(ParseError::UnknownType(format!("!{name}"))),
                }
            }
            Some(Token::Identifier(name)) => builtin_type(&name).ok_or(ParseError::UnknownType(name)),
            Some(other) => Err(self.unexpected("type", &other)),
            None => Err(ParseError::UnexpectedEof("type".into())),
        }
    }

    /// Parse a comma-separated list of types.
    pub(super) fn parse_type_list(&mut self) -> ParseResult<Vec<Type>> {
        let mut types = vec![self.parse_type()?];
        while self.consume(&Token::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    /// Parse any attribute.
    pub(super) fn parse_attribute(&mut self) -> ParseResult<Attribute> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("attribute".into()))?;

        match token {
            Token::Hash => self.parse_gate_dialect_attribute(),
            Token::Bang | Token::Identifier(_) => Ok(Attribute::Type(self.parse_type()?)),
            Token::IntLiteral(_) | Token::Minus => {
                let negative = self.consume(&Token::Minus);
                let magnitude = self.parse_int_literal()?;
                let signed = if negative {
                    -i128::from(magnitude)
                } else {
                    i128::from(magnitude)
                };
                let value = i64::try_from(signed).map_err(|_| ParseError::UnexpectedToken {
                    line: self.line(),
                    expected: "64-bit integer".into(),
                    found: signed.to_string(),
                })?;
                Ok(Attribute::Int(value))
            }
            _ => {
                self.advance();
                Err(self.unexpected("attribute", &token))
            }
        }
    }

    fn parse_u32(&mut self) -> ParseResult<u32> {
        let v = self.parse_int_literal()?;
        u32::try_from(v).map_err(|_| ParseError::UnexpectedToken {
            line: self.line(),
            expected: "32-bit integer".into(),
            found: v.to_string(),
        })
    }
}

/// Types written without a `!` prefix: `iN`, `f16`, `f32`, `f64`, `index`.
fn builtin_type(name: &str) -> Option<Type> {
    if name == "index" {
        return Some(Type::Index);
    }
    let (prefix, bits) = name.split_at_checked(1)?;
    if bits.is_empty() || !bits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let bits: u32 = bits.parse().ok()?;
    match prefix {
        "i" => Some(Type::Int(bits)),
        "f" => FloatWidth::from_bits(bits).map(Type::Float),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{parse_angle, parse_attribute, parse_gate, parse_type};
    use super::*;

    #[test]
    fn test_angle_forms() {
        assert_eq!(parse_angle("0").unwrap(), Angle::ZERO);
        assert_eq!(parse_angle("0pi").unwrap(), Angle::ZERO);
        assert_eq!(parse_angle("").unwrap(), Angle::ZERO);
        assert_eq!(parse_angle("pi").unwrap(), Angle::PI);
        assert_eq!(parse_angle("-pi").unwrap(), Angle::PI);
        assert_eq!(parse_angle("0.5pi").unwrap(), Angle::new(0.5));
        assert_eq!(parse_angle("-0.5pi").unwrap(), Angle::new(1.5));
        assert_eq!(parse_angle("2pi").unwrap(), Angle::ZERO);
        assert_eq!(parse_angle("2.5pi").unwrap(), Angle::new(0.5));
    }

    #[test]
    fn test_angle_requires_pi() {
        assert!(matches!(
            parse_angle("0.5"),
            Err(ParseError::InvalidAngle { coefficient, .. }) if coefficient == 0.5
        ));
        assert!(parse_angle("pi pi").is_err());
    }

    #[test]
    fn test_gates() {
        for gate in Gate::all_fixed() {
            assert_eq!(parse_gate(&gate.to_string()).unwrap(), gate);
        }
        assert_eq!(parse_gate("#gate.rz<pi>").unwrap(), Gate::rz(1.0));
        assert_eq!(parse_gate("#gate.rz<-0.25pi>").unwrap(), Gate::rz(1.75));
        assert!(matches!(
            parse_gate("#gate.swap"),
            Err(ParseError::UnknownGate(ref name)) if name == "swap"
        ));
        assert!(parse_gate("#gate.angle<pi>").is_err());
        assert!(parse_gate("#gate.rz").is_err());
    }

    #[test]
    fn test_types() {
        assert_eq!(parse_type("!qubit").unwrap(), Type::Qubit);
        assert_eq!(parse_type("!gate.type<3>").unwrap(), Type::gate(3));
        assert_eq!(parse_type("i1").unwrap(), Type::I1);
        assert_eq!(parse_type("i64").unwrap(), Type::Int(64));
        assert_eq!(parse_type("f64").unwrap(), Type::F64);
        assert_eq!(parse_type("f16").unwrap(), Type::Float(FloatWidth::F16));
        assert_eq!(parse_type("index").unwrap(), Type::Index);
        assert!(matches!(parse_type("f8"), Err(ParseError::UnknownType(_))));
        assert!(matches!(parse_type("!bit"), Err(ParseError::UnknownType(_))));
        assert!(parse_type("ix").is_err());
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            parse_attribute("#gate.angle<0.5pi>").unwrap(),
            Attribute::Angle(Angle::new(0.5))
        );
        assert_eq!(
            parse_attribute("#gate.cz").unwrap(),
            Attribute::Gate(Gate::CZ)
        );
        assert_eq!(
            parse_attribute("!gate.type<1>").unwrap(),
            Attribute::Type(Type::gate(1))
        );
        assert_eq!(parse_attribute("-7").unwrap(), Attribute::Int(-7));
        assert_eq!(parse_attribute("42").unwrap(), Attribute::Int(42));
        assert!(parse_attribute("%0").is_err());
    }

    #[test]
    fn test_int_attribute_bounds() {
        for value in [i64::MIN, i64::MIN + 1, -1, 0, i64::MAX] {
            let attr = Attribute::Int(value);
            assert_eq!(parse_attribute(&attr.to_string()).unwrap(), attr);
        }
        assert!(matches!(
            parse_attribute("9223372036854775808"),
            Err(ParseError::UnexpectedToken { ref found, .. }) if found == "9223372036854775808"
        ));
        assert!(parse_attribute("-9223372036854775809").is_err());
    }

    #[test]
    fn test_oversized_angle_coefficient() {
        assert_eq!(
            parse_angle("99999999999999999999pi").unwrap(),
            Angle::new(99_999_999_999_999_999_999.0)
        );
        assert_eq!(
            parse_gate("#gate.rz<-123456789012345678901234pi>").unwrap(),
            Gate::rz(-123_456_789_012_345_678_901_234.0)
        );
        assert!(parse_type("!gate.type<99999999999999999999>").is_err());
    }
}
