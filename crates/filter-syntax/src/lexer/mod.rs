use crate::{
    ast::operator::{LogicalOperator, Operator},
    error::SyntaxError,
    lexer::token::{Token, TokenKind},
};
use model::DataType;

pub mod token;


/// Scanner for the postfix filter grammar.
///
/// Tokens are produced on demand so that the stack machine reports the
/// first error in input order, whether it is lexical or structural.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            failed: false,
        }
    }

    /// Scans the whole input eagerly.
    pub fn tokenize(input: &'a str) -> Result<Vec<Token>, SyntaxError> {
        Lexer::new(input).collect()
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let start = self.pos;
        let opcode = self.bytes[start];
        self.pos += 1;

        let kind = match opcode {
            b'a' => {
                let index = self.parse_unsigned()?;
                TokenKind::Column(index)
            }
            b'c' => {
                let (type_oid, _) = self.parse_type_oid()?;
                let value = self.parse_literal(SyntaxError::TruncatedLiteral)?;
                TokenKind::Scalar { type_oid, value }
            }
            b'm' => self.parse_array()?,
            b'o' => {
                let code = self.parse_unsigned()?;
                let op = u32::try_from(code)
                    .ok()
                    .and_then(Operator::from_code)
                    .ok_or(SyntaxError::UnknownOperator(self.pos))?;
                TokenKind::Operator(op)
            }
            b'l' => {
                let code = self.parse_unsigned()?;
                let op = u32::try_from(code)
                    .ok()
                    .and_then(LogicalOperator::from_code)
                    .ok_or(SyntaxError::UnknownOperator(self.pos))?;
                TokenKind::Logical(op)
            }
            _ => {
                let opcode = self.input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(SyntaxError::UnknownOpcode {
                    opcode,
                    code: opcode as u32,
                    position: start,
                });
            }
        };

        Ok(Token {
            kind,
            span: (start, self.pos),
        })
    }

    fn parse_array(&mut self) -> Result<TokenKind, SyntaxError> {
        let (type_oid, data_type) = self.parse_type_oid()?;
        if !data_type.is_array() {
            return Err(SyntaxError::ScalarTypeForArray(type_oid));
        }

        let mut elements = Vec::new();
        while self.peek() == Some(b's') || elements.is_empty() {
            elements.push(self.parse_literal(|_| SyntaxError::TruncatedArray)?);
        }

        Ok(TokenKind::Array { type_oid, elements })
    }

    /// Reads `<int32>` and resolves it against the type catalog.
    fn parse_type_oid(&mut self) -> Result<(i32, DataType), SyntaxError> {
        if !matches!(self.peek(), Some(b'0'..=b'9' | b'-')) {
            return Err(SyntaxError::DataTypeExpected(self.pos));
        }
        let oid = self.parse_int()?;
        let data_type =
            DataType::from_oid(oid).ok_or(SyntaxError::InvalidDataType(self.pos - 1))?;
        Ok((oid, data_type))
    }

    /// Reads `s<uint>d<bytes>`. `overrun` builds the error for data running
    /// past the end of the input once the `d` delimiter has been seen.
    fn parse_literal(
        &mut self,
        overrun: impl Fn(usize) -> SyntaxError,
    ) -> Result<String, SyntaxError> {
        if self.peek() != Some(b's') {
            return Err(SyntaxError::LengthDelimiterExpected(self.pos));
        }
        self.pos += 1;

        let length = self.parse_unsigned()?;
        let delimiter = self.pos;
        if delimiter + length > self.bytes.len() {
            return Err(SyntaxError::TruncatedLiteral(delimiter));
        }
        if self.peek() != Some(b'd') {
            return Err(SyntaxError::DataDelimiterExpected(delimiter));
        }

        let data_start = delimiter + 1;
        let data_end = data_start + length;
        if data_end > self.bytes.len() {
            return Err(overrun(delimiter));
        }

        let value = std::str::from_utf8(&self.bytes[data_start..data_end])
            .map_err(|_| SyntaxError::InvalidUtf8(data_start))?;
        self.pos = data_end;
        Ok(value.to_string())
    }

    fn parse_unsigned(&mut self) -> Result<usize, SyntaxError> {
        let value = self.parse_int()?;
        usize::try_from(value).map_err(|_| SyntaxError::NegativeValue {
            value: i64::from(value),
            position: self.pos,
        })
    }

    /// Reads an optionally negative decimal that must fit in an `i32`.
    fn parse_int(&mut self) -> Result<i32, SyntaxError> {
        let start = self.pos;
        let mut end = start;
        if self.bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        let digits_start = end;
        while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return Err(SyntaxError::NumericExpected(start));
        }

        let text = &self.input[start..end];
        let value: i64 = text
            .parse()
            .map_err(|_| SyntaxError::InvalidNumber(text.to_string()))?;
        self.pos = end;

        i32::try_from(value).map_err(|_| SyntaxError::IntOverflow {
            value,
            position: end,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.bytes.len() {
            return None;
        }
        let token = self.next_token();
        self.failed = token.is_err();
        Some(token)
    }
}
