//! Line classification (spec.md §4.4): turns one source line into a
//! [`ParsedLine`], or `None` for a blank/comment-only line. Arity and
//! mnemonic validity are checked here, eagerly, against [`mnemonics`] —
//! matching the original assembler's pass-1-eligible validation rather
//! than deferring it to emission.

use crate::error::CompilationError;
use crate::mnemonics;
use accvm_core::numeric::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Number(Cell),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedLine {
    Offset(u16),
    LabelDef(String),
    Data(Cell),
    Instruction { opcode: u8, operands: Vec<Operand> },
}

pub(crate) fn classify(raw: &str, line_no: usize) -> Result<Option<ParsedLine>, CompilationError> {
    let without_comment = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let tokens: Vec<&str> = without_comment.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    if tokens[0] == "Offset" {
        if tokens.len() != 2 {
            return Err(CompilationError::new(line_no, "Offset takes exactly one argument"));
        }
        let value = parse_address(tokens[1], line_no)?;
        return Ok(Some(ParsedLine::Offset(value)));
    }

    if tokens.len() == 1 {
        if let Some(name) = tokens[0].strip_suffix(':') {
            if !is_identifier(name) {
                return Err(CompilationError::new(line_no, format!("invalid label name '{name}'")));
            }
            return Ok(Some(ParsedLine::LabelDef(name.to_string())));
        }
        if let Ok(value) = parse_cell(tokens[0], line_no) {
            return Ok(Some(ParsedLine::Data(value)));
        }
    }

    let mnemonic = tokens[0];
    let (opcode, arg_count) = mnemonics::lookup(mnemonic)
        .ok_or_else(|| CompilationError::new(line_no, format!("unknown mnemonic '{mnemonic}'")))?;
    let arg_tokens = &tokens[1..];
    if arg_tokens.len() != arg_count as usize {
        return Err(CompilationError::new(
            line_no,
            format!("'{mnemonic}' expects {arg_count} argument(s), found {}", arg_tokens.len()),
        ));
    }
    let operands = arg_tokens
        .iter()
        .map(|token| parse_operand(token, line_no))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(ParsedLine::Instruction { opcode, operands }))
}

fn parse_operand(token: &str, line_no: usize) -> Result<Operand, CompilationError> {
    if let Some(name) = token.strip_suffix(':') {
        if !is_identifier(name) {
            return Err(CompilationError::new(line_no, format!("invalid label reference '{token}'")));
        }
        return Ok(Operand::Label(name.to_string()));
    }
    Ok(Operand::Number(parse_cell(token, line_no)?))
}

fn parse_cell(token: &str, line_no: usize) -> Result<Cell, CompilationError> {
    let value = parse_integer(token, line_no)?;
    if !(i16::MIN as i64..=i16::MAX as i64).contains(&value) {
        return Err(CompilationError::new(line_no, format!("numeric literal '{token}' out of range")));
    }
    Ok(Cell(value as i16))
}

fn parse_address(token: &str, line_no: usize) -> Result<u16, CompilationError> {
    let value = parse_integer(token, line_no)?;
    if !(0..=u16::MAX as i64).contains(&value) {
        return Err(CompilationError::new(line_no, format!("offset '{token}' out of range")));
    }
    Ok(value as u16)
}

fn parse_integer(token: &str, line_no: usize) -> Result<i64, CompilationError> {
    let (sign, rest) = match token.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, token.strip_prefix('+').unwrap_or(token)),
    };
    if rest.is_empty() {
        return Err(CompilationError::new(line_no, format!("'{token}' is not a number")));
    }
    let magnitude = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        rest.parse::<i64>()
    };
    magnitude
        .map(|m| sign * m)
        .map_err(|_| CompilationError::new(line_no, format!("'{token}' is not a number")))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
