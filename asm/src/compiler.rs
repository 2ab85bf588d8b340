//! Two-pass compilation (spec.md §4.4): pass 1 resolves label addresses
//! against a monotonic emission cursor, pass 2 emits the flat Cell image.

use std::collections::HashMap;

use accvm_core::numeric::{Address, Cell};

use crate::error::CompilationError;
use crate::lexer::{classify, Operand, ParsedLine};

/// Compiles assembler source into a flat image ready to load at address 0.
pub fn compile(source: &str) -> Result<Vec<Cell>, CompilationError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        if let Some(parsed) = classify(raw, line_no)? {
            lines.push((line_no, parsed));
        }
    }

    let labels = resolve_labels(&lines)?;
    emit(&lines, &labels)
}

fn line_size(line: &ParsedLine) -> u32 {
    match line {
        ParsedLine::Offset(_) | ParsedLine::LabelDef(_) => 0,
        ParsedLine::Data(_) => 1,
        ParsedLine::Instruction { operands, .. } => 1 + operands.len() as u32,
    }
}

fn resolve_labels(lines: &[(usize, ParsedLine)]) -> Result<HashMap<String, Address>, CompilationError> {
    let mut labels = HashMap::new();
    let mut cursor: u32 = 0;

    for (line_no, line) in lines {
        match line {
            ParsedLine::Offset(target) => {
                if (*target as u32) < cursor {
                    return Err(CompilationError::new(
                        *line_no,
                        format!("Offset {target} is less than the current address {cursor}"),
                    ));
                }
                cursor = *target as u32;
            }
            ParsedLine::LabelDef(name) => {
                if labels.contains_key(name) {
                    return Err(CompilationError::new(*line_no, format!("duplicate label '{name}'")));
                }
                if cursor > u16::MAX as u32 {
                    return Err(CompilationError::new(*line_no, format!("label '{name}' address out of range")));
                }
                labels.insert(name.clone(), Address(cursor as u16));
            }
            _ => {
                cursor += line_size(line);
                if cursor > u16::MAX as u32 + 1 {
                    return Err(CompilationError::new(*line_no, "program address space exhausted"));
                }
            }
        }
    }

    Ok(labels)
}

fn emit(lines: &[(usize, ParsedLine)], labels: &HashMap<String, Address>) -> Result<Vec<Cell>, CompilationError> {
    let mut image = Vec::new();

    for (line_no, line) in lines {
        match line {
            ParsedLine::Offset(target) => {
                while image.len() < *target as usize {
                    image.push(Cell::ZERO);
                }
            }
            ParsedLine::LabelDef(_) => {}
            ParsedLine::Data(value) => image.push(*value),
            ParsedLine::Instruction { opcode, operands } => {
                image.push(Cell(*opcode as i16));
                for operand in operands {
                    image.push(resolve_operand(operand, labels, *line_no)?);
                }
            }
        }
    }

    Ok(image)
}

fn resolve_operand(
    operand: &Operand,
    labels: &HashMap<String, Address>,
    line_no: usize,
) -> Result<Cell, CompilationError> {
    match operand {
        Operand::Number(value) => Ok(*value),
        Operand::Label(name) => labels
            .get(name)
            .map(|addr| addr.as_cell())
            .ok_or_else(|| CompilationError::new(line_no, format!("unresolved label '{name}'"))),
    }
}
