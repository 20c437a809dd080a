//! This lexer classifies LM16 source lines.
//!
//! A logical line is exactly one of four things: blank, a constant
//! definition (`$limit = 0x05`), a label definition (`loop:`), or an
//! instruction (`add r0, 0x01`). Comments run from `;` to the end of the
//! line and are stripped before classification, as is surrounding
//! whitespace. A non-blank line matching none of the three shapes is a
//! syntax error.
//!
//! The token shapes `rN` and `mN` (one letter, one digit) are reserved for
//! register and mode operands; a bare symbol name may never take either
//! shape. Constant names are exempt since their `$` prefix already keeps
//! them apart.

use regex::Regex;

use super::ast::{Instruction, Operand};
use super::error::AssembleError;

// Token shapes, composed into the anchored line patterns below.
const NAME: &str = "[A-Za-z0-9_-]+";
const HEX: &str = "0x[0-9a-fA-F]+";
const OPERATION: &str = "[A-Za-z]+";
const REGISTER: &str = "r[0-9]";
const MODE: &str = "m[0-9]";

/// A line's classification, carrying everything later passes need from it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LineKind {
    Blank,
    Constant { name: String, value: i64 },
    Label(String),
    Instruction(Instruction),
}

/// One classified source line. `number` is 1-based.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    pub number: usize,
    pub kind: LineKind,
}

/// The grammar table: one compiled, fully anchored pattern per line shape.
/// Built once per assembly and read-only afterwards.
pub struct Grammar {
    constant: Regex,
    label: Regex,
    instruction: Regex,
    reserved: Regex,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            constant: Regex::new(&format!(r"^\$({})\s*=\s*({})$", NAME, HEX)).unwrap(),
            label: Regex::new(&format!(r"^({}):$", NAME)).unwrap(),
            instruction: Regex::new(&format!(
                r"^({})(?:\s+({}),?)?(?:\s+({}),?)?(?:\s+({}|\${}|{}))?$",
                OPERATION, REGISTER, MODE, HEX, NAME, NAME
            ))
            .unwrap(),
            reserved: Regex::new("^[rm][0-9]$").unwrap(),
        }
    }

    /// Classifies one raw source line. `number` is 1-based and is only used
    /// to tag errors.
    ///
    /// Shapes are tried in a fixed order: constant first, then label, and
    /// only if both fail, instruction.
    pub fn classify(&self, raw: &str, number: usize) -> Result<LineKind, AssembleError> {
        let code = strip(raw);
        if code.is_empty() {
            return Ok(LineKind::Blank);
        }

        if let Some(caps) = self.constant.captures(code) {
            // The `$` stays part of the stored name so constants and labels
            // share the symbol table without colliding.
            let name = format!("${}", &caps[1]);
            let value = self.hex_value(&caps[2], code, number)?;
            return Ok(LineKind::Constant { name, value });
        }

        if let Some(caps) = self.label.captures(code) {
            let name = caps[1].to_string();
            if self.reserved.is_match(&name) {
                return Err(AssembleError::UnclassifiableLine {
                    line: number,
                    text: code.to_string(),
                });
            }
            return Ok(LineKind::Label(name));
        }

        if let Some(caps) = self.instruction.captures(code) {
            let mnemonic = caps[1].to_string();
            let register = caps.get(2).map_or(0, |m| digit(m.as_str()));
            let mode = caps.get(3).map_or(0, |m| digit(m.as_str()));
            let operand = match caps.get(4) {
                None => None,
                Some(m) if m.as_str().starts_with("0x") => {
                    Some(Operand::Literal(self.hex_value(m.as_str(), code, number)?))
                }
                Some(m) => {
                    if self.reserved.is_match(m.as_str()) {
                        return Err(AssembleError::UnclassifiableLine {
                            line: number,
                            text: code.to_string(),
                        });
                    }
                    Some(Operand::Symbol(m.as_str().to_string()))
                }
            };
            return Ok(LineKind::Instruction(Instruction {
                mnemonic,
                register,
                mode,
                operand,
            }));
        }

        Err(AssembleError::UnclassifiableLine {
            line: number,
            text: code.to_string(),
        })
    }

    /// Parses the digits of a `0x`-prefixed literal. Literals too wide to
    /// represent are rejected rather than silently truncated.
    fn hex_value(&self, token: &str, code: &str, number: usize) -> Result<i64, AssembleError> {
        i64::from_str_radix(&token[2..], 16).map_err(|_| AssembleError::UnclassifiableLine {
            line: number,
            text: code.to_string(),
        })
    }
}

/// Classifies every raw line once, producing the descriptor vector both
/// assembly passes share.
pub fn classify_source<S: AsRef<str>>(
    grammar: &Grammar,
    source: &[S],
) -> Result<Vec<Line>, AssembleError> {
    source
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let number = idx + 1;
            grammar
                .classify(raw.as_ref(), number)
                .map(|kind| Line { number, kind })
        })
        .collect()
}

/// Drops the trailing comment and surrounding whitespace.
fn strip(raw: &str) -> &str {
    match raw.find(';') {
        Some(at) => raw[..at].trim(),
        None => raw.trim(),
    }
}

/// The numeric value of a register or mode token (`r3` -> 3).
fn digit(token: &str) -> u16 {
    (token.as_bytes()[1] - b'0') as u16
}
