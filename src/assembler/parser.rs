//! The Parser module runs the two assembly passes over the classified
//! lines: the first collects every symbol definition, the second resolves
//! operands against the finished table and packs words.
//!
//! The passes are strictly sequential. Pass 1 must consume the whole source
//! before pass 2 starts, which is what makes forward references work: an
//! instruction may branch to a label defined further down the file.

use std::collections::HashMap;

use super::ast::{pack, Operand, Operation};
use super::error::AssembleError;
use super::lexer::{Line, LineKind};

/// Name -> value bindings produced by the first pass.
///
/// Constants keep their `$` prefix as part of the key and labels are stored
/// bare, so the two kinds occupy one namespace without ever colliding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: HashMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }

    /// First pass: fold the lines into a complete table.
    ///
    /// A label binds to the number of instruction lines strictly before it,
    /// which is the index of the instruction it precedes. Two labels
    /// declared back to back legally share one index.
    pub fn build(lines: &[Line]) -> Result<SymbolTable, AssembleError> {
        let mut table = SymbolTable::new();
        let mut instruction_count: i64 = 0;

        for line in lines {
            match &line.kind {
                LineKind::Blank => {}
                LineKind::Constant { name, value } => {
                    table.define(name.clone(), *value, line.number)?;
                }
                LineKind::Label(name) => {
                    table.define(name.clone(), instruction_count, line.number)?;
                }
                LineKind::Instruction(_) => instruction_count += 1,
            }
        }

        Ok(table)
    }

    fn define(&mut self, name: String, value: i64, line: usize) -> Result<(), AssembleError> {
        if self.symbols.contains_key(&name) {
            return Err(AssembleError::DuplicateDefinition { line, name });
        }
        self.symbols.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Second pass: one encoded word per instruction line, in source order.
/// Constant and label lines are skipped silently; they were consumed by the
/// first pass.
pub fn encode(lines: &[Line], symbols: &SymbolTable) -> Result<Vec<u16>, AssembleError> {
    let mut words = Vec::new();
    let mut index: i64 = 0;

    for line in lines {
        let ins = match &line.kind {
            LineKind::Instruction(ins) => ins,
            _ => continue,
        };

        let op = Operation::lookup(&ins.mnemonic).ok_or_else(|| AssembleError::UnknownOperation {
            line: line.number,
            mnemonic: ins.mnemonic.clone(),
        })?;

        let value = match &ins.operand {
            None => 0,
            Some(Operand::Literal(v)) => *v,
            Some(Operand::Symbol(name)) => {
                let target = symbols.get(name).ok_or_else(|| AssembleError::UndefinedSymbol {
                    line: line.number,
                    name: name.clone(),
                })?;
                // A branch target named through the table is an absolute
                // instruction index; encode the distance from the
                // instruction that follows this one. Literal operands are
                // taken as already-relative and pass through untouched.
                if op.relative {
                    target - index - 1
                } else {
                    target
                }
            }
        };

        words.push(pack(op.code, ins.register, ins.mode, value));
        index += 1;
    }

    Ok(words)
}
