//! The Assembler module is in charge of taking LM16
//! source text and producing a Vec<u16> of encoded
//! machine words.
//!
//! It does this in two passes over the classified lines:
//! the first records every constant and label in a symbol
//! table, the second resolves each instruction's operand
//! against that table and packs the opcode, register, mode,
//! and value bit fields. Because the table is complete before
//! any encoding starts, operands may reference symbols defined
//! later in the source.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod listing;
pub mod parser;

use self::error::AssembleError;
use self::lexer::Grammar;
use self::parser::SymbolTable;

/// Assembles raw source lines into encoded 16-bit words.
///
/// Lines are classified exactly once; both passes walk the same descriptor
/// vector. The first malformed line aborts the whole assembly and no
/// partial output is returned.
pub fn assemble<S: AsRef<str>>(source: &[S]) -> Result<Vec<u16>, AssembleError> {
    let grammar = Grammar::new();
    let lines = lexer::classify_source(&grammar, source)?;

    let symbols = SymbolTable::build(&lines)?;
    debug!("symbol table holds {} definition(s)", symbols.len());

    parser::encode(&lines, &symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        let source = [
            "$limit = 0x05",
            "loop:",
            "add r0, 0x01",
            "cmp r0, $limit",
            "bne loop",
            "halt",
        ];

        let words = assemble(&source).unwrap();
        // bne sits at instruction index 2 and targets index 0:
        // offset 0 - 2 - 1 = -3, two's complement 0xFD.
        assert_eq!(words, vec![0x2001, 0x9005, 0x70FD, 0x8000]);

        assert_eq!(
            listing::render(&words),
            vec!["00: 2001", "01: 9005", "02: 70FD", "03: 8000"]
        );
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let source = ["$limit = 0x05", "loop:", "add r0, 0x01", "bne loop", "halt"];
        assert_eq!(assemble(&source).unwrap(), assemble(&source).unwrap());
    }

    #[test]
    fn test_forward_and_backward_references() {
        let source = [
            "ldr r1, $late   ; constant defined below",
            "bra ahead       ; label defined below",
            "back:",
            "halt",
            "ahead:",
            "bra back",
            "$late = 0xFF",
        ];

        // Instruction indices: ldr=0, bra=1, halt=2, bra=3;
        // back -> 2, ahead -> 3.
        let words = assemble(&source).unwrap();
        assert_eq!(words, vec![0x04FF, 0x6001, 0x8000, 0x60FE]);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(assemble::<&str>(&[]).unwrap(), vec![]);
        assert_eq!(assemble(&["", "; only comments", "   "]).unwrap(), vec![]);
    }

    #[test]
    fn test_duplicate_definition_names_the_line() {
        let source = ["$x = 0x01", "halt", "$x = 0x02"];
        assert_eq!(
            assemble(&source).unwrap_err(),
            AssembleError::DuplicateDefinition {
                line: 3,
                name: "$x".to_string(),
            }
        );
    }

    #[test]
    fn test_undefined_symbol_names_the_line_and_symbol() {
        let source = ["halt", "bne nowhere"];
        assert_eq!(
            assemble(&source).unwrap_err(),
            AssembleError::UndefinedSymbol {
                line: 2,
                name: "nowhere".to_string(),
            }
        );
    }

    #[test]
    fn test_classification_error_aborts_before_encoding() {
        // The bad line sits after a valid instruction; nothing is emitted.
        let source = ["halt", "?? not assembly ??"];
        assert!(matches!(
            assemble(&source).unwrap_err(),
            AssembleError::UnclassifiableLine { line: 2, .. }
        ));
    }
}
