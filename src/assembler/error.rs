//! Everything that can go wrong while assembling.
//!
//! Every variant carries the 1-based source line it was raised on so the
//! driver can point the user at the exact offending line. All of these are
//! fatal to the current assembly; none are retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// A non-blank line that is not a constant definition, a label
    /// definition, or an instruction.
    #[error("syntax error in line {line}: `{text}`")]
    UnclassifiableLine { line: usize, text: String },

    /// A constant or label name bound twice in one source.
    #[error("syntax error in line {line}: `{name}` has already been defined")]
    DuplicateDefinition { line: usize, name: String },

    /// An instruction whose mnemonic is not in the operation table.
    #[error("syntax error in line {line}: the operation `{mnemonic}` is not a valid operation")]
    UnknownOperation { line: usize, mnemonic: String },

    /// An operand naming a symbol the first pass never saw.
    #[error("syntax error in line {line}: the value `{name}` has not been defined")]
    UndefinedSymbol { line: usize, name: String },
}
