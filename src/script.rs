//! Script decompile/compile helpers for legacy signature hashing

use miniscript::bitcoin::opcodes::all::{OP_PUSHNUM_1, OP_PUSHNUM_NEG1};
use miniscript::bitcoin::opcodes::Opcode;
use miniscript::bitcoin::script::{Builder, Instruction};
use miniscript::bitcoin::Script;

use crate::transaction::PreconditionError;

pub use miniscript::bitcoin::opcodes::all::OP_CODESEPARATOR;

/// Split a script into push and opcode instructions
pub fn decompile(script: &[u8]) -> Result<Vec<Instruction<'_>>, PreconditionError> {
    Script::from_bytes(script)
        .instructions()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PreconditionError::UndecompilableScript(e.to_string()))
}

/// Serialize instructions with minimal push encodings.
///
/// Single-byte pushes of 1..=16 and 0x81 become `OP_1`..`OP_16` and `OP_1NEGATE`.
pub fn compile(instructions: &[Instruction<'_>]) -> Vec<u8> {
    instructions
        .iter()
        .fold(Builder::new(), |builder, instruction| match instruction {
            Instruction::Op(op) => builder.push_opcode(*op),
            Instruction::PushBytes(push) => match push.as_bytes() {
                [n @ 1..=16] => {
                    builder.push_opcode(Opcode::from(OP_PUSHNUM_1.to_u8() + n - 1))
                }
                [0x81] => builder.push_opcode(OP_PUSHNUM_NEG1),
                _ => builder.push_slice(*push),
            },
        })
        .into_script()
        .into_bytes()
}

/// Recompile `script` without any `OP_CODESEPARATOR`
pub fn strip_code_separators(script: &[u8]) -> Result<Vec<u8>, PreconditionError> {
    let instructions: Vec<_> = decompile(script)?
        .into_iter()
        .filter(|i| !matches!(i, Instruction::Op(op) if *op == OP_CODESEPARATOR))
        .collect();
    Ok(compile(&instructions))
}

/// Human-readable script
pub fn to_asm(script: &[u8]) -> String {
    Script::from_bytes(script).to_asm_string()
}
