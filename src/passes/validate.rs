//! Structural checks over the settled IR.

use crate::{
    mir::{BlockId, Instruction, Mir, NextBlock, Op},
    Result,
};

/// Verifies that the pipeline left no structural defects behind.
///
/// Checks every reachable block for:
///
/// - identifier reads (top-level or nested) still at version 0, which means the variable was
///   never defined on any path reaching the read;
/// - phis at blocks with fewer than two parents, which phi fixup should have resolved.
///
/// Unreachable (orphaned) blocks are not inspected; the rewrites that orphan blocks leave
/// their contents in whatever intermediate state the pipeline last saw.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedIr`] naming the offending block and variable.
pub fn validate(mir: &Mir) -> Result<()> {
    for id in mir.reachable() {
        let block = mir.block(id);
        for instruction in block.instructions() {
            check_reads(instruction, id)?;
            if instruction.as_phi().is_some() && block.parents().len() < 2 {
                return Err(malformed_ir!(
                    "phi for '{}' in {} which has {} parent(s)",
                    instruction.var.name,
                    id,
                    block.parents().len()
                ));
            }
        }
        if let NextBlock::Condition { condition, .. } = block.next() {
            check_reads(condition, id)?;
        }
    }
    Ok(())
}

fn check_reads(instruction: &Instruction, block: BlockId) -> Result<()> {
    match &instruction.op {
        Op::Identifier(target) => {
            if target.version == 0 {
                return Err(malformed_ir!(
                    "read of '{}' in {}, which is never defined on any reaching path",
                    target.name,
                    block
                ));
            }
            Ok(())
        }
        Op::Array(items) => items.iter().try_for_each(|item| check_reads(item, block)),
        Op::Dict(entries) => entries
            .values()
            .try_for_each(|value| check_reads(value, block)),
        Op::FunctionCall(call) => {
            for arg in &call.pos_args {
                check_reads(arg, block)?;
            }
            for arg in call.kw_args.values() {
                check_reads(arg, block)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
