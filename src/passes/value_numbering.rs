//! Issues SSA versions to every named instruction result.

use crate::{
    mir::{BlockId, Mir},
    passes::PassContext,
    Result,
};

/// Assigns the next version for each named result that is still at version 0.
///
/// Versions are issued per name from the shared [`crate::passes::ValueTable`], so they are
/// monotonically increasing across the whole graph in traversal order. Results that already
/// carry a version are left alone, which makes the pass idempotent once every named result is
/// non-zero.
pub fn value_numbering(mir: &mut Mir, block: BlockId, ctx: &mut PassContext<'_>) -> Result<bool> {
    let mut progress = false;

    for instruction in mir.block_mut(block).instructions_mut() {
        if !instruction.var.is_named() || instruction.var.is_versioned() {
            continue;
        }
        let version = ctx.values.entry(instruction.var.name.clone()).or_insert(0);
        *version += 1;
        instruction.var.version = *version;
        progress = true;
    }

    Ok(progress)
}
