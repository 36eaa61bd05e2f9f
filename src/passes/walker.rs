//! The fixed-point driver that applies passes over the block graph.

use log::debug;
use rustc_hash::FxHashSet;

use crate::{
    mir::Mir,
    passes::{BlockPass, PassContext},
    Result,
};

/// Applies an ordered pass list to every reachable block, sweeping until a full sweep reports
/// no progress.
///
/// Traversal is depth-first along successor connectors with an explicit worklist; successor
/// targets are pushed in declaration order and popped last-in first-out. A visited set ensures
/// each block runs once per sweep even though join blocks are reached from both branches.
/// Successors are read *after* a block's passes have run, so a pass that rewrites the current
/// block's connector steers the remainder of the sweep.
///
/// Passes may splice the current block's instruction list and rewire connectors, but never
/// remove blocks from the arena; structural collapses orphan blocks instead, and orphans are
/// simply never visited again.
///
/// Returns `true` if any pass reported progress in any sweep.
///
/// # Errors
///
/// Stops at the first error a pass returns.
pub fn block_walker(
    mir: &mut Mir,
    ctx: &mut PassContext<'_>,
    passes: &[BlockPass],
) -> Result<bool> {
    let mut any_progress = false;
    let mut sweeps = 0u32;

    loop {
        let mut progress = false;
        let mut visited = FxHashSet::default();
        let mut stack = vec![mir.root()];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            for pass in passes {
                progress |= pass(mir, id, ctx)?;
            }
            stack.extend(mir.block(id).next().targets());
        }

        sweeps += 1;
        any_progress |= progress;
        if !progress {
            break;
        }
    }

    debug!("block walker settled after {sweeps} sweep(s)");
    Ok(any_progress)
}
