//! Collapses copy chains so every read points at its canonical defining slot.

use crate::{
    mir::{BlockId, Mir, NextBlock, Op},
    passes::{PassContext, ReplacementTable},
    Result,
};

/// Folds identifier chains through the shared [`ReplacementTable`].
///
/// Literal definitions register themselves as their own canonical source. An identifier whose
/// target already has a canonical source is rewritten to read that source directly, and then
/// registers its own result under the same source, so `x = 9; y = x; z = y` leaves `z` (and
/// every later read of `z`) pointing straight at `x`'s defining slot. Reads nested in arrays,
/// dicts and call arguments are redirected with a single table lookup each; their chains were
/// already collapsed when the defining identifiers were processed.
///
/// The table only ever gains entries and rewrites never revert, so the pass reaches its fixed
/// point after at most one sweep per newly discovered identifier.
pub fn constant_folding(mir: &mut Mir, block: BlockId, ctx: &mut PassContext<'_>) -> Result<bool> {
    let mut progress = false;

    for instruction in mir.block_mut(block).instructions_mut() {
        match &mut instruction.op {
            Op::Number(_) | Op::String(_) | Op::Boolean(_) => {
                if instruction.var.is_named() && instruction.var.is_versioned() {
                    ctx.replacements
                        .entry(instruction.var.clone())
                        .or_insert_with(|| instruction.var.clone());
                }
            }
            Op::Identifier(target) => {
                if let Some(canonical) = ctx.replacements.get(target) {
                    if canonical != target {
                        *target = canonical.clone();
                        progress = true;
                    }
                    if instruction.var.is_named() && instruction.var.is_versioned() {
                        ctx.replacements
                            .insert(instruction.var.clone(), target.clone());
                    }
                }
            }
            Op::Array(_) | Op::Dict(_) | Op::FunctionCall(_) => {
                progress |= redirect_reads(&mut instruction.op, &ctx.replacements);
            }
            Op::Phi { .. } => {}
        }
    }

    if let NextBlock::Condition { condition, .. } = mir.block_mut(block).next_mut() {
        progress |= redirect_reads(&mut condition.op, &ctx.replacements);
    }

    Ok(progress)
}

fn redirect_reads(op: &mut Op, replacements: &ReplacementTable) -> bool {
    match op {
        Op::Identifier(target) => match replacements.get(target) {
            Some(canonical) if canonical != target => {
                *target = canonical.clone();
                true
            }
            _ => false,
        },
        Op::Array(items) => items.iter_mut().fold(false, |progress, item| {
            progress | redirect_reads(&mut item.op, replacements)
        }),
        Op::Dict(entries) => entries.values_mut().fold(false, |progress, value| {
            progress | redirect_reads(&mut value.op, replacements)
        }),
        Op::FunctionCall(call) => {
            let mut progress = false;
            for arg in &mut call.pos_args {
                progress |= redirect_reads(&mut arg.op, replacements);
            }
            for arg in call.kw_args.values_mut() {
                progress |= redirect_reads(&mut arg.op, replacements);
            }
            progress
        }
        _ => false,
    }
}
