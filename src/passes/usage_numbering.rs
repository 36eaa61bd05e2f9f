//! Annotates every identifier read with the version last defined on the traversal path.

use crate::{
    mir::{BlockId, Mir, NextBlock, Op},
    passes::{LastSeenTable, PassContext},
    Result,
};

/// Rewrites unresolved reads to the last-seen version of their variable, then records each
/// instruction's own definition.
///
/// Reads nested inside arrays, dicts and call arguments are rewritten the same way as
/// top-level identifiers. A read whose variable has no recorded definition yet is left at
/// version 0 without reporting progress; a later sweep usually resolves it once pruning and
/// joining have linearized the graph, and [`crate::passes::validate`] rejects whatever
/// remains unresolved after the pipeline settles.
pub fn usage_numbering(mir: &mut Mir, block: BlockId, ctx: &mut PassContext<'_>) -> Result<bool> {
    let mut progress = false;

    for instruction in mir.block_mut(block).instructions_mut() {
        progress |= rewrite_reads(&mut instruction.op, &ctx.last_seen);
        if instruction.var.is_named() && instruction.var.is_versioned() {
            ctx.last_seen
                .insert(instruction.var.name.clone(), instruction.var.version);
        }
    }

    // The branch decision is evaluated after the block body runs, so its reads resolve
    // against the state at the end of the block.
    if let NextBlock::Condition { condition, .. } = mir.block_mut(block).next_mut() {
        progress |= rewrite_reads(&mut condition.op, &ctx.last_seen);
    }

    Ok(progress)
}

fn rewrite_reads(op: &mut Op, last_seen: &LastSeenTable) -> bool {
    match op {
        Op::Identifier(target) => {
            if target.version != 0 {
                return false;
            }
            match last_seen.get(&target.name) {
                Some(&version) if version != 0 => {
                    target.version = version;
                    true
                }
                _ => false,
            }
        }
        Op::Array(items) => items
            .iter_mut()
            .fold(false, |progress, item| {
                progress | rewrite_reads(&mut item.op, last_seen)
            }),
        Op::Dict(entries) => entries
            .values_mut()
            .fold(false, |progress, value| {
                progress | rewrite_reads(&mut value.op, last_seen)
            }),
        Op::FunctionCall(call) => {
            let mut progress = false;
            for arg in &mut call.pos_args {
                progress |= rewrite_reads(&mut arg.op, last_seen);
            }
            for arg in call.kw_args.values_mut() {
                progress |= rewrite_reads(&mut arg.op, last_seen);
            }
            progress
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mir::{FunctionCall, Mir, MirBuilder, Op, Variable};
    use crate::passes::{block_walker, value_numbering};

    fn number_and_use(mut mir: Mir) -> (Mir, PassContext<'static>) {
        let mut ctx = PassContext::new();
        block_walker(&mut mir, &mut ctx, &[value_numbering, usage_numbering]).unwrap();
        (mir, ctx)
    }

    #[test]
    fn test_rewrites_simple_read() {
        let mut builder = MirBuilder::new();
        builder.assign("x", Op::Number(9));
        builder.assign_identifier("y", "x");
        let (mir, _ctx) = number_and_use(builder.finish());

        let root = mir.block(mir.root());
        assert_eq!(
            root.instructions()[1].op,
            Op::Identifier(Variable::new("x", 1))
        );
    }

    #[test]
    fn test_rewrites_redefined_read_to_latest() {
        let mut builder = MirBuilder::new();
        builder.assign("x", Op::Number(9));
        builder.assign("x", Op::Number(10));
        builder.assign_identifier("y", "x");
        let (mir, _ctx) = number_and_use(builder.finish());

        let root = mir.block(mir.root());
        assert_eq!(
            root.instructions()[2].op,
            Op::Identifier(Variable::new("x", 2))
        );
    }

    #[test]
    fn test_rewrites_nested_reads() {
        let mut builder = MirBuilder::new();
        builder.assign("x", Op::Number(9));
        builder.assign("a", Op::Array(vec![builder.read("x")]));
        builder.call(FunctionCall::new("message").with_arg(builder.read("x")));
        let (mir, _ctx) = number_and_use(builder.finish());

        let root = mir.block(mir.root());
        match &root.instructions()[1].op {
            Op::Array(items) => {
                assert_eq!(items[0].op, Op::Identifier(Variable::new("x", 1)));
            }
            other => panic!("expected array, got {other:?}"),
        }
        match &root.instructions()[2].op {
            Op::FunctionCall(call) => {
                assert_eq!(call.pos_args[0].op, Op::Identifier(Variable::new("x", 1)));
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolvable_read_is_left_alone() {
        let mut builder = MirBuilder::new();
        builder.assign_identifier("y", "never_defined");
        let mut mir = builder.finish();

        let mut ctx = PassContext::new();
        block_walker(&mut mir, &mut ctx, &[value_numbering]).unwrap();
        let progress = block_walker(&mut mir, &mut ctx, &[usage_numbering]).unwrap();

        assert!(!progress);
        let root = mir.block(mir.root());
        assert_eq!(
            root.instructions()[0].op,
            Op::Identifier(Variable::named("never_defined"))
        );
    }
}
