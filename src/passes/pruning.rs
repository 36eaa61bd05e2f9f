//! Structural collapse: constant-branch pruning and straight-chain block joining.

use crate::{
    mir::{BlockId, Mir, NextBlock},
    passes::PassContext,
    Result,
};

/// Folds a conditional connector whose condition value is already known.
///
/// The connector is rewritten to an unconditional edge to the taken branch, and the dropped
/// branch is detached: its parent entry is removed, and if that orphans it, the detachment
/// cascades down its chain so that the join block no longer lists unreachable parents. The
/// orphaned blocks themselves stay in the arena; only the edges go away.
pub fn branch_pruning(mir: &mut Mir, block: BlockId, _ctx: &mut PassContext<'_>) -> Result<bool> {
    let decision = match mir.block(block).next() {
        NextBlock::Condition {
            condition,
            true_block,
            false_block,
            ..
        } => condition
            .truthiness()
            .map(|taken| (taken, *true_block, *false_block)),
        _ => None,
    };
    let Some((taken, true_block, false_block)) = decision else {
        return Ok(false);
    };

    let (kept, dropped) = if taken {
        (true_block, false_block)
    } else {
        (false_block, true_block)
    };

    *mir.block_mut(block).next_mut() = NextBlock::Next(kept);
    mir.block_mut(dropped).remove_parent(block);
    if mir.block(dropped).parents().is_empty() {
        detach(mir, dropped);
    }

    Ok(true)
}

/// Severs the outgoing edges of an orphaned block, cascading through any block this leaves
/// without parents.
fn detach(mir: &mut Mir, orphan: BlockId) {
    let mut worklist = vec![orphan];
    while let Some(id) = worklist.pop() {
        let next = mir.block_mut(id).replace_next(NextBlock::Terminal);
        for target in next.targets() {
            mir.block_mut(target).remove_parent(id);
            if mir.block(target).parents().is_empty() {
                worklist.push(target);
            }
        }
    }
}

/// Merges a block into its sole-parent predecessor.
///
/// When a block's connector is an unconditional edge to a block with exactly one parent, the
/// successor's instructions move onto the end of this block and its connector is adopted. The
/// emptied successor is orphaned, and the parents of whatever it pointed to are rewritten to
/// point here instead, preserving their position so phi operand ordering is unaffected.
pub fn join_blocks(mir: &mut Mir, block: BlockId, _ctx: &mut PassContext<'_>) -> Result<bool> {
    let target = match mir.block(block).next() {
        NextBlock::Next(target) => *target,
        _ => return Ok(false),
    };
    if target == block || mir.block(target).parents().len() != 1 {
        return Ok(false);
    }

    let moved = std::mem::take(mir.block_mut(target).instructions_mut());
    let next = mir.block_mut(target).replace_next(NextBlock::Terminal);
    mir.block_mut(target).clear_parents();

    mir.block_mut(block).instructions_mut().extend(moved);
    *mir.block_mut(block).next_mut() = next;
    for successor in mir.block(block).next().targets() {
        mir.block_mut(successor).replace_parent(target, block);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mir::{Instruction, Mir, MirBuilder, Op};
    use crate::passes::block_walker;

    /// `if <cond> { x = 9 } else { x = 10 }; y = x`, unnumbered.
    fn diamond(condition: Instruction) -> (Mir, BlockId, BlockId, BlockId) {
        let mut builder = MirBuilder::new();
        let blocks = builder.begin_condition(condition);
        builder.assign("x", Op::Number(9));
        builder.switch_to(blocks.false_block);
        builder.assign("x", Op::Number(10));
        builder.switch_to(blocks.join_block);
        builder.assign_identifier("y", "x");
        (
            builder.finish(),
            blocks.true_block,
            blocks.false_block,
            blocks.join_block,
        )
    }

    #[test]
    fn test_prunes_true_branch() {
        let (mut mir, t, f, join) = diamond(Instruction::new(Op::Boolean(true)));

        let mut ctx = PassContext::new();
        let root = mir.root();
        let progress = branch_pruning(&mut mir, root, &mut ctx).unwrap();

        assert!(progress);
        assert_eq!(mir.block(mir.root()).next(), &NextBlock::Next(t));
        assert_eq!(mir.block(join).parents(), &[t]);
        assert!(mir.block(f).parents().is_empty());
        assert!(mir.block(f).next().is_terminal());
    }

    #[test]
    fn test_prunes_false_branch() {
        let (mut mir, t, f, join) = diamond(Instruction::new(Op::Boolean(false)));

        let mut ctx = PassContext::new();
        let root = mir.root();
        branch_pruning(&mut mir, root, &mut ctx).unwrap();

        assert_eq!(mir.block(mir.root()).next(), &NextBlock::Next(f));
        assert_eq!(mir.block(join).parents(), &[f]);
        assert!(mir.block(t).parents().is_empty());
    }

    #[test]
    fn test_string_condition_is_truthy() {
        let (mut mir, t, _f, _join) = diamond(Instruction::new(Op::String("x86_64".into())));

        let mut ctx = PassContext::new();
        let root = mir.root();
        branch_pruning(&mut mir, root, &mut ctx).unwrap();
        assert_eq!(mir.block(mir.root()).next(), &NextBlock::Next(t));
    }

    #[test]
    fn test_unknown_condition_is_left_alone() {
        let (mut mir, _t, _f, _join) =
            diamond(Instruction::new(Op::Identifier(crate::mir::Variable::named(
                "cond",
            ))));

        let mut ctx = PassContext::new();
        let root = mir.root();
        let progress = branch_pruning(&mut mir, root, &mut ctx).unwrap();

        assert!(!progress);
        assert!(matches!(
            mir.block(mir.root()).next(),
            NextBlock::Condition { .. }
        ));
    }

    #[test]
    fn test_join_merges_chain() {
        let mut mir = Mir::new();
        let second = mir.add_block();
        mir.block_mut(second)
            .instructions_mut()
            .push(Instruction::named("x", Op::Number(1)));
        mir.connect(mir.root(), second);

        let mut ctx = PassContext::new();
        let root = mir.root();
        let progress = join_blocks(&mut mir, root, &mut ctx).unwrap();

        assert!(progress);
        assert_eq!(mir.block(mir.root()).instructions().len(), 1);
        assert!(mir.block(mir.root()).next().is_terminal());
        assert!(mir.block(second).instructions().is_empty());
        assert_eq!(mir.reachable().len(), 1);
    }

    #[test]
    fn test_join_skips_shared_target() {
        // The join block has two parents, so neither branch may swallow it.
        let (mut mir, t, _f, join) = diamond(Instruction::new(Op::Boolean(true)));

        let mut ctx = PassContext::new();
        let progress = join_blocks(&mut mir, t, &mut ctx).unwrap();

        assert!(!progress);
        assert_eq!(mir.block(join).parents().len(), 2);
    }

    #[test]
    fn test_prune_then_join_collapses_to_one_block() {
        let (mut mir, _t, _f, _join) = diamond(Instruction::new(Op::Boolean(true)));

        let mut ctx = PassContext::new();
        block_walker(&mut mir, &mut ctx, &[branch_pruning, join_blocks]).unwrap();

        assert_eq!(mir.reachable().len(), 1);
        let root = mir.block(mir.root());
        assert_eq!(root.instructions().len(), 2);
        assert_eq!(root.instructions()[0].op, Op::Number(9));
        assert!(root.next().is_terminal());
    }
}
