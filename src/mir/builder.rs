//! Construction API for the initial MIR.
//!
//! The front end lowers the build-definition AST through this builder; tests drive it directly.
//! Everything it produces is "version 0" MIR: result variables and identifier targets are left
//! undefined for the pass pipeline to resolve, and no phis exist yet.

use crate::mir::{BlockId, FunctionCall, Instruction, Mir, Op, Variable};

/// The branch heads and join produced by [`MirBuilder::begin_condition`].
#[derive(Debug, Clone, Copy)]
pub struct ConditionBlocks {
    /// Head of the truthy branch.
    pub true_block: BlockId,
    /// Head of the falsy branch.
    pub false_block: BlockId,
    /// Block where the branches merge again.
    pub join_block: BlockId,
}

/// Incrementally builds a [`Mir`], one block at a time.
///
/// The builder keeps a current block; statement helpers append to it, and
/// [`MirBuilder::begin_condition`] forks it into a diamond whose branch tails are pre-wired to
/// the join.
///
/// # Examples
///
/// ```rust
/// use mortar::mir::{FunctionCall, MirBuilder, Op};
///
/// // x = 9
/// // y = x
/// // message(y)
/// let mut builder = MirBuilder::new();
/// builder.assign("x", Op::Number(9));
/// builder.assign_identifier("y", "x");
/// builder.call(FunctionCall::new("message").with_arg(builder.read("y")));
/// let mir = builder.finish();
/// assert_eq!(mir.block(mir.root()).instructions().len(), 3);
/// ```
#[derive(Debug)]
pub struct MirBuilder {
    mir: Mir,
    current: BlockId,
}

impl MirBuilder {
    /// Creates a builder positioned at the root block of a fresh MIR.
    #[must_use]
    pub fn new() -> Self {
        let mir = Mir::new();
        let current = mir.root();
        Self { mir, current }
    }

    /// Returns the block statements are currently appended to.
    #[must_use]
    pub const fn current(&self) -> BlockId {
        self.current
    }

    /// Moves the append position to another block.
    pub fn switch_to(&mut self, block: BlockId) {
        self.current = block;
    }

    /// Appends a raw instruction to the current block.
    pub fn push(&mut self, instruction: Instruction) {
        self.mir
            .block_mut(self.current)
            .instructions_mut()
            .push(instruction);
    }

    /// Appends `name = <op>`.
    pub fn assign(&mut self, name: &str, op: Op) {
        self.push(Instruction::named(name, op));
    }

    /// Appends `name = <target>`, a copy of another variable.
    pub fn assign_identifier(&mut self, name: &str, target: &str) {
        self.push(Instruction::named(
            name,
            Op::Identifier(Variable::named(target)),
        ));
    }

    /// Appends a bare call statement.
    pub fn call(&mut self, call: FunctionCall) {
        self.push(Instruction::new(Op::FunctionCall(Box::new(call))));
    }

    /// Creates an unresolved read of a variable, for use as a call argument or container
    /// element.
    #[must_use]
    pub fn read(&self, name: &str) -> Instruction {
        Instruction::new(Op::Identifier(Variable::named(name)))
    }

    /// Forks the current block on `condition`.
    ///
    /// Allocates the two branch heads and the join, wires both branch tails straight into the
    /// join, and leaves the builder positioned at the true branch. Callers lower each branch by
    /// switching to its head, then continue after the diamond by switching to the join.
    pub fn begin_condition(&mut self, condition: Instruction) -> ConditionBlocks {
        let true_block = self.mir.add_block();
        let false_block = self.mir.add_block();
        let join_block = self.mir.add_block();
        self.mir.connect(true_block, join_block);
        self.mir.connect(false_block, join_block);
        self.mir
            .set_condition(self.current, condition, true_block, false_block, join_block);
        self.current = true_block;
        ConditionBlocks {
            true_block,
            false_block,
            join_block,
        }
    }

    /// Consumes the builder and returns the finished MIR.
    #[must_use]
    pub fn finish(self) -> Mir {
        self.mir
    }
}

impl Default for MirBuilder {
    fn default() -> Self {
        Self::new()
    }
}
