//! The rewrite passes that take a freshly lowered MIR to its optimized fixed point.
//!
//! # Architecture
//!
//! Every pass is a plain function over one block, `fn(&mut Mir, BlockId, &mut PassContext)
//! -> Result<bool>`, returning whether it made progress. The [`block_walker`] applies an
//! ordered pass list to every reachable block and sweeps until a full sweep reports no
//! progress.
//!
//! The pipeline runs in two batches, and the split is load-bearing: phi insertion must observe
//! the definitions in both branches before branch pruning deletes one of them, and phi fixup
//! must run after pruning.
//!
//! 1. [`value_numbering`] and [`insert_phis`], to a fixed point.
//! 2. [`branch_pruning`], [`join_blocks`], [`fixup_phis`], [`usage_numbering`],
//!    [`constant_folding`] and [`machine_lower`], to a fixed point.
//!
//! [`optimize`] is the driver that runs both batches and then [`validate`]s the result.
//!
//! # Shared state
//!
//! The counters and rewrite tables live in a [`PassContext`] owned by the driver. They are
//! created empty at the start of a compilation session and discarded at the end; nothing leaks
//! across sessions.
//!
//! # Usage
//!
//! ```rust
//! use mortar::machines::{self, PerMachine};
//! use mortar::mir::{MirBuilder, Op};
//! use mortar::passes;
//!
//! let mut builder = MirBuilder::new();
//! builder.assign("x", Op::Number(9));
//! builder.assign_identifier("y", "x");
//! let mut mir = builder.finish();
//!
//! let machines = PerMachine::new(machines::detect_build());
//! passes::optimize(&mut mir, &machines)?;
//! # Ok::<(), mortar::Error>(())
//! ```

mod constant_folding;
mod machine_lower;
mod phis;
mod pruning;
mod usage_numbering;
mod validate;
mod value_numbering;
mod walker;

pub use constant_folding::constant_folding;
pub use machine_lower::machine_lower;
pub use phis::{fixup_phis, insert_phis};
pub use pruning::{branch_pruning, join_blocks};
pub use usage_numbering::usage_numbering;
pub use validate::validate;
pub use value_numbering::value_numbering;
pub use walker::block_walker;

use rustc_hash::FxHashMap;

use crate::{
    machines::{Info, PerMachine},
    mir::{BlockId, Mir, Variable},
    Result,
};

/// Highest version issued so far, per variable name.
pub type ValueTable = FxHashMap<String, u32>;

/// Version most recently defined along the current traversal path, per variable name.
pub type LastSeenTable = FxHashMap<String, u32>;

/// Canonical slot that a read of a given slot should be rewritten to.
pub type ReplacementTable = FxHashMap<Variable, Variable>;

/// Shared state threaded through one compilation session's pass pipeline.
///
/// All tables start empty and are discarded with the context; they must never be reused for a
/// second session.
#[derive(Debug, Default)]
pub struct PassContext<'a> {
    /// Per-name version counters, shared between value numbering and phi insertion.
    pub values: ValueTable,

    /// Last definition seen along the traversal, consumed by usage numbering.
    pub last_seen: LastSeenTable,

    /// Canonical sources for constant folding / copy propagation.
    pub replacements: ReplacementTable,

    /// Machine descriptions for lowering `host_machine.*` and friends. Passes that do not
    /// query machines ignore this; [`machine_lower`] reports no progress when it is absent.
    pub machines: Option<&'a PerMachine<Info>>,
}

impl<'a> PassContext<'a> {
    /// Creates an empty context without machine tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context carrying machine tables for [`machine_lower`].
    #[must_use]
    pub fn with_machines(machines: &'a PerMachine<Info>) -> Self {
        Self {
            machines: Some(machines),
            ..Self::default()
        }
    }
}

/// A per-block rewrite pass, as consumed by [`block_walker`].
pub type BlockPass = fn(&mut Mir, BlockId, &mut PassContext<'_>) -> Result<bool>;

/// Runs the full pipeline over a freshly lowered MIR.
///
/// Numbering and phi insertion run first so that every definition is observed before any
/// structural rewriting; the second batch prunes constant branches, joins the remaining
/// chains, resolves phis and reads, folds copies, and evaluates machine queries. Both batches
/// sweep to a fixed point, after which [`validate`] checks that nothing was left unresolved.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedIr`] if the settled IR still contains an unresolvable
/// read or a phi at a block with fewer than two parents, and
/// [`crate::Error::InconsistentMachineInfo`] if the build definition queries a machine method
/// the tables cannot answer.
pub fn optimize(mir: &mut Mir, machines: &PerMachine<Info>) -> Result<()> {
    let mut ctx = PassContext::with_machines(machines);

    block_walker(mir, &mut ctx, &[value_numbering, insert_phis])?;
    block_walker(
        mir,
        &mut ctx,
        &[
            branch_pruning,
            join_blocks,
            fixup_phis,
            usage_numbering,
            constant_folding,
            machine_lower,
        ],
    )?;

    validate(mir)
}
