//! # mortar Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! library. Import it to get quick access to the essential pieces of the compiler core.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all mortar operations
pub use crate::Error;

/// The result type used throughout mortar
pub use crate::Result;

// ================================================================================================
// MIR
// ================================================================================================

/// The MIR data model and its construction API
pub use crate::mir::{
    BasicBlock, BlockId, ConditionBlocks, FunctionCall, Instruction, Mir, MirBuilder, NextBlock,
    Op, Variable,
};

// ================================================================================================
// Pass Pipeline
// ================================================================================================

/// The fixed-point driver and the full pipeline entry point
pub use crate::passes::{block_walker, optimize, validate, PassContext};

/// The individual rewrite passes, for callers assembling their own walks
pub use crate::passes::{
    branch_pruning, constant_folding, fixup_phis, insert_phis, join_blocks, machine_lower,
    usage_numbering, value_numbering,
};

// ================================================================================================
// Machines and Versions
// ================================================================================================

/// Machine descriptions and detection
pub use crate::machines::{detect_build, Endian, Info, Kernel, Machine, PerMachine};

/// RPM-style version comparison
pub use crate::version::{compare, Operator};

// ================================================================================================
// Toolchains and Backends
// ================================================================================================

/// The toolchain abstractions
pub use crate::toolchains::{Archiver, Argument, ArgumentKind, Compiler, IncludeKind, Linker};

/// Per-build state for the backend
pub use crate::state::State;

/// The ninja emitter
pub use crate::backends::ninja;
