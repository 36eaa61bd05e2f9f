//! Compiler, linker and archiver descriptions.
//!
//! The backend serializes build rules against the traits in this module rather than against
//! any concrete tool, and build arguments travel through the system in a generalized form so
//! that flags recorded in one compiler's dialect can be re-spelled in another's.
//!
//! # Architecture
//!
//! - [`Argument`] / [`ArgumentKind`] / [`IncludeKind`] - toolchain-neutral arguments
//! - [`Compiler`] - the compiler trait, with [`cpp::Gnu`] and [`cpp::Clang`] as the GNU-like
//!   C++ family
//! - [`Linker`] / [`Archiver`] - the link-step traits with their GNU implementations
//!
//! Toolchain *detection* is a front-end concern; this module only describes tools that the
//! caller has already chosen.

mod archiver;
mod arguments;
mod compiler;
pub mod cpp;
mod linker;

pub use archiver::{Archiver, Gnu as GnuArchiver};
pub use arguments::{Argument, ArgumentKind, IncludeKind};
pub use compiler::{Compiler, FileSupport, Language, RspSupport};
pub use linker::{GnuBfd, Linker};
