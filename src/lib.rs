// Copyright 2025-2026 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # mortar
//!
//! A build-system compiler core. `mortar` takes a declarative build definition of the Meson
//! family that a front end has lowered into a typed mid-level IR, rewrites that IR to a fixed
//! point with a series of SSA-style analysis and transformation passes, and emits a ninja file
//! for a downstream ninja executor to run.
//!
//! # Architecture
//!
//! The library is organized into focused modules that mirror the flow of one compilation:
//!
//! - **MIR Layer**: Basic blocks, instructions with versioned variables, phi nodes, and the
//!   control-flow connectors, all owned by a session arena
//! - **Pass Layer**: A fixed-point block walker driving value numbering, phi
//!   insertion/fixup, usage numbering, constant folding, branch pruning, block joining, and
//!   machine-query lowering
//! - **Machines Layer**: Build/host/target descriptions, platform detection, and machine-file
//!   loading
//! - **Version Layer**: The RPM-style comparator behind version predicates
//! - **Toolchain Layer**: Compiler/linker/archiver abstractions with GNU-family
//!   implementations
//! - **Backend Layer**: The ninja serializer
//!
//! ## Key Components
//!
//! - [`crate::mir::Mir`] / [`crate::mir::MirBuilder`] - the IR and its construction API
//! - [`crate::passes::optimize`] - the full pipeline entry point
//! - [`crate::version::compare`] - version predicates
//! - [`crate::backends::ninja::generate`] - backend serialization
//! - [`crate::prelude`] - convenient re-exports of commonly used types
//! - [`crate::Error`] and [`crate::Result`] - comprehensive error handling
//!
//! # Usage Examples
//!
//! ## Lower, optimize, inspect
//!
//! ```rust
//! use mortar::machines::{self, PerMachine};
//! use mortar::mir::{FunctionCall, MirBuilder, Op};
//! use mortar::passes;
//!
//! // x = 9
//! // y = x
//! // message(y)
//! let mut builder = MirBuilder::new();
//! builder.assign("x", Op::Number(9));
//! builder.assign_identifier("y", "x");
//! builder.call(FunctionCall::new("message").with_arg(builder.read("y")));
//! let mut mir = builder.finish();
//!
//! let machines = PerMachine::new(machines::detect_build());
//! passes::optimize(&mut mir, &machines)?;
//!
//! // After copy propagation the call reads x's defining slot directly.
//! println!("{mir}");
//! # Ok::<(), mortar::Error>(())
//! ```
//!
//! ## Version predicates
//!
//! ```rust
//! use mortar::version::{compare, Operator};
//!
//! assert!(compare("1.0010", Operator::Gt, "1.9"));
//! assert!(compare("FC5", Operator::Eq, "fc5"));
//! ```
//!
//! # Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). The pipeline is total on well-formed
//! input; errors mean the input IR was structurally broken, a machine query could not be
//! answered, or backend I/O failed.
//!
//! # Concurrency
//!
//! The pass pipeline is strictly sequential by design: passes observe a consistent IR, and
//! all shared tables are owned by the driver for exactly one compilation session.

#[macro_use]
pub(crate) mod error;
pub(crate) mod utils;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// The mid-level IR: variables, instructions, basic blocks, and the construction API.
pub mod mir;

/// The pass pipeline: the fixed-point walker, the rewrite passes, and the driver.
pub mod passes;

/// Build, host and target machine descriptions.
pub mod machines;

/// RPM-style version comparison.
pub mod version;

/// Compiler, linker and archiver abstractions.
pub mod toolchains;

/// Per-build state consumed by the backend.
pub mod state;

/// Backend serializers.
pub mod backends;

/// Convenience alias for results produced by this library.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use mir::{Mir, MirBuilder};
pub use passes::optimize;
