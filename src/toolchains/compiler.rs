//! The compiler abstraction the backend emits against.

use std::path::Path;

use strum::Display;

use crate::toolchains::Argument;

/// Languages with toolchain support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Language {
    /// C++.
    #[strum(serialize = "cpp")]
    Cpp,
}

/// Whether (and how) a compiler supports response files for long command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RspSupport {
    /// No response file support.
    Unsupported,
    /// GCC-style `@file` syntax.
    Gcc,
    /// MSVC-style `@file` syntax.
    Msvc,
}

/// How a compiler relates to a given file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSupport {
    /// The compiler can compile this file.
    Source,
    /// The file participates as a dependency (headers).
    Depends,
    /// The compiler has no use for this file.
    Unsupported,
}

/// A concrete compiler: how to invoke it and how to spell intents in its dialect.
///
/// Implementations are per compiler *family*; gcc and clang share one GNU-like dialect and
/// differ only in identity. The backend drives these methods to assemble rule command lines,
/// and the argument plumbing uses [`Compiler::generalize_argument`] /
/// [`Compiler::specialize_argument`] to move flags between toolchains.
pub trait Compiler {
    /// Short identifier, e.g. `gcc` or `clang`.
    fn id(&self) -> &'static str;

    /// The language this compiler compiles.
    fn language(&self) -> Language;

    /// The command used to invoke the compiler.
    fn command(&self) -> &[String];

    /// Arguments that compile without linking.
    fn compile_only_args(&self) -> Vec<String>;

    /// Arguments naming the output file.
    fn output_args(&self, output: &str) -> Vec<String>;

    /// Arguments this compiler always receives.
    fn always_args(&self) -> Vec<String>;

    /// Arguments adding `dir` to the header search path, relative to the build directory.
    fn include_directories(
        &self,
        dir: &str,
        src_dir: &Path,
        build_dir: &Path,
        is_system: bool,
    ) -> Vec<String>;

    /// Lifts a raw argument in this compiler's dialect into a toolchain-neutral [`Argument`].
    fn generalize_argument(&self, raw: &str) -> Argument;

    /// Spells a toolchain-neutral [`Argument`] in this compiler's dialect.
    fn specialize_argument(&self, arg: &Argument, src_dir: &Path, build_dir: &Path)
        -> Vec<String>;

    /// Classifies a file by name.
    fn supports_file(&self, name: &str) -> FileSupport;

    /// Arguments that make the compiler write a dependency file for `target`.
    fn generate_depfile(&self, target: &str, depfile: &str) -> Vec<String>;

    /// Response file support of this compiler.
    fn rsp_support(&self) -> RspSupport;
}
