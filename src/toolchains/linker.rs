//! The dynamic linker abstraction.
//!
//! GNU-style toolchains link through the compiler driver, so the linker command is usually the
//! compiler command again; the abstraction exists so the backend does not bake that in.

/// A concrete dynamic linker.
pub trait Linker {
    /// Short identifier, e.g. `ld.bfd`.
    fn id(&self) -> &'static str;

    /// The command used to invoke the linker.
    fn command(&self) -> &[String];

    /// Arguments naming the output file.
    fn output_args(&self, output: &str) -> Vec<String>;

    /// Arguments adding a library search directory.
    fn search_args(&self, dir: &str) -> Vec<String>;

    /// Arguments this linker always receives.
    fn always_args(&self) -> Vec<String>;
}

/// The GNU bfd linker, driven through the compiler.
#[derive(Debug, Clone)]
pub struct GnuBfd {
    command: Vec<String>,
}

impl GnuBfd {
    /// Creates a linker description from its invocation command (typically the compiler
    /// driver's).
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Linker for GnuBfd {
    fn id(&self) -> &'static str {
        "ld.bfd"
    }

    fn command(&self) -> &[String] {
        &self.command
    }

    fn output_args(&self, output: &str) -> Vec<String> {
        vec!["-o".into(), output.into()]
    }

    fn search_args(&self, dir: &str) -> Vec<String> {
        vec!["-L".into(), dir.into()]
    }

    fn always_args(&self) -> Vec<String> {
        Vec::new()
    }
}
