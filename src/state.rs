//! Per-build state shared between the pipeline and the backend.

use std::path::PathBuf;

use crate::toolchains::{cpp, Archiver, Compiler, GnuArchiver, GnuBfd, Linker};

/// Everything the backend needs to know about one configured build.
///
/// The toolchain fields default to the GNU family driven through `c++`; callers doing
/// something else (cross builds, clang, unusual archivers) replace them before generation.
pub struct State {
    /// Root of the source tree.
    pub source_root: PathBuf,

    /// Root of the build tree; the backend writes its output here.
    pub build_root: PathBuf,

    /// The C++ compiler.
    pub compiler: Box<dyn Compiler>,

    /// The dynamic linker.
    pub linker: Box<dyn Linker>,

    /// The static archiver.
    pub archiver: Box<dyn Archiver>,
}

impl State {
    /// Creates a state with the default GNU toolchain.
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, build_root: impl Into<PathBuf>) -> Self {
        let driver = vec!["c++".to_string()];
        Self {
            source_root: source_root.into(),
            build_root: build_root.into(),
            compiler: Box::new(cpp::Gnu::new(driver.clone())),
            linker: Box::new(GnuBfd::new(driver)),
            archiver: Box::new(GnuArchiver::new(vec!["ar".to_string()])),
        }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("source_root", &self.source_root)
            .field("build_root", &self.build_root)
            .field("compiler", &self.compiler.id())
            .field("linker", &self.linker.id())
            .field("archiver", &self.archiver.id())
            .finish()
    }
}
