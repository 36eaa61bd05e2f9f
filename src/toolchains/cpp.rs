//! C++ compilers with the GNU command-line dialect.
//!
//! Gcc and clang accept the same flag spellings for everything this library needs, so both are
//! thin identities over one shared GNU-like implementation.

use std::path::Path;

use crate::{
    toolchains::{Argument, ArgumentKind, Compiler, FileSupport, IncludeKind, Language, RspSupport},
    utils::relative_to,
};

/// The GNU C++ compiler (g++).
#[derive(Debug, Clone)]
pub struct Gnu {
    command: Vec<String>,
}

impl Gnu {
    /// Creates a g++ description from its invocation command.
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

/// The clang C++ compiler (clang++).
#[derive(Debug, Clone)]
pub struct Clang {
    command: Vec<String>,
}

impl Clang {
    /// Creates a clang++ description from its invocation command.
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

macro_rules! gnulike_compiler {
    ($type:ty, $id:literal) => {
        impl Compiler for $type {
            fn id(&self) -> &'static str {
                $id
            }

            fn language(&self) -> Language {
                Language::Cpp
            }

            fn command(&self) -> &[String] {
                &self.command
            }

            fn compile_only_args(&self) -> Vec<String> {
                vec!["-c".into()]
            }

            fn output_args(&self, output: &str) -> Vec<String> {
                vec!["-o".into(), output.into()]
            }

            fn always_args(&self) -> Vec<String> {
                vec!["-D_FILE_OFFSET_BITS=64".into()]
            }

            fn include_directories(
                &self,
                dir: &str,
                src_dir: &Path,
                build_dir: &Path,
                is_system: bool,
            ) -> Vec<String> {
                include_directories(dir, src_dir, build_dir, is_system)
            }

            fn generalize_argument(&self, raw: &str) -> Argument {
                generalize_argument(raw)
            }

            fn specialize_argument(
                &self,
                arg: &Argument,
                src_dir: &Path,
                build_dir: &Path,
            ) -> Vec<String> {
                specialize_argument(arg, src_dir, build_dir)
            }

            fn supports_file(&self, name: &str) -> FileSupport {
                supports_file(name)
            }

            fn generate_depfile(&self, target: &str, depfile: &str) -> Vec<String> {
                vec![
                    "-MD".into(),
                    "-MQ".into(),
                    target.into(),
                    "-MF".into(),
                    depfile.into(),
                ]
            }

            fn rsp_support(&self) -> RspSupport {
                RspSupport::Gcc
            }
        }
    };
}

gnulike_compiler!(Gnu, "gcc");
gnulike_compiler!(Clang, "clang");

fn generalize_argument(raw: &str) -> Argument {
    // Detached forms like "-I foo" arrive as two arguments and cannot be recognized here.
    if let Some(value) = raw.strip_prefix("-isystem") {
        Argument::include(value, IncludeKind::System)
    } else if let Some(value) = raw.strip_prefix("-I") {
        Argument::include(value, IncludeKind::Base)
    } else if let Some(value) = raw.strip_prefix("-L") {
        Argument::new(value, ArgumentKind::LinkSearch)
    } else if let Some(value) = raw.strip_prefix("-D") {
        Argument::new(value, ArgumentKind::Define)
    } else if let Some(value) = raw.strip_prefix("-l") {
        Argument::new(value, ArgumentKind::Link)
    } else if is_library_file(raw) {
        Argument::new(raw, ArgumentKind::Link)
    } else {
        Argument::new(raw, ArgumentKind::Raw)
    }
}

/// Recognizes static and shared library files, including versioned shared names like
/// `libfoo.so.1.2.3`.
fn is_library_file(name: &str) -> bool {
    if name.ends_with(".a") || name.ends_with(".so") {
        return true;
    }
    match name.find(".so.") {
        Some(position) => name[position + 4..]
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

fn specialize_argument(arg: &Argument, src_dir: &Path, build_dir: &Path) -> Vec<String> {
    match arg.kind {
        ArgumentKind::Raw => vec![arg.value.clone()],
        ArgumentKind::Define => vec!["-D".into(), arg.value.clone()],
        ArgumentKind::Link => vec!["-l".into(), arg.value.clone()],
        ArgumentKind::LinkSearch => vec!["-L".into(), arg.value.clone()],
        ArgumentKind::Include => include_directories(
            &arg.value,
            src_dir,
            build_dir,
            arg.include == Some(IncludeKind::System),
        ),
    }
}

/// Emits both halves of an include search path: the configured copy of the directory in the
/// build tree, and the pristine one in the source tree, both relative to the build dir.
fn include_directories(
    dir: &str,
    src_dir: &Path,
    build_dir: &Path,
    is_system: bool,
) -> Vec<String> {
    let flag = if is_system { "-isystem" } else { "-I" };
    let in_build = relative_to(&build_dir.join(dir), build_dir);
    let in_source = relative_to(&src_dir.join(dir), build_dir);
    vec![
        flag.into(),
        in_build.display().to_string(),
        flag.into(),
        in_source.display().to_string(),
    ]
}

fn supports_file(name: &str) -> FileSupport {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some("cpp" | "c++" | "cc") => FileSupport::Source,
        Some("hpp" | "h++" | "h") => FileSupport::Depends,
        _ => FileSupport::Unsupported,
    }
}
