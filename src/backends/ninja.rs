//! The ninja file emitter.
//!
//! The backend consumes a fully optimized MIR: every branch on configuration data has been
//! pruned, every read points at a concrete definition, and every machine query is a literal.
//! What remains is a walk over the surviving target declarations (`executable(...)`,
//! `static_library(...)`), turning each into compile and link edges of a `build.ninja` file.

use std::fmt::Write as _;
use std::fs;

use log::info;
use rustc_hash::FxHashMap;

use crate::{
    mir::{Instruction, Mir, Op, Variable},
    state::State,
    utils::relative_to,
    Result,
};

/// The lowest ninja version whose syntax the emitter relies on.
const REQUIRED_VERSION: &str = "1.8.2";

#[derive(Debug, Clone, Copy, PartialEq)]
enum TargetKind {
    Executable,
    StaticLibrary,
}

#[derive(Debug)]
struct Target {
    name: String,
    kind: TargetKind,
    sources: Vec<String>,
}

impl Target {
    fn output(&self) -> String {
        match self.kind {
            TargetKind::Executable => self.name.clone(),
            TargetKind::StaticLibrary => format!("lib{}.a", self.name),
        }
    }
}

/// Generates `build.ninja` in the build root from the optimized MIR.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedIr`] when a target declaration's arguments cannot be
/// resolved to strings, and [`crate::Error::FileError`] when the output cannot be written.
pub fn generate(mir: &Mir, state: &State) -> Result<()> {
    let targets = collect_targets(mir)?;

    let mut out = String::new();
    out.push_str("# This is a generated file. Do not edit by hand.\n\n");
    let _ = writeln!(out, "ninja_required_version = {REQUIRED_VERSION}\n");
    write_rules(&mut out, state);
    for target in &targets {
        write_target(&mut out, target, state);
    }
    write_defaults(&mut out, &targets);

    fs::create_dir_all(&state.build_root)?;
    fs::write(state.build_root.join("build.ninja"), out)?;

    info!(
        "wrote {} with {} target(s)",
        state.build_root.join("build.ninja").display(),
        targets.len()
    );
    Ok(())
}

/// Walks the reachable MIR for target declarations, resolving identifier arguments through
/// the definitions the pipeline left behind.
fn collect_targets(mir: &Mir) -> Result<Vec<Target>> {
    let mut definitions: FxHashMap<Variable, &Instruction> = FxHashMap::default();
    let mut targets = Vec::new();

    for id in mir.reachable() {
        for instruction in mir.block(id).instructions() {
            if instruction.var.is_named() && instruction.var.is_versioned() {
                definitions.insert(instruction.var.clone(), instruction);
            }

            let Op::FunctionCall(call) = &instruction.op else {
                continue;
            };
            let kind = match (call.holder.as_deref(), call.name.as_str()) {
                (None, "executable") => TargetKind::Executable,
                (None, "static_library") => TargetKind::StaticLibrary,
                _ => continue,
            };

            let mut arguments = call.pos_args.iter();
            let name = match arguments.next() {
                Some(argument) => string_value(resolve(&definitions, argument)?)?.to_string(),
                None => {
                    return Err(malformed_ir!(
                        "{} declaration without a name in {}",
                        call.name,
                        id
                    ))
                }
            };

            let mut sources = Vec::new();
            for argument in arguments {
                flatten_sources(&definitions, argument, &mut sources)?;
            }
            targets.push(Target {
                name,
                kind,
                sources,
            });
        }
    }

    Ok(targets)
}

/// Follows an identifier argument to the instruction that defines it.
fn resolve<'a>(
    definitions: &FxHashMap<Variable, &'a Instruction>,
    argument: &'a Instruction,
) -> Result<&'a Instruction> {
    match &argument.op {
        Op::Identifier(target) => definitions.get(target).copied().ok_or_else(|| {
            malformed_ir!("read of {} does not resolve to a definition", target)
        }),
        _ => Ok(argument),
    }
}

fn string_value(instruction: &Instruction) -> Result<&str> {
    match &instruction.op {
        Op::String(value) => Ok(value),
        other => Err(malformed_ir!("expected a string, found {:?}", other)),
    }
}

fn flatten_sources(
    definitions: &FxHashMap<Variable, &Instruction>,
    argument: &Instruction,
    sources: &mut Vec<String>,
) -> Result<()> {
    let resolved = resolve(definitions, argument)?;
    match &resolved.op {
        Op::Array(items) => {
            for item in items {
                flatten_sources(definitions, item, sources)?;
            }
            Ok(())
        }
        _ => {
            sources.push(string_value(resolved)?.to_string());
            Ok(())
        }
    }
}

fn write_rules(out: &mut String, state: &State) {
    let compiler = state.compiler.as_ref();
    let mut compile = compiler.command().join(" ");
    compile.push_str(" $ARGS ");
    compile.push_str(&compiler.generate_depfile("$out", "$out.d").join(" "));
    compile.push(' ');
    compile.push_str(&compiler.output_args("$out").join(" "));
    compile.push(' ');
    compile.push_str(&compiler.compile_only_args().join(" "));
    compile.push_str(" $in");

    let _ = writeln!(out, "rule {}_compiler", compiler.language());
    let _ = writeln!(out, "  command = {compile}");
    let _ = writeln!(out, "  deps = {}", compiler.id());
    let _ = writeln!(out, "  depfile = $out.d");
    let _ = writeln!(out, "  description = Compiling {} object $out\n", compiler.language());

    let linker = state.linker.as_ref();
    let mut link = linker.command().join(" ");
    link.push_str(" $ARGS ");
    link.push_str(&linker.output_args("$out").join(" "));
    link.push_str(" $in $LINK_ARGS");

    let _ = writeln!(out, "rule {}_linker", compiler.language());
    let _ = writeln!(out, "  command = {link}");
    let _ = writeln!(out, "  description = Linking target $out\n");

    let archiver = state.archiver.as_ref();
    let _ = writeln!(out, "rule static_linker");
    let _ = writeln!(
        out,
        "  command = {} {} $out $in",
        archiver.command().join(" "),
        archiver.always_args().join(" ")
    );
    let _ = writeln!(out, "  description = Linking static target $out\n");
}

fn write_target(out: &mut String, target: &Target, state: &State) {
    let compiler = state.compiler.as_ref();
    let args = compiler.always_args().join(" ");

    let mut objects = Vec::new();
    for source in &target.sources {
        let object = format!("{}.p/{}.o", target.name, source.replace(['/', '\\'], "_"));
        let input = relative_to(&state.source_root.join(source), &state.build_root);
        let _ = writeln!(
            out,
            "build {}: {}_compiler {}",
            escape(&object),
            compiler.language(),
            escape(&input.display().to_string())
        );
        let _ = writeln!(out, "  ARGS = {args}\n");
        objects.push(object);
    }

    let escaped_objects: Vec<String> = objects.iter().map(|o| escape(o)).collect();
    match target.kind {
        TargetKind::Executable => {
            let _ = writeln!(
                out,
                "build {}: {}_linker {}",
                escape(&target.output()),
                compiler.language(),
                escaped_objects.join(" ")
            );
            let link_args = state.linker.always_args().join(" ");
            let _ = writeln!(out, "  ARGS =");
            let _ = writeln!(out, "  LINK_ARGS = {link_args}\n");
        }
        TargetKind::StaticLibrary => {
            let _ = writeln!(
                out,
                "build {}: static_linker {}\n",
                escape(&target.output()),
                escaped_objects.join(" ")
            );
        }
    }
}

fn write_defaults(out: &mut String, targets: &[Target]) {
    if targets.is_empty() {
        return;
    }
    let outputs: Vec<String> = targets.iter().map(|t| escape(&t.output())).collect();
    let _ = writeln!(out, "build all: phony {}\n", outputs.join(" "));
    let _ = writeln!(out, "default all");
}

/// Escapes a path for use in a ninja build statement.
fn escape(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '$' => escaped.push_str("$$"),
            ' ' => escaped.push_str("$ "),
            ':' => escaped.push_str("$:"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mir::{FunctionCall, MirBuilder};

    #[test]
    fn test_escape() {
        assert_eq!(escape("a b"), "a$ b");
        assert_eq!(escape("c:/x"), "c$:/x");
        assert_eq!(escape("$var"), "$$var");
        assert_eq!(escape("plain/path.cpp"), "plain/path.cpp");
    }

    #[test]
    fn test_collect_targets_resolves_identifiers() {
        let mut builder = MirBuilder::new();
        builder.push(Instruction {
            op: Op::Array(vec![Instruction::new(Op::String("main.cpp".into()))]),
            var: Variable::new("sources", 1),
        });
        builder.call(
            FunctionCall::new("executable")
                .with_arg(Instruction::new(Op::String("prog".into())))
                .with_arg(Instruction::new(Op::Identifier(Variable::new(
                    "sources", 1,
                )))),
        );
        let mir = builder.finish();

        let targets = collect_targets(&mir).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "prog");
        assert_eq!(targets[0].sources, vec!["main.cpp"]);
        assert_eq!(targets[0].kind, TargetKind::Executable);
    }

    #[test]
    fn test_collect_targets_rejects_unresolved_name() {
        let mut builder = MirBuilder::new();
        builder.call(FunctionCall::new("executable").with_arg(Instruction::new(
            Op::Identifier(Variable::new("missing", 1)),
        )));
        let mir = builder.finish();

        assert!(matches!(
            collect_targets(&mir),
            Err(crate::Error::MalformedIr { .. })
        ));
    }

    #[test]
    fn test_static_library_output_name() {
        let target = Target {
            name: "util".into(),
            kind: TargetKind::StaticLibrary,
            sources: Vec::new(),
        };
        assert_eq!(target.output(), "libutil.a");
    }
}
