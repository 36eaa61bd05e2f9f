//! Replaces machine-object queries with literals from the machine tables.

use crate::{
    machines::{Info, Machine},
    mir::{BlockId, Instruction, Mir, NextBlock, Op},
    passes::PassContext,
    Result,
};

/// Evaluates `build_machine.*`, `host_machine.*` and `target_machine.*` calls.
///
/// Every instruction is walked, including instructions nested in arrays, dicts, call arguments
/// and the conditional connector's condition expression. A method call on one of the three
/// machine objects is replaced in place with the literal answer from the corresponding
/// [`Info`], keeping the instruction's result variable.
///
/// Reports no progress when the context carries no machine tables.
///
/// # Errors
///
/// Returns [`crate::Error::InconsistentMachineInfo`] when a machine object is asked for a
/// method the tables cannot answer.
pub fn machine_lower(mir: &mut Mir, block: BlockId, ctx: &mut PassContext<'_>) -> Result<bool> {
    let Some(machines) = ctx.machines else {
        return Ok(false);
    };
    let mut progress = false;

    for instruction in mir.block_mut(block).instructions_mut() {
        progress |= lower(instruction, machines)?;
    }
    if let NextBlock::Condition { condition, .. } = mir.block_mut(block).next_mut() {
        progress |= lower(condition, machines)?;
    }

    Ok(progress)
}

fn lower(
    instruction: &mut Instruction,
    machines: &crate::machines::PerMachine<Info>,
) -> Result<bool> {
    match &mut instruction.op {
        Op::FunctionCall(call) => {
            if let Some(role) = call.holder.as_deref().and_then(machine_object) {
                let info = machines.get(role);
                let object = call.holder.clone().unwrap_or_default();
                let method = call.name.clone();
                instruction.op = evaluate(info, &object, &method)?;
                return Ok(true);
            }
            let mut progress = false;
            for arg in &mut call.pos_args {
                progress |= lower(arg, machines)?;
            }
            for arg in call.kw_args.values_mut() {
                progress |= lower(arg, machines)?;
            }
            Ok(progress)
        }
        Op::Array(items) => {
            let mut progress = false;
            for item in items {
                progress |= lower(item, machines)?;
            }
            Ok(progress)
        }
        Op::Dict(entries) => {
            let mut progress = false;
            for value in entries.values_mut() {
                progress |= lower(value, machines)?;
            }
            Ok(progress)
        }
        _ => Ok(false),
    }
}

/// Maps a call holder to the machine role it queries.
fn machine_object(holder: &str) -> Option<Machine> {
    match holder {
        "build_machine" => Some(Machine::Build),
        "host_machine" => Some(Machine::Host),
        "target_machine" => Some(Machine::Target),
        _ => None,
    }
}

/// Answers one machine method from the given description.
fn evaluate(info: &Info, object: &str, method: &str) -> Result<Op> {
    match method {
        "cpu_family" => Ok(Op::String(info.cpu_family.clone())),
        "cpu" => Ok(Op::String(info.cpu().to_string())),
        "system" => Ok(Op::String(info.system())),
        "endian" => Ok(Op::String(info.endian.to_string())),
        _ => Err(crate::Error::InconsistentMachineInfo {
            object: object.to_string(),
            method: method.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machines::{Endian, Kernel, PerMachine};
    use crate::mir::{FunctionCall, MirBuilder, Variable};
    use crate::passes::block_walker;

    fn x86_machines() -> PerMachine<Info> {
        PerMachine::new(Info::new(
            Machine::Build,
            Kernel::Linux,
            Endian::Little,
            "x86_64",
        ))
    }

    #[test]
    fn test_simple() {
        let mut builder = MirBuilder::new();
        builder.assign("x", Op::Number(7));
        builder.push(Instruction::named(
            "y",
            Op::FunctionCall(Box::new(FunctionCall::method("host_machine", "cpu_family"))),
        ));
        let mut mir = builder.finish();

        let machines = x86_machines();
        let mut ctx = PassContext::with_machines(&machines);
        let progress = block_walker(&mut mir, &mut ctx, &[machine_lower]).unwrap();

        assert!(progress);
        let root = mir.block(mir.root());
        assert_eq!(root.instructions().len(), 2);
        assert_eq!(root.instructions()[1].op, Op::String("x86_64".into()));
        assert_eq!(root.instructions()[1].var, Variable::named("y"));
    }

    #[test]
    fn test_in_array() {
        let mut builder = MirBuilder::new();
        builder.assign(
            "x",
            Op::Array(vec![Instruction::new(Op::FunctionCall(Box::new(
                FunctionCall::method("host_machine", "cpu_family"),
            )))]),
        );
        let mut mir = builder.finish();

        let machines = x86_machines();
        let mut ctx = PassContext::with_machines(&machines);
        block_walker(&mut mir, &mut ctx, &[machine_lower]).unwrap();

        match &mir.block(mir.root()).instructions()[0].op {
            Op::Array(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].op, Op::String("x86_64".into()));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_in_function_args() {
        let mut builder = MirBuilder::new();
        builder.call(FunctionCall::new("foo").with_arg(Instruction::new(Op::FunctionCall(
            Box::new(FunctionCall::method("host_machine", "endian")),
        ))));
        let mut mir = builder.finish();

        let machines = x86_machines();
        let mut ctx = PassContext::with_machines(&machines);
        block_walker(&mut mir, &mut ctx, &[machine_lower]).unwrap();

        match &mir.block(mir.root()).instructions()[0].op {
            Op::FunctionCall(call) => {
                assert_eq!(call.name, "foo");
                assert_eq!(call.pos_args[0].op, Op::String("little".into()));
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_in_condition() {
        let mut builder = MirBuilder::new();
        builder.begin_condition(Instruction::new(Op::FunctionCall(Box::new(
            FunctionCall::method("host_machine", "cpu_family"),
        ))));
        builder.assign("x", Op::Number(2));
        let mut mir = builder.finish();

        let machines = x86_machines();
        let mut ctx = PassContext::with_machines(&machines);
        let progress = block_walker(&mut mir, &mut ctx, &[machine_lower]).unwrap();

        assert!(progress);
        match mir.block(mir.root()).next() {
            NextBlock::Condition { condition, .. } => {
                assert_eq!(condition.op, Op::String("x86_64".into()));
            }
            other => panic!("expected condition, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_method_fails() {
        let mut builder = MirBuilder::new();
        builder.push(Instruction::named(
            "y",
            Op::FunctionCall(Box::new(FunctionCall::method("host_machine", "phase_of_moon"))),
        ));
        let mut mir = builder.finish();

        let machines = x86_machines();
        let mut ctx = PassContext::with_machines(&machines);
        let result = block_walker(&mut mir, &mut ctx, &[machine_lower]);

        assert!(matches!(
            result,
            Err(crate::Error::InconsistentMachineInfo { .. })
        ));
    }

    #[test]
    fn test_no_machines_no_progress() {
        let mut builder = MirBuilder::new();
        builder.push(Instruction::named(
            "y",
            Op::FunctionCall(Box::new(FunctionCall::method("host_machine", "cpu_family"))),
        ));
        let mut mir = builder.finish();

        let mut ctx = PassContext::new();
        let progress = block_walker(&mut mir, &mut ctx, &[machine_lower]).unwrap();
        assert!(!progress);
    }
}
