//! Phi insertion at join blocks and phi resolution after pruning.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use crate::{
    mir::{BlockId, Instruction, Mir, Op, Variable},
    passes::PassContext,
    Result,
};

/// Inserts phi nodes for variables defined on more than one parent chain.
///
/// A block with at most one parent is already strictly dominated by it and needs no phis. For
/// every name defined in at least two parents, one phi per additional parent is emitted: the
/// first carries the versions reaching from the first two parents, and each further phi merges
/// the previous phi's result with the next parent's version. We cannot rely on every branch
/// defining every variable, so names defined on a single parent are deliberately left as plain
/// reads of that parent's definition.
///
/// Phis the block already carries (same name and operand pair) are never re-added, and a parent
/// whose definition has not been numbered yet is skipped until a later sweep, so the pass
/// converges together with value numbering.
pub fn insert_phis(mir: &mut Mir, block: BlockId, ctx: &mut PassContext<'_>) -> Result<bool> {
    let parents = mir.block(block).parents().to_vec();
    if parents.len() < 2 {
        return Ok(false);
    }

    // Phis already present, keyed by name and operand pair, mapped to the version they carry.
    let mut existing: FxHashMap<(String, u32, u32), u32> = FxHashMap::default();
    for instruction in mir.block(block).instructions() {
        if let Some((left, right)) = instruction.as_phi() {
            existing.insert(
                (instruction.var.name.clone(), left, right),
                instruction.var.version,
            );
        }
    }

    // Last definition of each name in each parent, and the set of dominated names.
    let per_parent: Vec<BTreeMap<String, u32>> = parents
        .iter()
        .map(|parent| last_definitions(mir, *parent))
        .collect();
    let mut dominated: BTreeSet<String> = BTreeSet::new();
    let mut all_names: BTreeSet<&String> = BTreeSet::new();
    for definitions in &per_parent {
        for name in definitions.keys() {
            if !all_names.insert(name) {
                dominated.insert(name.clone());
            }
        }
    }

    let mut pending: Vec<Instruction> = Vec::new();
    for name in &dominated {
        let mut last = 0u32;
        for definitions in &per_parent {
            let Some(&version) = definitions.get(name) else {
                continue;
            };
            if version == 0 {
                // Not numbered yet; a later sweep picks this parent up.
                continue;
            }
            if last == 0 {
                last = version;
                continue;
            }
            if let Some(&phi_version) = existing.get(&(name.clone(), last, version)) {
                last = phi_version;
                continue;
            }
            let fresh = {
                let counter = ctx.values.entry(name.clone()).or_insert(0);
                *counter += 1;
                *counter
            };
            existing.insert((name.clone(), last, version), fresh);
            pending.push(Instruction {
                op: Op::Phi {
                    left: last,
                    right: version,
                },
                var: Variable::new(name.clone(), fresh),
            });
            last = fresh;
        }
    }

    if pending.is_empty() {
        return Ok(false);
    }

    mir.block_mut(block)
        .instructions_mut()
        .splice(0..0, pending);
    Ok(true)
}

/// Maps each name defined in `block` to the version of its last definition.
fn last_definitions(mir: &Mir, block: BlockId) -> BTreeMap<String, u32> {
    let mut definitions = BTreeMap::new();
    for instruction in mir.block(block).instructions() {
        if instruction.var.is_named() {
            definitions.insert(instruction.var.name.clone(), instruction.var.version);
        }
    }
    definitions
}

/// Resolves phis whose operands are no longer both reachable.
///
/// After branch pruning removed a parent chain, a phi may be left with only one of its operand
/// versions still defined in a parent. Such a phi degenerates to a plain read of the surviving
/// version, keeping its own result variable so downstream reads stay valid. A phi with both
/// operands still reachable survives untouched.
///
/// If an earlier instruction in the same block redefines the phi's name at one of its operand
/// versions, that redefinition is the live one and the other operand is dead code, so the phi
/// resolves against it.
pub fn fixup_phis(mir: &mut Mir, block: BlockId, _ctx: &mut PassContext<'_>) -> Result<bool> {
    let mut progress = false;
    let parents = mir.block(block).parents().to_vec();
    let count = mir.block(block).instructions().len();

    for index in 0..count {
        let (left_version, right_version, name) = {
            let instruction = &mir.block(block).instructions()[index];
            match instruction.as_phi() {
                Some((left, right)) => (left, right, instruction.var.name.clone()),
                None => continue,
            }
        };

        let mut left = false;
        let mut right = false;
        for parent in &parents {
            for instruction in mir.block(*parent).instructions() {
                if instruction.var.name == name {
                    if instruction.var.version == left_version {
                        left = true;
                        break;
                    } else if instruction.var.version == right_version {
                        right = true;
                        break;
                    }
                }
            }
            if left && right {
                break;
            }
        }

        if left ^ right {
            resolve(mir, block, index, &name, if left { left_version } else { right_version });
            progress = true;
            continue;
        }

        // A preceding instruction in this block that redefines the name supersedes whatever
        // the parents provided; the last such redefinition is the truth.
        for prior in &mir.block(block).instructions()[..index] {
            if prior.var.name == name {
                left = prior.var.version == left_version;
                right = prior.var.version == right_version;
            }
        }

        if left ^ right {
            resolve(mir, block, index, &name, if left { left_version } else { right_version });
            progress = true;
        }
    }

    Ok(progress)
}

/// Replaces the phi at `index` with an identifier reading the surviving version.
fn resolve(mir: &mut Mir, block: BlockId, index: usize, name: &str, version: u32) {
    let instruction = &mut mir.block_mut(block).instructions_mut()[index];
    instruction.op = Op::Identifier(Variable::new(name, version));
}
