//! MIR instructions: values and operations.
//!
//! The instruction set is a closed tagged union covering the value kinds of the build-definition
//! language (numbers, strings, booleans, arrays, ordered dicts), reads of other variables
//! (identifiers), function calls, and the phi pseudo-instruction that the SSA passes insert at
//! join points.
//!
//! # Design
//!
//! Each instruction pairs an [`Op`] with the [`Variable`] naming its result. Passes are
//! polymorphic over the capability set (has a named result / reads identifiers / folds to a
//! literal) by pattern matching on the op, not by virtual dispatch. Container ops (`Array`,
//! `Dict`, function-call arguments) own their element instructions, so nested reads are rewritten
//! by recursing through the op tree.

use std::fmt;

use indexmap::IndexMap;

use crate::mir::Variable;

/// A function or method call.
///
/// Method-style calls carry the object they are invoked on in `holder`:
/// `host_machine.cpu_family()` lowers to holder `host_machine`, name `cpu_family`. Free
/// functions like `message(...)` have no holder.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Object of a method-style call, `None` for free functions.
    pub holder: Option<String>,

    /// The function name.
    pub name: String,

    /// Positional arguments, in call order.
    pub pos_args: Vec<Instruction>,

    /// Keyword arguments, in source order.
    pub kw_args: IndexMap<String, Instruction>,
}

impl FunctionCall {
    /// Creates a call to a free function with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            holder: None,
            name: name.into(),
            pos_args: Vec::new(),
            kw_args: IndexMap::new(),
        }
    }

    /// Creates a method call on the given object.
    #[must_use]
    pub fn method(holder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            holder: Some(holder.into()),
            name: name.into(),
            pos_args: Vec::new(),
            kw_args: IndexMap::new(),
        }
    }

    /// Appends a positional argument, builder style.
    #[must_use]
    pub fn with_arg(mut self, arg: Instruction) -> Self {
        self.pos_args.push(arg);
        self
    }

    /// Appends a keyword argument, builder style.
    #[must_use]
    pub fn with_kwarg(mut self, name: impl Into<String>, arg: Instruction) -> Self {
        self.kw_args.insert(name.into(), arg);
        self
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(holder) = &self.holder {
            write!(f, "{holder}.")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.pos_args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        for (i, (name, arg)) in self.kw_args.iter().enumerate() {
            if i > 0 || !self.pos_args.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {arg}")?;
        }
        write!(f, ")")
    }
}

/// The operation performed by an instruction.
///
/// This is the closed union of everything the MIR can express. Literals (`Number`, `String`,
/// `Boolean`) fold to themselves; `Identifier` is a read of another variable slot; containers
/// and calls own nested instructions; `Phi` selects between two versions of the same name
/// depending on which predecessor transferred control.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// An integer literal.
    Number(i64),

    /// A string literal.
    String(String),

    /// A boolean literal.
    Boolean(bool),

    /// A read of another variable. The target carries the name and, once usage numbering has
    /// run, the concrete version being read.
    Identifier(Variable),

    /// An ordered sequence of values.
    Array(Vec<Instruction>),

    /// An ordered mapping from names to values.
    Dict(IndexMap<String, Instruction>),

    /// A function or method call.
    FunctionCall(Box<FunctionCall>),

    /// A join-point selector over two versions of this instruction's result name.
    Phi {
        /// Version reaching from the first recorded parent chain.
        left: u32,
        /// Version reaching from the other parent chain.
        right: u32,
    },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "'{value}'"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Identifier(target) => write!(f, "{target}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::FunctionCall(call) => write!(f, "{call}"),
            Self::Phi { left, right } => write!(f, "φ({left}, {right})"),
        }
    }
}

/// A single MIR instruction: an operation plus the variable naming its result.
///
/// # Examples
///
/// ```rust
/// use mortar::mir::{Instruction, Op};
///
/// // x = 9
/// let assign = Instruction::named("x", Op::Number(9));
/// assert_eq!(assign.var.name, "x");
///
/// // a bare expression statement
/// let stmt = Instruction::new(Op::Boolean(true));
/// assert!(!stmt.var.is_named());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The operation.
    pub op: Op,

    /// The result slot. Anonymous for statements whose value is never read by name.
    pub var: Variable,
}

impl Instruction {
    /// Creates an instruction with an anonymous result.
    #[must_use]
    pub fn new(op: Op) -> Self {
        Self {
            op,
            var: Variable::anonymous(),
        }
    }

    /// Creates an instruction whose result is bound to `name` (at version 0, to be filled in
    /// by value numbering).
    #[must_use]
    pub fn named(name: impl Into<String>, op: Op) -> Self {
        Self {
            op,
            var: Variable::named(name),
        }
    }

    /// Returns `true` if this instruction is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.op, Op::Number(_) | Op::String(_) | Op::Boolean(_))
    }

    /// Returns the phi operand versions if this instruction is a phi.
    #[must_use]
    pub const fn as_phi(&self) -> Option<(u32, u32)> {
        match self.op {
            Op::Phi { left, right } => Some((left, right)),
            _ => None,
        }
    }

    /// Evaluates this instruction as a branch condition, if its value is already known.
    ///
    /// Booleans decide directly; strings are truthy when non-empty; numbers are truthy when
    /// non-zero. Everything else is not decidable and returns `None`.
    #[must_use]
    pub fn truthiness(&self) -> Option<bool> {
        match &self.op {
            Op::Boolean(value) => Some(*value),
            Op::String(value) => Some(!value.is_empty()),
            Op::Number(value) => Some(*value != 0),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.var.is_named() {
            write!(f, "{} = {}", self.var, self.op)
        } else {
            write!(f, "{}", self.op)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert!(Instruction::new(Op::Number(1)).is_literal());
        assert!(Instruction::new(Op::String("s".into())).is_literal());
        assert!(Instruction::new(Op::Boolean(false)).is_literal());
        assert!(!Instruction::new(Op::Identifier(Variable::named("x"))).is_literal());
    }

    #[test]
    fn test_truthiness_boolean() {
        assert_eq!(Instruction::new(Op::Boolean(true)).truthiness(), Some(true));
        assert_eq!(
            Instruction::new(Op::Boolean(false)).truthiness(),
            Some(false)
        );
    }

    #[test]
    fn test_truthiness_string() {
        assert_eq!(
            Instruction::new(Op::String("x86_64".into())).truthiness(),
            Some(true)
        );
        assert_eq!(
            Instruction::new(Op::String(String::new())).truthiness(),
            Some(false)
        );
    }

    #[test]
    fn test_truthiness_number() {
        assert_eq!(Instruction::new(Op::Number(2)).truthiness(), Some(true));
        assert_eq!(Instruction::new(Op::Number(0)).truthiness(), Some(false));
    }

    #[test]
    fn test_truthiness_undecided() {
        let id = Instruction::new(Op::Identifier(Variable::named("x")));
        assert_eq!(id.truthiness(), None);
    }

    #[test]
    fn test_phi_accessor() {
        let phi = Instruction {
            op: Op::Phi { left: 1, right: 2 },
            var: Variable::new("x", 3),
        };
        assert_eq!(phi.as_phi(), Some((1, 2)));
        assert!(Instruction::new(Op::Number(0)).as_phi().is_none());
    }

    #[test]
    fn test_method_call_display() {
        let call = FunctionCall::method("host_machine", "cpu_family");
        assert_eq!(format!("{call}"), "host_machine.cpu_family()");
    }

    #[test]
    fn test_call_display_with_args() {
        let call = FunctionCall::new("executable")
            .with_arg(Instruction::new(Op::String("prog".into())))
            .with_kwarg("install", Instruction::new(Op::Boolean(true)));
        assert_eq!(format!("{call}"), "executable('prog', install: true)");
    }

    #[test]
    fn test_assignment_display() {
        let assign = Instruction {
            op: Op::Number(9),
            var: Variable::new("x", 1),
        };
        assert_eq!(format!("{assign}"), "x@1 = 9");
    }
}
