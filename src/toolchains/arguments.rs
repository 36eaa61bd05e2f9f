//! Toolchain-neutral compiler arguments.
//!
//! Different compilers spell the same intent differently (`-I` vs `/I`, `-D` vs `/D`). To keep
//! build logic toolchain-agnostic, raw arguments are *generalized* into [`Argument`] values as
//! they enter the system, and *specialized* back into concrete flags by the compiler that
//! consumes them.

use std::fmt;

/// What a generalized argument means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// Passed through untouched.
    Raw,
    /// A preprocessor definition.
    Define,
    /// A library to link.
    Link,
    /// A directory to search for libraries.
    LinkSearch,
    /// A directory to search for headers.
    Include,
}

/// How an include directory participates in header lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    /// An ordinary project include directory.
    Base,
    /// A system include directory, exempt from the project's warning flags.
    System,
}

/// A compiler argument lifted out of any particular compiler's spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Argument {
    /// The payload: a macro name, a library name, a directory, or the raw text.
    pub value: String,

    /// What the payload means.
    pub kind: ArgumentKind,

    /// Include flavor, present only for [`ArgumentKind::Include`].
    pub include: Option<IncludeKind>,
}

impl Argument {
    /// Creates a non-include argument.
    #[must_use]
    pub fn new(value: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            value: value.into(),
            kind,
            include: None,
        }
    }

    /// Creates an include argument of the given flavor.
    #[must_use]
    pub fn include(value: impl Into<String>, include: IncludeKind) -> Self {
        Self {
            value: value.into(),
            kind: ArgumentKind::Include,
            include: Some(include),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArgumentKind::Raw => write!(f, "{}", self.value),
            ArgumentKind::Define => write!(f, "define:{}", self.value),
            ArgumentKind::Link => write!(f, "link:{}", self.value),
            ArgumentKind::LinkSearch => write!(f, "link-search:{}", self.value),
            ArgumentKind::Include => match self.include {
                Some(IncludeKind::System) => write!(f, "include-system:{}", self.value),
                _ => write!(f, "include:{}", self.value),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_constructor() {
        let arg = Argument::new("m", ArgumentKind::Link);
        assert_eq!(arg.kind, ArgumentKind::Link);
        assert!(arg.include.is_none());
    }

    #[test]
    fn test_include_constructor() {
        let arg = Argument::include("include", IncludeKind::System);
        assert_eq!(arg.kind, ArgumentKind::Include);
        assert_eq!(arg.include, Some(IncludeKind::System));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Argument::new("NDEBUG", ArgumentKind::Define).to_string(),
            "define:NDEBUG"
        );
        assert_eq!(
            Argument::include("vendor", IncludeKind::Base).to_string(),
            "include:vendor"
        );
    }
}
