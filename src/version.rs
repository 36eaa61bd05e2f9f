//! RPM-style version comparison.
//!
//! Build definitions compare dependency and project versions with expressions like
//! `version.version_compare('>= 1.2.0')`; this module implements the comparison those
//! expressions lower to. The scheme is the RPM one: versions are split into alternating digit
//! and letter tokens, separators (`.`, `_`, `+` and any other non-alphanumeric byte) only mark
//! token boundaries, and a `~` introduces a pre-release token that sorts *below* an absent
//! token (`1.0~rc1 < 1.0`).
//!
//! # Tokenization
//!
//! Scanning left to right, a token is a maximal run of either digits or letters, never mixed:
//! `2.1.5+git20120813` tokenizes as `2`, `1`, `5`, `git`, `20120813`. Since separator runs
//! collapse to a single boundary, `3.0.0_fc` and `3.0.0.fc` compare equal.
//!
//! # Token ordering
//!
//! - Two digit tokens compare numerically: leading zeros are stripped, then longer means
//!   greater, then lexicographic (`1.0010 > 1.9`, `10.0001 == 10.1`).
//! - Two letter tokens compare case-insensitively and lexicographically (`FC5 == fc5`,
//!   `alpha < beta`).
//! - A digit token is greater than a letter token (`3.4.1 > 3.4b1`).
//! - A present token is greater than an absent one (`1.0 > 1`), unless it is `~`-tagged, in
//!   which case it is less.
//!
//! The comparison is total: any pair of strings yields exactly one of less, equal, greater.

use std::cmp::Ordering;

use strum::{Display, EnumString};

/// A comparison operator of the surface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Operator {
    /// `==`
    #[strum(serialize = "==")]
    Eq,
    /// `!=`
    #[strum(serialize = "!=")]
    Ne,
    /// `<`
    #[strum(serialize = "<")]
    Lt,
    /// `<=`
    #[strum(serialize = "<=")]
    Le,
    /// `>`
    #[strum(serialize = ">")]
    Gt,
    /// `>=`
    #[strum(serialize = ">=")]
    Ge,
}

/// Totally orders two version strings under the RPM scheme.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use mortar::version;
///
/// assert_eq!(version::cmp("1.0010", "1.9"), Ordering::Greater);
/// assert_eq!(version::cmp("1.05", "1.5"), Ordering::Equal);
/// assert_eq!(version::cmp("1.2rc1", "1.2.0"), Ordering::Less);
/// ```
#[must_use]
pub fn cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    loop {
        while i < a.len() && !a[i].is_ascii_alphanumeric() && a[i] != b'~' {
            i += 1;
        }
        while j < b.len() && !b[j].is_ascii_alphanumeric() && b[j] != b'~' {
            j += 1;
        }

        // A pre-release token loses against anything, including the end of the other string.
        let a_tilde = a.get(i) == Some(&b'~');
        let b_tilde = b.get(j) == Some(&b'~');
        if a_tilde || b_tilde {
            if a_tilde && b_tilde {
                i += 1;
                j += 1;
                continue;
            }
            return if a_tilde {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        if i >= a.len() || j >= b.len() {
            break;
        }

        // The left side picks the token class; a mismatched right side produces an empty run.
        let numeric = a[i].is_ascii_digit();
        let a_run = take_run(a, &mut i, numeric);
        let b_run = take_run(b, &mut j, numeric);
        if b_run.is_empty() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ordering = if numeric {
            compare_digits(a_run, b_run)
        } else {
            compare_letters(a_run, b_run)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    if i < a.len() {
        Ordering::Greater
    } else if j < b.len() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Evaluates a version predicate.
///
/// The derived operators follow from the total order: `!=` is the negation of `==`, `<=` is
/// `< or ==`, `>=` is `> or ==`.
///
/// # Examples
///
/// ```rust
/// use mortar::version::{compare, Operator};
///
/// assert!(compare("6.0.rc1", Operator::Gt, "6.0"));
/// assert!(compare("_", Operator::Eq, "+"));
/// ```
#[must_use]
pub fn compare(a: &str, op: Operator, b: &str) -> bool {
    let ordering = cmp(a, b);
    match op {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Ne => ordering != Ordering::Equal,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Ge => ordering != Ordering::Less,
    }
}

fn take_run<'a>(s: &'a [u8], index: &mut usize, numeric: bool) -> &'a [u8] {
    let start = *index;
    while *index < s.len() {
        let matches = if numeric {
            s[*index].is_ascii_digit()
        } else {
            s[*index].is_ascii_alphabetic()
        };
        if !matches {
            break;
        }
        *index += 1;
    }
    &s[start..*index]
}

fn compare_digits(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_zeros(a);
    let b = strip_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_zeros(digits: &[u8]) -> &[u8] {
    let first = digits.iter().position(|d| *d != b'0');
    &digits[first.unwrap_or(digits.len())..]
}

fn compare_letters(a: &[u8], b: &[u8]) -> Ordering {
    let a = a.iter().map(u8::to_ascii_lowercase);
    let b = b.iter().map(u8::to_ascii_lowercase);
    a.cmp(b)
}
