//! Version comparison fixture table.
//!
//! The decisions come from the RPM version comparison scheme (the Fedora wiki's worked
//! examples plus the RPM test suite), extended with the cases the build language's own test
//! corpus exercises. Letter tokens compare case-insensitively, so `FC5` and `fc5` are the
//! same version.

use mortar::version::{compare, Operator};

const CASES: &[(&str, Operator, &str)] = &[
    // Examples from https://fedoraproject.org/wiki/Archive:Tools/RPM/VersionComparison
    ("1.0010", Operator::Gt, "1.9"),
    ("1.05", Operator::Eq, "1.5"),
    ("1.0", Operator::Gt, "1"),
    ("2.50", Operator::Gt, "2.5"),
    ("fc4", Operator::Eq, "fc.4"),
    ("FC5", Operator::Gt, "fc4"),
    ("FC5", Operator::Eq, "fc5"),
    ("2a", Operator::Lt, "2.0"),
    ("1.0", Operator::Gt, "1.fc4"),
    ("3.0.0_fc", Operator::Eq, "3.0.0.fc"),
    // From the RPM test suite
    ("1.0", Operator::Eq, "1.0"),
    ("1.0", Operator::Lt, "2.0"),
    ("2.0", Operator::Gt, "1.0"),
    ("2.0.1", Operator::Eq, "2.0.1"),
    ("2.0", Operator::Lt, "2.0.1"),
    ("2.0.1", Operator::Gt, "2.0"),
    ("2.0.1a", Operator::Eq, "2.0.1a"),
    ("2.0.1a", Operator::Gt, "2.0.1"),
    ("2.0.1", Operator::Lt, "2.0.1a"),
    ("5.5p1", Operator::Eq, "5.5p1"),
    ("5.5p1", Operator::Lt, "5.5p2"),
    ("5.5p2", Operator::Gt, "5.5p1"),
    ("5.5p10", Operator::Eq, "5.5p10"),
    ("5.5p1", Operator::Lt, "5.5p10"),
    ("5.5p10", Operator::Gt, "5.5p1"),
    ("10xyz", Operator::Lt, "10.1xyz"),
    ("10.1xyz", Operator::Gt, "10xyz"),
    ("xyz10", Operator::Eq, "xyz10"),
    ("xyz10", Operator::Lt, "xyz10.1"),
    ("xyz10.1", Operator::Gt, "xyz10"),
    ("xyz.4", Operator::Eq, "xyz.4"),
    ("xyz.4", Operator::Lt, "8"),
    ("8", Operator::Gt, "xyz.4"),
    ("xyz.4", Operator::Lt, "2"),
    ("2", Operator::Gt, "xyz.4"),
    ("5.5p2", Operator::Lt, "5.6p1"),
    ("5.6p1", Operator::Gt, "5.5p2"),
    ("5.6p1", Operator::Lt, "6.5p1"),
    ("6.5p1", Operator::Gt, "5.6p1"),
    ("6.0.rc1", Operator::Gt, "6.0"),
    ("6.0", Operator::Lt, "6.0.rc1"),
    ("10b2", Operator::Gt, "10a1"),
    ("10a2", Operator::Lt, "10b2"),
    ("1.0aa", Operator::Eq, "1.0aa"),
    ("1.0a", Operator::Lt, "1.0aa"),
    ("1.0aa", Operator::Gt, "1.0a"),
    ("10.0001", Operator::Eq, "10.0001"),
    ("10.0001", Operator::Eq, "10.1"),
    ("10.1", Operator::Eq, "10.0001"),
    ("10.0001", Operator::Lt, "10.0039"),
    ("10.0039", Operator::Gt, "10.0001"),
    ("4.999.9", Operator::Lt, "5.0"),
    ("5.0", Operator::Gt, "4.999.9"),
    ("20101121", Operator::Eq, "20101121"),
    ("20101121", Operator::Lt, "20101122"),
    ("20101122", Operator::Gt, "20101121"),
    ("2_0", Operator::Eq, "2_0"),
    ("2.0", Operator::Eq, "2_0"),
    ("2_0", Operator::Eq, "2.0"),
    ("a", Operator::Eq, "a"),
    ("a+", Operator::Eq, "a+"),
    ("a+", Operator::Eq, "a_"),
    ("a_", Operator::Eq, "a+"),
    ("+a", Operator::Eq, "+a"),
    ("+a", Operator::Eq, "_a"),
    ("_a", Operator::Eq, "+a"),
    ("+_", Operator::Eq, "+_"),
    ("_+", Operator::Eq, "+_"),
    ("_+", Operator::Eq, "_+"),
    ("+", Operator::Eq, "_"),
    ("_", Operator::Eq, "+"),
    // Pre-release tokens sort below an absent token.
    ("1.0~rc1", Operator::Lt, "1.0"),
    ("1.0", Operator::Gt, "1.0~rc1"),
    ("1.0~rc1", Operator::Eq, "1.0~rc1"),
    ("1.0~rc1", Operator::Lt, "1.0~rc2"),
    // Other tests
    ("0.99.beta19", Operator::Gt, "0.99.beta14"),
    ("1.0.0", Operator::Lt, "2.0.0"),
    (".0.0", Operator::Lt, "2.0.0"),
    ("alpha", Operator::Lt, "beta"),
    ("1.0", Operator::Lt, "1.0.0"),
    ("2.456", Operator::Lt, "2.1000"),
    ("2.1000", Operator::Lt, "3.111"),
    ("2.001", Operator::Eq, "2.1"),
    ("2.34", Operator::Eq, "2.34"),
    ("6.1.2", Operator::Lt, "6.3.8"),
    ("1.7.3.0", Operator::Lt, "2.0.0"),
    ("2.24.51", Operator::Lt, "2.25"),
    ("2.1.5+20120813+gitdcbe778", Operator::Gt, "2.1.5"),
    ("3.4.1", Operator::Gt, "3.4b1"),
    ("041206", Operator::Lt, "200090325"),
    ("0.6.2+git20130413", Operator::Gt, "0.6.2"),
    ("2.6.0+bzr6602", Operator::Gt, "2.6.0"),
    ("2.6.0", Operator::Gt, "2.6b2"),
    ("2.6.0+bzr6602", Operator::Gt, "2.6b2x"),
    ("0.6.7+20150214+git3a710f9", Operator::Gt, "0.6.7"),
    ("15.8b", Operator::Lt, "15.8.0.1"),
    ("1.2rc1", Operator::Lt, "1.2.0"),
];

#[test]
fn fixture_table() {
    for (left, op, right) in CASES {
        assert!(
            compare(left, *op, right),
            "case failed: {left} {op} {right}"
        );
    }
}

#[test]
fn fixture_table_converse() {
    // Every strict decision must reverse cleanly, and every equality must be symmetric.
    for (left, op, right) in CASES {
        let converse = match op {
            Operator::Eq => Operator::Eq,
            Operator::Lt => Operator::Gt,
            Operator::Gt => Operator::Lt,
            Operator::Ne => Operator::Ne,
            Operator::Le => Operator::Ge,
            Operator::Ge => Operator::Le,
        };
        assert!(
            compare(right, converse, left),
            "converse failed: {right} {converse} {left}"
        );
    }
}
