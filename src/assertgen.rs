//! Assertion generator
//!
//! Runs every operation over a fixed table of boundary values and writes the
//! results out as literal test assertions. The generated files pin the
//! engine's current behaviour, including the zero-filling `b_shr`.

use crate::error::BitwzError;
use crate::ops::BitOp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Operand table: the 32-bit extremes, small values of both signs and a few
/// values straddling byte and half-word boundaries
pub const BOUNDARY_VALUES: [i32; 17] = [
    -2147483648,
    -1024741873,
    -32768,
    -4096,
    -255,
    -127,
    -92,
    -1,
    0,
    1,
    92,
    127,
    255,
    4096,
    32767,
    1073741823,
    2147483647,
];

/// One evaluated operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub op: BitOp,
    pub left: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub right: Option<i32>,
    pub result: i32,
}

impl Case {
    /// The engine call this case asserts on, as Rust source
    pub fn call(&self) -> String {
        match self.right {
            Some(right) => format!("bitwz::{}({}, {})", self.op.name(), self.left, right),
            None => format!("bitwz::{}({})", self.op.name(), self.left),
        }
    }

    pub fn agrees_with_native(&self) -> bool {
        self.op.native(self.left, self.right.unwrap_or_default()) == self.result
    }
}

/// Output flavour of the generated assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertStyle {
    /// `assert_eq!` lines inside one `#[test]` function
    AssertEq,
    /// an rstest `#[case]` table driving one test function
    Rstest,
    /// a doc-comment example block
    Doctest,
}

impl AssertStyle {
    pub const ALL: [AssertStyle; 3] = [
        AssertStyle::AssertEq,
        AssertStyle::Rstest,
        AssertStyle::Doctest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssertStyle::AssertEq => "assert_eq",
            AssertStyle::Rstest => "rstest",
            AssertStyle::Doctest => "doctest",
        }
    }

    pub fn file_name(self, op: BitOp) -> String {
        format!("{}_{}.rs", self.name(), op.name())
    }

    /// One assertion line for `case`, without indentation
    pub fn line(self, case: &Case) -> String {
        match self {
            AssertStyle::AssertEq => format!("assert_eq!({}, {});", case.call(), case.result),
            AssertStyle::Rstest => match case.right {
                Some(right) => format!("#[case({}, {}, {})]", case.left, right, case.result),
                None => format!("#[case({}, {})]", case.left, case.result),
            },
            AssertStyle::Doctest => format!("/// assert_eq!({}, {});", case.call(), case.result),
        }
    }

    /// A complete source file asserting every case of `op`
    pub fn render(self, op: BitOp) -> String {
        let cases = cases(op);
        let mut out = String::new();
        out.push_str(&format!(
            "// Generated by `bitwz gen --style {}`. Do not edit.\n\n",
            self.name()
        ));
        match self {
            AssertStyle::AssertEq => {
                out.push_str(&format!("#[test]\nfn {}_boundaries() {{\n", op.name()));
                for case in &cases {
                    out.push_str(&format!("    {}\n", self.line(case)));
                }
                out.push_str("}\n");
            }
            AssertStyle::Rstest => {
                out.push_str("use rstest::rstest;\n\n#[rstest]\n");
                for case in &cases {
                    out.push_str(&self.line(case));
                    out.push('\n');
                }
                if op.is_unary() {
                    out.push_str(&format!(
                        "fn {0}_boundaries(#[case] value: i32, #[case] expected: i32) {{\n    assert_eq!(bitwz::{0}(value), expected);\n}}\n",
                        op.name()
                    ));
                } else {
                    out.push_str(&format!(
                        "fn {0}_boundaries(#[case] left: i32, #[case] right: i32, #[case] expected: i32) {{\n    assert_eq!(bitwz::{0}(left, right), expected);\n}}\n",
                        op.name()
                    ));
                }
            }
            AssertStyle::Doctest => {
                out.push_str(&format!("/// Boundary values of `{}`.\n///\n/// ```\n", op.name()));
                for case in &cases {
                    out.push_str(&self.line(case));
                    out.push('\n');
                }
                out.push_str(&format!("/// ```\npub fn {}_boundaries() {{}}\n", op.name()));
            }
        }
        out
    }
}

impl fmt::Display for AssertStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssertStyle {
    type Err = BitwzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "assert_eq" | "asserteq" => Ok(AssertStyle::AssertEq),
            "rstest" => Ok(AssertStyle::Rstest),
            "doctest" | "doc" => Ok(AssertStyle::Doctest),
            _ => Err(BitwzError::UnknownStyle(s.to_string())),
        }
    }
}

/// Evaluate `op` over the boundary table: once per value for NOT, once per
/// ordered pair otherwise
pub fn cases(op: BitOp) -> Vec<Case> {
    if op.is_unary() {
        return BOUNDARY_VALUES
            .iter()
            .map(|&left| Case {
                op,
                left,
                right: None,
                result: op.eval(left, 0),
            })
            .collect();
    }
    BOUNDARY_VALUES
        .iter()
        .flat_map(|&left| {
            BOUNDARY_VALUES.iter().map(move |&right| Case {
                op,
                left,
                right: Some(right),
                result: op.eval(left, right),
            })
        })
        .collect()
}

/// Cases of `op` where the engine and Rust's native operators disagree
pub fn verify(op: BitOp) -> Vec<Case> {
    cases(op).into_iter().filter(|case| !case.agrees_with_native()).collect()
}

/// Write one file per operation into `dir`, returning the paths written
pub fn write_all(
    style: AssertStyle,
    ops: &[BitOp],
    dir: &Path,
) -> Result<Vec<PathBuf>, BitwzError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(ops.len());
    for &op in ops {
        let path = dir.join(style.file_name(op));
        fs::write(&path, style.render(op))?;
        written.push(path);
    }
    Ok(written)
}
