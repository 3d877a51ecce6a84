//! `bitwz`: evaluate bitwise operations through the engine and generate
//! boundary-value assertions.
//!
//! **Usage:**
//! ```text
//! bitwz eval <op> <left> [right] [--width <w>] [--format dec|hex|bin]
//! bitwz gen [--style <s>]... [--op <op>]... [--out <dir>] [--json]
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use bitwz::assertgen::{cases, verify, write_all, AssertStyle, Case};
use bitwz::{apply, BitOp, Value, Width};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "bitwz",
    version,
    about = "Bitwise operators from floor-division, true modulo and multiplication"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one operation
    Eval {
        /// Operation: and, or, xor, not, shl, shr, or a token such as `&` or `<<`
        op: BitOp,

        /// Left operand (decimal, or `0x` for a bit pattern)
        #[arg(allow_hyphen_values = true)]
        left: String,

        /// Right operand; a 32-bit shift amount for shl and shr
        #[arg(allow_hyphen_values = true)]
        right: Option<String>,

        /// Operand width
        #[arg(long, default_value = "i32")]
        width: Width,

        /// How to print the result
        #[arg(long, value_enum, default_value_t = Format::Dec)]
        format: Format,
    },

    /// Generate boundary-value assertion files
    Gen {
        /// Assertion style, repeatable (default: all)
        #[arg(long = "style")]
        styles: Vec<AssertStyle>,

        /// Operation, repeatable (default: all)
        #[arg(long = "op")]
        ops: Vec<BitOp>,

        /// Output directory
        #[arg(long, default_value = "generated")]
        out: PathBuf,

        /// Print the cases as JSON instead of writing files
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Dec,
    Hex,
    Bin,
}

fn eval(
    op: BitOp,
    left: &str,
    right: Option<&str>,
    width: Width,
    format: Format,
) -> Result<String> {
    let value = Value::from_strings(width.name(), left)?;
    let rhs = match right {
        Some(text) if op.is_shift() => Some(Value::from_strings(Width::I32.name(), text)?),
        Some(text) => Some(Value::from_strings(width.name(), text)?),
        None => None,
    };
    if op.is_unary() && rhs.is_some() {
        eprintln!("warning: {} takes one operand, ignoring the second", op.name());
    }
    let result = apply(op, value, rhs)?;
    Ok(match format {
        Format::Dec => result.to_i128().to_string(),
        Format::Hex => format!("0x{}", result.hex()),
        Format::Bin => result.bits(),
    })
}

fn generate(styles: Vec<AssertStyle>, ops: Vec<BitOp>, out: PathBuf, json: bool) -> Result<()> {
    let styles = if styles.is_empty() {
        AssertStyle::ALL.to_vec()
    } else {
        styles
    };
    let ops = if ops.is_empty() { BitOp::ALL.to_vec() } else { ops };

    let mismatches: Vec<Case> = ops.iter().flat_map(|&op| verify(op)).collect();
    if !mismatches.is_empty() {
        for case in &mismatches {
            eprintln!(
                "mismatch: {} = {}, native gives {}",
                case.call(),
                case.result,
                case.op.native(case.left, case.right.unwrap_or_default())
            );
        }
        bail!("{} case(s) disagree with native operators", mismatches.len());
    }

    if json {
        let all: Vec<Case> = ops.iter().flat_map(|&op| cases(op)).collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    for style in styles {
        let written = write_all(style, &ops, &out)
            .with_context(|| format!("writing {} assertions to {}", style, out.display()))?;
        for path in written {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let outcome = match args.command {
        Command::Eval {
            op,
            left,
            right,
            width,
            format,
        } => eval(op, &left, right.as_deref(), width, format).map(|out| println!("{out}")),
        Command::Gen {
            styles,
            ops,
            out,
            json,
        } => generate(styles, ops, out, json),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_formats() {
        assert_eq!(eval(BitOp::And, "12", Some("10"), Width::I32, Format::Dec).unwrap(), "8");
        assert_eq!(
            eval(BitOp::Shr, "-8", Some("1"), Width::I32, Format::Dec).unwrap(),
            "2147483644"
        );
        assert_eq!(eval(BitOp::Not, "0", None, Width::U8, Format::Hex).unwrap(), "0xff");
        assert_eq!(
            eval(BitOp::Shl, "0x81", Some("1"), Width::U8, Format::Bin).unwrap(),
            "00000010"
        );
    }

    #[test]
    fn test_eval_errors() {
        assert!(eval(BitOp::Xor, "1", None, Width::I32, Format::Dec).is_err());
        assert!(eval(BitOp::And, "300", Some("1"), Width::U8, Format::Dec).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args =
            Args::try_parse_from(["bitwz", "eval", "shl", "-1", "-4", "--width", "i64"]).unwrap();
        match args.command {
            Command::Eval {
                op, left, right, width, ..
            } => {
                assert_eq!(op, BitOp::Shl);
                assert_eq!(left, "-1");
                assert_eq!(right.as_deref(), Some("-4"));
                assert_eq!(width, Width::I64);
            }
            Command::Gen { .. } => panic!("expected eval"),
        }

        let args = Args::try_parse_from([
            "bitwz", "gen", "--style", "rstest", "--op", "xor", "--json",
        ])
        .unwrap();
        match args.command {
            Command::Gen { styles, ops, json, .. } => {
                assert_eq!(styles, vec![AssertStyle::Rstest]);
                assert_eq!(ops, vec![BitOp::Xor]);
                assert!(json);
            }
            Command::Eval { .. } => panic!("expected gen"),
        }
    }
}
