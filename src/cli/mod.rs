//! Argument parsing for the `wheelsieve` binary. This module has no
//! sieving logic of its own: it turns `argv` into a validated `(min,
//! max)` pair, leaving `--help`/`--version` to clap's generated output.

use clap::Parser;

use wheelsieve::error::EngineError;
use wheelsieve::expr;

/// Count the primes on a closed integer interval.
///
/// MIN and MAX accept arithmetic expressions (decimal literals,
/// optional scientific `e` notation, `+ - *`, and right-associative
/// `**`/`^`), e.g. `2^32-1`. If MIN is omitted, it is assumed to be 0.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// One or two bounds: `MAX` alone, or `MIN MAX`.
    #[arg(value_name = "MIN|MAX", num_args = 1..=2, required = true)]
    bounds: Vec<String>,

    /// Suppress the progress bar and status lines; print only the result.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Resolves the parsed positional strings into `(min, max)`,
    /// evaluating each as an arithmetic expression and rejecting
    /// `min > max`.
    pub fn bounds(&self) -> Result<(u64, u64), EngineError> {
        let (min_str, max_str): (Option<&str>, &str) = match self.bounds.as_slice() {
            [max] => (None, max.as_str()),
            [min, max] => (Some(min.as_str()), max.as_str()),
            _ => unreachable!("clap enforces 1..=2 bounds"),
        };

        let min = match min_str {
            Some(s) => expr::evaluate(s)?,
            None => 0,
        };
        let max = expr::evaluate(max_str)?;

        if min > max {
            return Err(EngineError::InvalidRange { min, max });
        }
        Ok((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bound_defaults_min_to_zero() {
        let args = Args::parse_from(["wheelsieve", "100"]);
        assert_eq!(args.bounds().unwrap(), (0, 100));
    }

    #[test]
    fn two_bounds_are_both_evaluated() {
        let args = Args::parse_from(["wheelsieve", "100", "200"]);
        assert_eq!(args.bounds().unwrap(), (100, 200));
    }

    #[test]
    fn expressions_are_evaluated() {
        let args = Args::parse_from(["wheelsieve", "10^9", "10^9+1000"]);
        assert_eq!(args.bounds().unwrap(), (1_000_000_000, 1_000_001_000));
    }

    #[test]
    fn min_greater_than_max_is_rejected() {
        let args = Args::parse_from(["wheelsieve", "200", "100"]);
        assert!(args.bounds().is_err());
    }
}
