//! Command-line surface: `spec.md` §6.
//!
//! Matches the original flag table except for the threshold-free switch: the
//! original Python CLI takes it as the single-dash, multi-letter `-tf`, an
//! `argparse` idiom with no clap-derive equivalent (derive short flags must
//! be one character), so this crate exposes `--threshold-free` with a `--tf`
//! alias instead. That is a CLI-surface adaptation, not a change to the
//! threshold-free algorithm itself.

use clap::Parser;

use crate::core::method::Method;
use crate::error::{Result, TreeClusterError};

#[derive(Parser, Debug)]
#[command(name = "treecluster", about = "Partition phylogenetic tree leaves into clusters")]
pub struct Cli {
    /// Input Newick tree file, or "stdin" to read from standard input.
    #[arg(short, long, default_value = "stdin")]
    pub input: String,

    /// Output file, or "stdout" to write to standard output.
    #[arg(short, long, default_value = "stdout")]
    pub output: String,

    /// Maximum inter-leaf distance, branch length, or root distance allowed
    /// within a cluster, depending on the chosen method.
    #[arg(short, long)]
    pub threshold: f64,

    /// Minimum branch support required to keep an edge; unparsable or
    /// absent support is treated as 100. Use `-inf` to disable filtering.
    #[arg(short, long, default_value_t = f64::NEG_INFINITY, allow_hyphen_values = true)]
    pub support: f64,

    /// Clustering method.
    #[arg(short, long, default_value = "max_clade")]
    pub method: String,

    /// Run the threshold-free wrapper instead of a fixed threshold. The
    /// given threshold is used as the upper bound of the candidate sweep.
    #[arg(long = "threshold-free", visible_alias = "tf")]
    pub threshold_free: Option<String>,
}

/// A validated, ready-to-run configuration derived from [`Cli`].
pub struct Config {
    pub input: String,
    pub output: String,
    pub threshold: f64,
    pub support: f64,
    pub method: Method,
    pub threshold_free: bool,
}

impl Cli {
    pub fn validate(self) -> Result<Config> {
        if self.threshold < 0.0 {
            return Err(TreeClusterError::NegativeThreshold { value: self.threshold });
        }
        if self.support < 0.0 && self.support != f64::NEG_INFINITY {
            return Err(TreeClusterError::InvalidSupport { value: self.support });
        }
        let method = Method::parse(&self.method)?;
        let threshold_free = match self.threshold_free {
            None => false,
            Some(ref mode) if mode == "argmax_clusters" => true,
            Some(other) => return Err(TreeClusterError::UnknownThresholdFree { name: other }),
        };

        Ok(Config {
            input: self.input,
            output: self.output,
            threshold: self.threshold,
            support: self.support,
            method,
            threshold_free,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli(threshold: f64) -> Cli {
        Cli {
            input: "stdin".to_string(),
            output: "stdout".to_string(),
            threshold,
            support: f64::NEG_INFINITY,
            method: "max_clade".to_string(),
            threshold_free: None,
        }
    }

    #[test]
    fn rejects_negative_threshold() {
        assert!(matches!(
            base_cli(-1.0).validate(),
            Err(TreeClusterError::NegativeThreshold { .. })
        ));
    }

    #[test]
    fn rejects_negative_finite_support() {
        let mut cli = base_cli(1.0);
        cli.support = -5.0;
        assert!(matches!(cli.validate(), Err(TreeClusterError::InvalidSupport { .. })));
    }

    #[test]
    fn accepts_neg_infinity_support() {
        let cli = base_cli(1.0);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_method() {
        let mut cli = base_cli(1.0);
        cli.method = "bogus".to_string();
        assert!(matches!(cli.validate(), Err(TreeClusterError::UnknownMethod { .. })));
    }

    #[test]
    fn recognizes_threshold_free_mode() {
        let mut cli = base_cli(1.0);
        cli.threshold_free = Some("argmax_clusters".to_string());
        let config = cli.validate().unwrap();
        assert!(config.threshold_free);
    }

    #[test]
    fn rejects_unknown_threshold_free_mode() {
        let mut cli = base_cli(1.0);
        cli.threshold_free = Some("bogus".to_string());
        assert!(matches!(cli.validate(), Err(TreeClusterError::UnknownThresholdFree { .. })));
    }
}
