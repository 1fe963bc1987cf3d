//! Method dispatch: `spec.md` §4, §6, and §9 Design Notes ("Method dispatch
//! -> a tagged enum with a single dispatch function").

use crate::core::drivers::bottom_up::{run_diameter, run_length, CutPolicy, DiameterAgg};
use crate::core::drivers::preorder::run_root_dist;
use crate::core::drivers::two_pass::{run_avg_clade, run_med_clade};
use crate::core::tree::Tree;
use crate::error::TreeClusterError;
use crate::Partition;

/// One of the eight clustering methods `spec.md` names. `avg` (the
/// non-clade variant) is deliberately not exposed: the design notes flag its
/// child-selection heuristic as possibly incorrect in the original, and only
/// `avg_clade` is carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Max,
    MaxClade,
    AvgClade,
    MedClade,
    SingleLinkageClade,
    Length,
    LengthClade,
    RootDist,
}

impl Method {
    /// Parses a method name as accepted on the command line.
    pub fn parse(name: &str) -> Result<Self, TreeClusterError> {
        match name {
            "max" => Ok(Method::Max),
            "max_clade" => Ok(Method::MaxClade),
            "avg_clade" => Ok(Method::AvgClade),
            "med_clade" => Ok(Method::MedClade),
            "single_linkage_clade" => Ok(Method::SingleLinkageClade),
            "length" => Ok(Method::Length),
            "length_clade" => Ok(Method::LengthClade),
            "root_dist" => Ok(Method::RootDist),
            other => Err(TreeClusterError::UnknownMethod { name: other.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Method::Max => "max",
            Method::MaxClade => "max_clade",
            Method::AvgClade => "avg_clade",
            Method::MedClade => "med_clade",
            Method::SingleLinkageClade => "single_linkage_clade",
            Method::Length => "length",
            Method::LengthClade => "length_clade",
            Method::RootDist => "root_dist",
        }
    }

    /// Runs this method's driver against `tree` with the given distance
    /// threshold.
    pub fn run(self, tree: &Tree, threshold: f64) -> Partition {
        match self {
            Method::Max => run_diameter(tree, threshold, DiameterAgg::Max, CutPolicy::WorseChildOnly),
            Method::MaxClade => run_diameter(tree, threshold, DiameterAgg::Max, CutPolicy::BothChildren),
            Method::SingleLinkageClade => run_diameter(tree, threshold, DiameterAgg::Min, CutPolicy::BothChildren),
            Method::AvgClade => run_avg_clade(tree, threshold),
            Method::MedClade => run_med_clade(tree, threshold),
            Method::Length => run_length(tree, threshold, false),
            Method::LengthClade => run_length(tree, threshold, true),
            Method::RootDist => run_root_dist(tree, threshold),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_method_name() {
        for name in [
            "max",
            "max_clade",
            "avg_clade",
            "med_clade",
            "single_linkage_clade",
            "length",
            "length_clade",
            "root_dist",
        ] {
            assert_eq!(Method::parse(name).unwrap().name(), name);
        }
    }

    #[test]
    fn rejects_non_clade_avg() {
        assert!(Method::parse("avg").is_err());
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(matches!(Method::parse("bogus"), Err(TreeClusterError::UnknownMethod { .. })));
    }
}
