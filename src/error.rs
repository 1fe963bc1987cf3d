//! Error kinds for TreeCluster, per the Validation / Structural / I/O
//! taxonomy in the design document.
//!
//! Grounded on `chutoro`'s `HierarchyError` (a `thiserror`-derived enum with
//! one `#[error(...)]` message per failure mode); unlike that reference,
//! TreeCluster's errors are all fatal, so there is no machine-readable
//! `code()` accessor here, only the human-facing `Display` message.

/// Errors that can arise while validating CLI input, normalizing a parsed
/// tree, or performing I/O.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeClusterError {
    /// The requested clustering method is not one of the eight recognized
    /// names.
    #[error("unknown method: {name}")]
    UnknownMethod {
        /// The unrecognized method name as given on the command line.
        name: String,
    },

    /// The distance/length threshold was negative.
    #[error("threshold must be >= 0, got {value}")]
    NegativeThreshold {
        /// The offending threshold value.
        value: f64,
    },

    /// The branch-support threshold was neither `>= 0` nor `-inf`.
    #[error("support threshold must be >= 0 or -inf, got {value}")]
    InvalidSupport {
        /// The offending support value.
        value: f64,
    },

    /// The requested threshold-free mode is not recognized.
    #[error("unknown threshold-free mode: {name}")]
    UnknownThresholdFree {
        /// The unrecognized mode name as given on the command line.
        name: String,
    },

    /// A node had an arity other than 0 (leaf) or 2 (binary internal) after
    /// unifurcation/polytomy resolution.
    #[error("node {node} has arity {arity} after resolution; expected 0 or 2")]
    InvalidArity {
        /// A human-readable identifier for the offending node (its label, if
        /// it has one, else its position in the input).
        node: String,
        /// The observed number of children.
        arity: usize,
    },

    /// Two leaves in the same tree shared a label.
    #[error("duplicate leaf label: {label}")]
    DuplicateLeafLabel {
        /// The label that appeared on more than one leaf.
        label: String,
    },

    /// A leaf was missing its taxon label.
    #[error("leaf at byte offset {offset} has no label")]
    MissingLeafLabel {
        /// Byte offset into the input at which the offending leaf starts.
        offset: usize,
    },

    /// The Newick text could not be parsed.
    #[error("malformed Newick input: {message}")]
    MalformedNewick {
        /// A description of what the parser expected vs. found.
        message: String,
    },

    /// The input contained no trees.
    #[error("input contained no trees")]
    EmptyInput,

    /// An I/O failure while reading input or writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TreeClusterError>;
