//! TreeCluster: partition the leaves of a rooted phylogenetic tree into the
//! minimum number of clusters under a user-chosen intra-cluster constraint.
//!
//! The crate is organized leaves-first, mirroring the data flow of a single
//! run: a [`newick`] tree is read and normalized ([`core::prepare`]) into an
//! arena [`core::tree::Tree`], a [`core::method::Method`] is dispatched to one
//! of the clustering drivers under [`core::drivers`], and the resulting
//! partition is handed to [`output`] for rendering.

pub mod cli;
pub mod core;
pub mod error;
pub mod jc;
pub mod newick;
pub mod output;

pub use core::method::Method;
pub use core::tree::Tree;
pub use error::TreeClusterError;

/// A single cluster: the arena leaf ids it contains.
pub type Cluster = Vec<usize>;

/// A full partition of a tree's leaves, in emission order.
pub type Partition = Vec<Cluster>;
