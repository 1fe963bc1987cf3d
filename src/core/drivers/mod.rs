//! The eight clustering drivers, grouped by traversal shape: `spec.md` §4.4-§4.6.

pub mod bottom_up;
pub mod preorder;
pub mod two_pass;
