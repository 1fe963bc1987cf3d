//! The clustering core: tree representation, preparation, and the eight
//! drivers dispatched by [`method::Method`].

pub mod argmax;
pub mod cut;
pub mod drivers;
pub mod merge;
pub mod method;
pub mod prepare;
pub mod tree;
