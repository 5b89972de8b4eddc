//! Compressed adjacency shared by the coloring and ordering kernels.
//!
//! Both kernels borrow a [`CsrGraph`] read-only for the duration of a call.
//! The coloring engine additionally borrows its transpose, which for a
//! symmetric graph has the same structure as the graph itself.

pub mod csr;
pub mod generators;

pub use csr::CsrGraph;
