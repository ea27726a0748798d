//! Top-level module for the half-edge topology.
//!
//! This module provides the graph aggregate and everything it is built from:
//! - Handle types and the per-kind id registry
//! - Entity accessor traits and the `Items` allocation collaborator
//! - The `Graph` itself with its lifecycle operations, surgery primitives
//!   and traversal iterators
//! - Structural validation and a generic read-only graph trait
//!
//! Most users will interact with [`Graph`] and the handle types only.

pub(crate) mod _debug_invariants;
pub mod entity;
pub mod graph;
pub mod graph_traits;
pub mod handle;
pub mod registry;
mod surgery;
pub mod traversal;
pub mod validation;

pub use entity::*;
pub use graph::Graph;
pub use graph_traits::UndirectedGraph;
pub use handle::*;

#[cfg(test)]
mod tests;
