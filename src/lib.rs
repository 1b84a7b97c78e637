//! Dungeon Board Designer Core
//!
//! Board generation and action-shape placement for a grid-based dungeon
//! board game. Two generators produce playable layouts: uniform random
//! scatter, and a maze builder that stratifies features by BFS distance
//! from the entrance. The placement engine finds legal anchors for
//! polyomino action shapes under entrance-coverage, adjacency, overlap,
//! and directional-wall constraints, searching a fixed sequence of
//! rotations and flips.
//!
//! The core is synchronous and performs no I/O; randomness is injected
//! as `&mut impl Rng` so callers choose between a thread RNG and a
//! seeded one.

pub mod connectivity;
pub mod deck;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod persistence;
pub mod placement;
pub mod shapes;
