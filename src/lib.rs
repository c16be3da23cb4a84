//! Simulation core for a single-player vertical shoot-'em-up.
//!
//! Everything in this crate is terminal-agnostic: the binary feeds it held
//! keys and action presses, and supplies a [`render::Canvas`] to draw on.

pub mod collision;
pub mod config;
pub mod director;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod group;
pub mod input;
pub mod render;
