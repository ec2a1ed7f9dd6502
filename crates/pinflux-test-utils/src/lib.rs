//! Test fixtures and helpers for pinflux development.
//!
//! [`fixtures`] provides hand-drawn grids with known cell and edge counts,
//! plus a seeded random-maze generator for property and stress tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use pinflux_core::CellParams;

pub use fixtures::{comb_maze, corridor, random_maze, single_cell, two_cell};

/// Parameters with every rate zero except auxin diffusion.
pub fn diffusion_only(rate: f64) -> CellParams {
    CellParams {
        auxin_diffusion: rate,
        ..CellParams::inert()
    }
}

/// Assert `actual` is within `tol` of `expected`, relative to the larger
/// magnitude once that exceeds one.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    let scale = actual.abs().max(expected.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "expected {expected}, got {actual} (tol {tol})"
    );
}
