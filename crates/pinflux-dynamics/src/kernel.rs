//! Scalar rate formulas.
//!
//! Each function evaluates one term of the model for one cell or one
//! membrane. Graph traversal and summation over neighbours happen in
//! [`TissueModel`](crate::TissueModel).

use pinflux_core::CellParams;

/// Auxin flux out of cell `i` across the membrane facing `j`.
///
/// `J(i,j) = γD_i·(a_j − a_i) + γA_i·(a_i·p_ij − a_j·p_ji)`
///
/// Scaled by the rates of cell `i` only, so `J(i,j) = −J(j,i)` holds only
/// when both cells share the same diffusion and transport rates.
pub fn flux(params: &CellParams, a_i: f64, a_j: f64, p_ij: f64, p_ji: f64) -> f64 {
    params.auxin_diffusion * (a_j - a_i) + params.auxin_transport * (a_i * p_ij - a_j * p_ji)
}

/// Hill-type gate `h(x) = x² / (1 + x²)`.
///
/// Even, zero at the origin, one half at `±1`, and tends to one as `|x|`
/// grows. Once `x²` overflows the quotient is NaN.
pub fn gate(x: f64) -> f64 {
    let x2 = x * x;
    x2 / (1.0 + x2)
}

/// `da/dt = αa − βa·a + (1/V)·Σ S·J`, given the conductance-weighted flux
/// sum over the cell's membranes.
pub fn auxin_rate(params: &CellParams, auxin: f64, weighted_flux: f64) -> f64 {
    params.auxin_production - params.auxin_degradation * auxin + weighted_flux / params.volume
}

/// `dp/dt = λ·P·h(J) − μ·p` for one membrane.
pub fn membrane_rate(params: &CellParams, pins: f64, flux: f64, p_ij: f64) -> f64 {
    params.pins_insertion * pins * gate(flux) - params.pins_removal * p_ij
}

/// `dP/dt = αp − βp·P − (1/V)·Σ S·dp/dt`, given the conductance-weighted
/// sum of the cell's membrane rates.
pub fn pins_rate(params: &CellParams, pins: f64, weighted_membrane_rate: f64) -> f64 {
    params.pins_production - params.pins_degradation * pins - weighted_membrane_rate / params.volume
}
