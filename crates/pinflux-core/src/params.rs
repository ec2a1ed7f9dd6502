//! Per-cell rate constants and the [`Role`] tag.

use std::fmt;

/// The nine rate constants that govern one cell.
///
/// Every cell carries its own copy. Flux out of a cell is scaled by that
/// cell's own diffusion and transport rates, so two neighbours with
/// different parameter sets see asymmetric flux.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellParams {
    /// Auxin production rate (αa).
    pub auxin_production: f64,
    /// Auxin degradation rate (βa).
    pub auxin_degradation: f64,
    /// Auxin diffusion rate (γD).
    pub auxin_diffusion: f64,
    /// PINS-mediated active transport rate (γA).
    pub auxin_transport: f64,
    /// Cytoplasmic PINS production rate (αp).
    pub pins_production: f64,
    /// Cytoplasmic PINS degradation rate (βp).
    pub pins_degradation: f64,
    /// Cell volume (V). Must be positive.
    pub volume: f64,
    /// Membrane PINS removal rate (μ).
    pub pins_removal: f64,
    /// Membrane PINS insertion rate (λ).
    pub pins_insertion: f64,
}

impl CellParams {
    /// Default auxin production for a [`Role::Source`] cell.
    pub const SOURCE_AUXIN_PRODUCTION: f64 = 1.0;

    /// Default auxin degradation for a [`Role::Sink`] cell.
    pub const SINK_AUXIN_DEGRADATION: f64 = 1.0;

    /// All rates zero, unit volume.
    ///
    /// Useful as a base for isolating one mechanism, e.g. pure diffusion:
    /// `CellParams { auxin_diffusion: 1.0, ..CellParams::inert() }`.
    pub fn inert() -> Self {
        Self {
            auxin_production: 0.0,
            auxin_degradation: 0.0,
            auxin_diffusion: 0.0,
            auxin_transport: 0.0,
            pins_production: 0.0,
            pins_degradation: 0.0,
            volume: 1.0,
            pins_removal: 0.0,
            pins_insertion: 0.0,
        }
    }

    /// This parameter set with auxin production raised to the source level.
    pub fn as_source(self) -> Self {
        Self {
            auxin_production: Self::SOURCE_AUXIN_PRODUCTION,
            ..self
        }
    }

    /// This parameter set with auxin degradation raised to the sink level.
    pub fn as_sink(self) -> Self {
        Self {
            auxin_degradation: Self::SINK_AUXIN_DEGRADATION,
            ..self
        }
    }

    /// Check structural validity: every rate finite, volume positive.
    ///
    /// Negative rates are accepted; the model does not constrain signs.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("auxin_production", self.auxin_production),
            ("auxin_degradation", self.auxin_degradation),
            ("auxin_diffusion", self.auxin_diffusion),
            ("auxin_transport", self.auxin_transport),
            ("pins_production", self.pins_production),
            ("pins_degradation", self.pins_degradation),
            ("volume", self.volume),
            ("pins_removal", self.pins_removal),
            ("pins_insertion", self.pins_insertion),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}"));
            }
        }
        if self.volume <= 0.0 {
            return Err(format!("volume must be positive, got {}", self.volume));
        }
        Ok(())
    }
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            auxin_production: 0.0,
            auxin_degradation: 0.01,
            auxin_diffusion: 0.1,
            auxin_transport: 0.5,
            pins_production: 0.1,
            pins_degradation: 0.1,
            volume: 1.0,
            pins_removal: 0.1,
            pins_insertion: 0.5,
        }
    }
}

/// Special role of a cell, fixed at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Ordinary tissue cell using the default parameter set.
    #[default]
    Normal,
    /// Auxin source (elevated production).
    Source,
    /// Auxin sink (elevated degradation).
    Sink,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Source => write!(f, "source"),
            Self::Sink => write!(f, "sink"),
        }
    }
}
