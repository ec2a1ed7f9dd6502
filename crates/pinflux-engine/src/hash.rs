//! Hashing utilities for snapshot and trajectory comparison.
//!
//! Uses FNV-1a over the raw bit patterns of every value, so two runs hash
//! equal only when they are bit-identical. Not cryptographically secure.

use pinflux_core::StateView;

use crate::trajectory::Trajectory;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

fn fold_state<S: StateView + ?Sized>(mut hash: u64, state: &S) -> u64 {
    hash = fnv1a_u64(hash, state.step().0);
    for values in [state.auxin(), state.pins(), state.membrane()] {
        // Length at each boundary keeps array order significant.
        hash = fnv1a_u64(hash, values.len() as u64);
        for &v in values {
            hash = fnv1a_u64(hash, v.to_bits());
        }
    }
    hash
}

/// Hash one state: its step id, then auxin, PINS and membrane values.
pub fn snapshot_hash<S: StateView + ?Sized>(state: &S) -> u64 {
    fold_state(FNV_OFFSET, state)
}

/// Hash every retained snapshot of a trajectory in order.
///
/// Returns `FNV_OFFSET` for an empty trajectory.
pub fn trajectory_hash(trajectory: &Trajectory) -> u64 {
    trajectory
        .snapshots()
        .iter()
        .fold(FNV_OFFSET, |hash, snapshot| fold_state(hash, snapshot))
}
