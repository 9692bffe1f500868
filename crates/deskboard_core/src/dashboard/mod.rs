//! Dashboard layout and component binding use-cases.
//!
//! # Responsibility
//! - Own the canonical widget placement set and its persistence lifecycle.
//! - Resolve widget kinds to externally supplied renderer bindings.
//!
//! # Invariants
//! - The grid is `GRID_COLUMNS` cells wide; rows are unconstrained.
//! - Overlapping placements are representable; no packing is attempted.
//! - Binding resolution is total: unknown kinds get the fallback binding.

pub mod binding;
pub mod layout;

/// Width of the dashboard grid in cells.
///
/// Advisory for the external renderer; the registry itself never rejects a
/// placement for being out of column range.
pub const GRID_COLUMNS: u32 = 4;
