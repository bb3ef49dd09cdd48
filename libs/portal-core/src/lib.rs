//! Portal Core — Client Computation Layer
//!
//! Provides deterministic, client-side computation for:
//! - Forex risk calculation (risk/reward, position size, profit, loss)
//! - Sequential course progress gating and completion percentage
//! - Course catalog loading and validation
//!
//! # Determinism
//! All functions are pure: no system time, no RNG, no external calls, no
//! global state. Progress state is owned by the caller and passed in.
//! Uses `Decimal` (fixed-point) and `BTreeSet`/`BTreeMap` (sorted iteration)
//! throughout.
//!
//! # Version
//! v1.0.0

pub mod calculator;
pub mod progress;
pub mod catalog;

/// Crate version constant
pub const PORTAL_CORE_VERSION: &str = "1.0.0";
