//! Bonus allocation engine for HR bonus sheets.
//!
//! A sheet holds one weighted pillar set per department and optional
//! per-employee overrides. Scores combine goal achievement through
//! renormalized weights and turn into capped payouts.

pub mod bonus;
pub mod config;
pub mod error;
pub mod telemetry;
