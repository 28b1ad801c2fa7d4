//! Analysis layer: descriptive statistics and kernel density estimates,
//! computed fresh from filtered records on every selection change.

pub mod comparison;
pub mod kde;
pub mod stats;
