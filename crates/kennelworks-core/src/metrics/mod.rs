//! Derived business metrics over the raw snapshot.
//!
//! Everything here is a pure function (or a configured lookup table) over
//! already-fetched records; "now" is always an explicit parameter.

pub mod breeding;
pub mod financial;
pub mod health;
