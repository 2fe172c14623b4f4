//! Motion sensor drivers

pub mod compass;
pub mod lsm303agr;
