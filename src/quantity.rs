#[macro_use]
pub mod macros;

pub mod charge;
pub mod energy;
pub mod power;
pub mod ratios;
pub mod time;
pub mod voltage;
