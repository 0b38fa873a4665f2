pub mod check;
pub mod hash;
pub mod pending;
pub mod signers;
