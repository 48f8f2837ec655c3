#![no_std]

mod compliance_contract;
mod entities;
mod errors;


pub use compliance_contract::*;
pub use entities::*;
pub use errors::*;
