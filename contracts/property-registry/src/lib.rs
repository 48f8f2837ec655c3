#![no_std]

mod entities;
mod errors;
mod registry_contract;


pub use entities::*;
pub use errors::*;
pub use registry_contract::*;
