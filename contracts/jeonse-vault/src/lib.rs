#![no_std]

mod access;
mod config;
mod entities;
mod errors;
mod events;
mod external;
mod fees;
mod ledger;
mod pool;
mod storage;
mod vault_contract;

#[cfg(test)]
mod test;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use vault_contract::*;
