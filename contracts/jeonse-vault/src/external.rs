//! Interfaces onto the contracts the vault consults before committing:
//! the KYC compliance gate and the property registry. Both are read before
//! any state changes; spending is booked against the gate only once the
//! vault's own writes are done.

use crate::errors::Error;
use crate::storage;
use soroban_sdk::{contractclient, token, Address, Env, String};

#[allow(dead_code)]
#[contractclient(name = "ComplianceSourceClient")]
pub trait ComplianceSource {
    fn is_compliant(env: Env, account: Address) -> bool;
    fn check_limit(env: Env, account: Address, amount: u128) -> bool;
    fn record_spend(env: Env, operator: Address, account: Address, amount: u128);
}

#[allow(dead_code)]
#[contractclient(name = "PropertySourceClient")]
pub trait PropertySource {
    fn is_property_verified(env: Env, property_id: String, owner: Address) -> bool;
}

pub fn compliance(env: &Env) -> Result<ComplianceSourceClient<'_>, Error> {
    let address = storage::get_compliance_gate(env)?;
    Ok(ComplianceSourceClient::new(env, &address))
}

pub fn property_registry(env: &Env) -> Result<PropertySourceClient<'_>, Error> {
    let address = storage::get_property_registry(env)?;
    Ok(PropertySourceClient::new(env, &address))
}

fn to_token_amount(amount: u128) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::InvalidAmount)
}

/// Pull `amount` from `from` into the vault.
pub fn collect(env: &Env, from: &Address, amount: u128) -> Result<(), Error> {
    let token_client = token::Client::new(env, &storage::get_token(env)?);
    token_client.transfer(from, &env.current_contract_address(), &to_token_amount(amount)?);
    Ok(())
}

/// Pay `amount` out of the vault to `to`. Zero amounts are skipped.
pub fn pay(env: &Env, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let token_client = token::Client::new(env, &storage::get_token(env)?);
    token_client.transfer(&env.current_contract_address(), to, &to_token_amount(amount)?);
    Ok(())
}
