//! Role checks. Role membership is a bit set per address; deposit parties
//! (tenant, landlord) and investors are checked against their records instead.

use crate::entities::{Deposit, Role};
use crate::errors::Error;
use crate::storage;
use soroban_sdk::{Address, Env};

pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    storage::get_roles(env, account) & role.mask() != 0
}

/// Require `caller` to hold `role` and to have signed the invocation.
pub fn authorize(env: &Env, caller: &Address, role: Role) -> Result<(), Error> {
    if !has_role(env, caller, role) {
        return Err(match role {
            Role::PoolOwner => Error::NotOwner,
            Role::Admin => Error::NotAuthorized,
        });
    }
    caller.require_auth();
    Ok(())
}

pub fn grant(env: &Env, account: &Address, role: Role) {
    let roles = storage::get_roles(env, account) | role.mask();
    storage::set_roles(env, account, roles);
}

pub fn revoke(env: &Env, account: &Address, role: Role) {
    let roles = storage::get_roles(env, account) & !role.mask();
    storage::set_roles(env, account, roles);
}

pub fn require_landlord(deposit: &Deposit, caller: &Address) -> Result<(), Error> {
    if deposit.landlord != *caller {
        return Err(Error::NotAuthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn require_party(deposit: &Deposit, caller: &Address) -> Result<(), Error> {
    if deposit.tenant != *caller && deposit.landlord != *caller {
        return Err(Error::NotAuthorized);
    }
    caller.require_auth();
    Ok(())
}
