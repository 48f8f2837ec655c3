//! Audit trail. Every committed mutation publishes exactly one event carrying
//! the deposit id, the acting address, and the amounts involved.

use crate::entities::{DepositStatus, DisputeOutcome, Role, VaultConfig};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

pub const DEPOSIT_CREATED: Symbol = symbol_short!("dep_new");
pub const DEPOSIT_RELEASED: Symbol = symbol_short!("dep_rel");
pub const DEPOSIT_DISPUTED: Symbol = symbol_short!("dep_disp");
pub const DISPUTE_RESOLVED: Symbol = symbol_short!("disp_res");
pub const EMERGENCY_WITHDRAWAL: Symbol = symbol_short!("emerg_wd");
pub const POOL_DEPOSIT_ADDED: Symbol = symbol_short!("pool_add");
pub const POOL_CLOSED: Symbol = symbol_short!("pool_cls");
pub const INVESTMENT_MADE: Symbol = symbol_short!("inv_made");
pub const INVESTMENT_WITHDRAWN: Symbol = symbol_short!("inv_wd");
pub const RETURNS_DISTRIBUTED: Symbol = symbol_short!("ret_dist");
pub const RETURNS_CLAIMED: Symbol = symbol_short!("ret_clm");
pub const UNDISTRIBUTED_SWEPT: Symbol = symbol_short!("ret_sweep");
pub const CONTRACT_PAUSED: Symbol = symbol_short!("paused");
pub const CONTRACT_UNPAUSED: Symbol = symbol_short!("unpaused");
pub const FEES_WITHDRAWN: Symbol = symbol_short!("fees_wd");
pub const CONFIG_UPDATED: Symbol = symbol_short!("cfg_upd");
pub const ROLE_GRANTED: Symbol = symbol_short!("role_add");
pub const ROLE_REVOKED: Symbol = symbol_short!("role_rm");

pub fn deposit_created(
    env: &Env,
    deposit_id: u64,
    tenant: &Address,
    landlord: &Address,
    amount: u128,
    pool_share: u128,
) {
    env.events().publish(
        (DEPOSIT_CREATED, deposit_id),
        (tenant.clone(), landlord.clone(), amount, pool_share),
    );
}

pub fn deposit_released(
    env: &Env,
    deposit_id: u64,
    landlord: &Address,
    tenant: &Address,
    payout: u128,
    fee: u128,
) {
    env.events().publish(
        (DEPOSIT_RELEASED, deposit_id),
        (landlord.clone(), tenant.clone(), payout, fee),
    );
}

pub fn deposit_disputed(env: &Env, deposit_id: u64, caller: &Address, reason: &String) {
    env.events().publish(
        (DEPOSIT_DISPUTED, deposit_id),
        (caller.clone(), reason.clone()),
    );
}

pub fn dispute_resolved(
    env: &Env,
    deposit_id: u64,
    admin: &Address,
    outcome: DisputeOutcome,
    status: DepositStatus,
    payout: u128,
    fee: u128,
) {
    env.events().publish(
        (DISPUTE_RESOLVED, deposit_id),
        (admin.clone(), outcome, status, payout, fee),
    );
}

pub fn emergency_withdrawal(
    env: &Env,
    deposit_id: u64,
    admin: &Address,
    recipient: &Address,
    amount: u128,
) {
    env.events().publish(
        (EMERGENCY_WITHDRAWAL, deposit_id),
        (admin.clone(), recipient.clone(), amount),
    );
}

pub fn pool_deposit_added(env: &Env, deposit_id: u64, capacity: u128) {
    env.events()
        .publish((POOL_DEPOSIT_ADDED, deposit_id), capacity);
}

pub fn pool_closed(env: &Env, deposit_id: u64, owner: &Address) {
    env.events()
        .publish((POOL_CLOSED, deposit_id), owner.clone());
}

pub fn investment_made(
    env: &Env,
    deposit_id: u64,
    investor: &Address,
    amount: u128,
    share_bps: u32,
) {
    env.events().publish(
        (INVESTMENT_MADE, deposit_id),
        (investor.clone(), amount, share_bps),
    );
}

pub fn investment_withdrawn(env: &Env, deposit_id: u64, investor: &Address, principal: u128) {
    env.events().publish(
        (INVESTMENT_WITHDRAWN, deposit_id),
        (investor.clone(), principal),
    );
}

pub fn returns_distributed(
    env: &Env,
    deposit_id: u64,
    owner: &Address,
    total_return: u128,
    credited: u128,
    fee: u128,
    remainder: u128,
) {
    env.events().publish(
        (RETURNS_DISTRIBUTED, deposit_id),
        (owner.clone(), total_return, credited, fee, remainder),
    );
}

pub fn returns_claimed(env: &Env, deposit_id: u64, investor: &Address, amount: u128) {
    env.events().publish(
        (RETURNS_CLAIMED, deposit_id),
        (investor.clone(), amount),
    );
}

pub fn undistributed_swept(env: &Env, deposit_id: u64, recipient: &Address, amount: u128) {
    env.events().publish(
        (UNDISTRIBUTED_SWEPT, deposit_id),
        (recipient.clone(), amount),
    );
}

pub fn paused(env: &Env, admin: &Address, paused: bool) {
    let topic = if paused { CONTRACT_PAUSED } else { CONTRACT_UNPAUSED };
    env.events()
        .publish((topic,), (admin.clone(), env.ledger().timestamp()));
}

pub fn fees_withdrawn(env: &Env, admin: &Address, recipient: &Address, amount: u128) {
    env.events().publish(
        (FEES_WITHDRAWN,),
        (admin.clone(), recipient.clone(), amount),
    );
}

pub fn config_updated(env: &Env, admin: &Address, config: &VaultConfig) {
    env.events()
        .publish((CONFIG_UPDATED,), (admin.clone(), config.clone()));
}

pub fn role_changed(env: &Env, admin: &Address, account: &Address, role: Role, granted: bool) {
    let topic = if granted { ROLE_GRANTED } else { ROLE_REVOKED };
    env.events()
        .publish((topic, account.clone()), (admin.clone(), role));
}
