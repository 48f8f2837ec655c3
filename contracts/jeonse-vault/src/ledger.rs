//! Deposit escrow state machine.
//!
//! ```text
//! Active --release--> Completed
//! Active --dispute--> Disputed --resolve(Release)--> Completed
//!                              --resolve(Refund)---> Refunded
//! ```
//!
//! Emergency withdrawal drains the escrow of a non-terminal deposit without
//! moving its status; a drained deposit accepts no further financial
//! operations.

use crate::access;
use crate::entities::*;
use crate::errors::Error;
use crate::events;
use crate::external;
use crate::fees;
use crate::pool;
use crate::storage;
use soroban_sdk::{log, Address, Env, String, Vec};

pub fn ensure_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::SystemPaused);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn create_deposit(
    env: &Env,
    tenant: Address,
    landlord: Address,
    amount: u128,
    start_date: u64,
    end_date: u64,
    property_id: String,
    property_address: String,
    enable_investment: bool,
) -> Result<u64, Error> {
    tenant.require_auth();
    ensure_not_paused(env)?;
    let config = storage::get_config(env)?;

    if amount < config.min_deposit || amount > config.max_deposit {
        return Err(Error::InvalidAmount);
    }
    if tenant == landlord {
        return Err(Error::InvalidParties);
    }
    let now = env.ledger().timestamp();
    if end_date <= start_date || end_date <= now {
        return Err(Error::InvalidDateRange);
    }

    let gate = external::compliance(env)?;
    if !gate.is_compliant(&tenant) || !gate.is_compliant(&landlord) {
        return Err(Error::NotCompliant);
    }
    if !external::property_registry(env)?.is_property_verified(&property_id, &landlord) {
        return Err(Error::PropertyNotVerified);
    }

    let investment_pool_share = if enable_investment {
        fees::apply_bps(amount, config.pool_share_bps)?
    } else {
        0
    };
    let deposit_id = storage::get_deposit_counter(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    let total_value_locked = storage::get_total_value_locked(env)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    external::collect(env, &tenant, amount)?;

    let deposit = Deposit {
        id: deposit_id,
        tenant: tenant.clone(),
        landlord: landlord.clone(),
        amount,
        escrowed: amount,
        property_id,
        property_address,
        start_date,
        end_date,
        status: DepositStatus::Active,
        is_investment_enabled: enable_investment,
        investment_pool_share,
        dispute_reason: None,
        fee_charged: 0,
        created_at: now,
        released_at: 0,
    };
    storage::set_deposit(env, &deposit);
    storage::index_status(env, deposit_id, None, DepositStatus::Active);
    storage::set_deposit_counter(env, deposit_id);
    storage::add_user_deposit(env, &tenant, deposit_id);
    storage::add_user_deposit(env, &landlord, deposit_id);
    storage::set_total_value_locked(env, total_value_locked);

    events::deposit_created(
        env,
        deposit_id,
        &tenant,
        &landlord,
        amount,
        investment_pool_share,
    );

    if enable_investment {
        pool::register(env, &deposit)?;
    }

    log!(env, "Deposit {} created with {} in escrow", deposit_id, amount);
    Ok(deposit_id)
}

/// Landlord releases the escrow back to the tenant once the lease has ended.
pub fn release_deposit(env: &Env, caller: Address, deposit_id: u64) -> Result<u128, Error> {
    ensure_not_paused(env)?;
    let mut deposit = storage::get_deposit(env, deposit_id)?;
    access::require_landlord(&deposit, &caller)?;

    if deposit.status != DepositStatus::Active || deposit.escrowed == 0 {
        return Err(Error::InvalidState);
    }
    if env.ledger().timestamp() < deposit.end_date {
        return Err(Error::ContractNotEnded);
    }

    let (fee, payout) = settle(env, &mut deposit)?;
    events::deposit_released(env, deposit_id, &caller, &deposit.tenant, payout, fee);
    log!(env, "Deposit {} released, fee {}", deposit_id, fee);
    Ok(payout)
}

pub fn dispute_deposit(
    env: &Env,
    caller: Address,
    deposit_id: u64,
    reason: String,
) -> Result<(), Error> {
    ensure_not_paused(env)?;
    let mut deposit = storage::get_deposit(env, deposit_id)?;
    access::require_party(&deposit, &caller)?;

    if deposit.status != DepositStatus::Active || deposit.escrowed == 0 {
        return Err(Error::InvalidState);
    }

    deposit.status = DepositStatus::Disputed;
    deposit.dispute_reason = Some(reason.clone());
    storage::set_deposit(env, &deposit);
    storage::index_status(
        env,
        deposit_id,
        Some(DepositStatus::Active),
        DepositStatus::Disputed,
    );

    events::deposit_disputed(env, deposit_id, &caller, &reason);
    log!(env, "Deposit {} disputed by {}", deposit_id, caller);
    Ok(())
}

pub fn resolve_dispute(
    env: &Env,
    admin: Address,
    deposit_id: u64,
    outcome: DisputeOutcome,
) -> Result<u128, Error> {
    ensure_not_paused(env)?;
    access::authorize(env, &admin, Role::Admin)?;
    let mut deposit = storage::get_deposit(env, deposit_id)?;

    if deposit.status != DepositStatus::Disputed || deposit.escrowed == 0 {
        return Err(Error::InvalidState);
    }

    let (fee, payout) = match outcome {
        DisputeOutcome::Release => settle(env, &mut deposit)?,
        DisputeOutcome::Refund => (0, refund(env, &mut deposit)?),
    };

    events::dispute_resolved(
        env,
        deposit_id,
        &admin,
        outcome,
        deposit.status,
        payout,
        fee,
    );
    log!(env, "Dispute on deposit {} resolved", deposit_id);
    Ok(payout)
}

/// Circuit breaker. Drains whatever is still escrowed for the deposit to
/// `recipient`; available while the vault is paused.
pub fn emergency_withdraw(
    env: &Env,
    admin: Address,
    deposit_id: u64,
    recipient: Address,
) -> Result<u128, Error> {
    access::authorize(env, &admin, Role::Admin)?;
    let mut deposit = storage::get_deposit(env, deposit_id)?;

    let amount = deposit.escrowed;
    if amount == 0 || deposit.status.is_terminal() {
        return Err(Error::InvalidState);
    }
    let total_value_locked = storage::get_total_value_locked(env)
        .checked_sub(amount)
        .ok_or(Error::Overflow)?;

    deposit.escrowed = 0;
    storage::set_deposit(env, &deposit);
    storage::set_total_value_locked(env, total_value_locked);
    external::pay(env, &recipient, amount)?;

    events::emergency_withdrawal(env, deposit_id, &admin, &recipient, amount);
    log!(env, "Emergency withdrawal of {} from deposit {}", amount, deposit_id);
    Ok(amount)
}

/// Ids in the order they entered `status`.
pub fn get_deposits_by_status(env: &Env, status: DepositStatus) -> Vec<u64> {
    storage::get_status_index(env, status)
}

/// Pay the escrow to the tenant minus the release fee and mark the deposit
/// completed. Returns `(fee, payout)`.
fn settle(env: &Env, deposit: &mut Deposit) -> Result<(u128, u128), Error> {
    let config = storage::get_config(env)?;
    let escrowed = deposit.escrowed;
    let (fee, payout) = fees::split_release(escrowed, config.release_fee_bps)?;

    let total_value_locked = storage::get_total_value_locked(env)
        .checked_sub(escrowed)
        .ok_or(Error::Overflow)?;
    let collected_fees = storage::get_collected_fees(env)
        .checked_add(fee)
        .ok_or(Error::Overflow)?;

    let previous = deposit.status;
    deposit.escrowed = 0;
    deposit.fee_charged = fee;
    deposit.status = DepositStatus::Completed;
    deposit.released_at = env.ledger().timestamp();
    storage::set_deposit(env, deposit);
    storage::index_status(env, deposit.id, Some(previous), DepositStatus::Completed);
    storage::set_total_value_locked(env, total_value_locked);
    storage::set_collected_fees(env, collected_fees);

    external::pay(env, &deposit.tenant, payout)?;
    Ok((fee, payout))
}

/// Return the full escrow to the tenant without a fee.
fn refund(env: &Env, deposit: &mut Deposit) -> Result<u128, Error> {
    let escrowed = deposit.escrowed;
    let total_value_locked = storage::get_total_value_locked(env)
        .checked_sub(escrowed)
        .ok_or(Error::Overflow)?;

    let previous = deposit.status;
    deposit.escrowed = 0;
    deposit.status = DepositStatus::Refunded;
    deposit.released_at = env.ledger().timestamp();
    storage::set_deposit(env, deposit);
    storage::index_status(env, deposit.id, Some(previous), DepositStatus::Refunded);
    storage::set_total_value_locked(env, total_value_locked);

    external::pay(env, &deposit.tenant, escrowed)?;
    Ok(escrowed)
}
