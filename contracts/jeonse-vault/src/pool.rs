//! Fractional investment pool over escrowed deposits.
//!
//! Share math is integer-only. Each open position gets
//! `principal * 10000 / total_invested` basis points, truncated, and the bps
//! lost to truncation are handed out one at a time to the positions with the
//! largest truncation remainders (earliest opened first on ties). Open shares
//! sum to exactly 10000 and no share is a full basis point off its exact
//! value. Returns are credited pro rata on principal and the division
//! remainder is kept on the pool entry as `undistributed`.
//!
//! Every investment, withdrawal and distribution rewrites the open positions
//! of one deposit, so the number of open positions per deposit is capped by
//! `VaultConfig::max_investors`.

use crate::access;
use crate::config::BPS_DENOMINATOR;
use crate::entities::*;
use crate::errors::Error;
use crate::events;
use crate::external;
use crate::fees;
use crate::ledger::ensure_not_paused;
use crate::storage;
use soroban_sdk::{log, Address, Env, Vec};

/// Basis-point share of `principal` in `total`, truncated.
pub fn share_bps(principal: u128, total: u128) -> Result<u32, Error> {
    if total == 0 || principal == 0 {
        return Ok(0);
    }
    let bps = principal
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(Error::Overflow)?
        / total;
    u32::try_from(bps).map_err(|_| Error::Overflow)
}

/// `amount * part / whole`, truncated.
pub fn pro_rata(amount: u128, part: u128, whole: u128) -> Result<u128, Error> {
    if whole == 0 {
        return Ok(0);
    }
    Ok(amount.checked_mul(part).ok_or(Error::Overflow)? / whole)
}

/// Largest-remainder allocation of 10000 bps over `principals`.
pub fn allocate_shares(
    env: &Env,
    principals: &Vec<u128>,
    total: u128,
) -> Result<Vec<u32>, Error> {
    let mut shares = Vec::new(env);
    let mut remainders = Vec::new(env);
    let mut assigned: u32 = 0;
    for principal in principals.iter() {
        let share = share_bps(principal, total)?;
        let scaled = principal
            .checked_mul(BPS_DENOMINATOR as u128)
            .ok_or(Error::Overflow)?;
        let remainder = if total == 0 { 0 } else { scaled % total };
        assigned = assigned.checked_add(share).ok_or(Error::Overflow)?;
        shares.push_back(share);
        remainders.push_back(remainder);
    }
    if assigned == 0 {
        return Ok(shares);
    }

    // fewer leftover bps than non-zero remainders, so each pick is distinct
    for _ in 0..BPS_DENOMINATOR.saturating_sub(assigned) {
        let mut best: Option<(u32, u128)> = None;
        for (i, remainder) in remainders.iter().enumerate() {
            let is_better = match best {
                Some((_, top)) => remainder > top,
                None => remainder > 0,
            };
            if is_better {
                best = Some((i as u32, remainder));
            }
        }
        let Some((i, _)) = best else {
            break;
        };
        let share = shares.get(i).ok_or(Error::Overflow)?;
        shares.set(i, share + 1);
        remainders.set(i, 0);
    }
    Ok(shares)
}

/// Register an investment-enabled deposit as a pool target.
pub fn register(env: &Env, deposit: &Deposit) -> Result<PoolDeposit, Error> {
    if !deposit.is_investment_enabled {
        return Err(Error::InvestmentNotEnabled);
    }
    if storage::has_pool_deposit(env, deposit.id) {
        return Err(Error::AlreadyInPool);
    }

    let entry = PoolDeposit {
        deposit_id: deposit.id,
        capacity: deposit.investment_pool_share,
        total_invested: 0,
        investor_count: 0,
        is_active: true,
        total_returns: 0,
        undistributed: 0,
        registered_at: env.ledger().timestamp(),
    };
    storage::set_pool_deposit(env, &entry);

    let mut stats = storage::get_pool_stats(env);
    stats.total_deposits = stats
        .total_deposits
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    storage::set_pool_stats(env, &stats);

    events::pool_deposit_added(env, deposit.id, entry.capacity);
    Ok(entry)
}

pub fn add_deposit(env: &Env, owner: Address, deposit_id: u64) -> Result<PoolDeposit, Error> {
    ensure_not_paused(env)?;
    access::authorize(env, &owner, Role::PoolOwner)?;
    let deposit = storage::get_deposit(env, deposit_id)?;
    register(env, &deposit)
}

pub fn close_pool(env: &Env, owner: Address, deposit_id: u64) -> Result<(), Error> {
    ensure_not_paused(env)?;
    access::authorize(env, &owner, Role::PoolOwner)?;
    let mut entry = active_entry(env, deposit_id)?;
    entry.is_active = false;
    storage::set_pool_deposit(env, &entry);

    events::pool_closed(env, deposit_id, &owner);
    Ok(())
}

pub fn invest(
    env: &Env,
    deposit_id: u64,
    investor: Address,
    amount: u128,
) -> Result<InvestorPosition, Error> {
    investor.require_auth();
    ensure_not_paused(env)?;
    let config = storage::get_config(env)?;

    let mut entry = active_entry(env, deposit_id)?;
    let deposit = storage::get_deposit(env, deposit_id)?;
    if deposit.status != DepositStatus::Active || deposit.escrowed == 0 {
        return Err(Error::DepositNotActiveInPool);
    }

    let gate = external::compliance(env)?;
    if !gate.is_compliant(&investor) {
        return Err(Error::NotCompliant);
    }
    if amount < config.min_investment {
        return Err(Error::InvalidAmount);
    }
    if amount > config.max_investment || !gate.check_limit(&investor, &amount) {
        return Err(Error::AmountExceedsLimit);
    }
    let total_invested = entry
        .total_invested
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    if total_invested > entry.capacity {
        return Err(Error::PoolCapacityExceeded);
    }

    let existing = storage::get_position(env, deposit_id, &investor);
    let opened = existing.as_ref().map_or(true, |position| position.principal == 0);
    if opened && entry.investor_count >= config.max_investors {
        return Err(Error::TooManyInvestors);
    }

    external::collect(env, &investor, amount)?;

    let now = env.ledger().timestamp();
    let mut position = existing.unwrap_or(InvestorPosition {
        deposit_id,
        investor: investor.clone(),
        principal: 0,
        share_bps: 0,
        invested_at: now,
        accumulated_returns: 0,
        claimed_returns: 0,
    });
    if opened {
        position.invested_at = now;
        storage::add_pool_investor(env, deposit_id, &investor);
    }
    position.principal = position
        .principal
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    storage::set_position(env, &position);

    entry.total_invested = total_invested;
    let mut stats = storage::get_pool_stats(env);
    stats.total_invested = stats
        .total_invested
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    if opened {
        entry.investor_count = entry
            .investor_count
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        stats.total_investors = stats
            .total_investors
            .checked_add(1)
            .ok_or(Error::Overflow)?;
    }
    storage::set_pool_deposit(env, &entry);
    storage::set_pool_stats(env, &stats);

    rebalance_shares(env, deposit_id, total_invested)?;
    gate.record_spend(&env.current_contract_address(), &investor, &amount);

    let position =
        storage::get_position(env, deposit_id, &investor).ok_or(Error::NoInvestmentFound)?;
    events::investment_made(env, deposit_id, &investor, amount, position.share_bps);
    log!(env, "Investment of {} into deposit {}", amount, deposit_id);
    Ok(position)
}

/// Return the investor's full principal and close the position. Credited
/// returns stay claimable.
pub fn withdraw(env: &Env, deposit_id: u64, investor: Address) -> Result<u128, Error> {
    investor.require_auth();
    ensure_not_paused(env)?;

    let mut position = storage::get_position(env, deposit_id, &investor)
        .filter(|position| position.principal > 0)
        .ok_or(Error::NoInvestmentFound)?;
    let mut entry = storage::get_pool_deposit(env, deposit_id)?;

    let principal = position.principal;
    position.principal = 0;
    position.share_bps = 0;
    storage::set_position(env, &position);
    storage::remove_pool_investor(env, deposit_id, &investor);

    entry.total_invested = entry
        .total_invested
        .checked_sub(principal)
        .ok_or(Error::Overflow)?;
    entry.investor_count = entry
        .investor_count
        .checked_sub(1)
        .ok_or(Error::Overflow)?;
    storage::set_pool_deposit(env, &entry);

    let mut stats = storage::get_pool_stats(env);
    stats.total_invested = stats
        .total_invested
        .checked_sub(principal)
        .ok_or(Error::Overflow)?;
    stats.total_investors = stats
        .total_investors
        .checked_sub(1)
        .ok_or(Error::Overflow)?;
    storage::set_pool_stats(env, &stats);

    rebalance_shares(env, deposit_id, entry.total_invested)?;
    external::pay(env, &investor, principal)?;

    events::investment_withdrawn(env, deposit_id, &investor, principal);
    log!(env, "Investor withdrew {} from deposit {}", principal, deposit_id);
    Ok(principal)
}

/// Pull `total_return` from the pool owner and credit open positions pro rata.
/// Returns the amount credited to investors.
pub fn distribute_returns(
    env: &Env,
    owner: Address,
    deposit_id: u64,
    total_return: u128,
) -> Result<u128, Error> {
    ensure_not_paused(env)?;
    access::authorize(env, &owner, Role::PoolOwner)?;
    let mut entry = active_entry(env, deposit_id)?;

    if total_return == 0 {
        return Err(Error::InvalidAmount);
    }
    if entry.total_invested == 0 {
        return Err(Error::NoInvestmentFound);
    }

    let config = storage::get_config(env)?;
    let fee = fees::return_fee(total_return, config.return_fee_bps)?;
    let distributable = total_return.checked_sub(fee).ok_or(Error::Overflow)?;

    external::collect(env, &owner, total_return)?;

    let mut credited: u128 = 0;
    for investor in storage::get_pool_investors(env, deposit_id).iter() {
        let mut position =
            storage::get_position(env, deposit_id, &investor).ok_or(Error::NoInvestmentFound)?;
        let share = pro_rata(distributable, position.principal, entry.total_invested)?;
        position.accumulated_returns = position
            .accumulated_returns
            .checked_add(share)
            .ok_or(Error::Overflow)?;
        storage::set_position(env, &position);
        credited = credited.checked_add(share).ok_or(Error::Overflow)?;
    }

    let remainder = distributable.checked_sub(credited).ok_or(Error::Overflow)?;
    entry.total_returns = entry
        .total_returns
        .checked_add(credited)
        .ok_or(Error::Overflow)?;
    entry.undistributed = entry
        .undistributed
        .checked_add(remainder)
        .ok_or(Error::Overflow)?;
    storage::set_pool_deposit(env, &entry);

    if fee > 0 {
        let collected_fees = storage::get_collected_fees(env)
            .checked_add(fee)
            .ok_or(Error::Overflow)?;
        storage::set_collected_fees(env, collected_fees);
    }

    let mut stats = storage::get_pool_stats(env);
    stats.total_returns = stats
        .total_returns
        .checked_add(credited)
        .ok_or(Error::Overflow)?;
    storage::set_pool_stats(env, &stats);

    events::returns_distributed(
        env,
        deposit_id,
        &owner,
        total_return,
        credited,
        fee,
        remainder,
    );
    log!(env, "Distributed {} on deposit {}", credited, deposit_id);
    Ok(credited)
}

pub fn claim_returns(env: &Env, deposit_id: u64, investor: Address) -> Result<u128, Error> {
    investor.require_auth();
    ensure_not_paused(env)?;

    let mut position =
        storage::get_position(env, deposit_id, &investor).ok_or(Error::NoInvestmentFound)?;
    let claimable = position.claimable();
    if claimable == 0 {
        return Err(Error::NothingToClaim);
    }
    position.claimed_returns = position.accumulated_returns;
    storage::set_position(env, &position);
    external::pay(env, &investor, claimable)?;

    events::returns_claimed(env, deposit_id, &investor, claimable);
    Ok(claimable)
}

/// Sweep the division remainders left over from distributions.
pub fn withdraw_undistributed(
    env: &Env,
    owner: Address,
    deposit_id: u64,
    recipient: Address,
) -> Result<u128, Error> {
    ensure_not_paused(env)?;
    access::authorize(env, &owner, Role::PoolOwner)?;
    let mut entry = storage::get_pool_deposit(env, deposit_id)?;

    let amount = entry.undistributed;
    if amount == 0 {
        return Err(Error::NothingToClaim);
    }
    entry.undistributed = 0;
    storage::set_pool_deposit(env, &entry);
    external::pay(env, &recipient, amount)?;

    events::undistributed_swept(env, deposit_id, &recipient, amount);
    Ok(amount)
}

fn active_entry(env: &Env, deposit_id: u64) -> Result<PoolDeposit, Error> {
    let entry = storage::get_pool_deposit(env, deposit_id)?;
    if !entry.is_active {
        return Err(Error::DepositNotActiveInPool);
    }
    Ok(entry)
}

fn rebalance_shares(env: &Env, deposit_id: u64, total_invested: u128) -> Result<(), Error> {
    let mut positions = Vec::new(env);
    let mut principals = Vec::new(env);
    for investor in storage::get_pool_investors(env, deposit_id).iter() {
        let position =
            storage::get_position(env, deposit_id, &investor).ok_or(Error::NoInvestmentFound)?;
        principals.push_back(position.principal);
        positions.push_back(position);
    }

    let shares = allocate_shares(env, &principals, total_invested)?;
    for (mut position, share) in positions.iter().zip(shares.iter()) {
        if position.share_bps != share {
            position.share_bps = share;
            storage::set_position(env, &position);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_bps_truncates() {
        assert_eq!(share_bps(100, 300), Ok(3333));
        assert_eq!(share_bps(200, 300), Ok(6666));
        assert_eq!(share_bps(300, 300), Ok(10_000));
    }

    #[test]
    fn share_bps_of_empty_pool_is_zero() {
        assert_eq!(share_bps(0, 300), Ok(0));
        assert_eq!(share_bps(100, 0), Ok(0));
    }

    fn shares_of(principals: &[u128]) -> Vec<u32> {
        let env = Env::default();
        let mut list = Vec::new(&env);
        let mut total = 0;
        for principal in principals {
            list.push_back(*principal);
            total += principal;
        }
        allocate_shares(&env, &list, total).unwrap()
    }

    #[test]
    fn allocate_shares_gives_leftover_to_largest_remainders() {
        let shares = shares_of(&[100, 200]);
        assert_eq!(shares.get(0), Some(3333));
        assert_eq!(shares.get(1), Some(6667));

        // 10000 / 7 = 1428.57; the first four in line take the spare bps
        let shares = shares_of(&[1_000_000; 7]);
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(share, if i < 4 { 1429 } else { 1428 });
        }
    }

    #[test]
    fn allocate_shares_stays_within_one_bp() {
        let principals = [70_001_u128, 90_017, 123_457, 1_000_003, 5, 999_999];
        let total: u128 = principals.iter().sum();
        let shares = shares_of(&principals);

        let mut sum = 0;
        for (principal, share) in principals.iter().zip(shares.iter()) {
            let exact = principal * 10_000;
            let given = share as u128 * total;
            assert!(exact.abs_diff(given) < total);
            sum += share;
        }
        assert_eq!(sum, 10_000);
    }

    #[test]
    fn allocate_shares_of_empty_pool() {
        let env = Env::default();
        let shares = allocate_shares(&env, &Vec::new(&env), 0).unwrap();
        assert!(shares.is_empty());
    }

    #[test]
    fn pro_rata_on_principal() {
        assert_eq!(pro_rata(30_000_000, 100_000_000, 300_000_000), Ok(10_000_000));
        assert_eq!(pro_rata(30_000_000, 200_000_000, 300_000_000), Ok(20_000_000));
        // 10 / 3 leaves a unit behind for each third
        assert_eq!(pro_rata(10, 1, 3), Ok(3));
        assert_eq!(pro_rata(10, 0, 0), Ok(0));
    }

    #[test]
    fn pro_rata_overflow() {
        assert_eq!(pro_rata(u128::MAX, 2, 3), Err(Error::Overflow));
    }
}
