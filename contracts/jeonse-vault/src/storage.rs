use crate::entities::*;
use crate::errors::Error;
use soroban_sdk::{Address, Env, Vec};

/// Bump amount for persistent storage entries (roughly 30 days in ledgers).
const LEDGER_BUMP: u32 = 518_400;
/// Threshold for bumping (roughly 15 days).
const LEDGER_THRESHOLD: u32 = 259_200;

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
}

// ==================== Setup ====================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_collaborators(env: &Env, token: &Address, compliance: &Address, registry: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    env.storage().instance().set(&DataKey::ComplianceGate, compliance);
    env.storage().instance().set(&DataKey::PropertyRegistry, registry);
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn get_compliance_gate(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::ComplianceGate)
        .ok_or(Error::NotInitialized)
}

pub fn get_property_registry(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::PropertyRegistry)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<VaultConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

// ==================== Roles ====================

/// Role bit set for an address, 0 when none granted
pub fn get_roles(env: &Env, account: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Roles(account.clone()))
        .unwrap_or(0)
}

pub fn set_roles(env: &Env, account: &Address, roles: u32) {
    let key = DataKey::Roles(account.clone());
    if roles == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &roles);
        bump(env, &key);
    }
}

// ==================== Deposits ====================

pub fn get_deposit_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::DepositCounter)
        .unwrap_or(0)
}

pub fn set_deposit_counter(env: &Env, counter: u64) {
    env.storage()
        .instance()
        .set(&DataKey::DepositCounter, &counter);
}

pub fn set_deposit(env: &Env, deposit: &Deposit) {
    let key = DataKey::Deposit(deposit.id);
    env.storage().persistent().set(&key, deposit);
    bump(env, &key);
}

pub fn get_deposit(env: &Env, deposit_id: u64) -> Result<Deposit, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Deposit(deposit_id))
        .ok_or(Error::DepositNotFound)
}

pub fn get_user_deposits(env: &Env, account: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UserDeposits(account.clone()))
        .unwrap_or(Vec::new(env))
}

/// Index a deposit under one of its parties
pub fn add_user_deposit(env: &Env, account: &Address, deposit_id: u64) {
    let key = DataKey::UserDeposits(account.clone());
    let mut ids = get_user_deposits(env, account);
    ids.push_back(deposit_id);
    env.storage().persistent().set(&key, &ids);
    bump(env, &key);
}

/// Deposit ids currently in `status`
pub fn get_status_index(env: &Env, status: DepositStatus) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::StatusIndex(status))
        .unwrap_or(Vec::new(env))
}

fn set_status_index(env: &Env, status: DepositStatus, ids: &Vec<u64>) {
    let key = DataKey::StatusIndex(status);
    env.storage().persistent().set(&key, ids);
    bump(env, &key);
}

/// Move a deposit between status buckets. `from` is `None` for a new deposit.
pub fn index_status(
    env: &Env,
    deposit_id: u64,
    from: Option<DepositStatus>,
    to: DepositStatus,
) {
    if let Some(from) = from {
        let mut ids = get_status_index(env, from);
        if let Some(index) = ids.first_index_of(deposit_id) {
            ids.remove(index);
            set_status_index(env, from, &ids);
        }
    }
    let mut ids = get_status_index(env, to);
    ids.push_back(deposit_id);
    set_status_index(env, to, &ids);
}

pub fn get_total_value_locked(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalValueLocked)
        .unwrap_or(0)
}

pub fn set_total_value_locked(env: &Env, value: u128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalValueLocked, &value);
}

pub fn get_collected_fees(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::CollectedFees)
        .unwrap_or(0)
}

pub fn set_collected_fees(env: &Env, value: u128) {
    env.storage()
        .instance()
        .set(&DataKey::CollectedFees, &value);
}

// ==================== Investment Pool ====================

pub fn has_pool_deposit(env: &Env, deposit_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::PoolDeposit(deposit_id))
}

pub fn get_pool_deposit(env: &Env, deposit_id: u64) -> Result<PoolDeposit, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolDeposit(deposit_id))
        .ok_or(Error::DepositNotActiveInPool)
}

pub fn set_pool_deposit(env: &Env, entry: &PoolDeposit) {
    let key = DataKey::PoolDeposit(entry.deposit_id);
    env.storage().persistent().set(&key, entry);
    bump(env, &key);
}

/// Investors with an open position in the deposit, in the order the
/// positions were opened
pub fn get_pool_investors(env: &Env, deposit_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolInvestors(deposit_id))
        .unwrap_or(Vec::new(env))
}

fn set_pool_investors(env: &Env, deposit_id: u64, investors: &Vec<Address>) {
    let key = DataKey::PoolInvestors(deposit_id);
    env.storage().persistent().set(&key, investors);
    bump(env, &key);
}

pub fn add_pool_investor(env: &Env, deposit_id: u64, investor: &Address) {
    let mut investors = get_pool_investors(env, deposit_id);
    if !investors.contains(investor) {
        investors.push_back(investor.clone());
        set_pool_investors(env, deposit_id, &investors);
    }
}

pub fn remove_pool_investor(env: &Env, deposit_id: u64, investor: &Address) {
    let mut investors = get_pool_investors(env, deposit_id);
    if let Some(index) = investors.first_index_of(investor) {
        investors.remove(index);
        set_pool_investors(env, deposit_id, &investors);
    }
}

pub fn get_position(env: &Env, deposit_id: u64, investor: &Address) -> Option<InvestorPosition> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(deposit_id, investor.clone()))
}

pub fn set_position(env: &Env, position: &InvestorPosition) {
    let key = DataKey::Position(position.deposit_id, position.investor.clone());
    env.storage().persistent().set(&key, position);
    bump(env, &key);
}

pub fn get_pool_stats(env: &Env) -> PoolStats {
    env.storage()
        .instance()
        .get(&DataKey::PoolStats)
        .unwrap_or_default()
}

pub fn set_pool_stats(env: &Env, stats: &PoolStats) {
    env.storage().instance().set(&DataKey::PoolStats, stats);
}
