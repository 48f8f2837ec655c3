use crate::access;
use crate::entities::*;
use crate::errors::*;
use crate::events;
use crate::external;
use crate::ledger;
use crate::pool;
use crate::storage;
use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

#[contract]
pub struct JeonseVault;

#[contractimpl]
#[allow(clippy::too_many_arguments)]
impl JeonseVault {
    /// Wire the vault to its settlement token and collaborators. The admin
    /// receives both the `Admin` and `PoolOwner` roles.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        compliance_gate: Address,
        property_registry: Address,
        config: VaultConfig,
    ) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        config.validate()?;

        storage::set_collaborators(&env, &token, &compliance_gate, &property_registry);
        storage::set_config(&env, &config);
        storage::set_paused(&env, false);
        access::grant(&env, &admin, Role::Admin);
        access::grant(&env, &admin, Role::PoolOwner);

        log!(&env, "Vault initialized with admin {}", admin);
        Ok(())
    }

    // ==================== Deposit Ledger ====================

    /// Escrow a Jeonse deposit from the tenant.
    ///
    /// # Arguments
    /// * `tenant` - Pays the deposit; must authorize the call
    /// * `landlord` - Must own the verified property
    /// * `amount` - Escrowed amount, within the configured bounds
    /// * `start_date` / `end_date` - Lease term; `end_date` must be in the future
    /// * `enable_investment` - Earmark part of the deposit for the investment pool
    pub fn create_deposit(
        env: Env,
        tenant: Address,
        landlord: Address,
        amount: u128,
        start_date: u64,
        end_date: u64,
        property_id: String,
        property_address: String,
        enable_investment: bool,
    ) -> Result<u64, Error> {
        ledger::create_deposit(
            &env,
            tenant,
            landlord,
            amount,
            start_date,
            end_date,
            property_id,
            property_address,
            enable_investment,
        )
    }

    /// Landlord-only; pays the tenant back minus the release fee once the
    /// lease has ended. Returns the amount paid to the tenant.
    pub fn release_deposit(env: Env, caller: Address, deposit_id: u64) -> Result<u128, Error> {
        ledger::release_deposit(&env, caller, deposit_id)
    }

    pub fn dispute_deposit(
        env: Env,
        caller: Address,
        deposit_id: u64,
        reason: String,
    ) -> Result<(), Error> {
        ledger::dispute_deposit(&env, caller, deposit_id, reason)
    }

    pub fn resolve_dispute(
        env: Env,
        admin: Address,
        deposit_id: u64,
        outcome: DisputeOutcome,
    ) -> Result<u128, Error> {
        ledger::resolve_dispute(&env, admin, deposit_id, outcome)
    }

    pub fn emergency_withdraw(
        env: Env,
        admin: Address,
        deposit_id: u64,
        recipient: Address,
    ) -> Result<u128, Error> {
        ledger::emergency_withdraw(&env, admin, deposit_id, recipient)
    }

    pub fn get_deposit(env: Env, deposit_id: u64) -> Result<Deposit, Error> {
        storage::get_deposit(&env, deposit_id)
    }

    /// Ids of deposits where `account` is tenant or landlord
    pub fn get_user_deposits(env: Env, account: Address) -> Vec<u64> {
        storage::get_user_deposits(&env, &account)
    }

    /// Ids currently in `status`, read from a per-status index in the order
    /// deposits entered that status.
    pub fn get_deposits_by_status(env: Env, status: DepositStatus) -> Vec<u64> {
        ledger::get_deposits_by_status(&env, status)
    }

    pub fn total_value_locked(env: Env) -> u128 {
        storage::get_total_value_locked(&env)
    }

    // ==================== Investment Pool ====================

    pub fn add_deposit(env: Env, owner: Address, deposit_id: u64) -> Result<PoolDeposit, Error> {
        pool::add_deposit(&env, owner, deposit_id)
    }

    pub fn close_pool(env: Env, owner: Address, deposit_id: u64) -> Result<(), Error> {
        pool::close_pool(&env, owner, deposit_id)
    }

    pub fn invest(
        env: Env,
        deposit_id: u64,
        investor: Address,
        amount: u128,
    ) -> Result<InvestorPosition, Error> {
        pool::invest(&env, deposit_id, investor, amount)
    }

    pub fn withdraw(env: Env, deposit_id: u64, investor: Address) -> Result<u128, Error> {
        pool::withdraw(&env, deposit_id, investor)
    }

    pub fn distribute_returns(
        env: Env,
        owner: Address,
        deposit_id: u64,
        total_return: u128,
    ) -> Result<u128, Error> {
        pool::distribute_returns(&env, owner, deposit_id, total_return)
    }

    pub fn claim_returns(env: Env, deposit_id: u64, investor: Address) -> Result<u128, Error> {
        pool::claim_returns(&env, deposit_id, investor)
    }

    pub fn withdraw_undistributed(
        env: Env,
        owner: Address,
        deposit_id: u64,
        recipient: Address,
    ) -> Result<u128, Error> {
        pool::withdraw_undistributed(&env, owner, deposit_id, recipient)
    }

    pub fn get_deposit_info(env: Env, deposit_id: u64) -> Result<PoolDeposit, Error> {
        storage::get_pool_deposit(&env, deposit_id)
    }

    pub fn get_investor_info(
        env: Env,
        deposit_id: u64,
        investor: Address,
    ) -> Result<InvestorPosition, Error> {
        storage::get_position(&env, deposit_id, &investor).ok_or(Error::NoInvestmentFound)
    }

    pub fn get_pool_stats(env: Env) -> PoolStats {
        storage::get_pool_stats(&env)
    }

    // ==================== Administration ====================

    pub fn pause(env: Env, admin: Address) -> Result<(), Error> {
        access::authorize(&env, &admin, Role::Admin)?;
        storage::set_paused(&env, true);
        events::paused(&env, &admin, true);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), Error> {
        access::authorize(&env, &admin, Role::Admin)?;
        storage::set_paused(&env, false);
        events::paused(&env, &admin, false);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn grant_role(env: Env, admin: Address, account: Address, role: Role) -> Result<(), Error> {
        access::authorize(&env, &admin, Role::Admin)?;
        access::grant(&env, &account, role);
        events::role_changed(&env, &admin, &account, role, true);
        Ok(())
    }

    pub fn revoke_role(env: Env, admin: Address, account: Address, role: Role) -> Result<(), Error> {
        access::authorize(&env, &admin, Role::Admin)?;
        access::revoke(&env, &account, role);
        events::role_changed(&env, &admin, &account, role, false);
        Ok(())
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        access::has_role(&env, &account, role)
    }

    pub fn update_config(env: Env, admin: Address, config: VaultConfig) -> Result<(), Error> {
        access::authorize(&env, &admin, Role::Admin)?;
        config.validate()?;
        storage::set_config(&env, &config);
        events::config_updated(&env, &admin, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, Error> {
        storage::get_config(&env)
    }

    pub fn collected_fees(env: Env) -> u128 {
        storage::get_collected_fees(&env)
    }

    pub fn withdraw_fees(
        env: Env,
        admin: Address,
        recipient: Address,
        amount: u128,
    ) -> Result<(), Error> {
        access::authorize(&env, &admin, Role::Admin)?;
        let collected = storage::get_collected_fees(&env);
        if amount == 0 || amount > collected {
            return Err(Error::InvalidAmount);
        }
        storage::set_collected_fees(&env, collected - amount);
        external::pay(&env, &recipient, amount)?;
        events::fees_withdrawn(&env, &admin, &recipient, amount);
        Ok(())
    }
}
