use crate::entities::*;
use crate::errors::*;
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env};

pub const DAY_IN_SECONDS: u64 = 86400;
pub const SPENDING_PERIOD: u64 = 30 * DAY_IN_SECONDS;

const LEDGER_BUMP: u32 = 518_400;
const LEDGER_THRESHOLD: u32 = 259_200;

#[contract]
pub struct ComplianceGate;

#[contractimpl]
impl ComplianceGate {
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    pub fn add_verifier(env: Env, admin: Address, verifier: Address) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        Self::set_flag(&env, &DataKey::Verifier(verifier.clone()), true);
        env.events()
            .publish((symbol_short!("verif_add"),), verifier);
        Ok(())
    }

    pub fn remove_verifier(env: Env, admin: Address, verifier: Address) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        Self::set_flag(&env, &DataKey::Verifier(verifier.clone()), false);
        env.events()
            .publish((symbol_short!("verif_rm"),), verifier);
        Ok(())
    }

    /// Operators are contracts allowed to report completed spending,
    /// typically the deposit vault.
    pub fn add_operator(env: Env, admin: Address, operator: Address) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        Self::set_flag(&env, &DataKey::Operator(operator.clone()), true);
        env.events().publish((symbol_short!("oper_add"),), operator);
        Ok(())
    }

    pub fn remove_operator(env: Env, admin: Address, operator: Address) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        Self::set_flag(&env, &DataKey::Operator(operator.clone()), false);
        env.events().publish((symbol_short!("oper_rm"),), operator);
        Ok(())
    }

    /// Assign a KYC level. Limits are reset to the level defaults; the
    /// current spending window is kept, so a downgrade below what the account
    /// already spent this window fails with `InvalidLimits`.
    pub fn set_compliance(
        env: Env,
        verifier: Address,
        account: Address,
        level: ComplianceLevel,
    ) -> Result<ComplianceRecord, Error> {
        Self::require_verifier(&env, &verifier)?;

        let now = env.ledger().timestamp();
        let (transaction_limit, monthly_limit) = level.default_limits();
        let record = match Self::load_record(&env, &account) {
            Some(mut existing) => {
                Self::roll_window(&mut existing, now);
                if existing.monthly_spent > monthly_limit {
                    return Err(Error::InvalidLimits);
                }
                existing.level = level;
                existing.transaction_limit = transaction_limit;
                existing.monthly_limit = monthly_limit;
                existing.verified = level != ComplianceLevel::None;
                existing.last_update = now;
                existing
            }
            None => ComplianceRecord {
                account: account.clone(),
                level,
                transaction_limit,
                monthly_limit,
                monthly_spent: 0,
                period_start: now,
                verified: level != ComplianceLevel::None,
                last_update: now,
            },
        };
        Self::store_record(&env, &record);

        env.events()
            .publish((symbol_short!("kyc_set"), account), level);
        log!(&env, "Compliance level updated by {}", verifier);
        Ok(record)
    }

    pub fn set_limits(
        env: Env,
        verifier: Address,
        account: Address,
        transaction_limit: u128,
        monthly_limit: u128,
    ) -> Result<ComplianceRecord, Error> {
        Self::require_verifier(&env, &verifier)?;
        if transaction_limit > monthly_limit {
            return Err(Error::InvalidLimits);
        }

        let mut record = Self::load_record(&env, &account).ok_or(Error::RecordNotFound)?;
        let now = env.ledger().timestamp();
        Self::roll_window(&mut record, now);
        if record.monthly_spent > monthly_limit {
            return Err(Error::InvalidLimits);
        }
        record.transaction_limit = transaction_limit;
        record.monthly_limit = monthly_limit;
        record.last_update = now;
        Self::store_record(&env, &record);

        env.events().publish(
            (symbol_short!("kyc_lim"), account),
            (transaction_limit, monthly_limit),
        );
        Ok(record)
    }

    pub fn revoke(env: Env, verifier: Address, account: Address) -> Result<(), Error> {
        Self::require_verifier(&env, &verifier)?;
        let mut record = Self::load_record(&env, &account).ok_or(Error::RecordNotFound)?;
        record.verified = false;
        record.last_update = env.ledger().timestamp();
        Self::store_record(&env, &record);

        env.events().publish((symbol_short!("kyc_rev"),), account);
        Ok(())
    }

    pub fn set_blacklisted(
        env: Env,
        admin: Address,
        account: Address,
        blacklisted: bool,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        Self::set_flag(&env, &DataKey::Blacklisted(account.clone()), blacklisted);
        env.events()
            .publish((symbol_short!("blacklist"), account), blacklisted);
        Ok(())
    }

    pub fn is_compliant(env: Env, account: Address) -> bool {
        if Self::flag(&env, &DataKey::Blacklisted(account.clone())) {
            return false;
        }
        match Self::load_record(&env, &account) {
            Some(record) => record.verified && record.level != ComplianceLevel::None,
            None => false,
        }
    }

    pub fn check_limit(env: Env, account: Address, amount: u128) -> bool {
        match Self::load_record(&env, &account) {
            Some(record) => Self::within_limits(&record, amount, env.ledger().timestamp()),
            None => false,
        }
    }

    /// Book a completed transaction against the account's monthly allowance.
    pub fn record_spend(
        env: Env,
        operator: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), Error> {
        operator.require_auth();
        if !Self::flag(&env, &DataKey::Operator(operator)) {
            return Err(Error::Unauthorized);
        }

        let mut record = Self::load_record(&env, &account).ok_or(Error::RecordNotFound)?;
        if !record.verified {
            return Err(Error::NotCompliant);
        }

        let now = env.ledger().timestamp();
        if !Self::within_limits(&record, amount, now) {
            return Err(Error::LimitExceeded);
        }
        Self::roll_window(&mut record, now);
        record.monthly_spent = record
            .monthly_spent
            .checked_add(amount)
            .ok_or(Error::LimitExceeded)?;
        Self::store_record(&env, &record);

        env.events()
            .publish((symbol_short!("spend"), account), (amount, record.monthly_spent));
        Ok(())
    }

    pub fn get_record(env: Env, account: Address) -> Option<ComplianceRecord> {
        Self::load_record(&env, &account)
    }

    pub fn is_blacklisted(env: Env, account: Address) -> bool {
        Self::flag(&env, &DataKey::Blacklisted(account))
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if *caller != admin {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    fn require_verifier(env: &Env, caller: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if *caller != admin && !Self::flag(env, &DataKey::Verifier(caller.clone())) {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    fn period_elapsed(record: &ComplianceRecord, now: u64) -> bool {
        now >= record.period_start.saturating_add(SPENDING_PERIOD)
    }

    fn roll_window(record: &mut ComplianceRecord, now: u64) {
        if Self::period_elapsed(record, now) {
            record.monthly_spent = 0;
            record.period_start = now;
        }
    }

    fn within_limits(record: &ComplianceRecord, amount: u128, now: u64) -> bool {
        if amount > record.transaction_limit {
            return false;
        }
        let spent = if Self::period_elapsed(record, now) {
            0
        } else {
            record.monthly_spent
        };
        match spent.checked_add(amount) {
            Some(total) => total <= record.monthly_limit,
            None => false,
        }
    }

    fn load_record(env: &Env, account: &Address) -> Option<ComplianceRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::Record(account.clone()))
    }

    fn store_record(env: &Env, record: &ComplianceRecord) {
        let key = DataKey::Record(record.account.clone());
        env.storage().persistent().set(&key, record);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);
    }

    fn flag(env: &Env, key: &DataKey) -> bool {
        env.storage().persistent().get(key).unwrap_or(false)
    }

    fn set_flag(env: &Env, key: &DataKey, value: bool) {
        if value {
            env.storage().persistent().set(key, &true);
            env.storage()
                .persistent()
                .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
        } else {
            env.storage().persistent().remove(key);
        }
    }
}
