use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepositStatus {
    Active,
    Completed,
    Disputed,
    Refunded,
}

impl DepositStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DepositStatus::Completed | DepositStatus::Refunded)
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisputeOutcome {
    /// Full amount back to the tenant, no fee.
    Refund,
    /// Settle as a normal release, fee applies.
    Release,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub id: u64,
    pub tenant: Address,
    pub landlord: Address,
    pub amount: u128,
    pub escrowed: u128,
    pub property_id: String,
    pub property_address: String,
    pub start_date: u64,
    pub end_date: u64,
    pub status: DepositStatus,
    pub is_investment_enabled: bool,
    pub investment_pool_share: u128,
    pub dispute_reason: Option<String>,
    pub fee_charged: u128,
    pub created_at: u64,
    pub released_at: u64,
}

/// Pool-side view of a deposit registered for fractional investment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolDeposit {
    pub deposit_id: u64,
    pub capacity: u128,
    pub total_invested: u128,
    pub investor_count: u32,
    pub is_active: bool,
    pub total_returns: u128,
    pub undistributed: u128,
    pub registered_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorPosition {
    pub deposit_id: u64,
    pub investor: Address,
    pub principal: u128,
    pub share_bps: u32,
    pub invested_at: u64,
    pub accumulated_returns: u128,
    pub claimed_returns: u128,
}

impl InvestorPosition {
    pub fn claimable(&self) -> u128 {
        self.accumulated_returns.saturating_sub(self.claimed_returns)
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolStats {
    pub total_deposits: u32,
    pub total_invested: u128,
    pub total_investors: u32,
    pub total_returns: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub min_deposit: u128,
    pub max_deposit: u128,
    pub release_fee_bps: u32,
    pub return_fee_bps: u32,
    pub pool_share_bps: u32,
    pub min_investment: u128,
    pub max_investment: u128,
    /// Open positions allowed per pooled deposit.
    pub max_investors: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    PoolOwner = 1,
}

impl Role {
    pub fn mask(&self) -> u32 {
        1u32 << (*self as u32)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Token,
    ComplianceGate,
    PropertyRegistry,
    Config,
    Paused,
    Roles(Address),
    DepositCounter,
    Deposit(u64),
    UserDeposits(Address),
    StatusIndex(DepositStatus),
    TotalValueLocked,
    CollectedFees,
    PoolDeposit(u64),
    PoolInvestors(u64),
    Position(u64, Address),
    PoolStats,
}
