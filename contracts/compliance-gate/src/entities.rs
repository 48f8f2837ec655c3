use soroban_sdk::{contracttype, Address};

/// KYC tier. Each tier carries a default transaction and monthly limit.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComplianceLevel {
    None,
    Basic,
    Standard,
    Premium,
    Corporate,
}

impl ComplianceLevel {
    /// (transaction limit, monthly limit) in the smallest currency unit.
    pub fn default_limits(&self) -> (u128, u128) {
        match self {
            ComplianceLevel::None => (0, 0),
            ComplianceLevel::Basic => (10_000_000, 50_000_000),
            ComplianceLevel::Standard => (100_000_000, 500_000_000),
            ComplianceLevel::Premium => (1_000_000_000, 5_000_000_000),
            ComplianceLevel::Corporate => (100_000_000_000_000, 1_000_000_000_000_000),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComplianceRecord {
    pub account: Address,
    pub level: ComplianceLevel,
    pub transaction_limit: u128,
    pub monthly_limit: u128,
    pub monthly_spent: u128,
    pub period_start: u64,
    pub verified: bool,
    pub last_update: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Verifier(Address),
    Operator(Address),
    Record(Address),
    Blacklisted(Address),
}
