use crate::entities::VaultConfig;
use crate::errors::Error;

pub const BPS_DENOMINATOR: u32 = 10_000;

pub const DEFAULT_MIN_DEPOSIT: u128 = 1_000_000;
pub const DEFAULT_MAX_DEPOSIT: u128 = 100_000_000_000_000;
/// 0.1% escrow release fee.
pub const DEFAULT_RELEASE_FEE_BPS: u32 = 10;
pub const DEFAULT_RETURN_FEE_BPS: u32 = 0;
pub const DEFAULT_POOL_SHARE_BPS: u32 = 3_000;
pub const DEFAULT_MIN_INVESTMENT: u128 = 50_000;
pub const DEFAULT_MAX_INVESTMENT: u128 = 1_000_000_000;
pub const DEFAULT_MAX_INVESTORS: u32 = 20;

pub const MIN_POOL_SHARE_BPS: u32 = 1_000;
pub const MAX_POOL_SHARE_BPS: u32 = 5_000;
pub const MAX_FEE_BPS: u32 = 1_000;
/// Keeps a full rebalance inside one transaction's write budget.
pub const MAX_POOL_INVESTORS: u32 = 30;

impl VaultConfig {
    pub fn standard() -> Self {
        VaultConfig {
            min_deposit: DEFAULT_MIN_DEPOSIT,
            max_deposit: DEFAULT_MAX_DEPOSIT,
            release_fee_bps: DEFAULT_RELEASE_FEE_BPS,
            return_fee_bps: DEFAULT_RETURN_FEE_BPS,
            pool_share_bps: DEFAULT_POOL_SHARE_BPS,
            min_investment: DEFAULT_MIN_INVESTMENT,
            max_investment: DEFAULT_MAX_INVESTMENT,
            max_investors: DEFAULT_MAX_INVESTORS,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_deposit == 0 || self.min_deposit > self.max_deposit {
            return Err(Error::InvalidConfig);
        }
        if self.release_fee_bps > MAX_FEE_BPS || self.return_fee_bps > MAX_FEE_BPS {
            return Err(Error::InvalidConfig);
        }
        if self.pool_share_bps < MIN_POOL_SHARE_BPS || self.pool_share_bps > MAX_POOL_SHARE_BPS {
            return Err(Error::InvalidConfig);
        }
        if self.min_investment == 0 || self.min_investment > self.max_investment {
            return Err(Error::InvalidConfig);
        }
        if self.max_investors == 0 || self.max_investors > MAX_POOL_INVESTORS {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}
