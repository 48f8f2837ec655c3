//! Basis-point fee math. All values truncate toward zero; the caller keeps
//! whatever the truncation leaves behind.

use crate::config::BPS_DENOMINATOR;
use crate::errors::Error;

pub fn apply_bps(amount: u128, bps: u32) -> Result<u128, Error> {
    amount
        .checked_mul(bps as u128)
        .map(|v| v / BPS_DENOMINATOR as u128)
        .ok_or(Error::Overflow)
}

/// Fee kept by the vault when escrow is paid out to the tenant.
pub fn release_fee(amount: u128, release_fee_bps: u32) -> Result<u128, Error> {
    apply_bps(amount, release_fee_bps)
}

/// Fee skimmed off a return distribution before investors are credited.
pub fn return_fee(total_return: u128, return_fee_bps: u32) -> Result<u128, Error> {
    apply_bps(total_return, return_fee_bps)
}

/// `(fee, payout)` for a release of `amount`.
pub fn split_release(amount: u128, release_fee_bps: u32) -> Result<(u128, u128), Error> {
    let fee = release_fee(amount, release_fee_bps)?;
    let payout = amount.checked_sub(fee).ok_or(Error::Overflow)?;
    Ok((fee, payout))
}
