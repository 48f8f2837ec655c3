use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // Validation
    InvalidAmount = 3,
    InvalidDateRange = 4,
    PropertyNotVerified = 5,
    InvalidParties = 6,
    InvalidConfig = 7,

    // Authorization
    NotAuthorized = 8,
    NotOwner = 9,

    // Compliance
    NotCompliant = 10,
    AmountExceedsLimit = 11,

    // Deposit state
    InvalidState = 12,
    ContractNotEnded = 13,
    DepositNotFound = 14,

    // Investment pool
    DepositNotActiveInPool = 15,
    AlreadyInPool = 16,
    InvestmentNotEnabled = 17,
    NoInvestmentFound = 18,
    PoolCapacityExceeded = 19,
    NothingToClaim = 20,

    SystemPaused = 21,
    Overflow = 22,
    TooManyInvestors = 23,
}
