use soroban_sdk::contracterror;

/// Ledger errors. Every failing operation leaves all ledger state untouched.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EscrowError {
    /// `initialize` called a second time
    AlreadyInitialized = 1,
    /// Operation invoked before `initialize`
    NotInitialized = 2,
    /// Caller lacks the role the operation requires
    Unauthorized = 3,
    /// Requested amount exceeds the pooled balance
    InsufficientFunds = 4,
    /// Worker has no compliant record
    TaxComplianceFailed = 5,
    /// Non-positive amount on a value-moving operation
    InvalidAmount = 6,
    EmptyBatch = 7,
    ArithmeticOverflow = 8,
}

impl EscrowError {
    /// Human-readable reason naming the failed precondition.
    pub fn reason(&self) -> &'static str {
        match self {
            EscrowError::AlreadyInitialized => "ledger already initialized",
            EscrowError::NotInitialized => "ledger not initialized",
            EscrowError::Unauthorized => "caller lacks the required role",
            EscrowError::InsufficientFunds => "insufficient funds",
            EscrowError::TaxComplianceFailed => "Tax compliance check failed",
            EscrowError::InvalidAmount => "amount must be positive",
            EscrowError::EmptyBatch => "payout batch is empty",
            EscrowError::ArithmeticOverflow => "amount overflow",
        }
    }
}
