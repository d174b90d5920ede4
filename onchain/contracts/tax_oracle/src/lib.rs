#![no_std]

use soroban_sdk::{contract, contracterror, contractevent, contractimpl, contracttype, log, Address, Env};

/// Reports outstanding tax liabilities recorded by a government administrator.
///
/// The oracle stores figures; it does not compute tax. Consumers such as the
/// compliance escrow call `get_tax_amount` and treat the answer as advisory.
#[contract]
pub struct TaxOracleContract;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OracleError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
}

/// Tax position of a single account
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TaxRecord {
    /// Most recent assessed liability
    pub assessed: i128,
    /// Payments recorded against the assessment
    pub paid: i128,
}

impl TaxRecord {
    pub fn outstanding(&self) -> i128 {
        if self.paid >= self.assessed {
            0
        } else {
            self.assessed - self.paid
        }
    }
}

#[contracttype]
#[derive(Clone)]
enum StorageKey {
    Admin,
    Record(Address),
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaxAmountReported {
    pub account: Address,
    pub assessed: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaxPaymentRecorded {
    pub account: Address,
    pub amount: i128,
    pub outstanding: i128,
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), OracleError> {
    let admin: Address = env
        .storage()
        .persistent()
        .get(&StorageKey::Admin)
        .ok_or(OracleError::NotInitialized)?;
    if *caller != admin {
        return Err(OracleError::Unauthorized);
    }
    Ok(())
}

fn read_record(env: &Env, account: &Address) -> TaxRecord {
    env.storage()
        .persistent()
        .get(&StorageKey::Record(account.clone()))
        .unwrap_or_default()
}

fn write_record(env: &Env, account: &Address, record: &TaxRecord) {
    env.storage()
        .persistent()
        .set(&StorageKey::Record(account.clone()), record);
}

#[contractimpl]
impl TaxOracleContract {
    /// Initialize the contract
    pub fn initialize(env: Env, admin: Address) -> Result<(), OracleError> {
        admin.require_auth();
        if env.storage().persistent().has(&StorageKey::Admin) {
            return Err(OracleError::AlreadyInitialized);
        }
        env.storage().persistent().set(&StorageKey::Admin, &admin);
        Ok(())
    }

    /// Records a fresh assessment for `account`. Earlier payments are cleared.
    pub fn report_tax_amount(
        env: Env,
        admin: Address,
        account: Address,
        amount: i128,
    ) -> Result<(), OracleError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if amount < 0 {
            return Err(OracleError::InvalidAmount);
        }

        let record = TaxRecord {
            assessed: amount,
            paid: 0,
        };
        write_record(&env, &account, &record);

        log!(&env, "tax amount reported", account.clone(), amount);
        TaxAmountReported {
            account,
            assessed: amount,
        }
        .publish(&env);
        Ok(())
    }

    /// Records a payment against the current assessment (Admin only)
    pub fn record_tax_payment(
        env: Env,
        admin: Address,
        account: Address,
        amount: i128,
    ) -> Result<i128, OracleError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        if amount <= 0 {
            return Err(OracleError::InvalidAmount);
        }

        let mut record = read_record(&env, &account);
        record.paid = record.paid.saturating_add(amount);
        write_record(&env, &account, &record);

        let outstanding = record.outstanding();
        TaxPaymentRecorded {
            account,
            amount,
            outstanding,
        }
        .publish(&env);
        Ok(outstanding)
    }

    /// Outstanding liability for `account`; 0 when nothing was reported.
    pub fn get_tax_amount(env: Env, account: Address) -> i128 {
        read_record(&env, &account).outstanding()
    }

    pub fn get_tax_record(env: Env, account: Address) -> TaxRecord {
        read_record(&env, &account)
    }

    pub fn is_settled(env: Env, account: Address) -> bool {
        Self::get_tax_amount(env, account) == 0
    }
}
