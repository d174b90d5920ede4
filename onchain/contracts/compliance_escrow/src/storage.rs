use soroban_sdk::{contracttype, Address, Env};

/// Standing of an employer with the tax authority.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmployerStatus {
    /// Default for every employer
    Active,
    /// Set by an authority; terminal
    Penalized,
}

impl EmployerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployerStatus::Active => "Active",
            EmployerStatus::Penalized => "Penalized",
        }
    }
}

/// Privileged roles recognised by the ledger. Employers and workers are
/// plain identities and carry no role.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Sole identity allowed to disburse payroll
    Owner,
    /// Government authority: certifies workers and penalizes employers
    Authority,
}

/// A single entry of a batch payroll run.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub worker: Address,
    pub amount: i128,
}

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Contract owner, fixed at initialization
    Owner,
    /// Settlement token address
    Token,
    /// Advisory tax oracle contract
    TaxOracle,
    /// Pooled balance: i128
    Balance,
    /// Authority role membership: address -> bool
    Authority(Address),
    /// Worker compliance flag: address -> bool
    Compliance(Address),
    /// Employer standing: address -> EmployerStatus
    EmployerStatus(Address),
    /// Cumulative funding per employer
    Funded(Address),
    /// Cumulative disbursement per worker
    Disbursed(Address),
    /// Cumulative withdrawal per worker
    Withdrawn(Address),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&StorageKey::Owner)
}

pub fn read_owner(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&StorageKey::Owner)
}

pub fn write_owner(env: &Env, owner: &Address) {
    env.storage().persistent().set(&StorageKey::Owner, owner);
}

pub fn read_token(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&StorageKey::Token)
}

pub fn write_token(env: &Env, token: &Address) {
    env.storage().persistent().set(&StorageKey::Token, token);
}

pub fn read_tax_oracle(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&StorageKey::TaxOracle)
}

pub fn write_tax_oracle(env: &Env, oracle: &Address) {
    env.storage().persistent().set(&StorageKey::TaxOracle, oracle);
}

pub fn read_balance(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&StorageKey::Balance)
        .unwrap_or(0)
}

pub fn write_balance(env: &Env, balance: i128) {
    env.storage().persistent().set(&StorageKey::Balance, &balance);
}

pub fn is_authority(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&StorageKey::Authority(account.clone()))
        .unwrap_or(false)
}

pub fn write_authority(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .set(&StorageKey::Authority(account.clone()), &true);
}

pub fn remove_authority(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&StorageKey::Authority(account.clone()));
}

pub fn is_compliant(env: &Env, worker: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&StorageKey::Compliance(worker.clone()))
        .unwrap_or(false)
}

pub fn write_compliant(env: &Env, worker: &Address) {
    env.storage()
        .persistent()
        .set(&StorageKey::Compliance(worker.clone()), &true);
}

pub fn read_employer_status(env: &Env, employer: &Address) -> EmployerStatus {
    env.storage()
        .persistent()
        .get(&StorageKey::EmployerStatus(employer.clone()))
        .unwrap_or(EmployerStatus::Active)
}

pub fn write_employer_status(env: &Env, employer: &Address, status: EmployerStatus) {
    env.storage()
        .persistent()
        .set(&StorageKey::EmployerStatus(employer.clone()), &status);
}

// Audit totals

pub fn read_total(env: &Env, key: &StorageKey) -> i128 {
    env.storage().persistent().get(key).unwrap_or(0)
}

pub fn write_total(env: &Env, key: &StorageKey, total: i128) {
    env.storage().persistent().set(key, &total);
}
