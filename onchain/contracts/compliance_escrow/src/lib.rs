#![no_std]

mod error;
mod events;
mod oracle;
mod storage;

pub use error::EscrowError;
pub use events::{
    AuthorityAssigned, AuthorityRevoked, EmployerPenalized, PayrollFunded, PayrollProcessed,
    TaxComplianceMarked, WithdrawalProcessed,
};
pub use oracle::{TaxOracle, TaxOracleClient};
pub use storage::{EmployerStatus, Payout, Role, StorageKey};

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};

/// Compliance-gated payroll escrow.
///
/// Employers pool funds into the contract, the owner disburses payroll out of
/// the pool, and workers may withdraw from the pool only once a government
/// authority has certified them as tax compliant. Authorities can also
/// penalize employers.
///
/// # Security Model
///
/// - Only the owner can disburse payroll or manage the authority set
/// - Only authorities can certify workers or penalize employers
/// - Every precondition is checked before the first write
/// - Compliance and penalties are monotonic: there is no revoke path
#[contract]
pub struct ComplianceEscrowContract;

fn require_initialized(env: &Env) -> Result<(), EscrowError> {
    if storage::is_initialized(env) {
        Ok(())
    } else {
        Err(EscrowError::NotInitialized)
    }
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), EscrowError> {
    let owner = storage::read_owner(env).ok_or(EscrowError::NotInitialized)?;
    if *caller != owner {
        log!(env, "caller is not the owner", caller.clone());
        return Err(EscrowError::Unauthorized);
    }
    Ok(())
}

fn require_authority(env: &Env, caller: &Address) -> Result<(), EscrowError> {
    require_initialized(env)?;
    if !storage::is_authority(env, caller) {
        log!(env, "caller is not a tax authority", caller.clone());
        return Err(EscrowError::Unauthorized);
    }
    Ok(())
}

fn require_positive(amount: i128) -> Result<(), EscrowError> {
    if amount <= 0 {
        return Err(EscrowError::InvalidAmount);
    }
    Ok(())
}

fn token_client(env: &Env) -> Result<token::Client<'_>, EscrowError> {
    let token = storage::read_token(env).ok_or(EscrowError::NotInitialized)?;
    Ok(token::Client::new(env, &token))
}

/// Balance left after taking `amount` out of the pool.
fn debited_balance(env: &Env, amount: i128) -> Result<i128, EscrowError> {
    let balance = storage::read_balance(env);
    if amount > balance {
        log!(env, "insufficient funds", amount, balance);
        return Err(EscrowError::InsufficientFunds);
    }
    Ok(balance - amount)
}

fn add_to_total(env: &Env, key: &StorageKey, amount: i128) -> Result<(), EscrowError> {
    let total = storage::read_total(env, key)
        .checked_add(amount)
        .ok_or(EscrowError::ArithmeticOverflow)?;
    storage::write_total(env, key, total);
    Ok(())
}

#[contractimpl]
impl ComplianceEscrowContract {
    /// Initializes the ledger.
    ///
    /// # Arguments
    ///
    /// * `env` - The Soroban environment
    /// * `owner` - The owner address (must authenticate); fixed for the life of the contract
    /// * `authority` - The first government authority
    /// * `token` - The token every deposit and payout is denominated in
    /// * `tax_oracle` - Optional advisory tax oracle contract
    ///
    /// # Requirements
    ///
    /// * Contract must not be already initialized
    /// * Owner must authenticate
    pub fn initialize(
        env: Env,
        owner: Address,
        authority: Address,
        token: Address,
        tax_oracle: Option<Address>,
    ) -> Result<(), EscrowError> {
        owner.require_auth();

        if storage::is_initialized(&env) {
            return Err(EscrowError::AlreadyInitialized);
        }

        storage::write_owner(&env, &owner);
        storage::write_token(&env, &token);
        storage::write_balance(&env, 0);
        storage::write_authority(&env, &authority);
        if let Some(oracle) = tax_oracle {
            storage::write_tax_oracle(&env, &oracle);
        }

        log!(&env, "ledger initialized", owner, authority.clone());
        events::emit_authority_assigned(&env, AuthorityAssigned { authority });
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, EscrowError> {
        storage::read_owner(&env).ok_or(EscrowError::NotInitialized)
    }

    pub fn token(env: Env) -> Result<Address, EscrowError> {
        storage::read_token(&env).ok_or(EscrowError::NotInitialized)
    }

    pub fn tax_oracle(env: Env) -> Option<Address> {
        storage::read_tax_oracle(&env)
    }

    /// Grants the authority role. Owner only; assigning twice is harmless.
    pub fn assign_authority(env: Env, caller: Address, authority: Address) -> Result<(), EscrowError> {
        caller.require_auth();
        require_owner(&env, &caller)?;

        storage::write_authority(&env, &authority);
        events::emit_authority_assigned(&env, AuthorityAssigned { authority });
        Ok(())
    }

    /// Withdraws the authority role. Owner only.
    ///
    /// Compliance records and penalties issued by the authority stay in place.
    pub fn revoke_authority(env: Env, caller: Address, authority: Address) -> Result<(), EscrowError> {
        caller.require_auth();
        require_owner(&env, &caller)?;

        if !storage::is_authority(&env, &authority) {
            return Ok(());
        }
        storage::remove_authority(&env, &authority);
        events::emit_authority_revoked(&env, AuthorityRevoked { authority });
        Ok(())
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        match role {
            Role::Owner => storage::read_owner(&env).map_or(false, |owner| owner == account),
            Role::Authority => storage::is_authority(&env, &account),
        }
    }

    /// Replaces the advisory tax oracle. Owner only.
    pub fn set_tax_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), EscrowError> {
        caller.require_auth();
        require_owner(&env, &caller)?;

        storage::write_tax_oracle(&env, &oracle);
        Ok(())
    }

    /// Deposits tokens into the payroll pool.
    ///
    /// Any identity may fund; no compliance or status check applies.
    ///
    /// # Arguments
    ///
    /// * `env` - The Soroban environment
    /// * `employer` - The depositing address (must authenticate)
    /// * `amount` - Amount of tokens to deposit
    ///
    /// # Requirements
    ///
    /// * Contract must be initialized
    /// * Amount must be positive
    /// * Employer must hold at least `amount` tokens
    ///
    /// # Events
    ///
    /// Emits `PayrollFunded` on success.
    pub fn fund_payroll(env: Env, employer: Address, amount: i128) -> Result<(), EscrowError> {
        employer.require_auth();
        require_initialized(&env)?;
        require_positive(amount)?;

        let balance = storage::read_balance(&env)
            .checked_add(amount)
            .ok_or(EscrowError::ArithmeticOverflow)?;
        let token = token_client(&env)?;

        token.transfer(&employer, &env.current_contract_address(), &amount);
        storage::write_balance(&env, balance);
        add_to_total(&env, &StorageKey::Funded(employer.clone()), amount)?;

        log!(&env, "payroll funded", employer.clone(), amount);
        events::emit_payroll_funded(&env, PayrollFunded { employer, amount });
        Ok(())
    }

    /// Disburses payroll from the pool to a worker.
    ///
    /// Does not consult the worker's compliance record; compliance gates only
    /// the worker's own withdrawals.
    ///
    /// # Arguments
    ///
    /// * `env` - The Soroban environment
    /// * `caller` - Must be the owner (must authenticate)
    /// * `worker` - The receiving worker
    /// * `amount` - Amount to disburse
    ///
    /// # Requirements
    ///
    /// * Caller must be the owner
    /// * Amount must be positive and not exceed the pooled balance
    ///
    /// # Events
    ///
    /// Emits `PayrollProcessed` on success.
    pub fn process_payroll(
        env: Env,
        caller: Address,
        worker: Address,
        amount: i128,
    ) -> Result<(), EscrowError> {
        caller.require_auth();
        require_owner(&env, &caller)?;
        require_positive(amount)?;

        let balance = debited_balance(&env, amount)?;
        let token = token_client(&env)?;

        storage::write_balance(&env, balance);
        add_to_total(&env, &StorageKey::Disbursed(worker.clone()), amount)?;
        token.transfer(&env.current_contract_address(), &worker, &amount);

        log!(&env, "payroll processed", worker.clone(), amount);
        events::emit_payroll_processed(&env, PayrollProcessed { worker, amount });
        Ok(())
    }

    /// Disburses a list of payouts as one all-or-nothing run.
    ///
    /// Every payout is validated and the total is checked against the pool
    /// before any funds move. Emits one `PayrollProcessed` per payout, in
    /// list order, and returns the total disbursed.
    pub fn process_batch_payroll(
        env: Env,
        caller: Address,
        payouts: Vec<Payout>,
    ) -> Result<i128, EscrowError> {
        caller.require_auth();
        require_owner(&env, &caller)?;

        if payouts.is_empty() {
            return Err(EscrowError::EmptyBatch);
        }

        let mut total: i128 = 0;
        for payout in payouts.iter() {
            require_positive(payout.amount)?;
            total = total
                .checked_add(payout.amount)
                .ok_or(EscrowError::ArithmeticOverflow)?;
        }

        let balance = debited_balance(&env, total)?;
        let token = token_client(&env)?;
        let contract = env.current_contract_address();

        storage::write_balance(&env, balance);
        for payout in payouts.iter() {
            add_to_total(&env, &StorageKey::Disbursed(payout.worker.clone()), payout.amount)?;
            token.transfer(&contract, &payout.worker, &payout.amount);
            events::emit_payroll_processed(
                &env,
                PayrollProcessed {
                    worker: payout.worker,
                    amount: payout.amount,
                },
            );
        }

        log!(&env, "batch payroll processed", payouts.len(), total);
        Ok(total)
    }

    /// Withdraws from the pool on the worker's own behalf.
    ///
    /// Compliance is checked at withdrawal time, so certification may arrive
    /// at any point before the worker withdraws.
    ///
    /// # Requirements
    ///
    /// * Worker must authenticate and hold a compliant record
    /// * Amount must be positive and not exceed the pooled balance
    ///
    /// # Events
    ///
    /// Emits `WithdrawalProcessed` on success.
    pub fn withdraw(env: Env, worker: Address, amount: i128) -> Result<(), EscrowError> {
        worker.require_auth();
        require_initialized(&env)?;

        if !storage::is_compliant(&env, &worker) {
            log!(&env, "Tax compliance check failed", worker.clone());
            return Err(EscrowError::TaxComplianceFailed);
        }
        require_positive(amount)?;

        let balance = debited_balance(&env, amount)?;
        let token = token_client(&env)?;

        storage::write_balance(&env, balance);
        add_to_total(&env, &StorageKey::Withdrawn(worker.clone()), amount)?;
        token.transfer(&env.current_contract_address(), &worker, &amount);

        log!(&env, "withdrawal processed", worker.clone(), amount);
        events::emit_withdrawal_processed(&env, WithdrawalProcessed { worker, amount });
        Ok(())
    }

    /// Certifies a worker as tax compliant. Authority only.
    ///
    /// Idempotent: `TaxComplianceMarked` is only emitted on the first
    /// certification.
    pub fn mark_tax_compliant(env: Env, caller: Address, worker: Address) -> Result<(), EscrowError> {
        caller.require_auth();
        require_authority(&env, &caller)?;

        if storage::is_compliant(&env, &worker) {
            return Ok(());
        }
        storage::write_compliant(&env, &worker);

        log!(&env, "worker marked tax compliant", worker.clone());
        events::emit_tax_compliance_marked(
            &env,
            TaxComplianceMarked {
                worker,
                authority: caller,
            },
        );
        Ok(())
    }

    pub fn is_tax_compliant(env: Env, worker: Address) -> bool {
        storage::is_compliant(&env, &worker)
    }

    /// Penalizes an employer. Authority only.
    ///
    /// Re-penalizing succeeds and emits `EmployerPenalized` again.
    pub fn penalize_employer(env: Env, caller: Address, employer: Address) -> Result<(), EscrowError> {
        caller.require_auth();
        require_authority(&env, &caller)?;

        storage::write_employer_status(&env, &employer, EmployerStatus::Penalized);

        log!(&env, "employer penalized", employer.clone());
        events::emit_employer_penalized(&env, EmployerPenalized { employer });
        Ok(())
    }

    pub fn get_employer_status(env: Env, employer: Address) -> EmployerStatus {
        storage::read_employer_status(&env, &employer)
    }

    pub fn get_balance(env: Env) -> i128 {
        storage::read_balance(&env)
    }

    pub fn get_funded(env: Env, employer: Address) -> i128 {
        storage::read_total(&env, &StorageKey::Funded(employer))
    }

    pub fn get_disbursed(env: Env, worker: Address) -> i128 {
        storage::read_total(&env, &StorageKey::Disbursed(worker))
    }

    pub fn get_withdrawn(env: Env, worker: Address) -> i128 {
        storage::read_total(&env, &StorageKey::Withdrawn(worker))
    }

    /// Advisory liability for `account` from the configured tax oracle.
    ///
    /// # Returns
    ///
    /// `None` when no oracle is configured
    pub fn get_tax_liability(env: Env, account: Address) -> Option<i128> {
        storage::read_tax_oracle(&env).map(|oracle| oracle::query_tax_amount(&env, &oracle, &account))
    }
}

#[cfg(test)]
mod tests;
