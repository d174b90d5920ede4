use soroban_sdk::{contractevent, Address, Env};

/// Event: employer deposited into the payroll pool
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayrollFunded {
    pub employer: Address,
    pub amount: i128,
}

/// Event: owner disbursed payroll to a worker
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayrollProcessed {
    pub worker: Address,
    pub amount: i128,
}

/// Event: compliant worker withdrew from the pool
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalProcessed {
    pub worker: Address,
    pub amount: i128,
}

/// Event: worker certified as tax compliant
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaxComplianceMarked {
    pub worker: Address,
    pub authority: Address,
}

/// Event: employer penalized by an authority
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmployerPenalized {
    pub employer: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityAssigned {
    pub authority: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityRevoked {
    pub authority: Address,
}

pub fn emit_payroll_funded(e: &Env, event: PayrollFunded) {
    event.publish(e);
}

pub fn emit_payroll_processed(e: &Env, event: PayrollProcessed) {
    event.publish(e);
}

pub fn emit_withdrawal_processed(e: &Env, event: WithdrawalProcessed) {
    event.publish(e);
}

pub fn emit_tax_compliance_marked(e: &Env, event: TaxComplianceMarked) {
    event.publish(e);
}

pub fn emit_employer_penalized(e: &Env, event: EmployerPenalized) {
    event.publish(e);
}

pub fn emit_authority_assigned(e: &Env, event: AuthorityAssigned) {
    event.publish(e);
}

pub fn emit_authority_revoked(e: &Env, event: AuthorityRevoked) {
    event.publish(e);
}
