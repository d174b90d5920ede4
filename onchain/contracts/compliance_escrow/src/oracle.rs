use soroban_sdk::{contractclient, Address, Env};

/// Interface of the external tax oracle. The ledger only reads from it and
/// never gates an operation on the answer.
#[allow(dead_code)]
#[contractclient(name = "TaxOracleClient")]
pub trait TaxOracle {
    /// Outstanding tax liability reported for `account`, in token base units.
    fn get_tax_amount(env: Env, account: Address) -> i128;
}

pub fn query_tax_amount(env: &Env, oracle: &Address, account: &Address) -> i128 {
    TaxOracleClient::new(env, oracle).get_tax_amount(account)
}
