//! Deployment fixtures shared by the cross-contract workflow tests.
//!
//! A [`Deployment`] wires together a Stellar asset token, the tax oracle and
//! the compliance escrow the way an operator would deploy them, with every
//! authorization mocked.

use compliance_escrow::{ComplianceEscrowContract, ComplianceEscrowContractClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use tax_oracle::{TaxOracleContract, TaxOracleContractClient};

pub struct Deployment {
    pub env: Env,
    pub escrow_id: Address,
    pub escrow: ComplianceEscrowContractClient<'static>,
    pub oracle_id: Address,
    pub oracle: TaxOracleContractClient<'static>,
    pub token: Address,
    pub owner: Address,
    pub authority: Address,
    pub tax_admin: Address,
}

impl Deployment {
    /// Deploys token, oracle and escrow, then initializes both contracts.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let authority = Address::generate(&env);
        let tax_admin = Address::generate(&env);
        let token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();

        let oracle_id = env.register(TaxOracleContract, ());
        let oracle = TaxOracleContractClient::new(&env, &oracle_id);
        oracle.initialize(&tax_admin);

        let escrow_id = env.register(ComplianceEscrowContract, ());
        let escrow = ComplianceEscrowContractClient::new(&env, &escrow_id);
        escrow.initialize(&owner, &authority, &token, &Some(oracle_id.clone()));

        Self {
            env,
            escrow_id,
            escrow,
            oracle_id,
            oracle,
            token,
            owner,
            authority,
            tax_admin,
        }
    }

    pub fn address(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn mint(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token).mint(to, &amount);
    }

    pub fn balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.token).balance(who)
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}
