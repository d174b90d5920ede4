#![allow(deprecated)]


use crate::{ComplianceEscrowContract, ComplianceEscrowContractClient};
use soroban_sdk::{
    testutils::{Address as _, Events},
    token, Address, Env, IntoVal, Map, Symbol, TryFromVal, Val,
};

/// Initialized ledger with a fresh Stellar asset token and mocked auth.
pub struct TestLedger {
    pub env: Env,
    pub client: ComplianceEscrowContractClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
    pub authority: Address,
    pub token: Address,
}

impl TestLedger {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let authority = Address::generate(&env);
        let token_admin = Address::generate(&env);
        let token = env.register_stellar_asset_contract_v2(token_admin).address();

        let contract_id = env.register(ComplianceEscrowContract, ());
        let client = ComplianceEscrowContractClient::new(&env, &contract_id);
        client.initialize(&owner, &authority, &token, &None);

        Self {
            env,
            client,
            contract_id,
            owner,
            authority,
            token,
        }
    }

    pub fn address(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn mint(&self, to: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.token).mint(to, &amount);
    }

    pub fn token_balance(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.token).balance(who)
    }

    /// Generates an employer, mints it `amount` tokens and funds the pool.
    pub fn funded_employer(&self, amount: i128) -> Address {
        let employer = self.address();
        self.mint(&employer, amount);
        self.client.fund_payroll(&employer, &amount);
        employer
    }

    /// Generates a worker already certified by the default authority.
    pub fn compliant_worker(&self) -> Address {
        let worker = self.address();
        self.client.mark_tax_compliant(&self.authority, &worker);
        worker
    }
}

/// Data map of the most recent event named `name` published by `contract_id`.
pub fn last_event(env: &Env, contract_id: &Address, name: &str) -> Option<Map<Symbol, Val>> {
    let expected = Symbol::new(env, name);
    let events = env.events().all();
    let mut found = None;
    for (id, topics, data) in events.iter() {
        if id != *contract_id || topics.is_empty() {
            continue;
        }
        if let Ok(topic) = Symbol::try_from_val(env, &topics.get_unchecked(0)) {
            if topic == expected {
                found = Some(data);
            }
        }
    }
    found.map(|data| data.into_val(env))
}

/// Number of events named `name` published by `contract_id`.
pub fn count_events(env: &Env, contract_id: &Address, name: &str) -> u32 {
    let expected = Symbol::new(env, name);
    let events = env.events().all();
    let mut count = 0;
    for (id, topics, _) in events.iter() {
        if id != *contract_id || topics.is_empty() {
            continue;
        }
        if let Ok(topic) = Symbol::try_from_val(env, &topics.get_unchecked(0)) {
            if topic == expected {
                count += 1;
            }
        }
    }
    count
}

pub fn field<T: TryFromVal<Env, Val>>(env: &Env, data: &Map<Symbol, Val>, name: &str) -> T {
    let val = data.get(Symbol::new(env, name)).expect("event field missing");
    T::try_from_val(env, &val).ok().expect("event field has wrong type")
}
