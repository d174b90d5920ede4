//! Property tests for the ledger invariants: the pooled balance always equals
//! successful funding minus successful outflows, and withdrawals only ever
//! succeed for certified workers.

#![cfg(test)]

use compliance_escrow::{ComplianceEscrowContract, ComplianceEscrowContractClient, EscrowError};
use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, token, Address, Env};

const ACTORS: usize = 3;
const STARTING_TOKENS: i128 = 1_000_000;

#[derive(Clone, Debug)]
enum Op {
    Fund(usize, i128),
    Process(usize, i128),
    Withdraw(usize, i128),
    Certify(usize),
    ProcessAsOutsider(usize, i128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACTORS, -5i128..300).prop_map(|(i, amount)| Op::Fund(i, amount)),
        (0..ACTORS, -5i128..300).prop_map(|(i, amount)| Op::Process(i, amount)),
        (0..ACTORS, -5i128..300).prop_map(|(i, amount)| Op::Withdraw(i, amount)),
        (0..ACTORS).prop_map(Op::Certify),
        (0..ACTORS, 1i128..300).prop_map(|(i, amount)| Op::ProcessAsOutsider(i, amount)),
    ]
}

struct Harness {
    client: ComplianceEscrowContractClient<'static>,
    owner: Address,
    authority: Address,
    employers: std::vec::Vec<Address>,
    workers: std::vec::Vec<Address>,
}

impl Harness {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let authority = Address::generate(&env);
        let token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let contract_id = env.register(ComplianceEscrowContract, ());
        let client = ComplianceEscrowContractClient::new(&env, &contract_id);
        client.initialize(&owner, &authority, &token, &None);

        let minter = token::StellarAssetClient::new(&env, &token);
        let employers: std::vec::Vec<Address> = (0..ACTORS)
            .map(|_| {
                let employer = Address::generate(&env);
                minter.mint(&employer, &STARTING_TOKENS);
                employer
            })
            .collect();
        let workers = (0..ACTORS).map(|_| Address::generate(&env)).collect();

        Self {
            client,
            owner,
            authority,
            employers,
            workers,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn balance_equals_funding_minus_outflows(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let h = Harness::new();
        let mut funded: i128 = 0;
        let mut outflows: i128 = 0;
        let mut compliant = [false; ACTORS];

        for op in ops {
            let balance_before = h.client.get_balance();
            match op {
                Op::Fund(i, amount) => {
                    let result = h.client.try_fund_payroll(&h.employers[i], &amount);
                    if amount > 0 {
                        prop_assert!(result.is_ok());
                        funded += amount;
                    } else {
                        prop_assert_eq!(result, Err(Ok(EscrowError::InvalidAmount)));
                    }
                }
                Op::Process(i, amount) => {
                    let result = h.client.try_process_payroll(&h.owner, &h.workers[i], &amount);
                    if amount > 0 && amount <= balance_before {
                        prop_assert!(result.is_ok());
                        outflows += amount;
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Withdraw(i, amount) => {
                    let result = h.client.try_withdraw(&h.workers[i], &amount);
                    if !compliant[i] {
                        prop_assert_eq!(result, Err(Ok(EscrowError::TaxComplianceFailed)));
                    } else if amount > 0 && amount <= balance_before {
                        prop_assert!(result.is_ok());
                        outflows += amount;
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Certify(i) => {
                    h.client.mark_tax_compliant(&h.authority, &h.workers[i]);
                    compliant[i] = true;
                }
                Op::ProcessAsOutsider(i, amount) => {
                    let result = h.client.try_process_payroll(&h.workers[i], &h.workers[i], &amount);
                    prop_assert_eq!(result, Err(Ok(EscrowError::Unauthorized)));
                }
            }

            let balance = h.client.get_balance();
            prop_assert!(balance >= 0);
            prop_assert_eq!(balance, funded - outflows);
        }

        for (i, worker) in h.workers.iter().enumerate() {
            prop_assert_eq!(h.client.is_tax_compliant(worker), compliant[i]);
            if !compliant[i] {
                prop_assert_eq!(h.client.get_withdrawn(worker), 0);
            }
        }
    }
}
