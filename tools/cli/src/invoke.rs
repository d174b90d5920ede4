//! Argument lists for `soroban contract invoke` against the escrow.
//!
//! Everything here is pure so the exact command line can be checked
//! without a network or the soroban binary.

use serde::{Deserialize, Serialize};

/// Where and as whom a call is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeTarget {
    pub contract_id: String,
    pub source: String,
    pub rpc_url: String,
    pub network_passphrase: String,
}

/// One entry of a batch payout file, amounts already in stroops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutArg {
    pub worker: String,
    #[serde(with = "i128_string")]
    pub amount: i128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    Initialize {
        owner: String,
        authority: String,
        token: String,
        tax_oracle: Option<String>,
    },
    Fund {
        employer: String,
        amount: i128,
    },
    Process {
        caller: String,
        worker: String,
        amount: i128,
    },
    Batch {
        caller: String,
        payouts: Vec<PayoutArg>,
    },
    Withdraw {
        worker: String,
        amount: i128,
    },
    MarkCompliant {
        caller: String,
        worker: String,
    },
    Penalize {
        caller: String,
        employer: String,
    },
    EmployerStatus {
        employer: String,
    },
    Balance,
    Owner,
    TaxLiability {
        account: String,
    },
}

impl LedgerCall {
    /// Contract function this call maps to.
    pub fn function(&self) -> &'static str {
        match self {
            LedgerCall::Initialize { .. } => "initialize",
            LedgerCall::Fund { .. } => "fund_payroll",
            LedgerCall::Process { .. } => "process_payroll",
            LedgerCall::Batch { .. } => "process_batch_payroll",
            LedgerCall::Withdraw { .. } => "withdraw",
            LedgerCall::MarkCompliant { .. } => "mark_tax_compliant",
            LedgerCall::Penalize { .. } => "penalize_employer",
            LedgerCall::EmployerStatus { .. } => "get_employer_status",
            LedgerCall::Balance => "get_balance",
            LedgerCall::Owner => "owner",
            LedgerCall::TaxLiability { .. } => "get_tax_liability",
        }
    }

    /// Named arguments in contract parameter order.
    pub fn args(&self) -> Vec<(&'static str, String)> {
        match self {
            LedgerCall::Initialize {
                owner,
                authority,
                token,
                tax_oracle,
            } => {
                let mut args = vec![
                    ("owner", owner.clone()),
                    ("authority", authority.clone()),
                    ("token", token.clone()),
                ];
                // soroban treats an omitted Option argument as None
                if let Some(oracle) = tax_oracle {
                    args.push(("tax_oracle", oracle.clone()));
                }
                args
            }
            LedgerCall::Fund { employer, amount } => vec![
                ("employer", employer.clone()),
                ("amount", amount.to_string()),
            ],
            LedgerCall::Process {
                caller,
                worker,
                amount,
            } => vec![
                ("caller", caller.clone()),
                ("worker", worker.clone()),
                ("amount", amount.to_string()),
            ],
            LedgerCall::Batch { caller, payouts } => vec![
                ("caller", caller.clone()),
                ("payouts", payouts_json(payouts)),
            ],
            LedgerCall::Withdraw { worker, amount } => vec![
                ("worker", worker.clone()),
                ("amount", amount.to_string()),
            ],
            LedgerCall::MarkCompliant { caller, worker } => {
                vec![("caller", caller.clone()), ("worker", worker.clone())]
            }
            LedgerCall::Penalize { caller, employer } => {
                vec![("caller", caller.clone()), ("employer", employer.clone())]
            }
            LedgerCall::EmployerStatus { employer } => vec![("employer", employer.clone())],
            LedgerCall::Balance | LedgerCall::Owner => Vec::new(),
            LedgerCall::TaxLiability { account } => vec![("account", account.clone())],
        }
    }

    /// Reads are simulated only and never submitted.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            LedgerCall::EmployerStatus { .. }
                | LedgerCall::Balance
                | LedgerCall::Owner
                | LedgerCall::TaxLiability { .. }
        )
    }
}

/// Full argument list for the soroban binary.
pub fn invoke_args(target: &InvokeTarget, call: &LedgerCall) -> Vec<String> {
    let mut args: Vec<String> = [
        "contract",
        "invoke",
        "--id",
        &target.contract_id,
        "--source-account",
        &target.source,
        "--rpc-url",
        &target.rpc_url,
        "--network-passphrase",
        &target.network_passphrase,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if call.is_read_only() {
        args.push("--send=no".to_string());
    }

    args.push("--".to_string());
    args.push(call.function().to_string());
    for (name, value) in call.args() {
        args.push(format!("--{}", name));
        args.push(value);
    }
    args
}

fn payouts_json(payouts: &[PayoutArg]) -> String {
    // A Vec<PayoutArg> of strings and i128-as-string cannot fail to serialize
    serde_json::to_string(payouts).unwrap_or_else(|_| "[]".to_string())
}

mod i128_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
