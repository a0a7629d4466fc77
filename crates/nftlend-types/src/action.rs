//! Lending actions
//!
//! Function selectors of the on-chain lending module and the ephemeral
//! request value built for one user-triggered action.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::{AccountAddress, ObjectHandle};

/// Name of the on-chain lending module
pub const LENDING_MODULE: &str = "nft_lending";

//-----------------------------------------------------------------------------
// Function Selectors
//-----------------------------------------------------------------------------

/// Entry functions of the lending module this client calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LendingFunction {
    /// Lender claims the collateral of a defaulted loan
    Grab,
    /// Lender closes an offer denominated in a fungible asset
    WithdrawWithFa,
    /// Lender closes an offer denominated in a legacy coin
    WithdrawWithCoin,
}

impl LendingFunction {
    pub fn name(&self) -> &'static str {
        match self {
            LendingFunction::Grab => "grab",
            LendingFunction::WithdrawWithFa => "withdraw_with_fa",
            LendingFunction::WithdrawWithCoin => "withdraw_with_coin",
        }
    }
}

/// Fully qualified entry function: `<address>::<module>::<function>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryFunctionId {
    pub module_address: String,
    pub module: String,
    pub function: String,
}

impl EntryFunctionId {
    /// Selector for a lending-module function deployed at `contract_address`.
    pub fn lending(contract_address: &str, function: LendingFunction) -> Self {
        Self {
            module_address: contract_address.to_string(),
            module: LENDING_MODULE.to_string(),
            function: function.name().to_string(),
        }
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.module_address, self.module, self.function)
    }
}

//-----------------------------------------------------------------------------
// Action Request
//-----------------------------------------------------------------------------

/// User-visible kind of state-changing action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Grab,
    Withdraw,
}

impl ActionKind {
    /// Path segment of the record-store update endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Grab => "grab",
            ActionKind::Withdraw => "withdraw",
        }
    }

    /// Headline shown when the action completes
    pub fn success_message(&self) -> &'static str {
        match self {
            ActionKind::Grab => "NFT Grabbed",
            ActionKind::Withdraw => "Transaction succeed",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation's worth of action parameters. Built per click, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    /// Identifier of the off-chain record to reconcile
    pub record_id: String,
    /// On-chain object the function operates on
    pub object: ObjectHandle,
    pub function: EntryFunctionId,
    pub type_arguments: Vec<String>,
}

impl ActionRequest {
    /// Ordered function arguments; the object handle is the only one.
    pub fn function_arguments(&self) -> Vec<String> {
        vec![self.object.as_str().to_string()]
    }

    /// Wire payload handed to the wallet for signing.
    pub fn to_submission(&self, sender: &AccountAddress) -> TransactionSubmission {
        TransactionSubmission {
            sender: sender.clone(),
            data: SubmissionPayload {
                function: self.function.to_string(),
                type_arguments: self.type_arguments.clone(),
                function_arguments: self.function_arguments(),
            },
        }
    }
}

//-----------------------------------------------------------------------------
// Wallet Wire Format
//-----------------------------------------------------------------------------

/// Sign-and-submit request understood by the wallet adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSubmission {
    pub sender: AccountAddress,
    pub data: SubmissionPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub function_arguments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selector_display() {
        let id = EntryFunctionId::lending("0xcafe", LendingFunction::WithdrawWithFa);
        assert_eq!(id.to_string(), "0xcafe::nft_lending::withdraw_with_fa");
    }

    #[test]
    fn test_submission_wire_shape() {
        let request = ActionRequest {
            kind: ActionKind::Grab,
            record_id: "rec-1".to_string(),
            object: ObjectHandle::new("0xb0440"),
            function: EntryFunctionId::lending("0xcafe", LendingFunction::Grab),
            type_arguments: vec![],
        };
        let sender = AccountAddress::parse("0xa11ce").unwrap();

        let value = serde_json::to_value(request.to_submission(&sender)).unwrap();
        assert_eq!(
            value,
            json!({
                "sender": "0xa11ce",
                "data": {
                    "function": "0xcafe::nft_lending::grab",
                    "typeArguments": [],
                    "functionArguments": ["0xb0440"]
                }
            })
        );
    }

    #[test]
    fn test_action_kind_messages() {
        assert_eq!(ActionKind::Grab.success_message(), "NFT Grabbed");
        assert_eq!(ActionKind::Withdraw.success_message(), "Transaction succeed");
        assert_eq!(ActionKind::Withdraw.as_str(), "withdraw");
    }
}
