//! NFT lending data model
//!
//! Types shared by the wallet, ledger and record-store clients and by the
//! action workflow.
//!
//! ## Module Organization
//!
//! * **Addresses**: account addresses, object handles, transaction hashes (`address`)
//! * **Assets**: settlement assets and their token standard (`asset`)
//! * **Loans**: off-chain loan/offer records and derived values (`loan`)
//! * **Actions**: function selectors and per-invocation action requests (`action`)

pub mod action;
pub mod address;
pub mod asset;
pub mod loan;

pub use action::{
    ActionKind, ActionRequest, EntryFunctionId, LendingFunction, SubmissionPayload,
    TransactionSubmission, LENDING_MODULE,
};
pub use address::{AccountAddress, AddressError, ObjectHandle, TxHash};
pub use asset::{AssetInfo, AssetRegistry, SettlementAsset, TokenStandard};
pub use loan::{interest_percentage, Listing, Loan, LoanStatus, SECONDS_PER_DAY};
