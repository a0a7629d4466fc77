//! Loan and offer records
//!
//! Read-only copies of the records held by the off-chain record store. The
//! field names follow the store's JSON documents.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::{AccountAddress, ObjectHandle};

/// Seconds in one loan-duration day
pub const SECONDS_PER_DAY: u64 = 86_400;

const DAYS_PER_YEAR: f64 = 365.0;

/// Lifecycle status of a loan or offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Offered,
    Borrowed,
    Repaid,
    Grabbed,
    Withdrawn,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl LoanStatus {
    /// Query-string form used by the record store
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Offered => "offered",
            LoanStatus::Borrowed => "borrowed",
            LoanStatus::Repaid => "repaid",
            LoanStatus::Grabbed => "grabbed",
            LoanStatus::Withdrawn => "withdrawn",
            LoanStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NFT put up as collateral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub token_icon: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// A loan offer or an active/closed loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "forListing")]
    pub listing: Listing,

    /// Counterparty (borrower) address, present once the offer is taken
    #[serde(rename = "forAddress", default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<AccountAddress>,

    /// Lender address
    pub address: AccountAddress,

    /// Annual percentage rate, in percent
    pub apr: f64,

    /// Duration in days
    pub duration: u64,

    /// Principal amount in whole units of the settlement asset
    pub amount: f64,

    /// Settlement asset type
    pub coin: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_obj: Option<ObjectHandle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrow_obj: Option<ObjectHandle>,

    /// Unix seconds at which the loan started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<u64>,

    pub status: LoanStatus,
}

impl Loan {
    /// Handle of the borrow object, used when grabbing a defaulted loan.
    pub fn borrow_handle(&self) -> Option<&ObjectHandle> {
        self.borrow_obj.as_ref().filter(|handle| !handle.is_empty())
    }

    /// Handle of the offer object, used when withdrawing an offer.
    pub fn offer_handle(&self) -> Option<&ObjectHandle> {
        self.offer_obj.as_ref().filter(|handle| !handle.is_empty())
    }

    /// Interest owed over the whole duration, in percent of the principal.
    pub fn interest_percentage(&self) -> f64 {
        interest_percentage(self.apr, self.duration)
    }

    /// Unix seconds at which repayment is due. `None` without a start time
    /// or when the duration does not fit in a timestamp.
    pub fn due_timestamp(&self) -> Option<u64> {
        let start = self.start_timestamp?;
        self.duration
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|seconds| start.checked_add(seconds))
    }

    /// Seconds left until repayment is due; zero once overdue.
    pub fn seconds_remaining(&self, now: u64) -> Option<u64> {
        self.due_timestamp().map(|due| due.saturating_sub(now))
    }
}

/// Interest for `duration_days` at `apr` percent a year, rounded to cents.
pub fn interest_percentage(apr: f64, duration_days: u64) -> f64 {
    let raw = apr * duration_days as f64 / DAYS_PER_YEAR;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const BORROWED_LOAN: &str = r#"{
        "_id": "66a1f0c2e4b0a1b2c3d4e5f6",
        "forListing": {
            "token_icon": "https://example.invalid/nft.png",
            "token_name": "Aptos Monkey #12"
        },
        "forAddress": "0xb0b",
        "address": "0xa11ce",
        "apr": 36.5,
        "duration": 30,
        "amount": 12.5,
        "coin": "0x1::aptos_coin::AptosCoin",
        "offer_obj": "0x0ffe",
        "borrow_obj": "0xb0440",
        "start_timestamp": 1700000000,
        "status": "borrowed"
    }"#;

    #[test]
    fn test_decode_store_document() {
        let loan: Loan = serde_json::from_str(BORROWED_LOAN).unwrap();
        assert_eq!(loan.id, "66a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(loan.listing.token_name, "Aptos Monkey #12");
        assert_eq!(loan.counterparty.as_ref().map(|a| a.as_str()), Some("0xb0b"));
        assert_eq!(loan.status, LoanStatus::Borrowed);
        assert_eq!(loan.borrow_handle().map(|h| h.as_str()), Some("0xb0440"));
    }

    #[test]
    fn test_unknown_status_and_missing_optionals() {
        let json = r#"{
            "_id": "1",
            "forListing": {},
            "address": "0xa11ce",
            "apr": 10,
            "duration": 7,
            "amount": 1,
            "coin": "0xa",
            "borrow_obj": "",
            "status": "liquidating"
        }"#;
        let loan: Loan = serde_json::from_str(json).unwrap();
        assert_eq!(loan.status, LoanStatus::Unknown);
        assert!(loan.counterparty.is_none());
        assert!(loan.offer_handle().is_none());
        assert!(loan.borrow_handle().is_none(), "empty handle counts as absent");
        assert!(loan.due_timestamp().is_none());
    }

    #[test]
    fn test_interest_percentage() {
        assert_eq!(interest_percentage(36.5, 30), 3.0);
        assert_eq!(interest_percentage(10.0, 7), 0.19);
        assert_eq!(interest_percentage(0.0, 90), 0.0);
    }

    #[test]
    fn test_due_and_remaining() {
        let loan: Loan = serde_json::from_str(BORROWED_LOAN).unwrap();
        let due = 1_700_000_000 + 30 * SECONDS_PER_DAY;
        assert_eq!(loan.due_timestamp(), Some(due));
        assert_eq!(loan.seconds_remaining(due - 60), Some(60));
        assert_eq!(loan.seconds_remaining(due + 60), Some(0));
    }

    #[test]
    fn test_oversized_duration_has_no_due_time() {
        let mut loan: Loan = serde_json::from_str(BORROWED_LOAN).unwrap();
        loan.duration = 300_000_000_000_000;
        assert_eq!(loan.due_timestamp(), None);
        assert_eq!(loan.seconds_remaining(1_700_000_000), None);

        loan.duration = u64::MAX / SECONDS_PER_DAY;
        assert_eq!(loan.due_timestamp(), None);
    }
}
