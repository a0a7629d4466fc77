//! Grab and withdraw action builders
//!
//! Turn an off-chain record into the `ActionRequest` the coordinator submits.
//! The object handle is copied from the record as-is.

use nftlend_types::{
    ActionKind, ActionRequest, AssetRegistry, EntryFunctionId, LendingFunction, Loan,
    SettlementAsset,
};

use crate::outcome::SkipReason;

/// Lender claims the collateral of a defaulted loan.
pub fn grab_request(contract_address: &str, loan: &Loan) -> Result<ActionRequest, SkipReason> {
    let object = loan.borrow_handle().ok_or(SkipReason::MissingObjectHandle)?;
    Ok(ActionRequest {
        kind: ActionKind::Grab,
        record_id: loan.id.clone(),
        object: object.clone(),
        function: EntryFunctionId::lending(contract_address, LendingFunction::Grab),
        type_arguments: Vec::new(),
    })
}

/// Lender closes an open offer and recovers the principal.
pub fn withdraw_request(
    contract_address: &str,
    offer: &Loan,
    assets: &AssetRegistry,
) -> Result<ActionRequest, SkipReason> {
    let object = offer.offer_handle().ok_or(SkipReason::MissingObjectHandle)?;
    let settlement = assets
        .get_by_type(&offer.coin)
        .map(|asset| asset.settlement())
        .ok_or_else(|| SkipReason::UnknownSettlementAsset(offer.coin.clone()))?;

    let (function, type_arguments) = withdraw_variant(&settlement);
    Ok(ActionRequest {
        kind: ActionKind::Withdraw,
        record_id: offer.id.clone(),
        object: object.clone(),
        function: EntryFunctionId::lending(contract_address, function),
        type_arguments,
    })
}

/// Fungible assets need no type argument; legacy coins are passed by type.
pub fn withdraw_variant(settlement: &SettlementAsset) -> (LendingFunction, Vec<String>) {
    match settlement {
        SettlementAsset::V2 => (LendingFunction::WithdrawWithFa, Vec::new()),
        SettlementAsset::V1 { asset_type } => {
            (LendingFunction::WithdrawWithCoin, vec![asset_type.clone()])
        }
    }
}
