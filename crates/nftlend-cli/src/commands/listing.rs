//! Loan and offer listing
//!
//! Active loans show the time left until repayment is due; once it runs out
//! the lender can grab the collateral.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use tracing::debug;

use nftlend_types::{AccountAddress, AssetRegistry, Loan, LoanStatus};

use super::AppContext;

const ACTIVE_HEADERS: [&str; 8] = [
    "ID", "Asset", "Borrower", "Interest", "APR", "Duration", "Countdown", "Loan",
];
const PREVIOUS_HEADERS: [&str; 7] = [
    "Asset", "Borrower", "Interest", "APR", "Duration", "Loan Value", "Status",
];
const OFFER_HEADERS: [&str; 6] = ["ID", "Asset", "Interest", "APR", "Duration", "Amount"];

//-----------------------------------------------------------------------------
// Handlers
//-----------------------------------------------------------------------------

pub async fn handle_loans_command(ctx: &AppContext, address: Option<String>) -> Result<()> {
    let Some(account) = ctx.resolve_account(address.as_deref()).await? else {
        println!("{}", "No wallet account connected; pass --address to list another account".yellow());
        return Ok(());
    };
    debug!(account = %account, "listing loans");

    let active = ctx
        .store
        .list_loans(&account, LoanStatus::Borrowed)
        .await
        .context("failed to fetch active loans")?;
    let previous = ctx
        .store
        .list_previous_loans(&account)
        .await
        .context("failed to fetch previous loans")?;

    let now = now_seconds();
    println!("{}", "Active Loans".cyan().bold());
    print_table(
        &ACTIVE_HEADERS,
        active.iter().map(|loan| active_row(loan, &ctx.assets, now)).collect(),
    );
    println!();
    println!("{}", "Previous Loans".cyan().bold());
    print_table(
        &PREVIOUS_HEADERS,
        previous.iter().map(|loan| previous_row(loan, &ctx.assets)).collect(),
    );
    Ok(())
}

pub async fn handle_offers_command(ctx: &AppContext, address: Option<String>) -> Result<()> {
    let Some(account) = ctx.resolve_account(address.as_deref()).await? else {
        println!("{}", "No wallet account connected; pass --address to list another account".yellow());
        return Ok(());
    };

    let offers = ctx
        .store
        .list_loans(&account, LoanStatus::Offered)
        .await
        .context("failed to fetch offers")?;

    println!("{}", "Open Offers".cyan().bold());
    print_table(
        &OFFER_HEADERS,
        offers.iter().map(|offer| offer_row(offer, &ctx.assets)).collect(),
    );
    Ok(())
}

//-----------------------------------------------------------------------------
// Formatting
//-----------------------------------------------------------------------------

fn now_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// `3d 04h 05m 06s`, or `Expired` at zero.
pub fn format_countdown(seconds: u64) -> String {
    if seconds == 0 {
        return "Expired".to_string();
    }
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, secs)
}

pub fn format_amount(amount: f64, asset_type: &str, assets: &AssetRegistry) -> String {
    let symbol = assets.symbol_for(asset_type);
    if symbol.is_empty() {
        amount.to_string()
    } else {
        format!("{} {}", amount, symbol)
    }
}

fn format_borrower(address: Option<&AccountAddress>) -> String {
    address.map(AccountAddress::shorten).unwrap_or_default()
}

pub fn active_row(loan: &Loan, assets: &AssetRegistry, now: u64) -> Vec<String> {
    vec![
        loan.id.clone(),
        loan.listing.token_name.clone(),
        format_borrower(loan.counterparty.as_ref()),
        format!("{}%", loan.interest_percentage()),
        format!("{}%", loan.apr),
        format!("{} day/days", loan.duration),
        loan.seconds_remaining(now).map(format_countdown).unwrap_or_default(),
        format_amount(loan.amount, &loan.coin, assets),
    ]
}

pub fn previous_row(loan: &Loan, assets: &AssetRegistry) -> Vec<String> {
    vec![
        loan.listing.token_name.clone(),
        loan.address.shorten(),
        format!("{}%", loan.interest_percentage()),
        format!("{} %", loan.apr),
        format!("{} day/days", loan.duration),
        format_amount(loan.amount, &loan.coin, assets),
        loan.status.to_string(),
    ]
}

pub fn offer_row(offer: &Loan, assets: &AssetRegistry) -> Vec<String> {
    vec![
        offer.id.clone(),
        offer.listing.token_name.clone(),
        format!("{}%", offer.interest_percentage()),
        format!("{}%", offer.apr),
        format!("{} day/days", offer.duration),
        format_amount(offer.amount, &offer.coin, assets),
    ]
}

/// Left-aligned columns sized to their widest cell
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers.to_vec());
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("{}", "  (none)".dimmed());
        return;
    }
    println!("{}", render_table(headers, &rows));
}
