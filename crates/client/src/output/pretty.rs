//! Pretty output formatting.

use peanuts_core::character::Character;
use peanuts_core::simulation::GatewayHealth;

use crate::client::payment::PaymentReceipt;
use crate::load::{LoadReport, ERROR_RATE_THRESHOLD, P95_THRESHOLD};

/// Format a character for display.
pub fn format_character(character: &Character) -> String {
    let id = character
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut output = format!("{}\n  ID: {}", character.name, id);
    if let Some(desc) = &character.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    output
}

/// Format a payment receipt for display.
pub fn format_receipt(receipt: &PaymentReceipt) -> String {
    format!(
        "Payment {}\n  Transaction: {}\n  Amount: {:.2}",
        receipt.status, receipt.transaction_id, receipt.amount
    )
}

/// Format a gateway health report for display.
pub fn format_gateway_health(health: &GatewayHealth) -> String {
    let status = if health.is_healthy() {
        "healthy"
    } else {
        "degraded"
    };
    format!("Payment gateway: {} ({} ms)", status, health.latency_ms)
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Format a load report for display.
pub fn format_report(report: &LoadReport) -> String {
    let mut output = format!("LOAD REPORT ({:?})\n", report.scenario);
    output.push_str(&"-".repeat(40));
    output.push_str(&format!("\nRequests: {}", report.total_requests));
    output.push_str(&format!("\nTransport errors: {}", report.transport_errors));

    output.push_str("\nStatus codes:");
    for (status, count) in &report.status_counts {
        output.push_str(&format!("\n  {}: {}", status, count));
    }

    output.push_str(&format!(
        "\nPayments: {} succeeded, {} failed",
        report.payment_success, report.payment_failure
    ));
    output.push_str(&format!(
        "\np95 latency: {} ms (< {} ms) {}",
        report.p95_latency_ms,
        P95_THRESHOLD.as_millis(),
        verdict(report.p95_within_threshold)
    ));
    output.push_str(&format!(
        "\nError rate: {:.3} (< {}) {}",
        report.error_rate,
        ERROR_RATE_THRESHOLD,
        verdict(report.error_rate_within_threshold)
    ));
    output
}
