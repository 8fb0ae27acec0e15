use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::{
    config::ReportFormat,
    scanner::report::{SampleComparison, ScanReport},
    types::{format_percentage, format_price, ArbitrageOpportunity},
};

/// One record of the JSON-lines output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReportLine<'a> {
    Opportunity(&'a ArbitrageOpportunity),
    Sample(&'a SampleComparison),
    Summary(SummaryLine<'a>),
}

#[derive(Debug, Serialize)]
struct SummaryLine<'a> {
    generated_at: DateTime<Utc>,
    left_exchange: &'a str,
    left_quotes: usize,
    right_exchange: &'a str,
    right_quotes: usize,
    pairs_compared: usize,
    opportunities_found: usize,
    min_profit_percentage: &'a BigDecimal,
    transaction_fee: &'a BigDecimal,
}

/// Renders a [`ScanReport`] as human-readable text or JSON lines.
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(&self, report: &ScanReport, out: &mut W) -> Result<()> {
        match self.format {
            ReportFormat::Text => write_text(report, out),
            ReportFormat::Json => write_json(report, out),
        }
    }
}

fn write_text<W: Write>(report: &ScanReport, out: &mut W) -> Result<()> {
    for source in [&report.left, &report.right] {
        writeln!(
            out,
            "Retrieved {} pairs from {}",
            source.quotes_retrieved, source.exchange
        )?;
    }

    for opportunity in &report.opportunities {
        writeln!(out, "Arbitrage opportunity found for {}:", opportunity.symbol)?;
        writeln!(
            out,
            "  Buy from {} at {}",
            opportunity.buy_exchange,
            opportunity.display_buy_price()
        )?;
        writeln!(
            out,
            "  Sell on {} at {}",
            opportunity.sell_exchange,
            opportunity.display_sell_price()
        )?;
        writeln!(out, "  Profit percentage: {}%", opportunity.display_profit())?;
        writeln!(out)?;
    }

    writeln!(out, "Compared {} pairs", report.pairs_compared)?;
    writeln!(
        out,
        "Found {} arbitrage opportunities",
        report.opportunities_found()
    )?;

    if report.opportunities.is_empty() {
        writeln!(
            out,
            "No arbitrage opportunities found meeting the {}% profit threshold.",
            format_percentage(&report.min_profit_percentage)
        )?;

        for sample in &report.samples {
            writeln!(out, "Sample comparison for {}:", sample.symbol)?;
            writeln!(
                out,
                "  {} - Bid: {}, Ask: {}",
                sample.left_exchange,
                format_price(&sample.left_bid),
                format_price(&sample.left_ask)
            )?;
            writeln!(
                out,
                "  {} - Bid: {}, Ask: {}",
                sample.right_exchange,
                format_price(&sample.right_bid),
                format_price(&sample.right_ask)
            )?;
        }
    }

    Ok(())
}

fn write_json<W: Write>(report: &ScanReport, out: &mut W) -> Result<()> {
    let lines = report
        .opportunities
        .iter()
        .map(ReportLine::Opportunity)
        .chain(report.samples.iter().map(ReportLine::Sample))
        .chain(std::iter::once(ReportLine::Summary(SummaryLine {
            generated_at: report.generated_at,
            left_exchange: &report.left.exchange,
            left_quotes: report.left.quotes_retrieved,
            right_exchange: &report.right.exchange,
            right_quotes: report.right.quotes_retrieved,
            pairs_compared: report.pairs_compared,
            opportunities_found: report.opportunities_found(),
            min_profit_percentage: &report.min_profit_percentage,
            transaction_fee: &report.transaction_fee,
        })));

    for line in lines {
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }

    Ok(())
}
