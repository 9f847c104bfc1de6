use anyhow::{Context, Result, bail};
use mailverdict::{DiscoveryReport, VerificationReport, VerificationSignal, Verdict};
use serde::Serialize;

use crate::args::Cli;

const RULE: &str = "============================================";

#[derive(Serialize)]
#[serde(untagged)]
pub enum Report {
    Verification(VerificationReport),
    Discovery(DiscoveryReport),
}

pub fn write_reports(rows: &[Report], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows, cli),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

fn write_human(rows: &[Report], cli: &Cli) -> Result<()> {
    let mut text = String::new();
    for row in rows {
        let lines = match row {
            Report::Verification(report) => verification_lines(report),
            Report::Discovery(report) => discovery_lines(report),
        };
        for line in lines {
            text.push_str(&line);
            text.push('\n');
        }
    }
    if let Some(path) = &cli.out {
        write_all_atomically(path, text.as_bytes())
    } else {
        print!("{text}");
        Ok(())
    }
}

pub fn verification_lines(report: &VerificationReport) -> Vec<String> {
    let basic = &report.basic;
    let mut lines = vec![
        "================ Email Check =================".to_string(),
        format!("Email:           {}", report.input),
    ];
    if let Some(normalized) = &basic.normalized_address {
        if normalized != &report.input {
            lines.push(format!("Normalized:      {normalized}"));
        }
    }
    lines.push(format!(
        "Syntax:          {}",
        if basic.syntax_valid { "valid" } else { "invalid" }
    ));
    lines.push(format!(
        "Domain:          {}",
        basic.domain.as_deref().unwrap_or("-")
    ));
    lines.push(format!(
        "MX records:      {}",
        if basic.mx_present { "found" } else { "not found" }
    ));
    if let Some(primary) = &basic.primary_mx_host {
        lines.push(format!("   Primary MX:   {primary}"));
    }
    for note in &basic.notes {
        lines.push(format!("   note: {note}"));
    }

    lines.push(String::new());
    lines.push("---- API Fallbacks ----".to_string());
    lines.extend(report.signals.iter().map(signal_line));

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push(format!(
        "{} Verdict: {}",
        verdict_marker(report.decision.verdict),
        report.decision.verdict
    ));
    lines.push(format!("    Why:     {}", report.decision.rationale));
    lines.push(RULE.to_string());
    lines
}

pub fn signal_line(signal: &VerificationSignal) -> String {
    let used = if signal.consulted { "used" } else { "skipped" };
    let confidence = signal
        .confidence
        .map(|c| format!(", conf={c:.2}"))
        .unwrap_or_default();
    format!(
        "{:13} {:7} -> {}{} :: {}",
        signal.source, used, signal.outcome, confidence, signal.detail
    )
}

fn verdict_marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::DoNotSend => "[X]",
        Verdict::LikelyOkToSend => "[OK]",
        Verdict::RiskyUnknown => "[!]",
    }
}

pub fn discovery_lines(report: &DiscoveryReport) -> Vec<String> {
    let query = &report.query;
    let signal = &report.signal;
    let mut lines = vec![
        "================ Email Finder =================".to_string(),
        format!(
            "Search:          {} {} @ {}",
            query.first_name, query.last_name, query.domain
        ),
        format!("Service:         {}", signal.source),
        format!("Used:            {}", if signal.consulted { "yes" } else { "no" }),
    ];

    match signal.address.as_deref() {
        Some(address) if signal.found => {
            lines.push(format!("Found:           {address}"));
            if let Some(confidence) = signal.confidence {
                lines.push(format!("Confidence:      {:.1}%", confidence * 100.0));
            }
            if !signal.evidence.is_empty() {
                lines.push(format!("Sources:         {} source(s)", signal.evidence.len()));
                for (idx, source) in signal.evidence.iter().take(3).enumerate() {
                    lines.push(format!("   {}. {source}", idx + 1));
                }
                if signal.evidence.len() > 3 {
                    lines.push(format!("   ... and {} more", signal.evidence.len() - 3));
                }
            }
        }
        _ => lines.push("Found:           No".to_string()),
    }

    lines.push(format!("Detail:          {}", signal.detail));
    lines.push(RULE.to_string());
    lines
}

fn write_json(rows: &[Report], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

fn write_ndjson(rows: &[Report], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[Report], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[Report], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

/// Verification rows: input, normalized, syntax, domain, mx, primary MX,
/// verdict, rationale, then `source=outcome` per vendor. Discovery rows:
/// domain, first name, last name, found, address, confidence, detail.
#[cfg(feature = "with-csv")]
fn csv_record(row: &Report) -> Vec<String> {
    match row {
        Report::Verification(report) => {
            let basic = &report.basic;
            let mut record = vec![
                report.input.clone(),
                basic.normalized_address.clone().unwrap_or_default(),
                basic.syntax_valid.to_string(),
                basic.domain.clone().unwrap_or_default(),
                basic.mx_present.to_string(),
                basic.primary_mx_host.clone().unwrap_or_default(),
                report.decision.verdict.label().to_string(),
                report.decision.rationale.to_string(),
            ];
            record.extend(
                report
                    .signals
                    .iter()
                    .map(|s| format!("{}={}", s.source, if s.consulted { s.outcome.to_string() } else { "skipped".into() })),
            );
            record
        }
        Report::Discovery(report) => vec![
            report.query.domain.clone(),
            report.query.first_name.clone(),
            report.query.last_name.clone(),
            report.signal.found.to_string(),
            report.signal.address.clone().unwrap_or_default(),
            report
                .signal
                .confidence
                .map(|c| format!("{c:.2}"))
                .unwrap_or_default(),
            report.signal.detail.clone(),
        ],
    }
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
