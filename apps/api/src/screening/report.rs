//! Plain-text summary report for a screening run.

use std::fmt::Write;

use crate::models::ScoredCandidate;
use crate::screening::pipeline::ScreeningResults;

const RULE_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 50;
const NOT_AVAILABLE: &str = "N/A";

const REPORT_STEPS: &[&str] = &[
    "Document text extraction and parsing",
    "Information extraction using pattern rules",
    "Skill matching against job requirements",
    "Experience level analysis",
    "Multi-factor scoring calculation",
    "Candidate ranking and selection",
    "Detailed analysis and summary generation",
];

pub fn render_summary_report(results: &ScreeningResults) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, results);
    out
}

fn write_report(out: &mut String, results: &ScreeningResults) -> std::fmt::Result {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "RESUME SCREENING - ANALYSIS REPORT")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;

    writeln!(out, "Job Position: {}", results.job_title)?;
    writeln!(out, "Company: {}", results.company)?;
    writeln!(out, "Analysis Date: {}", results.analysis_date.to_rfc3339())?;
    writeln!(out, "Total Resumes Processed: {}", results.total_resumes)?;
    if !results.skipped_documents.is_empty() {
        writeln!(out, "Resumes Skipped: {}", results.skipped_documents.len())?;
    }
    writeln!(out, "Processing Time: {:.2} seconds", results.processing_time)?;
    writeln!(out)?;

    writeln!(out, "TOP {} CANDIDATES:", results.top_matches.len())?;
    writeln!(out, "{}", "-".repeat(SECTION_WIDTH))?;
    writeln!(out)?;

    for (rank, scored) in results.top_matches.iter().enumerate() {
        write_candidate(out, rank + 1, scored)?;
    }

    writeln!(out, "PROCESS:")?;
    writeln!(out, "{}", "-".repeat(20))?;
    writeln!(out, "Each resume was processed through the following steps:")?;
    for (i, step) in REPORT_STEPS.iter().enumerate() {
        writeln!(out, "{}. {step}", i + 1)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Analysis completed in {:.2} seconds.",
        results.processing_time
    )?;

    Ok(())
}

fn write_candidate(out: &mut String, rank: usize, scored: &ScoredCandidate) -> std::fmt::Result {
    let c = &scored.candidate;
    writeln!(out, "#{rank} - {} ({}% Match)", c.name, scored.match_score)?;
    writeln!(out, "Email: {}", c.email.as_deref().unwrap_or(NOT_AVAILABLE))?;
    writeln!(out, "Phone: {}", c.phone.as_deref().unwrap_or(NOT_AVAILABLE))?;
    match c.experience {
        Some(years) => writeln!(out, "Experience: {years} years")?,
        None => writeln!(out, "Experience: {NOT_AVAILABLE}")?,
    }
    writeln!(
        out,
        "Current Role: {}",
        c.current_role.as_deref().unwrap_or(NOT_AVAILABLE)
    )?;
    writeln!(out)?;

    writeln!(out, "Key Strengths:")?;
    for strength in &scored.strengths {
        writeln!(out, "  • {strength}")?;
    }

    if !scored.concerns.is_empty() {
        writeln!(out)?;
        writeln!(out, "Areas for Consideration:")?;
        for concern in &scored.concerns {
            writeln!(out, "  • {concern}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Summary: {}", c.summary)?;
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(SECTION_WIDTH))?;
    writeln!(out)?;
    Ok(())
}
