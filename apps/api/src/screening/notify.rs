//! Composes the hiring-team email for a finished screening.
//!
//! Only simulation dispatch exists: the message is written to the log. A failed
//! dispatch never fails the screening that produced it.

use std::fmt::Write;

use thiserror::Error;
use tracing::info;

use crate::config::EmailConfig;
use crate::screening::pipeline::ScreeningResults;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("email delivery is not available; enable EMAIL_SIMULATION_MODE")]
    DeliveryUnavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub fn compose_results_email(results: &ScreeningResults, sender: &str, recipient: &str) -> EmailMessage {
    let mut body = String::new();
    let _ = write_body(&mut body, results);

    EmailMessage {
        from: sender.to_string(),
        to: recipient.to_string(),
        subject: format!("Resume Screening Results - {}", results.job_title),
        body,
    }
}

fn write_body(body: &mut String, results: &ScreeningResults) -> std::fmt::Result {
    writeln!(body, "Screening results for {} at {}", results.job_title, results.company)?;
    writeln!(
        body,
        "{} resumes analyzed on {} in {:.2} seconds.",
        results.total_resumes,
        results.analysis_date.format("%Y-%m-%d %H:%M UTC"),
        results.processing_time
    )?;
    writeln!(body)?;

    writeln!(body, "Top candidates:")?;
    for (i, scored) in results.top_matches.iter().enumerate() {
        let c = &scored.candidate;
        writeln!(body, "{}. {} - {}% match", i + 1, c.name, scored.match_score)?;
        writeln!(
            body,
            "   Contact: {} | {}",
            c.email.as_deref().unwrap_or("N/A"),
            c.phone.as_deref().unwrap_or("N/A")
        )?;
        writeln!(body, "   {}", c.summary)?;
    }

    if let Some(stats) = &results.statistics.cohort {
        writeln!(body)?;
        writeln!(body, "Statistics:")?;
        writeln!(body, "   Average match score: {:.1}", stats.average_match_score)?;
        writeln!(body, "   Candidates scoring 80+: {}", stats.candidates_above_80)?;
        writeln!(body, "   Candidates scoring 60+: {}", stats.candidates_above_60)?;
        match stats.average_experience {
            Some(avg) => writeln!(body, "   Average experience: {avg:.1} years")?,
            None => writeln!(body, "   Average experience: N/A")?,
        }
    }

    Ok(())
}

pub fn dispatch(message: &EmailMessage, simulation_mode: bool) -> Result<(), NotificationError> {
    if !simulation_mode {
        return Err(NotificationError::DeliveryUnavailable);
    }
    info!("=== EMAIL SIMULATION ===");
    info!("To: {}", message.to);
    info!("From: {}", message.from);
    info!("Subject: {}", message.subject);
    info!("Body:\n{}", message.body);
    Ok(())
}

/// Composes and dispatches the results email when notifications are enabled.
pub fn notify_if_enabled(results: &ScreeningResults, config: &EmailConfig) {
    if !config.enabled {
        return;
    }
    let message = compose_results_email(results, &config.sender, &config.recipient);
    if let Err(e) = dispatch(&message, config.simulation_mode) {
        tracing::warn!("Results notification for {} not sent: {e}", results.job_id);
    }
}
