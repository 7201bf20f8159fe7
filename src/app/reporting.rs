//! Crash-report gating
//!
//! The user's crash-reporting preference is read once at startup. Opting out
//! switches off the exception reporter and the analytics collector; failing to
//! read the preference leaves both running.

use async_trait::async_trait;

use crate::app::bootstrap::BootstrapError;

/// Settings collaborator holding the user's preference
#[async_trait]
pub trait CrashReportSettings: Send + Sync {
    async fn allow_crash_report(&self) -> Result<bool, BootstrapError>;
}

pub trait ExceptionReporter: Send + Sync {
    /// Stops automatic notification and drops any queued reports
    fn disable_reporting(&self);
}

pub trait AnalyticsCollector: Send + Sync {
    fn set_collection_enabled(&self, enabled: bool);
}

/// The two downstream integrations controlled by the preference
#[derive(Clone, Copy)]
pub struct ReportingIntegrations<'a> {
    pub exceptions: &'a dyn ExceptionReporter,
    pub analytics: &'a dyn AnalyticsCollector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingDecision {
    /// User allows reporting
    Enabled,
    /// User opted out; both integrations were switched off
    Disabled,
    /// Preference unavailable; reporting left on
    FailOpen,
}

pub async fn apply_crash_report_gate(
    settings: &dyn CrashReportSettings,
    integrations: ReportingIntegrations<'_>,
) -> ReportingDecision {
    match settings.allow_crash_report().await {
        Ok(true) => ReportingDecision::Enabled,
        Ok(false) => {
            integrations.exceptions.disable_reporting();
            integrations.analytics.set_collection_enabled(false);
            tracing::info!("crash reporting disabled by user preference");
            ReportingDecision::Disabled
        }
        Err(err) => {
            tracing::warn!(error = %err, "crash report preference unavailable, reporting stays on");
            ReportingDecision::FailOpen
        }
    }
}
