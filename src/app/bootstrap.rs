//! Startup resolution
//!
//! At launch the shell may have been opened by a push notification, by a deep
//! link, or by the user. Both lookups run concurrently and the sequencer waits
//! for both before choosing exactly one initial action, with push taking
//! precedence over the link. Crash-report gating runs alongside them.

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::{Duration, Instant};

use crate::app::reporting::{
    CrashReportSettings, ReportingDecision, ReportingIntegrations, apply_crash_report_gate,
};
use crate::domain::deep_link::{DeepLinkParser, DeepLinkTarget};
use crate::domain::intent::{NavigationIntent, StackId};
use crate::domain::push::PushPayload;

/// Failures of the external startup collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("push notification lookup failed: {0}")]
    Push(String),
    #[error("launch URL lookup failed: {0}")]
    LaunchUrl(String),
    #[error("crash report settings unavailable: {0}")]
    Settings(String),
}

/// Source of the notification that launched the process, if any
#[async_trait]
pub trait PushNotificationSource: Send + Sync {
    async fn pending_notification(&self) -> Result<Option<PushPayload>, BootstrapError>;
}

/// Source of the URL the OS launched the process with, if any
#[async_trait]
pub trait LaunchUrlSource: Send + Sync {
    async fn initial_url(&self) -> Result<Option<String>, BootstrapError>;
}

/// The single action a fresh process starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialAction {
    Notification(NavigationIntent),
    DeepLink(DeepLinkTarget),
    AppInit,
}

impl InitialAction {
    /// Intent and originating stack fed into the router
    pub fn dispatch(&self) -> (NavigationIntent, StackId) {
        match self {
            InitialAction::Notification(intent) => (intent.clone(), StackId::Master),
            InitialAction::DeepLink(target) => (target.to_intent(), StackId::Master),
            InitialAction::AppInit => (NavigationIntent::app_init(), StackId::Detail),
        }
    }
}

/// Everything startup produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOutcome {
    pub initial: InitialAction,
    pub reporting: ReportingDecision,
}

pub struct BootstrapSequencer {
    parser: DeepLinkParser,
}

impl BootstrapSequencer {
    pub fn new(parser: DeepLinkParser) -> Self {
        Self { parser }
    }

    /// Picks the initial action from already-resolved lookups
    ///
    /// Failed lookups count as absent; an unresolvable payload counts as no
    /// notification.
    pub fn choose(
        &self,
        push: Result<Option<PushPayload>, BootstrapError>,
        url: Result<Option<String>, BootstrapError>,
    ) -> InitialAction {
        let notification = push
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "treating push lookup as absent");
                None
            })
            .and_then(|payload| payload.to_intent());

        if let Some(intent) = notification {
            return InitialAction::Notification(intent);
        }

        let link = url
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "treating launch URL lookup as absent");
                None
            })
            .and_then(|raw| self.parser.parse(&raw));

        match link {
            Some(target) => InitialAction::DeepLink(target),
            None => InitialAction::AppInit,
        }
    }

    /// Runs both lookups concurrently and waits for both
    pub async fn resolve(
        &self,
        push: &dyn PushNotificationSource,
        url: &dyn LaunchUrlSource,
    ) -> InitialAction {
        let (push, url) = tokio::join!(push.pending_notification(), url.initial_url());
        let action = self.choose(push, url);
        tracing::info!(?action, "startup resolved");
        action
    }

    /// Resolves the initial action and applies crash-report gating
    pub async fn startup(
        &self,
        push: &dyn PushNotificationSource,
        url: &dyn LaunchUrlSource,
        settings: &dyn CrashReportSettings,
        integrations: ReportingIntegrations<'_>,
    ) -> StartupOutcome {
        let (initial, reporting) = tokio::join!(
            self.resolve(push, url),
            apply_crash_report_gate(settings, integrations)
        );
        StartupOutcome { initial, reporting }
    }
}

/// Holds live URL events back until the grace delay after launch has elapsed
#[derive(Debug, Clone, Copy)]
pub struct LinkListenerGate {
    opens_at: Instant,
}

impl LinkListenerGate {
    pub fn new(started: Instant, delay: Duration) -> Self {
        Self {
            opens_at: started + delay,
        }
    }

    pub fn starting_now(delay: Duration) -> Self {
        Self::new(Instant::now(), delay)
    }

    pub fn is_open(&self, now: Instant) -> bool {
        now >= self.opens_at
    }

    pub fn opens_at(&self) -> Instant {
        self.opens_at
    }
}
