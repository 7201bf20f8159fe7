//! Command-line harness for the tablet shell core
//!
//! Launch inputs come from the environment (`TABLET_SHELL_PUSH`,
//! `TABLET_SHELL_LAUNCH_URL`, `TABLET_SHELL_ALLOW_CRASH_REPORT`,
//! `TABLET_SHELL_ORIENTATION`); live events are read line by line from stdin.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use tablet_shell::app::bootstrap::{
    BootstrapError, BootstrapSequencer, LaunchUrlSource, LinkListenerGate, PushNotificationSource,
};
use tablet_shell::app::reporting::{
    AnalyticsCollector, CrashReportSettings, ExceptionReporter, ReportingIntegrations,
};
use tablet_shell::app::{Orientation, ShellController, ShellRuntime};
use tablet_shell::config::ShellConfig;
use tablet_shell::domain::{NavigationIntent, PushPayload, RouteName, StackId};
use tablet_shell::input::ShellEvent;
use tablet_shell::logging::init_logging;
use tablet_shell::ui::OverlayInput;

struct EnvPush;

#[async_trait]
impl PushNotificationSource for EnvPush {
    async fn pending_notification(&self) -> Result<Option<PushPayload>, BootstrapError> {
        Ok(std::env::var("TABLET_SHELL_PUSH")
            .ok()
            .and_then(|raw| PushPayload::from_json(&raw)))
    }
}

struct EnvLaunchUrl;

#[async_trait]
impl LaunchUrlSource for EnvLaunchUrl {
    async fn initial_url(&self) -> Result<Option<String>, BootstrapError> {
        Ok(std::env::var("TABLET_SHELL_LAUNCH_URL").ok())
    }
}

struct EnvCrashSettings;

#[async_trait]
impl CrashReportSettings for EnvCrashSettings {
    async fn allow_crash_report(&self) -> Result<bool, BootstrapError> {
        match std::env::var("TABLET_SHELL_ALLOW_CRASH_REPORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| BootstrapError::Settings(format!("not a boolean: {value}"))),
            Err(_) => Ok(true),
        }
    }
}

struct LogReporter;

impl ExceptionReporter for LogReporter {
    fn disable_reporting(&self) {
        tracing::info!("exception reporter disabled");
    }
}

impl AnalyticsCollector for LogReporter {
    fn set_collection_enabled(&self, enabled: bool) {
        tracing::info!(enabled, "analytics collection updated");
    }
}

fn parse_stack(value: &str) -> Option<StackId> {
    if value.eq_ignore_ascii_case("master") {
        Some(StackId::Master)
    } else if value.eq_ignore_ascii_case("detail") {
        Some(StackId::Detail)
    } else {
        tracing::warn!(value, "unknown stack, expected master or detail");
        None
    }
}

/// Turns a stdin command into an event
fn parse_command(line: &str) -> Option<ShellEvent> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let argument = parts.next();

    let event = match (command, argument) {
        ("url", Some(url)) => ShellEvent::UrlOpened(url.to_string()),
        ("go", Some(route)) => {
            let route: RouteName = route.parse().ok()?;
            let source = parse_stack(parts.next().unwrap_or("detail"))?;
            ShellEvent::navigate(NavigationIntent::navigate(route), source)
        }
        ("back", stack) => ShellEvent::BackGesture(parse_stack(stack.unwrap_or("detail"))?),
        ("sidebar", _) => ShellEvent::navigate(NavigationIntent::toggle_split(), StackId::Master),
        ("outside", _) => ShellEvent::OverlayTap(OverlayInput::TapOutside),
        ("rotate", Some(value)) => ShellEvent::OrientationChanged(Orientation::from_platform(value)),
        ("quit", _) => ShellEvent::Shutdown,
        _ => return None,
    };
    Some(event)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShellConfig::from_env()?;
    init_logging(&config.log_filter);

    let orientation = std::env::var("TABLET_SHELL_ORIENTATION")
        .map(|value| Orientation::from_platform(&value))
        .unwrap_or_default();

    let gate = LinkListenerGate::starting_now(config.link_listener_delay());
    let mut controller = ShellController::new(&config, orientation)?;

    let sequencer = BootstrapSequencer::new(config.deep_link_parser());
    let outcome = sequencer
        .startup(
            &EnvPush,
            &EnvLaunchUrl,
            &EnvCrashSettings,
            ReportingIntegrations {
                exceptions: &LogReporter,
                analytics: &LogReporter,
            },
        )
        .await;
    tracing::info!(reporting = ?outcome.reporting, "startup complete");
    controller.apply_initial(&outcome.initial)?;

    let runtime = ShellRuntime::start(controller, gate)?;
    let (tx, rx) = ShellRuntime::channel(64);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => tracing::warn!(line = %line, "unrecognised command"),
            }
        }
    });

    let controller = runtime.run(rx).await;
    let layout = controller.layout();
    tracing::info!(
        master_visible = layout.master_visible,
        master_flex = layout.master_flex,
        detail_flex = layout.detail_flex,
        overlay = ?layout.overlay,
        detail_top = %controller.detail().top().route,
        "final layout"
    );
    Ok(())
}
