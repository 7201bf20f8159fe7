//! Single-task event loop
//!
//! All event sources feed one channel; the runtime pulls events off it and runs
//! each through the controller to completion before taking the next, so the
//! router never sees two events at once.

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::app::bootstrap::LinkListenerGate;
use crate::app::controller::{AppError, ShellController};
use crate::input::events::ShellEvent;

pub struct ShellRuntime {
    controller: ShellController,
    gate: LinkListenerGate,
}

impl ShellRuntime {
    /// Takes ownership of the controller and registers its orientation listener
    pub fn start(mut controller: ShellController, gate: LinkListenerGate) -> Result<Self, AppError> {
        controller.register_orientation_listener()?;
        Ok(Self { controller, gate })
    }

    pub fn channel(capacity: usize) -> (mpsc::Sender<ShellEvent>, mpsc::Receiver<ShellEvent>) {
        mpsc::channel(capacity)
    }

    pub fn controller(&self) -> &ShellController {
        &self.controller
    }

    /// Applies one event
    ///
    /// # Returns
    /// false once the runtime should stop
    pub fn handle_event(&mut self, event: ShellEvent) -> bool {
        let label = event.label();
        let result = match event {
            ShellEvent::Intent { intent, source } => {
                self.controller.dispatch(intent, source).map(|_| ())
            }
            ShellEvent::BackGesture(stack) => self.controller.back_gesture(stack).map(|_| ()),
            ShellEvent::OverlayTap(input) => {
                self.controller.overlay_tap(input);
                Ok(())
            }
            ShellEvent::OrientationChanged(orientation) => {
                self.controller.on_orientation_change(orientation);
                Ok(())
            }
            ShellEvent::UrlOpened(url) => {
                if self.gate.is_open(Instant::now()) {
                    self.controller.open_url(&url).map(|_| ())
                } else {
                    // Arrived before the listener is armed; startup resolution
                    // owns launch URLs, so this one is dropped.
                    tracing::warn!(url = %url, "url event before deep-link listener armed, dropped");
                    Ok(())
                }
            }
            ShellEvent::Notification(payload) => {
                self.controller.open_notification(&payload).map(|_| ())
            }
            ShellEvent::Shutdown => {
                self.controller.teardown();
                return false;
            }
        };

        if let Err(err) = result {
            tracing::warn!(event = label, error = %err, "event rejected");
        }
        true
    }

    /// Drains events until shutdown or until every sender is gone
    pub async fn run(mut self, mut events: mpsc::Receiver<ShellEvent>) -> ShellController {
        tracing::info!("shell runtime started");
        while let Some(event) = events.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }
        self.controller.teardown();
        tracing::info!("shell runtime stopped");
        self.controller
    }
}
