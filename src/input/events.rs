//! External events delivered to the shell
//!
//! Taps, gestures, device notifications, URL opens and push deliveries can come
//! from different threads. They are all wrapped in a `ShellEvent` and sent over
//! a channel so the runtime handles them one at a time.

use crate::app::state::Orientation;
use crate::domain::intent::{NavigationIntent, StackId};
use crate::domain::push::PushPayload;
use crate::ui::overlay::OverlayInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// Intent raised by a tap inside one of the stacks
    Intent {
        intent: NavigationIntent,
        source: StackId,
    },
    /// System back-gesture received by a stack
    BackGesture(StackId),
    /// Tap on the overlay layer
    OverlayTap(OverlayInput),
    OrientationChanged(Orientation),
    /// URL opened by the OS while the process is running
    UrlOpened(String),
    /// Notification tapped while the process is running
    Notification(PushPayload),
    Shutdown,
}

impl ShellEvent {
    pub fn navigate(intent: NavigationIntent, source: StackId) -> Self {
        ShellEvent::Intent { intent, source }
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            ShellEvent::Intent { .. } => "intent",
            ShellEvent::BackGesture(_) => "back-gesture",
            ShellEvent::OverlayTap(_) => "overlay-tap",
            ShellEvent::OrientationChanged(_) => "orientation",
            ShellEvent::UrlOpened(_) => "url",
            ShellEvent::Notification(_) => "notification",
            ShellEvent::Shutdown => "shutdown",
        }
    }
}
