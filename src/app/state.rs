//! Session state management
//!
//! Defines the session state, its transition events and the store that
//! publishes every change to subscribers. Only the router feeds routing events
//! into the store; orientation changes are the one event that arrives from
//! outside.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::route::OverlayKind;

/// Device orientation reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Interprets a platform orientation string such as `LANDSCAPE-LEFT`
    pub fn from_platform(value: &str) -> Self {
        if value.to_ascii_uppercase().contains("LANDSCAPE") {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Overlay visibility and the surface it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayState {
    pub visible: bool,
    pub kind: OverlayKind,
}

impl OverlayState {
    /// Surface currently on screen, if any
    pub fn shown(&self) -> Option<OverlayKind> {
        match (self.visible, self.kind) {
            (true, OverlayKind::None) | (false, _) => None,
            (true, kind) => Some(kind),
        }
    }
}

/// Process-lifetime session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// The authenticated dual-stack layout is active
    pub split_active: bool,
    /// A call screen is the active detail route
    pub in_call: bool,
    /// Layout only; never consulted when routing
    pub orientation: Orientation,
    pub overlay: OverlayState,
}

impl SessionState {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// The master panel is rendered
    pub fn master_visible(&self) -> bool {
        self.split_active && !self.in_call
    }
}

/// Possible session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SplitEntered,
    SplitExited,
    CallStarted,
    CallEnded,
    /// Shows an overlay, replacing any open one
    OverlayOpened(OverlayKind),
    OverlayDismissed,
    OrientationChanged(Orientation),
}

/// Pure transition function for session state
pub struct StateMachine;

impl StateMachine {
    /// Processes a session event and returns the new state
    pub fn process_event(current: SessionState, event: SessionEvent) -> SessionState {
        let mut next = current;
        match event {
            SessionEvent::SplitEntered => next.split_active = true,
            SessionEvent::SplitExited => next.split_active = false,
            SessionEvent::CallStarted => next.in_call = true,
            SessionEvent::CallEnded => next.in_call = false,
            SessionEvent::OverlayOpened(OverlayKind::None) => {}
            SessionEvent::OverlayOpened(kind) => {
                next.overlay = OverlayState {
                    visible: true,
                    kind,
                };
            }
            SessionEvent::OverlayDismissed => next.overlay.visible = false,
            SessionEvent::OrientationChanged(orientation) => next.orientation = orientation,
        }
        next
    }
}

/// Observable holder of the single session state
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(initial: SessionState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SessionState {
        *self.sender.borrow()
    }

    /// Receiver notified whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Applies an event
    ///
    /// # Returns
    /// true when the state changed; subscribers are only woken in that case
    pub(crate) fn apply(&self, event: SessionEvent) -> bool {
        self.sender.send_if_modified(|state| {
            let next = StateMachine::process_event(*state, event);
            if next == *state {
                false
            } else {
                tracing::debug!(?event, ?next, "session transition");
                *state = next;
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_signed_out_and_closed() {
        let state = SessionState::new(Orientation::Landscape);
        assert!(!state.split_active);
        assert!(!state.in_call);
        assert!(!state.overlay.visible);
        assert_eq!(state.overlay.kind, OverlayKind::None);
        assert_eq!(state.orientation, Orientation::Landscape);
    }

    #[test]
    fn opening_an_overlay_replaces_the_previous_one() {
        let state = StateMachine::process_event(
            SessionState::default(),
            SessionEvent::OverlayOpened(OverlayKind::Directory),
        );
        let state =
            StateMachine::process_event(state, SessionEvent::OverlayOpened(OverlayKind::Sidebar));
        assert_eq!(state.overlay.shown(), Some(OverlayKind::Sidebar));
    }

    #[test]
    fn dismissing_a_closed_overlay_changes_nothing() {
        let state = SessionState::default();
        assert_eq!(
            StateMachine::process_event(state, SessionEvent::OverlayDismissed),
            state
        );
    }

    #[test]
    fn call_hides_master_panel() {
        let state = StateMachine::process_event(SessionState::default(), SessionEvent::SplitEntered);
        assert!(state.master_visible());
        let state = StateMachine::process_event(state, SessionEvent::CallStarted);
        assert!(!state.master_visible());
        assert!(state.split_active);
    }

    #[test]
    fn orientation_only_touches_orientation() {
        let state = StateMachine::process_event(SessionState::default(), SessionEvent::SplitEntered);
        let rotated = StateMachine::process_event(
            state,
            SessionEvent::OrientationChanged(Orientation::Landscape),
        );
        assert_eq!(
            rotated,
            SessionState {
                orientation: Orientation::Landscape,
                ..state
            }
        );
    }

    #[test]
    fn platform_strings_map_to_orientation() {
        assert_eq!(Orientation::from_platform("LANDSCAPE-LEFT"), Orientation::Landscape);
        assert_eq!(Orientation::from_platform("PORTRAIT-UPSIDEDOWN"), Orientation::Portrait);
        assert_eq!(Orientation::from_platform("UNKNOWN"), Orientation::Portrait);
    }

    #[test]
    fn store_notifies_only_on_change() {
        let store = SessionStore::new(SessionState::default());
        let mut rx = store.subscribe();
        assert!(!store.apply(SessionEvent::OverlayDismissed));
        assert!(!rx.has_changed().unwrap());

        assert!(store.apply(SessionEvent::SplitEntered));
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().split_active);
        assert!(store.current().split_active);
    }
}
