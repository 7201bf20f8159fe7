//! Overlay layer management
//!
//! Shows at most one overlay surface above the split view and decides where
//! input goes while one is open. The controller owns the only path that closes
//! an overlay, so this module never mutates session state itself.

use crate::app::state::OverlayState;
use crate::domain::route::{OverlayKind, RouteName};

/// How an overlay is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Centered sheet with the stacks dimmed behind it
    FormSheet,
}

/// Overlay surface ready to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySurface {
    pub kind: OverlayKind,
    /// Screen hosted inside the overlay
    pub screen: RouteName,
    pub presentation: Presentation,
}

/// Input received while the overlay layer is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    TapInside,
    TapOutside,
    BackGesture,
}

/// Where the overlay layer sends an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRouting {
    /// Close the overlay
    Dismiss,
    /// Let the overlay content handle it
    Content,
    /// No overlay is open; the stacks receive the input
    Stacks,
}

/// Selects the overlay surface and routes input around it
#[derive(Debug, Clone, Default)]
pub struct OverlayController;

impl OverlayController {
    pub fn new() -> Self {
        Self
    }

    /// Surface to draw for the current overlay state
    pub fn render(&self, overlay: &OverlayState) -> Option<OverlaySurface> {
        let kind = overlay.shown()?;
        let screen = match kind {
            OverlayKind::NewMessage => RouteName::NewMessageView,
            OverlayKind::Directory => RouteName::DirectoryView,
            OverlayKind::Sidebar => RouteName::SidebarView,
            OverlayKind::None => return None,
        };
        Some(OverlaySurface {
            kind,
            screen,
            presentation: Presentation::FormSheet,
        })
    }

    pub fn route_input(&self, overlay: &OverlayState, input: OverlayInput) -> OverlayRouting {
        if overlay.shown().is_none() {
            return OverlayRouting::Stacks;
        }
        match input {
            OverlayInput::TapInside => OverlayRouting::Content,
            OverlayInput::TapOutside | OverlayInput::BackGesture => OverlayRouting::Dismiss,
        }
    }
}
