//! Split layout calculation
//!
//! Derives what the two panels and the overlay layer should show from the
//! session state. Kept separate from the controller so the proportions can be
//! checked without any stacks.

use crate::app::state::SessionState;
use crate::config::LayoutConfig;
use crate::domain::route::OverlayKind;

/// Pre-calculated layout of the split view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLayout {
    /// Master panel is rendered
    pub master_visible: bool,
    /// Flex weight of the master panel (0 when hidden)
    pub master_flex: u32,
    pub detail_flex: u32,
    /// Overlay surface drawn above both panels
    pub overlay: Option<OverlayKind>,
}

impl SplitLayout {
    pub fn from_session(session: &SessionState, config: &LayoutConfig) -> Self {
        let (master, detail) = config.weights(session.orientation);
        let master_visible = session.master_visible();
        Self {
            master_visible,
            master_flex: if master_visible { master } else { 0 },
            detail_flex: detail,
            overlay: session.overlay.shown(),
        }
    }

    /// Fraction of the width given to the master panel
    pub fn master_fraction(&self) -> f32 {
        let total = self.master_flex + self.detail_flex;
        if total == 0 {
            return 0.0;
        }
        self.master_flex as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{Orientation, OverlayState};

    fn signed_in(orientation: Orientation) -> SessionState {
        SessionState {
            split_active: true,
            ..SessionState::new(orientation)
        }
    }

    #[test]
    fn landscape_uses_narrower_master() {
        let layout =
            SplitLayout::from_session(&signed_in(Orientation::Landscape), &LayoutConfig::default());
        assert!(layout.master_visible);
        assert_eq!((layout.master_flex, layout.detail_flex), (4, 9));

        let portrait =
            SplitLayout::from_session(&signed_in(Orientation::Portrait), &LayoutConfig::default());
        assert_eq!((portrait.master_flex, portrait.detail_flex), (5, 7));
        assert!(layout.master_fraction() < portrait.master_fraction());
    }

    #[test]
    fn master_hidden_outside_split_or_during_call() {
        let config = LayoutConfig::default();
        let signed_out = SessionState::new(Orientation::Portrait);
        assert!(!SplitLayout::from_session(&signed_out, &config).master_visible);

        let in_call = SessionState {
            in_call: true,
            ..signed_in(Orientation::Portrait)
        };
        let layout = SplitLayout::from_session(&in_call, &config);
        assert!(!layout.master_visible);
        assert_eq!(layout.master_flex, 0);
        assert_eq!(layout.master_fraction(), 0.0);
    }

    #[test]
    fn overlay_is_reported_only_when_visible() {
        let config = LayoutConfig::default();
        let mut session = signed_in(Orientation::Portrait);
        session.overlay = OverlayState {
            visible: false,
            kind: OverlayKind::Directory,
        };
        assert_eq!(SplitLayout::from_session(&session, &config).overlay, None);

        session.overlay.visible = true;
        assert_eq!(
            SplitLayout::from_session(&session, &config).overlay,
            Some(OverlayKind::Directory)
        );
    }
}
