pub mod layout;
pub mod overlay;

pub use layout::SplitLayout;
pub use overlay::{OverlayController, OverlayInput, OverlayRouting, OverlaySurface};
