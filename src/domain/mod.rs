//! Domain types and pure operations
//!
//! Routes, intents, stacks and the parsers that turn external input into
//! intents. Nothing here touches session state or performs I/O.

pub mod deep_link;
pub mod intent;
pub mod push;
pub mod route;
pub mod stack;

pub use deep_link::{DeepLinkParser, DeepLinkTarget, LinkScreen};
pub use intent::{IntentKind, NavigationIntent, Params, StackId};
pub use push::PushPayload;
pub use route::{OverlayKind, RouteClass, RouteName};
pub use stack::{Frame, NavStack, StackError};
