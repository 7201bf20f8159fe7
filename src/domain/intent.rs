//! Navigation intents
//!
//! An intent is a request to change navigation state. Taps, back-gestures,
//! push notifications and deep links all produce one, and the router consumes
//! each exactly once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::route::RouteName;

/// String parameters carried alongside a route
pub type Params = BTreeMap<String, String>;

/// What the intent asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentKind {
    Navigate,
    /// The "open sidebar" affordance
    ToggleSplit,
    Pop,
}

/// Which of the two stacks an intent originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackId {
    Master,
    Detail,
}

impl StackId {
    pub fn other(&self) -> StackId {
        match self {
            StackId::Master => StackId::Detail,
            StackId::Detail => StackId::Master,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub kind: IntentKind,
    pub target: Option<RouteName>,
    pub params: Params,
}

impl NavigationIntent {
    pub fn navigate(target: RouteName) -> Self {
        Self::navigate_with(target, Params::new())
    }

    pub fn navigate_with(target: RouteName, params: Params) -> Self {
        Self {
            kind: IntentKind::Navigate,
            target: Some(target),
            params,
        }
    }

    pub fn pop() -> Self {
        Self {
            kind: IntentKind::Pop,
            target: None,
            params: Params::new(),
        }
    }

    pub fn toggle_split() -> Self {
        Self {
            kind: IntentKind::ToggleSplit,
            target: None,
            params: Params::new(),
        }
    }

    /// Intent dispatched by a cold start with nothing pending
    pub fn app_init() -> Self {
        Self::navigate(RouteName::DETAIL_ROOT)
    }

    pub fn targets(&self, route: RouteName) -> bool {
        self.target == Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_target() {
        let intent = NavigationIntent::navigate(RouteName::RoomView);
        assert_eq!(intent.kind, IntentKind::Navigate);
        assert!(intent.targets(RouteName::RoomView));

        let pop = NavigationIntent::pop();
        assert_eq!(pop.kind, IntentKind::Pop);
        assert!(pop.target.is_none());

        assert_eq!(NavigationIntent::toggle_split().kind, IntentKind::ToggleSplit);
    }

    #[test]
    fn app_init_lands_on_detail_root() {
        assert!(NavigationIntent::app_init().targets(RouteName::AuthLoading));
    }

    #[test]
    fn other_stack_flips() {
        assert_eq!(StackId::Master.other(), StackId::Detail);
        assert_eq!(StackId::Detail.other(), StackId::Master);
    }
}
