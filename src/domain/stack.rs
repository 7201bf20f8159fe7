//! Navigation stacks
//!
//! Each panel of the split layout owns one `NavStack`: an ordered history of
//! frames with a fixed root frame at the bottom. Stacks only hold routes of
//! their own class, with one exception: the exit route is also the first screen
//! of the signed-out flow, so the detail stack accepts it too. Overlay routes
//! never enter a stack.

use thiserror::Error;

use crate::domain::intent::{Params, StackId};
use crate::domain::route::{RouteClass, RouteName};

/// Errors raised when a stack is asked to hold a route it cannot render
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("{route} is a {class:?} route and cannot enter the {stack:?} stack")]
    WrongClass {
        stack: StackId,
        route: RouteName,
        class: RouteClass,
    },
}

/// One entry of a stack's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub route: RouteName,
    pub params: Params,
}

impl Frame {
    pub fn new(route: RouteName) -> Self {
        Self {
            route,
            params: Params::new(),
        }
    }

    /// Frame carrying the intent's parameters
    pub fn with_params(route: RouteName, params: Params) -> Self {
        Self { route, params }
    }
}

/// History of one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavStack {
    id: StackId,
    frames: Vec<Frame>,
}

impl NavStack {
    /// Creates a stack holding only its root frame
    pub fn new(id: StackId) -> Self {
        let root = match id {
            StackId::Master => RouteName::MASTER_ROOT,
            StackId::Detail => RouteName::DETAIL_ROOT,
        };
        Self {
            id,
            frames: vec![Frame::new(root)],
        }
    }

    /// Panel this stack belongs to
    pub fn id(&self) -> StackId {
        self.id
    }

    /// History from root (first) to top (last)
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames, root included
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frame currently on screen
    pub fn top(&self) -> &Frame {
        // Never empty: pop and reset keep the root.
        &self.frames[self.frames.len() - 1]
    }

    /// Bottom frame, never popped
    pub fn root(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn is_at_root(&self) -> bool {
        self.frames.len() == 1
    }

    /// Whether `route` may be pushed onto this stack
    pub fn accepts(&self, route: RouteName) -> bool {
        if self.id == StackId::Detail && route == RouteName::EXIT_ROUTE {
            return true;
        }
        matches!(
            (self.id, route.class()),
            (StackId::Master, RouteClass::Master) | (StackId::Detail, RouteClass::Detail)
        )
    }

    fn check(&self, route: RouteName) -> Result<(), StackError> {
        if self.accepts(route) {
            Ok(())
        } else {
            Err(StackError::WrongClass {
                stack: self.id,
                route,
                class: route.class(),
            })
        }
    }

    /// Appends a frame
    pub fn push(&mut self, frame: Frame) -> Result<(), StackError> {
        self.check(frame.route)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Removes the top frame, keeping the root
    ///
    /// # Returns
    /// The removed frame, or None when already at the root
    pub fn pop(&mut self) -> Option<Frame> {
        if self.is_at_root() {
            None
        } else {
            self.frames.pop()
        }
    }

    /// Drops everything above the root frame
    pub fn reset_to_root(&mut self) {
        self.frames.truncate(1);
    }

    /// Replaces the whole history with a single frame that becomes the new root
    pub fn replace_root(&mut self, frame: Frame) -> Result<(), StackError> {
        self.check(frame.route)?;
        self.frames.clear();
        self.frames.push(frame);
        Ok(())
    }
}
