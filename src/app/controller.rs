//! Application controller and coordination layer
//!
//! The controller owns the two navigation stacks, the router and the overlay
//! layer. Every intent goes through the router first; the controller then
//! applies the verdict to the originating stack and carries out any companion
//! commands the router queued for the other stack.

use std::collections::VecDeque;

use thiserror::Error;
use tokio::sync::watch;

use crate::app::bootstrap::InitialAction;
use crate::app::router::{Router, StackCommand, Verdict};
use crate::app::state::{Orientation, SessionState};
use crate::config::{LayoutConfig, ShellConfig};
use crate::domain::deep_link::DeepLinkParser;
use crate::domain::intent::{IntentKind, NavigationIntent, StackId};
use crate::domain::push::PushPayload;
use crate::domain::route::{ROUTE_TABLE, RouteTableError, validate_route_table};
use crate::domain::stack::{Frame, NavStack, StackError};
use crate::ui::layout::SplitLayout;
use crate::ui::overlay::{OverlayController, OverlayInput, OverlayRouting, OverlaySurface};

/// Application errors that can occur during controller operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Route classification is invalid: {0}")]
    RouteTable(#[from] RouteTableError),
    #[error("Stack update failed: {0}")]
    Stack(#[from] StackError),
    #[error("Orientation listener can only be registered once per controller")]
    ListenerAlreadyRegistered,
}

/// Lifecycle of the orientation listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Unregistered,
    Active,
    TornDown,
}

/// Main application controller
pub struct ShellController {
    router: Router,
    master: NavStack,
    detail: NavStack,
    overlay: OverlayController,
    parser: DeepLinkParser,
    layout: LayoutConfig,
    listener: ListenerState,
}

impl ShellController {
    /// Creates a controller with fresh stacks and the initial session
    ///
    /// # Arguments
    /// * `config` - Shell configuration (link prefixes, layout weights)
    /// * `orientation` - Device's current orientation reading
    pub fn new(config: &ShellConfig, orientation: Orientation) -> Result<Self, AppError> {
        validate_route_table(ROUTE_TABLE)?;

        Ok(Self {
            router: Router::new(SessionState::new(orientation)),
            master: NavStack::new(StackId::Master),
            detail: NavStack::new(StackId::Detail),
            overlay: OverlayController::new(),
            parser: config.deep_link_parser(),
            layout: config.layout,
            listener: ListenerState::Unregistered,
        })
    }

    /// Snapshot of the current session state
    pub fn session(&self) -> SessionState {
        self.router.session()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.router.subscribe()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Stack behind the list panel
    pub fn master(&self) -> &NavStack {
        &self.master
    }

    /// Stack behind the content panel
    pub fn detail(&self) -> &NavStack {
        &self.detail
    }

    /// Looks up a stack by id
    pub fn stack(&self, id: StackId) -> &NavStack {
        match id {
            StackId::Master => &self.master,
            StackId::Detail => &self.detail,
        }
    }

    fn stack_mut(&mut self, id: StackId) -> &mut NavStack {
        match id {
            StackId::Master => &mut self.master,
            StackId::Detail => &mut self.detail,
        }
    }

    /// Panel visibility and weights for the current session
    pub fn layout(&self) -> SplitLayout {
        SplitLayout::from_session(&self.session(), &self.layout)
    }

    /// Overlay surface to draw, if any
    pub fn overlay_surface(&self) -> Option<OverlaySurface> {
        self.overlay.render(&self.session().overlay)
    }

    /// Processes an intent from one of the stacks
    ///
    /// # Returns
    /// The verdict for the originating stack. Companion intents queued by the
    /// router are applied before returning.
    pub fn dispatch(
        &mut self,
        intent: NavigationIntent,
        source: StackId,
    ) -> Result<Verdict, AppError> {
        let mut queue = VecDeque::from([(intent, source)]);
        let mut first = None;

        while let Some((intent, source)) = queue.pop_front() {
            let verdict = self.router.handle(&intent, source);
            if verdict == Verdict::PassThrough {
                self.apply_default(&intent, source)?;
            }
            first.get_or_insert(verdict);

            for command in self.router.drain_commands() {
                match command {
                    StackCommand::ResetToRoot(id) => self.stack_mut(id).reset_to_root(),
                    StackCommand::Navigate { stack, intent } => queue.push_back((intent, stack)),
                }
            }
        }

        Ok(first.unwrap_or(Verdict::PassThrough))
    }

    /// Default history rule of a stack: push on navigate, remove top on pop
    fn apply_default(&mut self, intent: &NavigationIntent, source: StackId) -> Result<(), AppError> {
        match (intent.kind, intent.target) {
            (IntentKind::Navigate, Some(route)) => {
                let frame = Frame::with_params(route, intent.params.clone());
                let stack = self.stack_mut(source);
                if source == StackId::Detail && route.is_switch_root() {
                    stack.replace_root(frame)?;
                } else {
                    stack.push(frame)?;
                }
            }
            (IntentKind::Pop, _) => {
                if self.stack_mut(source).pop().is_none() {
                    tracing::debug!(?source, "pop ignored at stack root");
                }
            }
            (IntentKind::Navigate, None) => {
                tracing::warn!(?source, "navigate intent without target ignored");
            }
            (IntentKind::ToggleSplit, _) => {}
        }
        Ok(())
    }

    /// Closes the open overlay
    ///
    /// # Returns
    /// false when no overlay was open (state unchanged)
    pub fn dismiss_overlay(&mut self) -> bool {
        self.router.dismiss_overlay()
    }

    /// Routes a tap on the overlay layer
    pub fn overlay_tap(&mut self, input: OverlayInput) -> OverlayRouting {
        let routing = self.overlay.route_input(&self.session().overlay, input);
        if routing == OverlayRouting::Dismiss {
            self.dismiss_overlay();
        }
        routing
    }

    /// Handles a system back-gesture received by a stack
    ///
    /// An open overlay swallows the gesture and closes; otherwise the gesture
    /// becomes a pop intent on that stack.
    pub fn back_gesture(&mut self, stack: StackId) -> Result<Option<Verdict>, AppError> {
        match self.overlay.route_input(&self.session().overlay, OverlayInput::BackGesture) {
            OverlayRouting::Dismiss => {
                self.dismiss_overlay();
                Ok(None)
            }
            OverlayRouting::Content | OverlayRouting::Stacks => {
                self.dispatch(NavigationIntent::pop(), stack).map(Some)
            }
        }
    }

    /// Opens a live deep link
    ///
    /// # Returns
    /// None when the URL is not a deep link this shell understands
    pub fn open_url(&mut self, url: &str) -> Result<Option<Verdict>, AppError> {
        match self.parser.parse(url) {
            Some(target) => {
                tracing::info!(screen = ?target.screen, "opening deep link");
                self.dispatch(target.to_intent(), StackId::Master).map(Some)
            }
            None => {
                tracing::debug!(url, "ignoring unrecognised url");
                Ok(None)
            }
        }
    }

    /// Opens the room named by a push notification
    pub fn open_notification(&mut self, payload: &PushPayload) -> Result<Option<Verdict>, AppError> {
        match payload.to_intent() {
            Some(intent) => self.dispatch(intent, StackId::Master).map(Some),
            None => {
                tracing::warn!("push notification without a room ignored");
                Ok(None)
            }
        }
    }

    /// Feeds the bootstrap result through the same path as live intents
    pub fn apply_initial(&mut self, action: &InitialAction) -> Result<Verdict, AppError> {
        let (intent, source) = action.dispatch();
        tracing::info!(?action, "applying initial action");
        self.dispatch(intent, source)
    }

    /// Current lifecycle stage of the orientation listener
    pub fn listener_state(&self) -> ListenerState {
        self.listener
    }

    /// Registers the single orientation listener of this controller
    pub fn register_orientation_listener(&mut self) -> Result<(), AppError> {
        match self.listener {
            ListenerState::Unregistered => {
                self.listener = ListenerState::Active;
                Ok(())
            }
            ListenerState::Active | ListenerState::TornDown => {
                Err(AppError::ListenerAlreadyRegistered)
            }
        }
    }

    /// Deregisters the orientation listener; later notifications are ignored
    ///
    /// # Returns
    /// false when the controller was already torn down
    pub fn teardown(&mut self) -> bool {
        if self.listener == ListenerState::TornDown {
            return false;
        }
        self.listener = ListenerState::TornDown;
        tracing::info!("controller torn down");
        true
    }

    /// Orientation notification from the device
    ///
    /// # Returns
    /// true when the notification was applied and changed the state
    pub fn on_orientation_change(&mut self, orientation: Orientation) -> bool {
        if self.listener != ListenerState::Active {
            tracing::debug!(?orientation, state = ?self.listener, "orientation ignored");
            return false;
        }
        self.router.on_orientation_change(orientation)
    }
}

impl Drop for ShellController {
    fn drop(&mut self) {
        self.teardown();
    }
}
