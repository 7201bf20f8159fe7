//! Navigation intent router
//!
//! Both stacks hand every intent to `Router::handle` before touching their own
//! history. The router walks an ordered decision table, records any session
//! transition, queues companion commands for the other stack and answers with a
//! verdict telling the originating stack whether to apply its default update.

use tokio::sync::watch;

use crate::app::state::{Orientation, SessionEvent, SessionState, SessionStore};
use crate::domain::intent::{IntentKind, NavigationIntent, StackId};
use crate::domain::route::{OverlayKind, RouteName};

/// Router's answer to the originating stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The stack must not alter its own history
    Suppress,
    /// The stack applies its default push/pop behaviour
    PassThrough,
}

/// Work the router asks the controller to carry out on a stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackCommand {
    ResetToRoot(StackId),
    Navigate {
        stack: StackId,
        intent: NavigationIntent,
    },
}

/// Decision table rule that produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ToggleSplit,
    OpenOverlay,
    MasterToDetail,
    MasterExit,
    EnterSplit,
    LeaveSplit,
    EnterCall,
    LeaveCall,
    LandOnContent,
    Default,
}

pub struct Router {
    session: SessionStore,
    pending: Vec<StackCommand>,
    last_rule: Option<Rule>,
}

impl Router {
    /// Creates a router with an empty command queue
    ///
    /// # Arguments
    /// * `initial` - Session state before the first intent
    pub fn new(initial: SessionState) -> Self {
        Self {
            session: SessionStore::new(initial),
            pending: Vec::new(),
            last_rule: None,
        }
    }

    /// Snapshot of the session state
    pub fn session(&self) -> SessionState {
        self.session.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    /// Rule that matched the most recent intent
    pub fn last_rule(&self) -> Option<Rule> {
        self.last_rule
    }

    /// Companion commands queued by the last call to `handle`
    pub fn drain_commands(&mut self) -> Vec<StackCommand> {
        std::mem::take(&mut self.pending)
    }

    /// Decides how an intent is applied
    ///
    /// # Arguments
    /// * `intent` - Intent about to be processed by a stack
    /// * `source` - Stack the intent originated from
    pub fn handle(&mut self, intent: &NavigationIntent, source: StackId) -> Verdict {
        let (rule, verdict) = self.decide(intent, source);
        tracing::debug!(
            kind = ?intent.kind,
            target = ?intent.target,
            ?source,
            ?rule,
            ?verdict,
            "routed intent"
        );
        self.last_rule = Some(rule);
        verdict
    }

    fn decide(&mut self, intent: &NavigationIntent, source: StackId) -> (Rule, Verdict) {
        if intent.kind == IntentKind::ToggleSplit {
            self.session
                .apply(SessionEvent::OverlayOpened(OverlayKind::Sidebar));
            return (Rule::ToggleSplit, Verdict::Suppress);
        }

        if let Some(kind) = intent.target.and_then(|target| target.overlay_kind()) {
            self.session.apply(SessionEvent::OverlayOpened(kind));
            return (Rule::OpenOverlay, Verdict::Suppress);
        }

        let target = intent.target;
        match source {
            StackId::Master => {
                if let Some(route) = target.filter(RouteName::is_detail) {
                    self.pending.push(StackCommand::ResetToRoot(StackId::Master));
                    self.pending.push(StackCommand::Navigate {
                        stack: StackId::Detail,
                        intent: NavigationIntent::navigate_with(route, intent.params.clone()),
                    });
                    self.session.apply(SessionEvent::OverlayDismissed);
                    return (Rule::MasterToDetail, Verdict::Suppress);
                }
                if target == Some(RouteName::EXIT_ROUTE) {
                    self.session.apply(SessionEvent::SplitExited);
                    return (Rule::MasterExit, Verdict::PassThrough);
                }
            }
            StackId::Detail => {
                if target == Some(RouteName::AUTHENTICATED_ROOT) {
                    // The master panel reappears; drop whatever a previous
                    // session left on it, such as the exit route.
                    self.pending.push(StackCommand::ResetToRoot(StackId::Master));
                    self.session.apply(SessionEvent::SplitEntered);
                    return (Rule::EnterSplit, Verdict::PassThrough);
                }
                if target == Some(RouteName::UNAUTHENTICATED_ROOT) {
                    self.session.apply(SessionEvent::SplitExited);
                    return (Rule::LeaveSplit, Verdict::PassThrough);
                }
                if target == Some(RouteName::CALL_ROUTE) {
                    self.session.apply(SessionEvent::CallStarted);
                    return (Rule::EnterCall, Verdict::PassThrough);
                }
                if intent.kind == IntentKind::Pop && self.session.current().in_call {
                    self.session.apply(SessionEvent::CallEnded);
                    return (Rule::LeaveCall, Verdict::PassThrough);
                }
                if target == Some(RouteName::PRIMARY_CONTENT) {
                    self.session.apply(SessionEvent::OverlayDismissed);
                    return (Rule::LandOnContent, Verdict::PassThrough);
                }
            }
        }

        (Rule::Default, Verdict::PassThrough)
    }

    /// Closes the open overlay; a no-op when none is visible
    pub fn dismiss_overlay(&mut self) -> bool {
        self.session.apply(SessionEvent::OverlayDismissed)
    }

    /// Records a new device orientation
    pub fn on_orientation_change(&mut self, orientation: Orientation) -> bool {
        self.session
            .apply(SessionEvent::OrientationChanged(orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Params;

    fn router() -> Router {
        Router::new(SessionState::new(Orientation::Portrait))
    }

    fn signed_in() -> Router {
        let mut router = router();
        router.handle(
            &NavigationIntent::navigate(RouteName::InsideStack),
            StackId::Detail,
        );
        router.drain_commands();
        router
    }

    #[test]
    fn toggle_split_opens_sidebar_from_either_stack() {
        for source in [StackId::Master, StackId::Detail] {
            let mut router = signed_in();
            let verdict = router.handle(&NavigationIntent::toggle_split(), source);
            assert_eq!(verdict, Verdict::Suppress);
            assert_eq!(router.session().overlay.shown(), Some(OverlayKind::Sidebar));
            assert!(router.drain_commands().is_empty());
        }
    }

    #[test]
    fn overlay_routes_open_overlays() {
        let mut router = signed_in();
        let verdict = router.handle(
            &NavigationIntent::navigate(RouteName::NewMessageView),
            StackId::Master,
        );
        assert_eq!(verdict, Verdict::Suppress);
        assert_eq!(router.last_rule(), Some(Rule::OpenOverlay));
        assert_eq!(router.session().overlay.shown(), Some(OverlayKind::NewMessage));

        router.handle(
            &NavigationIntent::navigate(RouteName::DirectoryView),
            StackId::Detail,
        );
        assert_eq!(router.session().overlay.shown(), Some(OverlayKind::Directory));
    }

    #[test]
    fn master_detail_route_redirects_to_detail_stack() {
        let mut router = signed_in();
        router.handle(&NavigationIntent::toggle_split(), StackId::Master);

        let mut params = Params::new();
        params.insert("rid".to_string(), "r1".to_string());
        let intent = NavigationIntent::navigate_with(RouteName::RoomView, params.clone());

        let verdict = router.handle(&intent, StackId::Master);
        assert_eq!(verdict, Verdict::Suppress);
        assert!(!router.session().overlay.visible);
        assert_eq!(
            router.drain_commands(),
            vec![
                StackCommand::ResetToRoot(StackId::Master),
                StackCommand::Navigate {
                    stack: StackId::Detail,
                    intent: NavigationIntent::navigate_with(RouteName::RoomView, params),
                },
            ]
        );
        assert!(router.drain_commands().is_empty());
    }

    #[test]
    fn master_exit_clears_split() {
        let mut router = signed_in();
        let verdict = router.handle(
            &NavigationIntent::navigate(RouteName::OnboardingView),
            StackId::Master,
        );
        assert_eq!(verdict, Verdict::PassThrough);
        assert!(!router.session().split_active);
    }

    #[test]
    fn detail_entering_inside_stack_sets_split() {
        let router = signed_in();
        assert!(router.session().split_active);
        assert_eq!(router.last_rule(), Some(Rule::EnterSplit));
    }

    #[test]
    fn entering_split_resets_master_stack() {
        let mut router = router();
        let verdict = router.handle(
            &NavigationIntent::navigate(RouteName::InsideStack),
            StackId::Detail,
        );
        assert_eq!(verdict, Verdict::PassThrough);
        assert_eq!(
            router.drain_commands(),
            vec![StackCommand::ResetToRoot(StackId::Master)]
        );
    }

    #[test]
    fn detail_outside_stack_leaves_split() {
        let mut router = signed_in();
        let verdict = router.handle(
            &NavigationIntent::navigate(RouteName::OutsideStack),
            StackId::Detail,
        );
        assert_eq!(verdict, Verdict::PassThrough);
        assert!(!router.session().split_active);
    }

    #[test]
    fn call_flag_toggles_once() {
        let mut router = signed_in();
        router.handle(
            &NavigationIntent::navigate(RouteName::JitsiMeetView),
            StackId::Detail,
        );
        assert!(router.session().in_call);

        assert_eq!(
            router.handle(&NavigationIntent::pop(), StackId::Detail),
            Verdict::PassThrough
        );
        assert_eq!(router.last_rule(), Some(Rule::LeaveCall));
        assert!(!router.session().in_call);

        router.handle(&NavigationIntent::pop(), StackId::Detail);
        assert_eq!(router.last_rule(), Some(Rule::Default));
        assert!(!router.session().in_call);
    }

    #[test]
    fn master_pop_does_not_end_call() {
        let mut router = signed_in();
        router.handle(
            &NavigationIntent::navigate(RouteName::JitsiMeetView),
            StackId::Detail,
        );
        router.handle(&NavigationIntent::pop(), StackId::Master);
        assert!(router.session().in_call);
    }

    #[test]
    fn landing_on_room_view_closes_overlay() {
        let mut router = signed_in();
        router.handle(
            &NavigationIntent::navigate(RouteName::DirectoryView),
            StackId::Master,
        );
        let verdict = router.handle(
            &NavigationIntent::navigate(RouteName::RoomView),
            StackId::Detail,
        );
        assert_eq!(verdict, Verdict::PassThrough);
        assert!(!router.session().overlay.visible);
    }

    #[test]
    fn unmatched_intents_pass_through() {
        let mut router = signed_in();
        let before = router.session();
        let cases = [
            (NavigationIntent::navigate(RouteName::SelectedUsersView), StackId::Master),
            (NavigationIntent::navigate(RouteName::RoomInfoView), StackId::Detail),
            (NavigationIntent::pop(), StackId::Master),
            (NavigationIntent::pop(), StackId::Detail),
        ];
        for (intent, source) in cases {
            assert_eq!(router.handle(&intent, source), Verdict::PassThrough);
            assert_eq!(router.last_rule(), Some(Rule::Default));
        }
        assert_eq!(router.session(), before);
        assert!(router.drain_commands().is_empty());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut router = signed_in();
        assert!(!router.dismiss_overlay());
        router.handle(&NavigationIntent::toggle_split(), StackId::Master);
        assert!(router.dismiss_overlay());
        let after = router.session();
        assert!(!router.dismiss_overlay());
        assert_eq!(router.session(), after);
    }

    #[test]
    fn orientation_does_not_affect_routing() {
        let mut router = signed_in();
        assert!(router.on_orientation_change(Orientation::Landscape));
        assert_eq!(router.session().orientation, Orientation::Landscape);
        let verdict = router.handle(
            &NavigationIntent::navigate(RouteName::RoomView),
            StackId::Master,
        );
        assert_eq!(verdict, Verdict::Suppress);
    }
}
