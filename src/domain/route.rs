//! Route catalogue and static classification
//!
//! Every screen the shell knows about is a `RouteName`. Each route belongs to
//! exactly one `RouteClass`, fixed at design time by `ROUTE_TABLE`. The table
//! is validated once when the controller is built so that a route added to the
//! enum without a class is caught before any intent is routed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a route is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteClass {
    /// Rendered inside the detail (content) stack
    Detail,
    /// Rendered inside the master (list/sidebar) stack
    Master,
    /// Never pushed; shown as a transient overlay
    Overlay,
}

/// Overlay surfaces the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OverlayKind {
    #[default]
    None,
    NewMessage,
    Directory,
    Sidebar,
}

/// Identifier of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RouteName {
    // Switch roots
    AuthLoading,
    InsideStack,
    OutsideStack,
    SetUsernameStack,

    // Unauthenticated flow
    OnboardingView,
    NewServerView,
    LoginSignupView,
    LoginView,
    ForgotPasswordView,
    RegisterView,
    LegalView,
    AuthenticationWebView,

    // Content
    RoomView,
    RoomActionsView,
    RoomInfoView,
    RoomInfoEditView,
    RoomMembersView,
    SearchMessagesView,
    ThreadMessagesView,
    MessagesView,
    AutoTranslateView,
    ReadReceiptsView,
    TableView,
    NotificationPrefView,
    CreateChannelView,
    ProfileView,
    SettingsView,
    LanguageView,
    AdminPanelView,
    JitsiMeetView,

    // List panel
    RoomsListView,
    SelectedUsersView,

    // Overlays
    NewMessageView,
    DirectoryView,
    SidebarView,
}

impl RouteName {
    pub const ALL: [RouteName; 35] = [
        RouteName::AuthLoading,
        RouteName::InsideStack,
        RouteName::OutsideStack,
        RouteName::SetUsernameStack,
        RouteName::OnboardingView,
        RouteName::NewServerView,
        RouteName::LoginSignupView,
        RouteName::LoginView,
        RouteName::ForgotPasswordView,
        RouteName::RegisterView,
        RouteName::LegalView,
        RouteName::AuthenticationWebView,
        RouteName::RoomView,
        RouteName::RoomActionsView,
        RouteName::RoomInfoView,
        RouteName::RoomInfoEditView,
        RouteName::RoomMembersView,
        RouteName::SearchMessagesView,
        RouteName::ThreadMessagesView,
        RouteName::MessagesView,
        RouteName::AutoTranslateView,
        RouteName::ReadReceiptsView,
        RouteName::TableView,
        RouteName::NotificationPrefView,
        RouteName::CreateChannelView,
        RouteName::ProfileView,
        RouteName::SettingsView,
        RouteName::LanguageView,
        RouteName::AdminPanelView,
        RouteName::JitsiMeetView,
        RouteName::RoomsListView,
        RouteName::SelectedUsersView,
        RouteName::NewMessageView,
        RouteName::DirectoryView,
        RouteName::SidebarView,
    ];

    /// Route that enters the authenticated split view
    pub const AUTHENTICATED_ROOT: RouteName = RouteName::InsideStack;
    /// Route that leaves the authenticated area from the master stack
    pub const EXIT_ROUTE: RouteName = RouteName::OnboardingView;
    /// Route of the unauthenticated switch root
    pub const UNAUTHENTICATED_ROOT: RouteName = RouteName::OutsideStack;
    /// Call screen
    pub const CALL_ROUTE: RouteName = RouteName::JitsiMeetView;
    /// Primary content screen
    pub const PRIMARY_CONTENT: RouteName = RouteName::RoomView;
    /// First frame of the master stack
    pub const MASTER_ROOT: RouteName = RouteName::RoomsListView;
    /// First frame of the detail stack
    pub const DETAIL_ROOT: RouteName = RouteName::AuthLoading;

    /// Name used in logs and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::AuthLoading => "AuthLoading",
            RouteName::InsideStack => "InsideStack",
            RouteName::OutsideStack => "OutsideStack",
            RouteName::SetUsernameStack => "SetUsernameStack",
            RouteName::OnboardingView => "OnboardingView",
            RouteName::NewServerView => "NewServerView",
            RouteName::LoginSignupView => "LoginSignupView",
            RouteName::LoginView => "LoginView",
            RouteName::ForgotPasswordView => "ForgotPasswordView",
            RouteName::RegisterView => "RegisterView",
            RouteName::LegalView => "LegalView",
            RouteName::AuthenticationWebView => "AuthenticationWebView",
            RouteName::RoomView => "RoomView",
            RouteName::RoomActionsView => "RoomActionsView",
            RouteName::RoomInfoView => "RoomInfoView",
            RouteName::RoomInfoEditView => "RoomInfoEditView",
            RouteName::RoomMembersView => "RoomMembersView",
            RouteName::SearchMessagesView => "SearchMessagesView",
            RouteName::ThreadMessagesView => "ThreadMessagesView",
            RouteName::MessagesView => "MessagesView",
            RouteName::AutoTranslateView => "AutoTranslateView",
            RouteName::ReadReceiptsView => "ReadReceiptsView",
            RouteName::TableView => "TableView",
            RouteName::NotificationPrefView => "NotificationPrefView",
            RouteName::CreateChannelView => "CreateChannelView",
            RouteName::ProfileView => "ProfileView",
            RouteName::SettingsView => "SettingsView",
            RouteName::LanguageView => "LanguageView",
            RouteName::AdminPanelView => "AdminPanelView",
            RouteName::JitsiMeetView => "JitsiMeetView",
            RouteName::RoomsListView => "RoomsListView",
            RouteName::SelectedUsersView => "SelectedUsersView",
            RouteName::NewMessageView => "NewMessageView",
            RouteName::DirectoryView => "DirectoryView",
            RouteName::SidebarView => "SidebarView",
        }
    }

    /// Looks up this route's class in the static table
    ///
    /// Falls back to `Detail` for a route missing from the table; the
    /// controller refuses to start with such a table, so the fallback is
    /// never observed in a running shell.
    pub fn class(&self) -> RouteClass {
        ROUTE_TABLE
            .iter()
            .find(|(route, _)| route == self)
            .map(|(_, class)| *class)
            .unwrap_or(RouteClass::Detail)
    }

    /// Routes rendered in the content panel
    pub fn is_detail(&self) -> bool {
        self.class() == RouteClass::Detail
    }

    /// Routes rendered in the list panel
    pub fn is_master(&self) -> bool {
        self.class() == RouteClass::Master
    }

    /// Routes rendered as a form sheet above both panels
    pub fn is_overlay(&self) -> bool {
        self.class() == RouteClass::Overlay
    }

    /// Overlay surface shown for an overlay route
    pub fn overlay_kind(&self) -> Option<OverlayKind> {
        match self {
            RouteName::NewMessageView => Some(OverlayKind::NewMessage),
            RouteName::DirectoryView => Some(OverlayKind::Directory),
            RouteName::SidebarView => Some(OverlayKind::Sidebar),
            _ => None,
        }
    }

    /// Switch roots replace the detail history instead of being pushed
    pub fn is_switch_root(&self) -> bool {
        matches!(
            self,
            RouteName::AuthLoading
                | RouteName::InsideStack
                | RouteName::OutsideStack
                | RouteName::SetUsernameStack
        )
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route name: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for RouteName {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteName::ALL
            .iter()
            .copied()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

/// Design-time classification of every route
pub static ROUTE_TABLE: &[(RouteName, RouteClass)] = &[
    (RouteName::AuthLoading, RouteClass::Detail),
    (RouteName::InsideStack, RouteClass::Detail),
    (RouteName::OutsideStack, RouteClass::Detail),
    (RouteName::SetUsernameStack, RouteClass::Detail),
    // The sidebar's sign-out lands here; it must stay out of the detail
    // class or the master redirect would swallow it.
    (RouteName::OnboardingView, RouteClass::Master),
    (RouteName::NewServerView, RouteClass::Detail),
    (RouteName::LoginSignupView, RouteClass::Detail),
    (RouteName::LoginView, RouteClass::Detail),
    (RouteName::ForgotPasswordView, RouteClass::Detail),
    (RouteName::RegisterView, RouteClass::Detail),
    (RouteName::LegalView, RouteClass::Detail),
    (RouteName::AuthenticationWebView, RouteClass::Detail),
    (RouteName::RoomView, RouteClass::Detail),
    (RouteName::RoomActionsView, RouteClass::Detail),
    (RouteName::RoomInfoView, RouteClass::Detail),
    (RouteName::RoomInfoEditView, RouteClass::Detail),
    (RouteName::RoomMembersView, RouteClass::Detail),
    (RouteName::SearchMessagesView, RouteClass::Detail),
    (RouteName::ThreadMessagesView, RouteClass::Detail),
    (RouteName::MessagesView, RouteClass::Detail),
    (RouteName::AutoTranslateView, RouteClass::Detail),
    (RouteName::ReadReceiptsView, RouteClass::Detail),
    (RouteName::TableView, RouteClass::Detail),
    (RouteName::NotificationPrefView, RouteClass::Detail),
    (RouteName::CreateChannelView, RouteClass::Detail),
    (RouteName::ProfileView, RouteClass::Detail),
    (RouteName::SettingsView, RouteClass::Detail),
    (RouteName::LanguageView, RouteClass::Detail),
    (RouteName::AdminPanelView, RouteClass::Detail),
    (RouteName::JitsiMeetView, RouteClass::Detail),
    (RouteName::RoomsListView, RouteClass::Master),
    (RouteName::SelectedUsersView, RouteClass::Master),
    (RouteName::NewMessageView, RouteClass::Overlay),
    (RouteName::DirectoryView, RouteClass::Overlay),
    (RouteName::SidebarView, RouteClass::Overlay),
];

/// Problems found when validating a classification table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route {0} has no class")]
    Unclassified(RouteName),
    #[error("route {0} is classified more than once")]
    Duplicate(RouteName),
    #[error("overlay route {0} has no overlay surface")]
    OverlayWithoutSurface(RouteName),
    #[error("root route {route} must be a {expected:?} route")]
    MisplacedRoot { route: RouteName, expected: RouteClass },
}

/// Checks that every route is classified exactly once
///
/// # Arguments
/// * `table` - Classification table to validate
pub fn validate_route_table(table: &[(RouteName, RouteClass)]) -> Result<(), RouteTableError> {
    for route in RouteName::ALL {
        let entries: Vec<RouteClass> = table
            .iter()
            .filter(|(candidate, _)| *candidate == route)
            .map(|(_, class)| *class)
            .collect();

        match entries.as_slice() {
            [] => return Err(RouteTableError::Unclassified(route)),
            [RouteClass::Overlay] if route.overlay_kind().is_none() => {
                return Err(RouteTableError::OverlayWithoutSurface(route));
            }
            [_] => {}
            _ => return Err(RouteTableError::Duplicate(route)),
        }
    }

    let class_of = |route: RouteName| {
        table
            .iter()
            .find(|(candidate, _)| *candidate == route)
            .map(|(_, class)| *class)
    };
    for (route, expected) in [
        (RouteName::MASTER_ROOT, RouteClass::Master),
        (RouteName::DETAIL_ROOT, RouteClass::Detail),
    ] {
        if class_of(route) != Some(expected) {
            return Err(RouteTableError::MisplacedRoot { route, expected });
        }
    }

    Ok(())
}
