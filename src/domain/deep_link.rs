//! Deep link parsing
//!
//! Turns an OS-delivered URL into a navigation target. Parsing never fails
//! loudly: anything that is not a `room?` or `auth?` link yields `None`.

use serde::{Deserialize, Serialize};

use crate::domain::intent::{NavigationIntent, Params};
use crate::domain::route::RouteName;

/// Scheme/host prefixes stripped before matching
pub const DEFAULT_PREFIXES: [&str; 2] = ["rocketchat://", "https://go.rocket.chat/"];

/// Screen a deep link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkScreen {
    Room,
    Auth,
}

impl LinkScreen {
    fn from_path(path: &str) -> Option<Self> {
        match path {
            "room" => Some(LinkScreen::Room),
            "auth" => Some(LinkScreen::Auth),
            _ => None,
        }
    }
}

/// Parsed deep link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkTarget {
    pub screen: LinkScreen,
    pub params: Params,
}

impl DeepLinkTarget {
    /// Intent the router receives for this link
    pub fn to_intent(&self) -> NavigationIntent {
        let route = match self.screen {
            LinkScreen::Room => RouteName::RoomView,
            LinkScreen::Auth => RouteName::AuthLoading,
        };
        NavigationIntent::navigate_with(route, self.params.clone())
    }
}

/// Parser configured with the prefixes this build answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkParser {
    prefixes: Vec<String>,
}

impl Default for DeepLinkParser {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect())
    }
}

impl DeepLinkParser {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Parses a raw URL into a target
    ///
    /// # Returns
    /// `None` for anything that is not `<prefix>room?...` or `<prefix>auth?...`
    /// with a non-empty query
    pub fn parse(&self, link: &str) -> Option<DeepLinkTarget> {
        let remainder = self
            .prefixes
            .iter()
            .find_map(|prefix| link.strip_prefix(prefix.as_str()))
            .unwrap_or(link);

        let (path, query) = remainder.split_once('?')?;
        let screen = LinkScreen::from_path(path)?;

        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let params: Params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        Some(DeepLinkTarget { screen, params })
    }
}

/// Parses with the default prefixes
pub fn parse_deep_link(url: &str) -> Option<DeepLinkTarget> {
    DeepLinkParser::default().parse(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_parser() -> DeepLinkParser {
        DeepLinkParser::new(vec![
            "rocketchat://".to_string(),
            "https://go.example.com/".to_string(),
        ])
    }

    #[test]
    fn parses_room_link_with_scheme_prefix() {
        let target = example_parser()
            .parse("rocketchat://room?rid=abc&token=xyz")
            .expect("room link");
        assert_eq!(target.screen, LinkScreen::Room);
        assert_eq!(target.params.get("rid").map(String::as_str), Some("abc"));
        assert_eq!(target.params.get("token").map(String::as_str), Some("xyz"));
        assert_eq!(target.params.len(), 2);
    }

    #[test]
    fn parses_auth_link_with_host_prefix() {
        let target = example_parser()
            .parse("https://go.example.com/auth?host=open.example.com&token=t1")
            .expect("auth link");
        assert_eq!(target.screen, LinkScreen::Auth);
        assert_eq!(
            target.params.get("host").map(String::as_str),
            Some("open.example.com")
        );
    }

    #[test]
    fn unknown_paths_yield_nothing() {
        let parser = example_parser();
        assert_eq!(parser.parse("https://go.example.com/somethingelse"), None);
        assert_eq!(parser.parse("https://go.example.com/rooms?rid=1"), None);
        assert_eq!(parser.parse("rocketchat://room"), None);
        assert_eq!(parser.parse("https://other.example.com/room?rid=1"), None);
    }

    #[test]
    fn empty_or_blank_query_yields_nothing() {
        let parser = example_parser();
        assert_eq!(parser.parse(""), None);
        assert_eq!(parser.parse("rocketchat://room?"), None);
        assert_eq!(parser.parse("rocketchat://auth?   "), None);
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let target = example_parser()
            .parse("rocketchat://room?name=general%20chat&path=a%2Fb&q=x+y")
            .expect("room link");
        assert_eq!(target.params.get("name").map(String::as_str), Some("general chat"));
        assert_eq!(target.params.get("path").map(String::as_str), Some("a/b"));
        assert_eq!(target.params.get("q").map(String::as_str), Some("x y"));
    }

    #[test]
    fn malformed_escapes_do_not_panic() {
        let target = example_parser()
            .parse("rocketchat://room?rid=%ZZ%&%FF=1")
            .expect("still a room link");
        assert_eq!(target.screen, LinkScreen::Room);
    }

    #[test]
    fn default_parser_accepts_builtin_prefixes() {
        assert!(parse_deep_link("https://go.rocket.chat/room?rid=1").is_some());
        assert!(parse_deep_link("rocketchat://auth?host=a").is_some());
    }

    #[test]
    fn targets_map_to_intents() {
        let room = example_parser().parse("rocketchat://room?rid=42").expect("room");
        let intent = room.to_intent();
        assert!(intent.targets(RouteName::RoomView));
        assert_eq!(intent.params.get("rid").map(String::as_str), Some("42"));

        let auth = example_parser().parse("rocketchat://auth?host=h").expect("auth");
        assert!(auth.to_intent().targets(RouteName::AuthLoading));
    }
}
