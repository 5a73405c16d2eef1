//! Share-link construction.
//!
//! Nothing here performs I/O; the host decides how to open a window or
//! reach the clipboard.

use crate::error::ShareError;
use std::fmt::Write;
use std::str::FromStr;

const POPUP_FEATURES: &str = "width=600,height=400";

const INSTAGRAM_INSTRUCTIONS: &str = "Link copied! 📋\n\nShare on Instagram:\n1. Open Instagram app\n2. Create a new Story or Post\n3. Add text with this link\n4. Share with your followers! 🎉";

/// Share targets, numbered in button order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Tweet intent popup.
    Twitter = 0,
    /// No web intent; copy the link instead.
    Instagram = 1,
    /// wa.me text link.
    WhatsApp = 2,
    /// LinkedIn share-offsite popup.
    LinkedIn = 3,
}

impl Platform {
    /// All platforms in button order.
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::WhatsApp,
        Platform::LinkedIn,
    ];

    /// Position of the platform's button in the share row.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The `data-platform` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::WhatsApp => "whatsapp",
            Platform::LinkedIn => "linkedin",
        }
    }
}

impl FromStr for Platform {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ShareError::UnknownPlatform(s.to_string()))
    }
}

/// What gets shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareData {
    /// Page title.
    pub title: String,
    /// Message body.
    pub text: String,
    /// Link to the page.
    pub url: String,
}

impl ShareData {
    /// The default new-year message pointing at `url`.
    pub fn new_year(url: impl Into<String>) -> Self {
        Self {
            title: "Happy New Year 2026!".into(),
            text: "Wishing you an amazing 2026 filled with joy, success, and endless possibilities!"
                .into(),
            url: url.into(),
        }
    }
}

/// What the host should do for a share click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareAction {
    /// Open `url` in a new window with optional window features.
    OpenWindow {
        /// Fully encoded target URL.
        url: String,
        /// `window.open` feature string.
        features: Option<&'static str>,
    },
    /// Copy `url` and show `instructions`.
    CopyLink {
        /// Link to copy.
        url: String,
        /// Message for the user.
        instructions: &'static str,
    },
}

/// Build the action for one platform.
pub fn share_action(platform: Platform, data: &ShareData) -> ShareAction {
    match platform {
        Platform::Twitter => ShareAction::OpenWindow {
            url: format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode_uri_component(&data.text),
                encode_uri_component(&data.url)
            ),
            features: Some(POPUP_FEATURES),
        },
        Platform::Instagram => ShareAction::CopyLink {
            url: data.url.clone(),
            instructions: INSTAGRAM_INSTRUCTIONS,
        },
        Platform::WhatsApp => ShareAction::OpenWindow {
            url: format!(
                "https://wa.me/?text={}",
                encode_uri_component(&format!("{} {}", data.text, data.url))
            ),
            features: None,
        },
        Platform::LinkedIn => ShareAction::OpenWindow {
            url: format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                encode_uri_component(&data.url)
            ),
            features: Some(POPUP_FEATURES),
        },
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`.
///
/// Unreserved: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_js() {
        assert_eq!(encode_uri_component("a b&c=d/e?"), "a%20b%26c%3Dd%2Fe%3F");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("https://x.io/#a"), "https%3A%2F%2Fx.io%2F%23a");
    }

    #[test]
    fn test_twitter_link() {
        let data = ShareData {
            title: String::new(),
            text: "Hi there!".into(),
            url: "https://a.b/c".into(),
        };
        assert_eq!(
            share_action(Platform::Twitter, &data),
            ShareAction::OpenWindow {
                url: "https://twitter.com/intent/tweet?text=Hi%20there!&url=https%3A%2F%2Fa.b%2Fc"
                    .into(),
                features: Some("width=600,height=400"),
            }
        );
    }

    #[test]
    fn test_whatsapp_joins_text_and_url() {
        let data = ShareData {
            title: String::new(),
            text: "Hi".into(),
            url: "https://a.b".into(),
        };
        assert_eq!(
            share_action(Platform::WhatsApp, &data),
            ShareAction::OpenWindow {
                url: "https://wa.me/?text=Hi%20https%3A%2F%2Fa.b".into(),
                features: None,
            }
        );
    }

    #[test]
    fn test_linkedin_and_instagram() {
        let data = ShareData::new_year("https://a.b");
        match share_action(Platform::LinkedIn, &data) {
            ShareAction::OpenWindow { url, features } => {
                assert_eq!(url, "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fa.b");
                assert_eq!(features, Some("width=600,height=400"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match share_action(Platform::Instagram, &data) {
            ShareAction::CopyLink { url, instructions } => {
                assert_eq!(url, "https://a.b");
                assert!(instructions.starts_with("Link copied!"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_index_follows_button_order() {
        for (i, platform) in Platform::ALL.into_iter().enumerate() {
            assert_eq!(platform.index(), i);
        }
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("whatsapp".parse::<Platform>(), Ok(Platform::WhatsApp));
        assert_eq!("LinkedIn".parse::<Platform>(), Ok(Platform::LinkedIn));
        assert_eq!(
            "myspace".parse::<Platform>(),
            Err(ShareError::UnknownPlatform("myspace".into()))
        );
    }
}
