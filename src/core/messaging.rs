//=========================================================================
// Outbound Messaging Link
//=========================================================================
//
// Builds the chat deep-link that every "order" surface opens.
//
//   message ── empty? → "Hello"
//           └─ percent-encode (URI component set)
//   number valid → https://wa.me/{digits}?text={encoded}
//   otherwise    → channel URL
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

//=== Constants ===========================================================

pub const DEFAULT_PHONE_NUMBER: &str = "9035371303";
pub const DEFAULT_CHANNEL_URL: &str = "https://whatsapp.com/channel/0029Vb2GVo86WaKgwF7Mfu1X";

/// Message used when the caller supplies an empty one.
pub const DEFAULT_MESSAGE: &str = "Hello";

/// Minimum digit count for a usable phone number.
pub const MIN_NUMBER_DIGITS: usize = 5;

/// Everything except the URI component unreserved marks is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

//=== Encoding ============================================================

/// Percent-encodes `raw` as a URI component.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Reverses [`encode_component`]. Invalid UTF-8 sequences are replaced.
pub fn decode_component(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

//=== Phone Number ========================================================

/// Returns the dialable digits of `raw`, or `None` if it is not a usable
/// number (optional leading `+`, then ASCII digits only, at least
/// [`MIN_NUMBER_DIGITS`] of them).
pub fn normalize_number(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let valid = digits.len() >= MIN_NUMBER_DIGITS && digits.bytes().all(|b| b.is_ascii_digit());
    valid.then_some(digits)
}

//=== MessagingLink =======================================================

/// Destination for outbound order messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingLink {
    phone_number: String,
    channel_url: String,
}

impl MessagingLink {
    pub fn new(phone_number: impl Into<String>, channel_url: impl Into<String>) -> Self {
        let link = Self {
            phone_number: phone_number.into(),
            channel_url: channel_url.into(),
        };
        if normalize_number(&link.phone_number).is_none() {
            warn!(
                "Phone number {:?} is not dialable, orders will open the channel",
                link.phone_number
            );
        }
        link
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn channel_url(&self) -> &str {
        &self.channel_url
    }

    /// URL that opens a chat pre-filled with `message`.
    pub fn url_for(&self, message: &str) -> String {
        let message = if message.is_empty() { DEFAULT_MESSAGE } else { message };

        match normalize_number(&self.phone_number) {
            Some(digits) => {
                let url = format!("https://wa.me/{}?text={}", digits, encode_component(message));
                debug!("Messaging link: {}", url);
                url
            }
            None => {
                debug!("Messaging link falls back to channel");
                self.channel_url.clone()
            }
        }
    }
}

impl Default for MessagingLink {
    fn default() -> Self {
        Self::new(DEFAULT_PHONE_NUMBER, DEFAULT_CHANNEL_URL)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
