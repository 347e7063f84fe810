//! Unsubscribe tokens and links appended to every campaign message.
//!
//! The token is the lowercased address in URL-safe base64. It is an encoding,
//! not a signature: anyone can mint a valid token for any address.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use url::form_urlencoded;

pub const DEFAULT_UNSUBSCRIBE_BASE_URL: &str = "https://example.com/unsubscribe";

pub fn unsubscribe_token(email: &str) -> String {
    URL_SAFE_NO_PAD.encode(email.to_lowercase())
}

/// Append `email` and `token` query parameters to `base`, which may already carry a query.
pub fn unsubscribe_link(base: &str, email: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!(
        "{base}{separator}email={}&token={}",
        encode_component(email),
        encode_component(token)
    )
}

pub fn unsubscribe_footer(link: &str) -> String {
    format!("\n\n---\nIf you no longer want outreach emails, unsubscribe here: {link}")
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
