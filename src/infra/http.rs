//! Shared HTTP plumbing for the PubChem and depiction clients.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::error::InfraError;

pub fn user_agent() -> &'static str {
    concat!("chemsketch/", env!("CARGO_PKG_VERSION"))
}

pub fn build_client(timeout: Duration) -> Result<Client, InfraError> {
    Client::builder()
        .user_agent(user_agent())
        .timeout(timeout)
        .build()
        .map_err(|err| InfraError::http(err.to_string()))
}

/// Append percent-encoded path segments to `base`, ignoring a trailing slash.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| format!("`{base}` cannot be used as a base URL"))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_encoded_and_trailing_slash_ignored() {
        let base = Url::parse("https://example.test/rest/pug/").expect("url");
        let url = join_segments(&base, &["compound", "name", "acetic acid/2"]).expect("join");
        assert_eq!(
            url.as_str(),
            "https://example.test/rest/pug/compound/name/acetic%20acid%2F2"
        );
    }

    #[test]
    fn opaque_base_is_rejected() {
        let base = Url::parse("mailto:someone@example.test").expect("url");
        assert!(join_segments(&base, &["x"]).is_err());
    }
}
