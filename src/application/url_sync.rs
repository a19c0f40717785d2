//! Keeps the page URL's query string in step with the rendered molecule.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::application::ports::History;
use crate::domain::molecule::{DEFAULT_NAME, DEFAULT_SMILES, RenderRequest};
use crate::domain::snapshot::RenderSnapshot;

pub const SMILES_PARAM: &str = "smiles";
pub const NAME_PARAM: &str = "name";

#[derive(Clone)]
pub struct UrlSynchronizer {
    history: Arc<dyn History>,
}

impl UrlSynchronizer {
    pub fn new(history: Arc<dyn History>) -> Self {
        Self { history }
    }

    pub fn location(&self) -> Url {
        self.history.location()
    }

    /// Build the initial request from the current location's query.
    pub fn load(&self) -> RenderRequest {
        request_from_url(&self.history.location())
    }

    /// Replace the current history entry with the snapshot's share URL.
    pub fn write(&self, snapshot: &RenderSnapshot) {
        let url = self.share_url(snapshot);
        debug!(
            target = "application::url_sync",
            op = "url_sync::write",
            url = %url,
            "Replacing history entry"
        );
        self.history.replace_state(url);
    }

    /// The URL `write` would install, without touching history.
    pub fn share_url(&self, snapshot: &RenderSnapshot) -> Url {
        share_url_for(&self.history.location(), snapshot)
    }
}

pub fn request_from_url(url: &Url) -> RenderRequest {
    let smiles = first_non_empty(url, SMILES_PARAM);
    let name = first_non_empty(url, NAME_PARAM);

    match smiles {
        Some(smiles) => RenderRequest {
            smiles,
            display_name: name,
        },
        None => RenderRequest::new(DEFAULT_SMILES).with_name(DEFAULT_NAME),
    }
}

/// Apply the snapshot to `base`'s query string. Unrelated parameters keep
/// their order; `smiles` and `name` are set in place or appended.
pub fn share_url_for(base: &Url, snapshot: &RenderSnapshot) -> Url {
    let mut pairs: Vec<(String, String)> = base.query_pairs().into_owned().collect();

    set_param(&mut pairs, SMILES_PARAM, &snapshot.smiles);
    match snapshot.display_name.as_deref() {
        Some(name) if !name.is_empty() => set_param(&mut pairs, NAME_PARAM, name),
        _ => pairs.retain(|(key, _)| key != NAME_PARAM),
    }

    let mut url = base.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}

fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(existing, current)| {
        if existing != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *current = value.to_string();
        true
    });
    if !seen {
        pairs.push((key.to_string(), value.to_string()));
    }
}

fn first_non_empty(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
