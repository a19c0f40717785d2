use std::sync::{PoisonError, RwLock};

use url::Url;

use crate::application::ports::History;

/// Single-entry history holding the current page location.
#[derive(Debug)]
pub struct InMemoryHistory {
    location: RwLock<Url>,
}

impl InMemoryHistory {
    pub fn new(location: Url) -> Self {
        Self {
            location: RwLock::new(location),
        }
    }
}

impl History for InMemoryHistory {
    fn location(&self) -> Url {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_state(&self, url: Url) {
        *self
            .location
            .write()
            .unwrap_or_else(PoisonError::into_inner) = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_state_overwrites_location() {
        let history = InMemoryHistory::new(Url::parse("http://localhost:8080/").expect("url"));
        history.replace_state(Url::parse("http://localhost:8080/?smiles=O").expect("url"));
        assert_eq!(history.location().query(), Some("smiles=O"));
    }
}
