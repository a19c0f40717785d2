//! PubChem PUG-REST name resolution.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::http::join_segments;
use crate::application::ports::{LookupError, NameResolver};

pub const DEFAULT_PUBCHEM_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<CompoundProperties>,
}

/// PubChem has renamed its SMILES properties over time; accept all spellings.
#[derive(Debug, Deserialize)]
struct CompoundProperties {
    #[serde(rename = "CanonicalSMILES")]
    canonical: Option<String>,
    #[serde(rename = "IsomericSMILES")]
    isomeric: Option<String>,
    #[serde(rename = "ConnectivitySMILES")]
    connectivity: Option<String>,
}

impl CompoundProperties {
    fn into_smiles(self) -> Option<String> {
        [self.canonical, self.isomeric, self.connectivity]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

#[derive(Clone)]
pub struct PubChemResolver {
    client: Client,
    base: Url,
}

impl PubChemResolver {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    fn lookup_url(&self, name: &str) -> Result<Url, LookupError> {
        join_segments(
            &self.base,
            &["compound", "name", name, "property", "CanonicalSMILES", "JSON"],
        )
        .map_err(LookupError::Network)
    }
}

#[async_trait]
impl NameResolver for PubChemResolver {
    async fn resolve(&self, name: &str) -> Result<String, LookupError> {
        let url = self.lookup_url(name)?;
        let started_at = Instant::now();

        let response = self.client.get(url).send().await.map_err(|err| {
            warn!(
                target = "infra::pubchem",
                op = "pubchem::resolve",
                result = "network_error",
                name,
                error = %err,
                "PubChem request failed"
            );
            LookupError::Network(err.to_string())
        })?;

        let status = response.status();
        debug!(
            target = "infra::pubchem",
            op = "pubchem::resolve",
            name,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "PubChem responded"
        );

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Failed {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| LookupError::Network(err.to_string()))?;
        smiles_from_body(&body)
    }
}

fn smiles_from_body(body: &str) -> Result<String, LookupError> {
    let parsed: LookupResponse =
        serde_json::from_str(body).map_err(|_| LookupError::NoUsableData)?;
    parsed
        .property_table
        .properties
        .into_iter()
        .next()
        .and_then(CompoundProperties::into_smiles)
        .ok_or(LookupError::NoUsableData)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    fn resolver(server: &MockServer) -> PubChemResolver {
        let base = Url::parse(&server.url("/rest/pug")).expect("base url");
        PubChemResolver::new(Client::new(), base)
    }

    #[test]
    fn first_non_empty_smiles_property_wins() {
        let body = r#"{"PropertyTable":{"Properties":[{"CID":2244,"CanonicalSMILES":"","ConnectivitySMILES":"CC(=O)OC1=CC=CC=C1C(=O)O"}]}}"#;
        assert_eq!(
            smiles_from_body(body).expect("smiles"),
            "CC(=O)OC1=CC=CC=C1C(=O)O"
        );
    }

    #[test]
    fn empty_or_malformed_tables_have_no_usable_data() {
        for body in [
            r#"{"PropertyTable":{"Properties":[]}}"#,
            r#"{"PropertyTable":{"Properties":[{"CID":1}]}}"#,
            r#"{"Fault":{"Code":"PUGREST.BadRequest"}}"#,
            "not json",
        ] {
            assert!(
                matches!(smiles_from_body(body), Err(LookupError::NoUsableData)),
                "{body}"
            );
        }
    }

    #[tokio::test]
    async fn resolves_name_through_property_endpoint() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/pug/compound/name/aspirin/property/CanonicalSMILES/JSON");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"PropertyTable":{"Properties":[{"CID":2244,"CanonicalSMILES":"CC(=O)OC1=CC=CC=C1C(=O)O"}]}}"#);
        });

        let smiles = resolver(&server).resolve("aspirin").await.expect("resolved");

        mock.assert();
        assert_eq!(smiles, "CC(=O)OC1=CC=CC=C1C(=O)O");
    }

    #[tokio::test]
    async fn not_found_and_other_statuses_are_distinguished() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/rest/pug/compound/name/xyzzyplugh/property/CanonicalSMILES/JSON");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/rest/pug/compound/name/busy/property/CanonicalSMILES/JSON");
            then.status(503);
        });

        let resolver = resolver(&server);
        assert!(matches!(
            resolver.resolve("xyzzyplugh").await,
            Err(LookupError::NotFound)
        ));
        assert!(matches!(
            resolver.resolve("busy").await,
            Err(LookupError::Failed { status: 503 })
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let base = Url::parse("http://127.0.0.1:9/rest/pug").expect("url");
        let resolver = PubChemResolver::new(Client::new(), base);

        assert!(matches!(
            resolver.resolve("water").await,
            Err(LookupError::Network(_))
        ));
    }
}
