//! Figma REST API client and share-link parsing.
//!
//! Only one endpoint is used: `GET /v1/files/:key/nodes?ids=:id`, which
//! returns the subtree rooted at the requested node. The access token is
//! passed in at construction time and sent as `X-Figma-Token`.

mod link;

use std::time::Duration;

use figmacopy_shared::{DesignNode, FigmaConfig, FigmaCopyError, NodesResponse, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

pub use link::parse_figma_url;

/// Header Figma expects personal access tokens in.
const TOKEN_HEADER: &str = "X-Figma-Token";

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("figmacopy/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// FigmaClient
// ---------------------------------------------------------------------------

/// Thin client over the Figma `nodes` endpoint.
pub struct FigmaClient {
    client: Client,
    api_base: url::Url,
    token: String,
}

impl FigmaClient {
    /// Build a client from config and an already-resolved token.
    pub fn new(config: &FigmaConfig, token: impl Into<String>) -> Result<Self> {
        let api_base = url::Url::parse(&config.api_base).map_err(|e| {
            FigmaCopyError::config(format!("invalid api_base '{}': {e}", config.api_base))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FigmaCopyError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base,
            token: token.into(),
        })
    }

    /// Endpoint URL for one node of one file.
    fn nodes_url(&self, file_key: &str, node_id: &str) -> Result<url::Url> {
        let mut url = self
            .api_base
            .join(&format!("v1/files/{file_key}/nodes"))
            .map_err(|e| FigmaCopyError::config(format!("cannot build nodes URL: {e}")))?;
        url.query_pairs_mut().append_pair("ids", node_id);
        Ok(url)
    }

    /// Fetch the document subtree rooted at `node_id`.
    #[instrument(skip_all, fields(file_key = %file_key, node_id = %node_id))]
    pub async fn fetch_node(&self, file_key: &str, node_id: &str) -> Result<DesignNode> {
        let url = self.nodes_url(file_key, node_id)?;
        info!(%url, "fetching Figma node");

        let response = self
            .client
            .get(url.clone())
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| FigmaCopyError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FigmaCopyError::RemoteFetchFailure {
                status: status.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FigmaCopyError::Network(format!("{url}: failed to read body: {e}")))?;

        let parsed = decode_nodes(&body)
            .map_err(|e| FigmaCopyError::parse(format!("unexpected nodes response: {e}")))?;

        debug!(
            file = %parsed.name,
            last_modified = ?parsed.last_modified,
            nodes = parsed.nodes.len(),
            "nodes response decoded"
        );

        parsed.into_document(node_id).inspect_err(|e| {
            if let FigmaCopyError::NodeNotFound { available, .. } = e {
                warn!(?available, "requested node missing from response");
            }
        })
    }
}

/// Decode a `nodes` body without serde_json's nesting limit.
///
/// Design trees routinely nest deeper than the default limit of 128; the
/// extractor applies its own `max_depth` instead. `serde_stacker` grows the
/// stack on demand so the recursive `Deserialize` impls cannot overflow it.
fn decode_nodes(body: &str) -> serde_json::Result<NodesResponse> {
    let mut json = serde_json::Deserializer::from_str(body);
    json.disable_recursion_limit();
    let parsed = NodesResponse::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(parsed)
}
