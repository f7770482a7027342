//! Supabase Client
//!
//! Reads the machine table through the PostgREST endpoint and signs image
//! URLs through the storage endpoint. Only plain HTTP calls are made; no
//! session, no realtime channel.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{ImageSigner, ImageTransform, MachineSource, MACHINES_TABLE};
use crate::config::Config;
use crate::error::RemoteError;
use crate::models::{ImageRow, MachineRecord, MachineRow};

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL")]
    signed_url: Option<String>,
}

/// HTTP client for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Option<String>,
    api_key: Option<String>,
    bucket: String,
    signed_url_ttl: u64,
}

impl SupabaseClient {
    /// Creates a client. Missing credentials are allowed; every call then
    /// fails with [`RemoteError::NotConfigured`].
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        bucket: impl Into<String>,
        signed_url_ttl: u64,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url
                .filter(|u| !u.is_empty())
                .map(|u| u.trim_end_matches('/').to_string()),
            api_key: api_key.filter(|k| !k.is_empty()),
            bucket: bucket.into(),
            signed_url_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            config.image_bucket.clone(),
            config.signed_url_ttl,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), RemoteError> {
        match (self.base_url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(RemoteError::NotConfigured),
        }
    }

    fn table_url(base: &str) -> String {
        format!("{}/rest/v1/{}", base, MACHINES_TABLE)
    }

    fn sign_url(&self, base: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/sign/{}/{}",
            base,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, builder: RequestBuilder, key: &str) -> RequestBuilder {
        builder
            .header("apikey", key)
            .bearer_auth(key)
            .header("cache-control", "no-cache")
    }

    /// GETs table rows matching `query` and decodes them as `T`.
    async fn select<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RemoteError> {
        let (base, key) = self.credentials()?;
        let request = self.http.get(Self::table_url(base)).query(query);
        let response = self.authorized(request, key).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builds the PostgREST `in.(...)` filter, quoting each id.
fn in_filter(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

/// Decodes table rows one by one. Spec columns are already lenient, so only
/// a row that isn't an object or has no string id is dropped.
fn decode_rows(rows: Vec<Value>) -> Vec<MachineRecord> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<MachineRow>(row) {
            Ok(row) => Some(MachineRecord::from(row)),
            Err(e) => {
                warn!(index, error = %e, "Skipping undecodable machine row");
                None
            }
        })
        .collect()
}

/// Turns the storage API's relative `signedURL` into an absolute URL.
fn absolute_signed_url(base: &str, signed: &str) -> String {
    format!("{}/storage/v1{}", base, signed)
}

#[async_trait]
impl MachineSource for SupabaseClient {
    async fn fetch_machines(&self) -> Result<Vec<MachineRecord>, RemoteError> {
        debug!("Fetching machines from Supabase");
        let rows: Vec<Value> = self
            .select(&[("select", "*".to_string()), ("order", "brand.asc".to_string())])
            .await?;
        Ok(decode_rows(rows))
    }

    async fn fetch_machine_ids(&self) -> Result<Vec<String>, RemoteError> {
        #[derive(Deserialize)]
        struct IdRow {
            id: String,
        }

        let rows: Vec<IdRow> = self
            .select(&[("select", "id".to_string()), ("id", "not.is.null".to_string())])
            .await?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn fetch_image_rows(&self, ids: &[String]) -> Result<Vec<ImageRow>, RemoteError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(&[
            (
                "select",
                "id,image_path,image_caption,image_source".to_string(),
            ),
            ("id", in_filter(ids)),
        ])
        .await
    }
}

#[async_trait]
impl ImageSigner for SupabaseClient {
    async fn signed_url(
        &self,
        path: &str,
        transform: &ImageTransform,
    ) -> Result<String, RemoteError> {
        let (base, key) = self.credentials()?;
        let body = json!({
            "expiresIn": self.signed_url_ttl,
            "transform": transform,
        });
        let request = self.http.post(self.sign_url(base, path)).json(&body);
        let response = self.authorized(request, key).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let signed: SignedUrlResponse = serde_json::from_slice(&bytes)?;
        match signed.signed_url.filter(|u| !u.is_empty()) {
            Some(relative) => Ok(absolute_signed_url(base, &relative)),
            None => Err(RemoteError::MissingSignedUrl(path.to_string())),
        }
    }
}
