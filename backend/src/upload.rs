use anyhow::{Context, Result};
use serde::Deserialize;

/// Client for the external image-hosting service. The contract is
/// minimal: post the file, get back the hosted URL.
#[derive(Clone)]
pub struct ImageHostClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct HostedImage {
    url: String,
}

impl ImageHostClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Forward one file to the image host and return its hosted URL
    pub async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("image host unreachable")?
            .error_for_status()
            .context("image host rejected upload")?;

        let hosted: HostedImage = response
            .json()
            .await
            .context("image host returned malformed response")?;

        Ok(hosted.url)
    }
}
