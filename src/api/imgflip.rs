//! Imgflip Template API
//!
//! Fetches the public template catalog and submits caption requests.

use super::ApiError;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// App version for User-Agent header
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public Imgflip API root
pub const DEFAULT_API_BASE: &str = "https://api.imgflip.com";

/// One meme template from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemeTemplate {
    pub id: String,
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub box_count: u32,
}

/// Account used for `caption_image`
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    success: bool,
    data: Option<CatalogData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogData {
    memes: Vec<MemeTemplate>,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    #[serde(default)]
    success: bool,
    data: Option<CaptionData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaptionData {
    url: Option<String>,
}

/// HTTP client bound to one API root
pub struct ImgflipClient {
    http: Client,
    base: String,
    credentials: Option<Credentials>,
}

impl ImgflipClient {
    pub fn new(
        base: &str,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("MemeStudio/{}", APP_VERSION))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Shared connection pool, also used for image downloads
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Fetch the template catalog
    pub async fn fetch_catalog(&self) -> Result<Vec<MemeTemplate>, ApiError> {
        let url = self.endpoint("get_memes");
        debug!("Fetching meme catalog from {}", url);

        let response = self.http.get(&url).send().await?;
        check_status(response.status())?;

        let body = response.text().await?;
        let memes = parse_catalog(&body)?;

        info!("Fetched {} meme templates", memes.len());
        Ok(memes)
    }

    /// Caption a template, returning the URL of the generated image
    pub async fn caption_image(
        &self,
        template_id: &str,
        captions: &[String],
    ) -> Result<String, ApiError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ApiError::MissingCredentials)?;

        debug!("Captioning template {} with {:?}", template_id, captions);

        let form = caption_form(template_id, credentials, captions);
        let response = self
            .http
            .post(self.endpoint("caption_image"))
            .form(&form)
            .send()
            .await?;
        check_status(response.status())?;

        let body = response.text().await?;
        let url = parse_caption(&body)?;

        info!("Meme created: {}", url);
        Ok(url)
    }
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

/// Decode a `get_memes` body
pub fn parse_catalog(body: &str) -> Result<Vec<MemeTemplate>, ApiError> {
    let response: CatalogResponse = serde_json::from_str(body)?;

    if !response.success {
        return Err(ApiError::Rejected(
            response
                .error_message
                .unwrap_or_else(|| "success was false".to_string()),
        ));
    }

    response
        .data
        .map(|data| data.memes)
        .ok_or(ApiError::MissingField("data.memes"))
}

/// Decode a `caption_image` body into the image URL
pub fn parse_caption(body: &str) -> Result<String, ApiError> {
    let response: CaptionResponse = serde_json::from_str(body)?;

    if !response.success {
        return Err(ApiError::Rejected(
            response
                .error_message
                .unwrap_or_else(|| "success was false".to_string()),
        ));
    }

    response
        .data
        .and_then(|data| data.url)
        .ok_or(ApiError::MissingField("data.url"))
}

/// Form fields for `caption_image`, one `boxes[i][text]` per caption
pub fn caption_form(
    template_id: &str,
    credentials: &Credentials,
    captions: &[String],
) -> Vec<(String, String)> {
    let mut form = vec![
        ("template_id".to_string(), template_id.to_string()),
        ("username".to_string(), credentials.username.clone()),
        ("password".to_string(), credentials.password.clone()),
    ];

    for (i, text) in captions.iter().enumerate() {
        form.push((format!("boxes[{}][text]", i), text.clone()));
    }

    form
}
