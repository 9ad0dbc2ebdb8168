use crate::error::{PipelineError, Result};
use reqwest::{Client, StatusCode};

/// Fetch one listing page. The body is decoded as UTF-8 from the raw
/// bytes; the server-declared charset is not trusted.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    match response.status() {
        StatusCode::OK => {
            let body = response.bytes().await?;
            Ok(String::from_utf8_lossy(&body).into_owned())
        }
        status => Err(PipelineError::Status {
            url: url.to_string(),
            status,
        }),
    }
}
