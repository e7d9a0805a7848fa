use base64::{engine::general_purpose::STANDARD, Engine as _};
use digest_logging::{digest_info, digest_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::{Background, FetchSettings, Severity};

const FALLBACK_MIME: &str = "image/png";

/// Downloads the page background and inlines it as a base64 data URI.
///
/// Cosmetic only: failures are reported as [`Background::Unavailable`].
pub async fn fetch_background(url: &str, settings: &FetchSettings) -> Background {
    match download(url, settings).await {
        Ok(background) => background,
        Err(message) => {
            digest_warn!("Background fetch from {} failed: {}", url, message);
            Background::Unavailable {
                message: format!("Error fetching background: {message}"),
                severity: Severity::Error,
            }
        }
    }
}

async fn download(url: &str, settings: &FetchSettings) -> Result<Background, String> {
    let client = settings.build_client().map_err(|err| err.to_string())?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;

    let status = response.status();
    if status != StatusCode::OK {
        digest_warn!("Background fetch from {} returned {}", url, status);
        return Ok(Background::Unavailable {
            message: format!(
                "Failed to fetch background template (status: {})",
                status.as_u16()
            ),
            severity: Severity::Warning,
        });
    }

    let mime = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .filter(|value| value.starts_with("image/"))
        .unwrap_or_else(|| FALLBACK_MIME.to_string());
    let bytes = response.bytes().await.map_err(|err| err.to_string())?;

    digest_info!("Loaded background ({} bytes, {})", bytes.len(), mime);
    Ok(Background::Loaded {
        data_uri: format!("data:{mime};base64,{}", STANDARD.encode(&bytes)),
    })
}
