//! Hypothesis annotation API client.

use crate::prelude::*;
use chrono::{DateTime, Utc};

const HYPOTHESIS_API_BASE: &str = "https://api.hypothes.is/api";

/// Annotation record as returned by the API.
#[derive(Debug, serde::Deserialize, Clone)]
struct AnnotationResponse {
    created: String,
    uri: String,
}

/// The parts of an annotation the program consumes.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Source document the annotation was made on.
    pub uri: String,
    /// When the annotation was created.
    pub date: DateTime<Utc>,
}

pub fn get_api_base() -> &'static str {
    HYPOTHESIS_API_BASE
}

pub async fn fetch_annotation(client: &reqwest::Client, id: &str) -> Result<Annotation> {
    let url = format!("{}/annotations/{id}", get_api_base());
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch annotation {}: {}", id, e))?;

    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to fetch annotation {}: HTTP {}",
            id,
            response.status()
        ));
    }

    let annotation: AnnotationResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse annotation {}: {}", id, e))?;

    let date = DateTime::parse_from_rfc3339(&annotation.created)
        .map_err(|e| eyre!("Invalid created timestamp on annotation {}: {}", id, e))?
        .with_timezone(&Utc);

    Ok(Annotation {
        uri: annotation.uri,
        date,
    })
}

/// Extract the versioned identifier from an annotation's source uri.
///
/// The uri points at a preprint page; its last two path segments form the
/// versioned identifier, e.g.
/// `https://www.biorxiv.org/content/10.1101/2021.01.01.000001v2` yields
/// `10.1101/2021.01.01.000001v2`.
pub fn versioned_id_from_uri(uri: &str) -> Result<String> {
    let segments: Vec<&str> = uri.split('/').collect();
    if segments.len() < 2 {
        return Err(eyre!("No versioned identifier in annotation uri: {}", uri));
    }

    Ok(segments[segments.len() - 2..].join("/"))
}
