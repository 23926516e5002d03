//! bioRxiv preprint metadata API client.

use crate::prelude::*;
use manuscript_data_core::dates::parse_date;
use manuscript_data_core::manuscript::PreprintFile;

const BIORXIV_API_BASE: &str = "https://api.biorxiv.org";

/// `meca_index_v2` response; `results` is absent for unknown preprints.
#[derive(Debug, serde::Deserialize, Clone)]
struct MecaIndexResponse {
    results: Option<Vec<MecaIndexEntry>>,
}

#[derive(Debug, serde::Deserialize, Clone)]
struct MecaIndexEntry {
    filedate: String,
    tdm_path: String,
}

pub fn get_api_base() -> &'static str {
    BIORXIV_API_BASE
}

/// Fetch the content files known for a versioned preprint.
///
/// An unknown preprint yields an empty list, not an error.
pub async fn fetch_preprint_files(
    client: &reqwest::Client,
    versioned_id: &str,
) -> Result<Vec<PreprintFile>> {
    let url = format!("{}/meca_index_v2/{versioned_id}", get_api_base());
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch preprint {}: {}", versioned_id, e))?;

    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to fetch preprint {}: HTTP {}",
            versioned_id,
            response.status()
        ));
    }

    let body: MecaIndexResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse preprint {}: {}", versioned_id, e))?;

    body.results
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let date = parse_date(&entry.filedate)
                .map_err(|e| eyre!("Invalid file date for {}: {}", versioned_id, e))?;
            Ok(PreprintFile {
                content: entry.tdm_path,
                date,
            })
        })
        .collect()
}
