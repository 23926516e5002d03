//! Fetch-transform-print cycle for the manuscript record.

use crate::prelude::{println, *};
use futures::future::join_all;
use manuscript_data_core::align::{align, VersionedId};
use manuscript_data_core::dates::parse_date;
use manuscript_data_core::manuscript::{
    build_manuscript, ManuscriptData, ManuscriptInput, ReviewStage,
};

use crate::{biorxiv, hypothesis};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct Options {
    /// Manuscript id to stamp on the output record
    pub id: String,

    /// Pipe-separated versioned preprint identifiers,
    /// e.g. "10.1101/2021.01.01.000001v1|10.1101/2021.01.01.000001v2"
    pub preprint: String,

    /// Pipe-separated publication dates, one per version
    pub date: String,

    /// Hypothesis annotation id of the evaluation summary
    pub evaluation_summary: String,

    /// Hypothesis annotation id of the peer review
    pub peer_review: Option<String>,

    /// Hypothesis annotation id of the author response
    pub author_response: Option<String>,

    /// Comma-separated evaluation summary participant names
    #[arg(default_value = "anonymous", env = "MANUSCRIPT_DATA_PARTICIPANTS")]
    pub evaluation_summary_participants: String,
}

pub async fn run(options: Options, verbose: bool) -> Result<()> {
    if verbose {
        println!("Annotation API Base: {}", hypothesis::get_api_base());
        println!("Preprint API Base: {}", biorxiv::get_api_base());
        println!();
    }

    let manuscript = manuscript_data(&options).await?;

    let json = serde_json::to_string_pretty(&manuscript)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{}", json);

    Ok(())
}

/// Fetches annotation and preprint metadata and assembles the manuscript
/// record.
pub async fn manuscript_data(options: &Options) -> Result<ManuscriptData> {
    let identifiers = split_pipes(&options.preprint);
    let dates = split_pipes(&options.date)
        .iter()
        .map(|token| parse_date(token).map_err(|e| eyre!(e)))
        .collect::<Result<Vec<_>>>()?;
    let participants = split_commas(&options.evaluation_summary_participants);

    // Reject malformed identifiers before any network interaction.
    for token in &identifiers {
        VersionedId::parse(token)?;
    }

    let client = reqwest::Client::new();

    // The three stage lookups are independent reads; fetch them concurrently.
    let (summary, review, response) = futures::join!(
        hypothesis::fetch_annotation(&client, &options.evaluation_summary),
        fetch_optional_annotation(&client, options.peer_review.as_deref()),
        fetch_optional_annotation(&client, options.author_response.as_deref()),
    );
    let summary = summary?;
    let review = review?;
    let response = response?;

    // Each annotation references a preprint version; those version numbers
    // relabel or extend the versions supplied on the command line.
    let mut overrides = Vec::new();
    for annotation in [Some(&summary), review.as_ref(), response.as_ref()]
        .into_iter()
        .flatten()
    {
        overrides.push(version_override(&annotation.uri)?);
    }

    let aligned = align(&identifiers, &dates, &overrides)?;

    // Per-version lookups are independent and read-only.
    let file_futures = aligned
        .iter()
        .map(|version| biorxiv::fetch_preprint_files(&client, &version.versioned_id));
    let files = join_all(file_futures)
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    let evaluation_summary = ReviewStage {
        annotation_id: options.evaluation_summary.clone(),
        date: summary.date,
    };
    let peer_review = options
        .peer_review
        .clone()
        .zip(review)
        .map(|(annotation_id, annotation)| ReviewStage {
            annotation_id,
            date: annotation.date,
        });
    let author_response = options
        .author_response
        .clone()
        .zip(response)
        .map(|(annotation_id, annotation)| ReviewStage {
            annotation_id,
            date: annotation.date,
        });

    build_manuscript(ManuscriptInput {
        id: options.id.clone(),
        versions: aligned,
        files,
        evaluation_summary,
        evaluation_summary_participants: participants,
        peer_review,
        author_response,
    })
    .map_err(|e| eyre!(e))
}

async fn fetch_optional_annotation(
    client: &reqwest::Client,
    id: Option<&str>,
) -> Result<Option<hypothesis::Annotation>> {
    match id {
        Some(id) => Ok(Some(hypothesis::fetch_annotation(client, id).await?)),
        None => Ok(None),
    }
}

/// Version-number override derived from an annotation's source uri.
fn version_override(uri: &str) -> Result<String> {
    let versioned = hypothesis::versioned_id_from_uri(uri)?;
    let parsed = VersionedId::parse(&versioned)
        .map_err(|e| eyre!("Annotation uri {}: {}", uri, e))?;
    Ok(parsed.version.to_string())
}

fn split_pipes(input: &str) -> Vec<String> {
    input.split('|').map(str::to_string).collect()
}

fn split_commas(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}
