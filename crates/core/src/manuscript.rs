//! Output document model and assembly
//!
//! Typed records matching the JSON document the program prints, plus the pure
//! transformation that builds it from aligned versions and fetched review and
//! preprint metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::align::AlignedVersion;
use crate::dates::format_date;

/// License attached to every emitted version.
pub const LICENSE_URL: &str = "http://creativecommons.org/licenses/by/4.0/";

/// A content locator and file date returned by the preprint metadata service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprintFile {
    pub content: String,
    pub date: DateTime<Utc>,
}

/// An annotation id plus the timestamp the annotation was created.
#[derive(Debug, Clone)]
pub struct ReviewStage {
    pub annotation_id: String,
    pub date: DateTime<Utc>,
}

/// Everything needed to assemble the output document.
#[derive(Debug, Clone)]
pub struct ManuscriptInput {
    pub id: String,
    /// Aligned versions, ascending; the first is the original, unrevised one.
    pub versions: Vec<AlignedVersion>,
    /// Preprint files per version, parallel to `versions`.
    pub files: Vec<Vec<PreprintFile>>,
    pub evaluation_summary: ReviewStage,
    pub evaluation_summary_participants: Vec<String>,
    pub peer_review: Option<ReviewStage>,
    pub author_response: Option<ReviewStage>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Participant {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub review_type: String,
    pub date: String,
    pub participants: Vec<Participant>,
    pub content_urls: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PeerReview {
    pub reviews: Vec<Evaluation>,
    pub evaluation_summary: Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_response: Option<Evaluation>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Preprint {
    pub id: String,
    pub doi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    pub version_identifier: String,
    pub content: Vec<String>,
    pub url: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub doi: String,
    pub published_date: String,
    pub version_identifier: String,
    pub preprint: Preprint,
    pub license: String,
    pub peer_review: PeerReview,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_date: Option<String>,
    pub content: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_response_date: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ManuscriptMeta {
    pub doi: String,
    pub published_date: String,
}

/// The complete output document.
#[derive(Debug, Serialize, Clone)]
pub struct ManuscriptData {
    pub id: String,
    pub manuscript: ManuscriptMeta,
    pub versions: Vec<Version>,
}

/// Content URL for a review or evaluation stored as a Hypothesis annotation.
pub fn evaluation_url(annotation_id: &str) -> String {
    format!("https://sciety.org/evaluations/hypothesis:{annotation_id}/content")
}

/// Public page for a versioned preprint.
pub fn preprint_url(versioned_id: &str) -> String {
    format!("https://www.biorxiv.org/content/{versioned_id}")
}

/// Build a review/evaluation object. Participants are always curators.
pub fn evaluation(
    review_type: &str,
    date: DateTime<Utc>,
    participants: &[String],
    content_url: String,
) -> Evaluation {
    Evaluation {
        review_type: review_type.to_string(),
        date: format_date(date),
        participants: participants
            .iter()
            .map(|name| Participant {
                name: name.clone(),
                role: "curator".to_string(),
            })
            .collect(),
        content_urls: vec![content_url],
    }
}

/// Assemble the output document from aligned versions and fetched metadata.
///
/// The first aligned version supplies the top-level manuscript DOI and
/// published date. Every version carries the same peer-review block; the
/// `reviewedDate` and `authorResponseDate` fields appear only when the
/// corresponding stage was supplied. A version's `preprint.publishedDate` is
/// present only when the preprint service returned at least one file for it.
pub fn build_manuscript(input: ManuscriptInput) -> Result<ManuscriptData, String> {
    let first = input
        .versions
        .first()
        .ok_or_else(|| "At least one aligned version is required".to_string())?;

    let peer_review = PeerReview {
        reviews: input
            .peer_review
            .iter()
            .map(|stage| {
                evaluation(
                    "review-article",
                    stage.date,
                    &[],
                    evaluation_url(&stage.annotation_id),
                )
            })
            .collect(),
        evaluation_summary: evaluation(
            "evaluation-summary",
            input.evaluation_summary.date,
            &input.evaluation_summary_participants,
            evaluation_url(&input.evaluation_summary.annotation_id),
        ),
        author_response: input.author_response.as_ref().map(|stage| {
            evaluation(
                "author-response",
                stage.date,
                &[],
                evaluation_url(&stage.annotation_id),
            )
        }),
    };

    let reviewed_date = input
        .peer_review
        .as_ref()
        .map(|stage| format_date(stage.date));
    let author_response_date = input
        .author_response
        .as_ref()
        .map(|stage| format_date(stage.date));

    let versions = input
        .versions
        .iter()
        .enumerate()
        .map(|(i, version)| {
            let files = input.files.get(i).map(Vec::as_slice).unwrap_or(&[]);
            let content: Vec<String> = files.iter().map(|file| file.content.clone()).collect();

            Version {
                id: input.id.clone(),
                doi: version.base_id.clone(),
                published_date: format_date(version.date),
                version_identifier: version.version.to_string(),
                preprint: Preprint {
                    id: version.base_id.clone(),
                    doi: version.base_id.clone(),
                    published_date: files.first().map(|file| format_date(file.date)),
                    version_identifier: version.version.to_string(),
                    content: content.clone(),
                    url: preprint_url(&version.versioned_id),
                },
                license: LICENSE_URL.to_string(),
                peer_review: peer_review.clone(),
                reviewed_date: reviewed_date.clone(),
                content,
                author_response_date: author_response_date.clone(),
            }
        })
        .collect();

    Ok(ManuscriptData {
        id: input.id.clone(),
        manuscript: ManuscriptMeta {
            doi: first.base_id.clone(),
            published_date: format_date(first.date),
        },
        versions,
    })
}
