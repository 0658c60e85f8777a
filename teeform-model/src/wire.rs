//! Types exchanged between the server and the gallery client.

use crate::record::SubmissionRecord;

/// One page of the catalog as served by `GET /images`.
///
/// `has_more` tells an incrementally loading client whether another
/// fetch is worthwhile; the server derives it from the store length, so
/// a client never has to probe past the end.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryPage {
    pub images: Vec<SubmissionRecord>,
    #[cfg_attr(feature = "serde", serde(rename = "hasMore"))]
    pub has_more: bool,
}
