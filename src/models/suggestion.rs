//! Seed descriptors and AI song suggestions

use serde::{Deserialize, Serialize};

use crate::models::Track;

/// The reference song a recommendation request is built around.
///
/// Built once from the resolved seed track and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDescriptor {
    /// Seed track title as resolved on the catalog
    pub title: String,
    /// Seed artist names, in credit order
    pub artists: Vec<String>,
    /// Seed genre, when the catalog exposes one
    pub genre: Option<String>,
}

impl SeedDescriptor {
    /// Build a descriptor from a resolved catalog track.
    ///
    /// Genre is taken from the first two album genres when present; most
    /// catalog search payloads omit them, so this is usually `None`.
    pub fn from_track(track: &Track) -> Self {
        let genre = track.album.as_ref().and_then(|album| {
            if album.genres.is_empty() {
                None
            } else {
                Some(album.genres.iter().take(2).cloned().collect::<Vec<_>>().join(", "))
            }
        });

        Self {
            title: track.name.clone(),
            artists: track.artist_names(),
            genre,
        }
    }

    /// Artist names joined for prompts and logs.
    pub fn artist_display(&self) -> String {
        self.artists.join(", ")
    }
}

/// One song suggestion produced by the suggester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongSuggestion {
    /// Suggested song title
    pub title: String,
    /// Suggested artist names; may be empty when the suggester omits them
    #[serde(default)]
    pub artists: Vec<String>,
    /// Genre label the suggester assigned
    #[serde(default)]
    pub genre: Option<String>,
    /// One-line reasoning for the suggestion
    #[serde(default)]
    pub reason: Option<String>,
}
