//! Catalog track and playback device records
//!
//! These mirror the subset of the catalog's track object that resolution and
//! queueing actually read. The catalog client owns the full wire format;
//! everything else in the crate treats a [`Track`] as read-only.

use serde::{Deserialize, Serialize};

/// A track returned by a catalog search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track id
    pub id: String,
    /// Track title
    pub name: String,
    /// Credited artists, in catalog order
    pub artists: Vec<ArtistRef>,
    /// Catalog popularity, 0-100
    #[serde(default)]
    pub popularity: u32,
    /// Playable URI, used for queue insertion
    pub uri: String,
    /// Containing album, when the catalog provides one
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

impl Track {
    /// Artist names in credit order.
    pub fn artist_names(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.name.clone()).collect()
    }

    /// Artist names joined for display ("A, B").
    pub fn artist_display(&self) -> String {
        self.artist_names().join(", ")
    }
}

/// An artist credit on a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Artist name as credited
    pub name: String,
}

/// Album reference carried on a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Album title
    #[serde(default)]
    pub name: String,
    /// Album genres, rarely populated by the catalog
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A playback device known to the catalog account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Device id
    pub id: String,
    /// Human-readable device name
    pub name: String,
    /// Whether the catalog considers this device active
    #[serde(default)]
    pub is_active: bool,
}
