use serde::{Deserialize, Serialize};

/// Rating value used when a tile title carries no star glyphs
pub const NO_RATING: &str = "No rating";

/// URL of a catalogue (listing) page, kept in discovery order
pub type CatalogueRef = String;

/// One movie as extracted from a catalogue tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// URL of the movie's own page
    pub url: String,

    /// Title as it appears on the tile, without year and rating
    pub name: String,

    /// Four-digit release year
    pub year: String,

    /// Star-glyph run (`★` to `★★★★★`, optional `½`) or [`NO_RATING`]
    pub rating: String,
}

/// All reviews collected for a single movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieReviewBundle {
    /// Movie name the reviews belong to
    pub name: String,

    /// Review bodies in page order
    pub reviews: Vec<String>,
}

impl MovieReviewBundle {
    /// Create a bundle from a movie name and its collected review texts
    pub fn new(name: String, reviews: Vec<String>) -> Self {
        Self { name, reviews }
    }
}
