use crate::records::{MovieRecord, NO_RATING};
use regex::Regex;


/// Fields parsed out of a tile's title attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileInfo {
    pub name: String,
    pub year: String,
    pub rating: String,
}

impl TileInfo {
    /// Combine parsed tile fields with the tile's link into a record
    pub fn into_record(self, url: String) -> MovieRecord {
        MovieRecord {
            url,
            name: self.name,
            year: self.year,
            rating: self.rating,
        }
    }
}

/// Parser for tile titles of the form `<name> (<year>) <stars>`.
///
/// The year must be exactly four digits; the star run is one to five `★`
/// glyphs with an optional trailing `½`. A title without a star run is a
/// valid unrated movie; any other shape is not a movie tile.
#[derive(Debug)]
pub struct TileParser {
    pattern: Regex,
}

impl Default for TileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TileParser {
    pub fn new() -> Self {
        let pattern = Regex::new(r"^(.*?)\s\((\d{4})\)(?:\s(★{1,5}½?))?$")
            .expect("tile title pattern should be valid");
        Self { pattern }
    }

    /// Parse a tile title, or `None` when the text is not a movie title
    pub fn parse(&self, title: &str) -> Option<TileInfo> {
        let captures = self.pattern.captures(title)?;

        let name = captures.get(1)?.as_str().to_string();
        let year = captures.get(2)?.as_str().to_string();
        let rating = match captures.get(3) {
            Some(stars) => stars.as_str().to_string(),
            None => NO_RATING.to_string(),
        };

        Some(TileInfo { name, year, rating })
    }
}
