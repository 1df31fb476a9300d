use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub audio_file: Option<String>,
    pub cover_image: Option<String>,
}

impl Track {
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            audio_file: None,
            cover_image: None,
        }
    }

    pub fn with_audio_file(mut self, uri: impl Into<String>) -> Self {
        self.audio_file = Some(uri.into());
        self
    }

    /// Builds a track from a local file or URI, titled after its file stem.
    pub fn from_uri(index: usize, uri: &str) -> Self {
        let title = Path::new(uri)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| uri.to_string());

        Self::new(TrackId::new(format!("local:{index}")), title, "Unknown artist")
            .with_audio_file(uri)
    }

    pub fn is_playable(&self) -> bool {
        self.audio_file.is_some()
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_without_audio_file_is_not_playable() {
        let track = Track::new("t1", "Intro", "Nobody");
        assert!(!track.is_playable());
        assert!(track.with_audio_file("intro.mp3").is_playable());
    }

    #[test]
    fn test_from_uri_uses_file_stem_as_title() {
        let track = Track::from_uri(3, "/music/Blue in Green.mp3");
        assert_eq!(track.id.as_str(), "local:3");
        assert_eq!(track.title, "Blue in Green");
        assert_eq!(track.audio_file.as_deref(), Some("/music/Blue in Green.mp3"));
    }
}
