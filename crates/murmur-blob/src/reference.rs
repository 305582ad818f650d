use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// Location of an audio file or transcript
///
/// Parsed left to right: a value that is a valid absolute URL is a URL,
/// anything else is a POSIX path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReference {
    /// `s3://bucket/key`, `https://host/audio.wav`, `file:///data/a.wav`
    Url(Url),
    /// Path inside the configured store, or on the local filesystem
    Path(String),
}

impl FileReference {
    /// URL scheme, or `None` for paths
    pub fn scheme(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url.scheme()),
            Self::Path(_) => None,
        }
    }

    /// Last non-empty path segment, used as the upload file name
    pub fn file_name(&self) -> Option<&str> {
        let name = match self {
            Self::Url(url) => url.path_segments().and_then(|mut segments| segments.next_back()),
            Self::Path(path) => path.rsplit('/').next(),
        };
        name.filter(|name| !name.is_empty())
    }
}

impl FromStr for FileReference {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err("file reference must not be empty".to_string());
        }

        match Url::parse(value) {
            Ok(url) => Ok(Self::Url(url)),
            Err(_) => Ok(Self::Path(value.to_string())),
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url.as_str()),
            Self::Path(path) => f.write_str(path),
        }
    }
}

impl Serialize for FileReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
