//! Image Folders
//!
//! Gallery images are grouped into a fixed set of folders. Folder names
//! arrive in query strings and multipart fields, so they are parsed into
//! an enum before they reach SQL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ContentError;

/// Fallback content type when none is known
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Allowed image folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFolder {
    #[default]
    Gallery,
    About,
    CarBuild,
    Hero,
}

impl ImageFolder {
    pub const ALL: [ImageFolder; 4] = [
        ImageFolder::Gallery,
        ImageFolder::About,
        ImageFolder::CarBuild,
        ImageFolder::Hero,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageFolder::Gallery => "gallery",
            ImageFolder::About => "about",
            ImageFolder::CarBuild => "carbuild",
            ImageFolder::Hero => "hero",
        }
    }

    /// Parse an optional folder parameter; blank means [`ImageFolder::Gallery`]
    pub fn from_param(raw: Option<&str>) -> Result<Self, ContentError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(ImageFolder::Gallery),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for ImageFolder {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|folder| folder.as_str() == s)
            .ok_or(ContentError::InvalidFolder)
    }
}

impl fmt::Display for ImageFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MIME type for a supported image file name, by extension
pub fn image_content_type(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_parsing() {
        assert_eq!("gallery".parse::<ImageFolder>().unwrap(), ImageFolder::Gallery);
        assert_eq!("carbuild".parse::<ImageFolder>().unwrap(), ImageFolder::CarBuild);
        assert!(matches!(
            "../etc".parse::<ImageFolder>(),
            Err(ContentError::InvalidFolder)
        ));
        assert!("Gallery".parse::<ImageFolder>().is_err());
    }

    #[test]
    fn test_blank_param_defaults_to_gallery() {
        assert_eq!(ImageFolder::from_param(None).unwrap(), ImageFolder::Gallery);
        assert_eq!(ImageFolder::from_param(Some("  ")).unwrap(), ImageFolder::Gallery);
        assert_eq!(ImageFolder::from_param(Some("hero")).unwrap(), ImageFolder::Hero);
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for folder in ImageFolder::ALL {
            let json = serde_json::to_string(&folder).unwrap();
            assert_eq!(json, format!("\"{}\"", folder.as_str()));
        }
    }

    #[test]
    fn test_content_type_detection() {
        assert_eq!(image_content_type("car.JPG"), Some("image/jpeg"));
        assert_eq!(image_content_type("a.jpeg"), Some("image/jpeg"));
        assert_eq!(image_content_type("b.png"), Some("image/png"));
        assert_eq!(image_content_type("c.gif"), Some("image/gif"));
        assert_eq!(image_content_type("d.webp"), Some("image/webp"));
        assert_eq!(image_content_type("notes.txt"), None);
        assert_eq!(image_content_type("no_extension"), None);
    }
}
