use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaCategory {
    Photo,
    Audio,
    Video,
}

const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp", "heic", "heif", "raw", "cr2",
    "nef", "arw", "dng",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "m4a", "wma", "aiff", "opus",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "3gp", "mts",
];

impl MediaCategory {
    pub const ALL: [MediaCategory; 3] = [
        MediaCategory::Photo,
        MediaCategory::Audio,
        MediaCategory::Video,
    ];

    /// Lowercase extensions, without the leading dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaCategory::Photo => PHOTO_EXTENSIONS,
            MediaCategory::Audio => AUDIO_EXTENSIONS,
            MediaCategory::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Case-insensitive lookup of the category owning `extension`.
    pub fn from_extension(extension: &str) -> Option<MediaCategory> {
        let lower = extension.to_ascii_lowercase();
        MediaCategory::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&lower.as_str()))
    }

    pub fn of_path(path: &Path) -> Option<MediaCategory> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(MediaCategory::from_extension)
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            MediaCategory::Photo => "photo",
            MediaCategory::Audio => "sound",
            MediaCategory::Video => "video",
        };
        f.write_str(name)
    }
}
