/// Result of validating an uploaded filename.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains path traversal patterns (`..`).
    PathTraversal,
    /// Filename contains null bytes.
    NullByte,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
        }
    }
}

/// Validates a flat filename (no directory components allowed).
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // Reject ASCII control characters to prevent
    // HTTP header injection (e.g. CRLF in Content-Disposition).
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// An upload whose content type is not `image/*`.
#[derive(Debug, PartialEq, Eq)]
pub struct NotAnImage;

impl NotAnImage {
    pub fn message(&self) -> &'static str {
        "Only image files are allowed"
    }
}

/// Checks that an upload is an image, by its declared content type when the
/// client sent one and by its extension otherwise.
pub fn ensure_image(content_type: Option<&str>, filename: &str) -> Result<(), NotAnImage> {
    let is_image = match content_type {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => {
            ct.to_ascii_lowercase().starts_with("image/")
        }
        _ => mime_guess::from_path(filename)
            .first()
            .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE),
    };
    if is_image {
        Ok(())
    } else {
        Err(NotAnImage)
    }
}

const MAX_STEM_LEN: usize = 64;

/// Random tag that keeps uploads made in the same millisecond apart.
pub fn upload_nonce() -> String {
    let mut tag = uuid::Uuid::new_v4().simple().to_string();
    tag.truncate(8);
    tag
}

/// Builds the stored name of an uploaded file: `<unix-millis>-<nonce>-<sanitized name>`.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`; the stem is capped at
/// 64 characters and the extension is lower-cased.
pub fn timestamped_name(
    original: &str,
    unix_millis: i64,
    nonce: &str,
) -> Result<String, FilenameError> {
    let original = validate_flat_filename(original)?;

    let (stem, ext) = match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (original, None),
    };

    let clean = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    };

    let mut stem = clean(stem);
    stem.truncate(MAX_STEM_LEN);

    Ok(match ext {
        Some(ext) => format!(
            "{unix_millis}-{nonce}-{stem}.{}",
            clean(ext).to_ascii_lowercase()
        ),
        None => format!("{unix_millis}-{nonce}-{stem}"),
    })
}
