// ==========================================
// Station Registry - attachment storage
// ==========================================
// Uploaded photos and PDF documents land in subdirectories of the data
// dir. Filename collisions are resolved by probing for the next free
// numeric suffix, never by overwriting; the stored value is a relative
// path so the data dir can move.
// ==========================================

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Attachment storage error type.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Write to the attachment directory failed (disk full, permission).
    /// The owning record's row must be left unchanged by callers.
    #[error("attachment write failed: {path}: {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("attachment directory unavailable: {path}: {source}")]
    DirUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Which attachment directory a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Photo,
    Pdf,
}

impl AttachmentKind {
    fn subdir(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "photos",
            AttachmentKind::Pdf => "pdfs",
        }
    }
}

/// File store rooted at the data directory.
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn dir_for(&self, kind: AttachmentKind) -> PathBuf {
        self.root.join(kind.subdir())
    }

    /// Write `bytes` under the kind's directory using a sanitized
    /// version of `filename_hint`; on collision probe `stem_1.ext`,
    /// `stem_2.ext`, ... for the first free name.
    ///
    /// Returns the path relative to the store root (e.g.
    /// `photos/card_1.jpg`).
    pub fn store(
        &self,
        kind: AttachmentKind,
        filename_hint: &str,
        bytes: &[u8],
    ) -> StorageResult<String> {
        let dir = self.dir_for(kind);
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::DirUnavailable {
            path: dir.display().to_string(),
            source,
        })?;

        let (stem, ext) = split_hint(filename_hint);

        let mut file_name = join_name(&stem, &ext);
        let mut target = dir.join(&file_name);
        let mut suffix = 1u32;
        while target.exists() {
            file_name = join_name(&format!("{stem}_{suffix}"), &ext);
            target = dir.join(&file_name);
            suffix += 1;
        }

        std::fs::write(&target, bytes).map_err(|source| StorageError::WriteFailure {
            path: target.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %target.display(), "attachment stored");
        Ok(format!("{}/{}", kind.subdir(), file_name))
    }

    /// Absolute path for a stored relative path.
    pub fn absolute_path(&self, stored: &str) -> PathBuf {
        let p = Path::new(stored);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

/// Split a filename hint into sanitized stem and extension.
fn split_hint(hint: &str) -> (String, String) {
    let name = Path::new(hint)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let (raw_stem, raw_ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (name, ""),
    };
    (sanitize(raw_stem), sanitize(raw_ext))
}

/// Keep ASCII alphanumerics, `-`, `_` and `.`; everything else becomes
/// `_`. Leading/trailing dots and underscores are trimmed; an empty
/// result falls back to "file".
fn sanitize(part: &str) -> String {
    let cleaned: String = part
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() && !part.is_empty() {
        // all-garbage stems still need a stable name
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

fn join_name(stem: &str, ext: &str) -> String {
    let stem = if stem.is_empty() { "file" } else { stem };
    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_and_trims() {
        assert_eq!(sanitize("my photo (1)"), "my_photo__1");
        assert_eq!(sanitize("..hidden_"), "hidden");
        assert_eq!(sanitize("картина"), "file");
    }

    #[test]
    fn test_split_hint_keeps_extension() {
        assert_eq!(split_hint("card.jpg"), ("card".into(), "jpg".into()));
        assert_eq!(split_hint("no-ext"), ("no-ext".into(), "".into()));
        assert_eq!(
            split_hint("/tmp/евидение.pdf"),
            ("file".into(), "pdf".into())
        );
    }
}
