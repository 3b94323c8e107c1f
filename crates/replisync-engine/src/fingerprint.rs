//! Content-based file fingerprinting

use replisync_types::{Error, Result};
use std::path::Path;
use tokio::fs;

/// Content digest of a file
///
/// Two files are content-equal iff their fingerprints match. The digest is
/// computed over the full byte content only; path, mtime, and permissions
/// never influence it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    /// Compute the fingerprint of an in-memory byte buffer
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(blake3::hash(data))
    }

    /// Hex representation of the digest
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

/// Compute the fingerprint of a file's full content
///
/// Requires a complete, successful read; any open or read failure is an
/// [`Error::Io`] carrying the offending path. The file is never mutated.
pub async fn fingerprint_file<P: AsRef<Path>>(path: P) -> Result<Fingerprint> {
    let path = path.as_ref();
    let content = fs::read(path).await.map_err(|e| Error::Io {
        message: format!("Failed to read file '{}': {}", path.display(), e),
    })?;

    Ok(Fingerprint::of_bytes(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    #[tokio::test]
    async fn test_fingerprint_determinism() {
        let temp_dir = TempDir::new().unwrap();
        let path_a = temp_dir.path().join("a.txt");
        let path_b = temp_dir.path().join("b.txt");
        fs::write(&path_a, b"same content").await.unwrap();
        fs::write(&path_b, b"same content").await.unwrap();

        let fp_a = fingerprint_file(&path_a).await.unwrap();
        let fp_b = fingerprint_file(&path_b).await.unwrap();

        // Identical content hashes identically regardless of path
        assert_eq!(fp_a, fp_b);
    }

    #[tokio::test]
    async fn test_fingerprint_distinguishes_content() {
        let temp_dir = TempDir::new().unwrap();
        let path_a = temp_dir.path().join("a.txt");
        let path_b = temp_dir.path().join("b.txt");
        fs::write(&path_a, b"hello").await.unwrap();
        fs::write(&path_b, b"world").await.unwrap();

        let fp_a = fingerprint_file(&path_a).await.unwrap();
        let fp_b = fingerprint_file(&path_b).await.unwrap();

        assert_ne!(fp_a, fp_b);
    }

    #[tokio::test]
    async fn test_fingerprint_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty");
        fs::write(&path, b"").await.unwrap();

        let fp = fingerprint_file(&path).await.unwrap();
        assert_eq!(fp, Fingerprint::of_bytes(b""));
    }

    #[tokio::test]
    async fn test_fingerprint_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = fingerprint_file(temp_dir.path().join("gone")).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_fingerprint_hex() {
        let fp = Fingerprint::of_bytes(b"abc");
        let hex = fp.to_hex();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
