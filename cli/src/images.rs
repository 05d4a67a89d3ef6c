use std::io;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

/// Read one image file and encode it as a data URI.
///
/// No format or size validation happens here; oversized images are sent
/// as-is and the service may reject them as a generic gateway failure.
pub async fn encode_image(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(bytes)))
}

/// Encode a set of image files concurrently, one task per file.
///
/// Results arrive in completion order, not selection order; the returned
/// sequence reflects that and callers must not rely on it matching the input
/// order. Files that cannot be read are skipped silently (debug-logged).
pub async fn encode_images(paths: &[PathBuf]) -> Vec<String> {
    let mut tasks: FuturesUnordered<_> = paths
        .iter()
        .map(|path| {
            let path = path.clone();
            async move { (path.clone(), encode_image(&path).await) }
        })
        .collect();

    let mut encoded = Vec::new();
    while let Some((path, result)) = tasks.next().await {
        match result {
            Ok(data_uri) => encoded.push(data_uri),
            Err(e) => debug!("Skipping unreadable image {:?}: {}", path, e),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_encode_image_produces_data_uri() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meal.jpg");
        fs::write(&path, b"fakejpegbytes").unwrap();

        let uri = encode_image(&path).await.unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let payload = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        assert_eq!(BASE64.decode(payload).unwrap(), b"fakejpegbytes");
    }

    #[tokio::test]
    async fn test_encode_images_skips_unreadable_files() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.jpg");
        fs::write(&good, b"a").unwrap();
        let missing = dir.path().join("missing.jpg");

        let encoded = encode_images(&[good, missing]).await;
        assert_eq!(encoded.len(), 1);
    }

    #[tokio::test]
    async fn test_encode_images_returns_all_readable() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..3 {
            let path = dir.path().join(format!("{}.jpg", i));
            fs::write(&path, format!("img{}", i)).unwrap();
            paths.push(path);
        }

        let mut encoded = encode_images(&paths).await;
        // Completion order is not guaranteed, only the set of results
        encoded.sort();
        assert_eq!(encoded.len(), 3);
    }
}
