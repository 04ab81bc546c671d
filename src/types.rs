//! Shared types passed between the pipeline stages.
//!
//! The loader produces [`ImageAsset`]s and wraps them in an [`ImageSet`]; the
//! composer only reads the set; the document writer keys embedded images by
//! [`ContentHash`].

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest of an asset's encoded bytes, as lowercase hex.
///
/// Two assets with the same hash are embedded once in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One prepared cell image: JPEG bytes at the cell resolution.
///
/// Immutable once built; the hash is computed up front so repeated
/// placements never re-hash the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    name: String,
    width: u32,
    height: u32,
    data: Vec<u8>,
    hash: ContentHash,
}

impl ImageAsset {
    pub fn new(name: impl Into<String>, width: u32, height: u32, data: Vec<u8>) -> Self {
        let hash = ContentHash::of(&data);
        Self {
            name: name.into(),
            width,
            height,
            data,
            hash,
        }
    }

    /// Source file name the asset was prepared from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded JPEG bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }
}

/// Non-empty, ordered collection of prepared images.
///
/// Composition never reorders the set; each page works on its own
/// permutation of indices instead.
#[derive(Debug, Clone)]
pub struct ImageSet {
    assets: Vec<ImageAsset>,
}

impl ImageSet {
    /// Returns `None` for an empty vector.
    pub fn new(assets: Vec<ImageAsset>) -> Option<Self> {
        if assets.is_empty() {
            None
        } else {
            Some(Self { assets })
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageAsset> {
        self.assets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageAsset> {
        self.assets.iter()
    }

    pub fn as_slice(&self) -> &[ImageAsset] {
        &self.assets
    }
}

impl std::ops::Index<usize> for ImageSet {
    type Output = ImageAsset;

    fn index(&self, index: usize) -> &ImageAsset {
        &self.assets[index]
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a ImageAsset;
    type IntoIter = std::slice::Iter<'a, ImageAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_sha256_hex() {
        let hash = ContentHash::of(b"abc");
        assert_eq!(
            hash.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn identical_bytes_share_a_hash() {
        let a = ImageAsset::new("a.jpg", 1, 1, vec![1, 2, 3]);
        let b = ImageAsset::new("b.jpg", 1, 1, vec![1, 2, 3]);
        let c = ImageAsset::new("c.jpg", 1, 1, vec![3, 2, 1]);
        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
    }

    #[test]
    fn empty_image_set_is_rejected() {
        assert!(ImageSet::new(Vec::new()).is_none());
    }

    #[test]
    fn image_set_keeps_order() {
        let set = ImageSet::new(vec![
            ImageAsset::new("first.png", 1, 1, vec![1]),
            ImageAsset::new("second.png", 1, 1, vec![2]),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        let names: Vec<&str> = set.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["first.png", "second.png"]);
        assert_eq!(set[1].name(), "second.png");
        assert!(set.get(2).is_none());
    }
}
