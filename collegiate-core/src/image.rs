//! Representative images for ranked institutions.
//!
//! Image lookup is best effort. A ranking is always returned even when
//! every lookup misses; missing images are reported as
//! [`FALLBACK_IMAGE_URL`].

use crate::RankedResult;

/// Placeholder image used when a lookup finds nothing.
pub const FALLBACK_IMAGE_URL: &str = "https://media.istockphoto.com/id/1147544807/vector/thumbnail-image-vector-graphic.jpg?s=612x612&w=0&k=20&c=rnCKVbdxqkjlcs3xH87-9gocETqpspHFXu5dIGB4wuM=";

/// Find a representative image URL for a free-text query.
///
/// The method is infallible: implementations must return
/// [`FALLBACK_IMAGE_URL`] on provider misses or failures.
///
/// # Examples
///
/// ```rust
/// use collegiate_core::{FALLBACK_IMAGE_URL, ImageLookup};
///
/// struct NoImages;
///
/// impl ImageLookup for NoImages {
///     fn first_image(&self, _query: &str) -> String {
///         FALLBACK_IMAGE_URL.to_owned()
///     }
/// }
///
/// assert_eq!(NoImages.first_image("Example College"), FALLBACK_IMAGE_URL);
/// ```
pub trait ImageLookup: Send + Sync {
    /// Return an image URL for `query`.
    fn first_image(&self, query: &str) -> String;
}

/// Lookup that always answers with [`FALLBACK_IMAGE_URL`].
///
/// Used when no image search provider is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackImageLookup;

impl ImageLookup for FallbackImageLookup {
    fn first_image(&self, _query: &str) -> String {
        FALLBACK_IMAGE_URL.to_owned()
    }
}

/// Look up one image per ranked institution, in ranked order.
pub fn enrich_with_images(result: &RankedResult<'_>, lookup: &dyn ImageLookup) -> Vec<String> {
    result
        .entries()
        .iter()
        .map(|entry| lookup.first_image(&entry.institution.name))
        .collect()
}
