//! Texture upload capability.
//!
//! Uploading a decoded tile image to the GPU is a render concern; the cache
//! consumes it through [`TextureUploader`] so tests and alternative render
//! backends can plug in their own implementation.

use image::DynamicImage;
use thiserror::Error;

/// Errors raised by a texture uploader.
#[derive(Debug, Clone, Error)]
pub enum TextureError {
    /// The image could not be turned into a render texture
    #[error("texture upload failed: {0}")]
    UploadFailed(String),
}

/// Opaque handle to a render-owned texture.
///
/// Handles are minted by a [`TextureUploader`] and owned exclusively by the
/// tile texture cache; no other component may release or mutate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Trait for uploading decoded tile images as render textures.
///
/// Implementations must be thread-safe (`Send + Sync`); upload and release
/// are both invoked from the thread polling the cache.
pub trait TextureUploader: Send + Sync {
    /// Upload a decoded image, returning the handle of the new texture.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError`] if the render backend rejects the image.
    fn upload(&self, image: &DynamicImage) -> Result<TextureHandle, TextureError>;

    /// Release a previously uploaded texture.
    fn release(&self, handle: TextureHandle);
}
