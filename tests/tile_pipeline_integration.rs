//! Integration tests for the style-to-texture tile pipeline.
//!
//! These tests verify the complete tile flow through the public API:
//! - Style definition → tile identity resolution (mirror rotation)
//! - Identity-keyed fetch/decode/upload via the texture cache
//! - Texture lifecycle (release on unload, dedup by identity)
//!
//! Run with: `cargo test --test tile_pipeline_integration`

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::DynamicImage;
use terralayer::net::{AsyncHttpClient, FetchError};
use terralayer::style::{StyleProvider, StyleRegistry};
use terralayer::texture::{
    TextureError, TextureHandle, TextureUploader, TileQueryResult, TileTextureCache,
};
use terralayer::tile::TilePosition;

// ============================================================================
// Mock Implementations
// ============================================================================

/// HTTP client serving a tiny PNG for any URL, recording requests.
#[derive(Clone, Default)]
struct PngServer {
    requests: Arc<Mutex<Vec<String>>>,
}

impl PngServer {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl AsyncHttpClient for PngServer {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        self.requests.lock().unwrap().push(url.to_string());
        async move { Ok(png_bytes()) }
    }
}

/// Uploader minting sequential handles and tracking releases.
#[derive(Clone, Default)]
struct CountingUploader {
    next_id: Arc<AtomicU64>,
    released: Arc<Mutex<Vec<TextureHandle>>>,
}

impl CountingUploader {
    fn released(&self) -> Vec<TextureHandle> {
        self.released.lock().unwrap().clone()
    }
}

impl TextureUploader for CountingUploader {
    fn upload(&self, _image: &DynamicImage) -> Result<TextureHandle, TextureError> {
        Ok(TextureHandle(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    fn release(&self, handle: TextureHandle) {
        self.released.lock().unwrap().push(handle);
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}

fn mirrored_style() -> terralayer::style::StyleDefinition {
    let payload = br#"{
        "metadata": { "version": 1, "comment": "" },
        "maps": {
            "mirrored": {
                "urls": [
                    "http://a.tiles.example/{z}/{x}/{y}.png",
                    "http://b.tiles.example/{z}/{x}/{y}.png"
                ]
            }
        }
    }"#;
    let registry = StyleRegistry::new(false);
    let delta = registry
        .parse_payload(StyleProvider::BuiltIn, payload)
        .expect("test payload must parse");
    delta.styles["mirrored"].clone()
}

async fn poll_ready<C, U>(
    cache: &mut TileTextureCache<C, U>,
    identity: &terralayer::tile::TileIdentity,
) -> TextureHandle
where
    C: AsyncHttpClient + Clone + Send + Sync + 'static,
    U: TextureUploader,
{
    for _ in 0..100 {
        match cache.query(identity) {
            TileQueryResult::Pending => tokio::time::sleep(Duration::from_millis(2)).await,
            TileQueryResult::Ready(handle) => return handle,
            other => panic!("tile settled as {other:?}"),
        }
    }
    panic!("tile never became ready");
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_style_resolves_tiles_across_mirrors() {
    let style = mirrored_style();
    let server = PngServer::default();
    let mut cache = TileTextureCache::new(
        server.clone(),
        CountingUploader::default(),
        tokio::runtime::Handle::current(),
    );

    // Adjacent tiles land on alternating mirrors.
    let even = style.tile_identity(TilePosition::new(6, 10, 10).unwrap());
    let odd = style.tile_identity(TilePosition::new(6, 10, 11).unwrap());

    poll_ready(&mut cache, &even).await;
    poll_ready(&mut cache, &odd).await;

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("http://a.tiles.example/6/10/10"));
    assert!(requests[1].starts_with("http://b.tiles.example/6/10/11"));
}

#[tokio::test]
async fn test_same_tile_is_fetched_and_uploaded_once() {
    let style = mirrored_style();
    let server = PngServer::default();
    let mut cache = TileTextureCache::new(
        server.clone(),
        CountingUploader::default(),
        tokio::runtime::Handle::current(),
    );

    let position = TilePosition::new(6, 3, 5).unwrap();
    let first = style.tile_identity(position);
    let second = style.tile_identity(position);

    let a = poll_ready(&mut cache, &first).await;
    let b = poll_ready(&mut cache, &second).await;

    assert_eq!(a, b, "one identity must map to one texture");
    assert_eq!(server.requests().len(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_unload_releases_texture_and_allows_refetch() {
    let style = mirrored_style();
    let server = PngServer::default();
    let uploader = CountingUploader::default();
    let mut cache = TileTextureCache::new(
        server.clone(),
        uploader.clone(),
        tokio::runtime::Handle::current(),
    );

    let identity = style.tile_identity(TilePosition::new(5, 2, 2).unwrap());
    let handle = poll_ready(&mut cache, &identity).await;

    cache.unload(&identity);
    assert_eq!(uploader.released(), vec![handle]);
    assert_eq!(cache.peek(&identity), TileQueryResult::NotStarted);

    // A later query runs the pipeline again from scratch.
    let refetched = poll_ready(&mut cache, &identity).await;
    assert_ne!(handle, refetched);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_catalog_to_screen_path() {
    // The path a map widget takes: load a catalog, pick a style, resolve
    // visible positions, query until every texture is ready.
    let payload = br#"{
        "metadata": { "version": 1, "comment": "" },
        "maps": { "osm": { "urls": ["http://t.example/{z}/{x}/{y}.png"] } }
    }"#;
    let mut registry = StyleRegistry::new(false);
    let delta = registry.parse_payload(StyleProvider::BuiltIn, payload).unwrap();
    registry.merge(delta);

    let catalog = registry.effective_catalog();
    let style = &catalog["osm"];

    let server = PngServer::default();
    let mut cache = TileTextureCache::new(
        server.clone(),
        CountingUploader::default(),
        tokio::runtime::Handle::current(),
    );

    let mut handles = HashMap::new();
    for x in 0..2 {
        for y in 0..2 {
            let identity = style.tile_identity(TilePosition::new(4, x, y).unwrap());
            handles.insert((x, y), poll_ready(&mut cache, &identity).await);
        }
    }

    assert_eq!(handles.len(), 4);
    assert_eq!(cache.len(), 4);
    assert_eq!(server.requests().len(), 4);
}
