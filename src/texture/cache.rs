//! Query-and-poll tile texture cache.

use std::collections::HashMap;

use image::DynamicImage;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::net::AsyncHttpClient;
use crate::tile::TileIdentity;

use super::{TextureHandle, TextureUploader, TileFetchError};

/// Result of querying the cache for one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileQueryResult {
    /// Texture is uploaded and ready to draw
    Ready(TextureHandle),
    /// Fetch is in flight; poll again next frame
    Pending,
    /// The fetch pipeline failed; terminal until the tile is unloaded
    Failed(TileFetchError),
    /// No entry exists for this identity
    NotStarted,
}

/// Per-entry state machine.
///
/// `NotStarted` is represented by absence from the map, so illegal
/// combinations (a texture and an in-flight fetch at once) cannot exist.
enum EntryState {
    Pending {
        rx: oneshot::Receiver<Result<DynamicImage, TileFetchError>>,
        cancel: CancellationToken,
    },
    Ready(TextureHandle),
    Failed(TileFetchError),
}

/// Asynchronous tile texture cache keyed by [`TileIdentity`].
///
/// One instance owns every entry and every texture handle it produced.
/// Fetches are spawned on the injected runtime handle; state transitions
/// out of `Pending` happen only when a [`query`](Self::query) observes the
/// completed fetch, keeping the frame loop the sole scheduling point.
pub struct TileTextureCache<C, U> {
    entries: HashMap<TileIdentity, EntryState>,
    client: C,
    uploader: U,
    runtime: tokio::runtime::Handle,
}

impl<C, U> TileTextureCache<C, U>
where
    C: AsyncHttpClient + Clone + Send + Sync + 'static,
    U: TextureUploader,
{
    /// Create a new cache.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for tile GETs
    /// * `uploader` - Render-side texture upload capability
    /// * `runtime` - Runtime the fetch tasks are spawned on
    pub fn new(client: C, uploader: U, runtime: tokio::runtime::Handle) -> Self {
        Self {
            entries: HashMap::new(),
            client,
            uploader,
            runtime,
        }
    }

    /// Query the cache for a tile, starting its fetch on first sight.
    ///
    /// Never blocks: an in-flight fetch is polled once, and the entry
    /// transitions only if the fetch already completed. `Ready` and
    /// `Failed` are terminal until [`unload`](Self::unload).
    pub fn query(&mut self, identity: &TileIdentity) -> TileQueryResult {
        let state = match self.entries.get_mut(identity) {
            Some(state) => state,
            None => {
                let state = start_fetch(&self.runtime, &self.client, identity);
                self.entries.insert(identity.clone(), state);
                return TileQueryResult::Pending;
            }
        };

        let next = match state {
            EntryState::Ready(handle) => return TileQueryResult::Ready(*handle),
            EntryState::Failed(error) => return TileQueryResult::Failed(error.clone()),
            EntryState::Pending { rx, .. } => match rx.try_recv() {
                Err(TryRecvError::Empty) => return TileQueryResult::Pending,
                Ok(Ok(image)) => match self.uploader.upload(&image) {
                    Ok(handle) => {
                        trace!(url = identity.url(), "Tile texture ready");
                        EntryState::Ready(handle)
                    }
                    Err(e) => EntryState::Failed(TileFetchError::Upload(e.to_string())),
                },
                Ok(Err(error)) => {
                    debug!(url = identity.url(), error = %error, "Tile fetch failed");
                    EntryState::Failed(error)
                }
                Err(TryRecvError::Closed) => EntryState::Failed(TileFetchError::Network(
                    "tile fetch task terminated unexpectedly".to_string(),
                )),
            },
        };

        let result = match &next {
            EntryState::Ready(handle) => TileQueryResult::Ready(*handle),
            EntryState::Failed(error) => TileQueryResult::Failed(error.clone()),
            EntryState::Pending { .. } => TileQueryResult::Pending,
        };
        *state = next;
        result
    }

    /// Observe a tile's state without starting a fetch or polling it.
    pub fn peek(&self, identity: &TileIdentity) -> TileQueryResult {
        match self.entries.get(identity) {
            None => TileQueryResult::NotStarted,
            Some(EntryState::Pending { .. }) => TileQueryResult::Pending,
            Some(EntryState::Ready(handle)) => TileQueryResult::Ready(*handle),
            Some(EntryState::Failed(error)) => TileQueryResult::Failed(error.clone()),
        }
    }

    /// Cancel an in-flight fetch, removing the entry as if never queried.
    ///
    /// Best-effort: a fetch that races past cancellation completes into a
    /// dropped channel and is discarded unobserved. Entries that are
    /// already `Ready` or `Failed` are left alone.
    pub fn cancel(&mut self, identity: &TileIdentity) {
        if matches!(self.entries.get(identity), Some(EntryState::Pending { .. })) {
            if let Some(EntryState::Pending { cancel, .. }) = self.entries.remove(identity) {
                cancel.cancel();
                trace!(url = identity.url(), "Tile fetch cancelled");
            }
        }
    }

    /// Unload a tile: cancel if pending, release its texture if ready,
    /// remove the entry. Unloading an absent identity is a no-op.
    pub fn unload(&mut self, identity: &TileIdentity) {
        match self.entries.remove(identity) {
            None => {}
            Some(EntryState::Pending { cancel, .. }) => cancel.cancel(),
            Some(EntryState::Ready(handle)) => self.uploader.release(handle),
            Some(EntryState::Failed(_)) => {}
        }
    }

    /// Unload every entry, releasing all textures.
    pub fn unload_all(&mut self) {
        for (_, state) in self.entries.drain() {
            match state {
                EntryState::Pending { cancel, .. } => cancel.cancel(),
                EntryState::Ready(handle) => self.uploader.release(handle),
                EntryState::Failed(_) => {}
            }
        }
    }

    /// Number of live entries (pending, ready, or failed).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spawn the fetch/decode task for one tile.
fn start_fetch<C>(
    runtime: &tokio::runtime::Handle,
    client: &C,
    identity: &TileIdentity,
) -> EntryState
where
    C: AsyncHttpClient + Clone + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let client = client.clone();
    let url = identity.url().to_string();

    runtime.spawn(async move {
        let outcome = tokio::select! {
            _ = token.cancelled() => return,
            outcome = fetch_and_decode(&client, &url) => outcome,
        };
        // The receiver is gone if the entry was unloaded meanwhile; a late
        // result must be discarded rather than applied.
        let _ = tx.send(outcome);
    });

    debug!(url = identity.url(), "Tile fetch started");
    EntryState::Pending { rx, cancel }
}

/// Download and decode one tile image.
async fn fetch_and_decode<C: AsyncHttpClient>(
    client: &C,
    url: &str,
) -> Result<DynamicImage, TileFetchError> {
    let bytes = match client.get(url).await {
        Ok(bytes) => bytes,
        Err(e) if e.is_not_found() => return Err(TileFetchError::NotFound),
        Err(e) => return Err(TileFetchError::Network(e.to_string())),
    };
    if bytes.is_empty() {
        // Some tile servers answer missing tiles with 200 and no body.
        return Err(TileFetchError::NotFound);
    }
    image::load_from_memory(&bytes).map_err(|e| TileFetchError::Decode(e.to_string()))
}
