//! Terralayer - Live map content synchronization core
//!
//! This library keeps the content of an in-game world map correct and fresh
//! while staying decoupled from the render loop. It covers three concerns
//! that share the same shape (idempotent identity, asynchronous partial
//! failure, incremental reconciliation against external truth):
//!
//! - resolving the effective tile style catalog from ordered configuration
//!   providers ([`style`], driven by [`orchestrator`])
//! - fetching, caching, and releasing remote raster tile textures without
//!   blocking the frame loop ([`texture`], identified by [`tile`])
//! - reconciling live map markers against a changing entity set ([`marker`])
//!
//! # High-Level API
//!
//! ```ignore
//! use terralayer::orchestrator::{UpdateConfig, UpdateOrchestrator};
//! use terralayer::net::{HickoryTxtResolver, ReqwestClient};
//!
//! let orchestrator = UpdateOrchestrator::new(
//!     UpdateConfig::default(),
//!     ReqwestClient::new()?,
//!     HickoryTxtResolver::from_system_conf()?,
//! );
//! orchestrator.reload().await;
//!
//! let catalog = orchestrator.registry().lock().unwrap().effective_catalog();
//! ```
//!
//! Rendering, widgets, input handling, and projection mathematics are host
//! concerns; this crate exposes them only as trait capabilities
//! ([`texture::TextureUploader`], [`geo::Projection`]).

pub mod geo;
pub mod logging;
pub mod marker;
pub mod net;
pub mod orchestrator;
pub mod style;
pub mod texture;
pub mod tile;

/// Version of the terralayer library.
///
/// Used as the `${version}` substitution when resolving the online style
/// update URL. Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
