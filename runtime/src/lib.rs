// Copyright 2026 Announce Feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Announcement feed runtime: structured API first, headless-browser
//! extraction as fallback, normalized and TTL-cached.
//!
//! ```ignore
//! let service = AnnouncementService::new(FeedConfig::from_env());
//! let feed = service.fetch("delisting").await?;
//! ```

pub mod acquisition;
pub mod cache;
pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod fallback;
pub mod feed;
pub mod renderer;
pub mod service;

pub use category::Category;
pub use config::FeedConfig;
pub use error::{ExtractionError, FeedError, StructuredFetchError};
pub use feed::{Feed, FeedItem};
pub use service::AnnouncementService;
