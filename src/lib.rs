pub mod config;
pub mod core;
pub mod display;
pub mod media;
pub mod models;
pub mod store;
pub mod theme;

mod auth;
mod feed;
mod posts;
mod users;

pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::errors::{EntityKind, Field, FieldError, MediaError, StoreError, StoreResult};
pub use crate::core::kv::{FileKv, KeyValue, MemoryKv};
pub use crate::media::{ImageChange, ImageRef};
pub use crate::models::models::{Comment, FilterState, Post, SortMode, Theme, User};
pub use crate::store::{Durability, PersistedStore};
