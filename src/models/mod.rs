//! Data models for assetman.

mod asset;
mod user;

pub use asset::{Asset, AssetDisplay, AssetStatus};
pub use user::User;
