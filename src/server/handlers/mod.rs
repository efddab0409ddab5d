//! Request handlers for the web server.

mod api;
mod forms;
mod pages;
mod static_files;

pub use api::{api_assets, api_status, api_users, health};
pub use forms::{assign_asset, create_asset, create_user, mark_lost, reclaim_asset};
pub use pages::{asset_detail, asset_new, index, user_new, users_index};
pub use static_files::{serve_css, serve_js};
