pub mod auth;
pub mod comments;
pub mod follows;
pub mod groups;
pub mod health;
pub mod posts;

pub use auth::{obtain_token, refresh_token, register};
pub use comments::{
    create_comment, delete_comment, get_comment, list_comments, patch_comment, update_comment,
};
pub use follows::{create_follow, delete_follow, list_follows};
pub use groups::{create_group, get_group, list_groups};
pub use health::health_check;
pub use posts::{create_post, delete_post, get_post, list_posts, patch_post, update_post};
