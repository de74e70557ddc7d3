//! sea-orm entities for the blog database.

pub mod categories;
pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;
