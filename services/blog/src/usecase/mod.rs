pub mod auth;
pub mod category;
pub mod comment;
pub mod like;
pub mod post;
pub mod token;
pub mod upload;
pub mod user;
pub mod verification;
