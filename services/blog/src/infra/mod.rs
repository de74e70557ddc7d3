pub mod cache;
pub mod code;
pub mod db;
pub mod hash;
pub mod mail;
pub mod mail_queue;
