pub mod admin;
pub mod db;
pub mod link;
pub mod template;
