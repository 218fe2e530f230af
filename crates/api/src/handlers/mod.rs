pub mod admin;
pub mod auth;
pub mod catalog;
pub mod companies;
pub mod jobs;
pub mod news;
pub mod photos;
pub mod properties;
