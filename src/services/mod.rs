pub mod auth;
pub mod embed;
pub mod gallery;
pub mod media;
pub mod storage;
pub mod upload;
