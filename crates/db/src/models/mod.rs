pub mod album;
pub mod media;
pub mod slideshow_job;
pub mod user;
