pub mod albums;
pub mod media;
pub mod slideshow;
