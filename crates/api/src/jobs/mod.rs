pub mod registry;
pub mod slideshow;
