pub mod album_repo;
pub mod media_repo;
pub mod slideshow_job_repo;
pub mod user_repo;

pub use album_repo::AlbumRepo;
pub use media_repo::MediaRepo;
pub use slideshow_job_repo::SlideshowJobRepo;
pub use user_repo::UserRepo;
