mod activity_repo;
mod content_repo;
mod engagement_repo;
mod user_repo;

pub use activity_repo::ActivityRepo;
pub use content_repo::ContentRepo;
pub use engagement_repo::EngagementRepo;
pub use user_repo::UserRepo;
