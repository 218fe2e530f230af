//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Operations that touch more than
//! one row run inside a single transaction.

pub mod company_repo;
pub mod dashboard_repo;
pub mod job_repo;
pub mod news_repo;
pub mod photo_repo;
pub mod property_repo;
pub mod review_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod user_repo;

pub use company_repo::CompanyRepo;
pub use dashboard_repo::DashboardRepo;
pub use job_repo::JobRepo;
pub use news_repo::NewsRepo;
pub use photo_repo::PhotoRepo;
pub use property_repo::PropertyRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use user_repo::UserRepo;
