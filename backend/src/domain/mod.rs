pub mod cattle_service;
pub mod farm_service;
pub mod profile_service;
pub mod record_service;
pub mod user_service;

pub use cattle_service::CattleService;
pub use farm_service::FarmService;
pub use profile_service::ProfileService;
pub use record_service::RecordService;
pub use user_service::UserService;
