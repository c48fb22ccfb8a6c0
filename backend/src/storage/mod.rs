pub mod cattle_repository;
pub mod farm_repository;
pub mod record_repository;
pub mod traits;
pub mod user_repository;

pub use cattle_repository::CattleRepository;
pub use farm_repository::FarmRepository;
pub use record_repository::RecordRepository;
pub use user_repository::UserRepository;
