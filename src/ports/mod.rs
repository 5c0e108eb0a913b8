pub mod lending_api;
pub mod location;
pub mod notification_service;
pub mod user_preferences;

pub use lending_api::{ApiError, LendingApi};
pub use location::Location;
pub use notification_service::NotificationService;
pub use user_preferences::UserPreferences;
