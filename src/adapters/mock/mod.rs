pub mod lending_api;
pub mod location;
pub mod notification_service;
pub mod user_preferences;

pub use lending_api::{ApiCall, LendingApi};
pub use location::Location;
pub use notification_service::{NotificationService, Toast};
pub use user_preferences::UserPreferences;
