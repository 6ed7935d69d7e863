pub mod activity;

pub mod auth;

pub mod submissions;

pub mod system;

pub mod users;

pub use activity::configure_activity_routes;
pub use auth::configure_auth_routes;
pub use submissions::configure_submissions_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
