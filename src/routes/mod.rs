pub mod assignments;

pub mod auth;

pub mod classrooms;

pub mod submissions;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use classrooms::configure_classroom_routes;
pub use submissions::configure_submission_routes;
