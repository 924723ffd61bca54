//! View components for the application.

pub mod home;
pub mod layout;
pub mod login;
pub mod overview;
pub mod projects;
pub mod register;
pub mod tasks;

pub use home::Home;
pub use layout::DashboardLayout;
pub use login::Login;
pub use overview::Overview;
pub use projects::Projects;
pub use register::Register;
pub use tasks::Tasks;
