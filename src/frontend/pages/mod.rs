pub mod landing;
pub mod owner_dashboard;
pub mod owner_login;
pub mod upload;
pub mod user_dashboard;

pub use landing::NameInputPage;
pub use owner_dashboard::OwnerDashboardPage;
pub use owner_login::OwnerLoginPage;
pub use upload::FileUploadPage;
pub use user_dashboard::UserDashboardPage;
