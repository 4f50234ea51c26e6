mod landing;
pub use landing::Landing;

mod auth;
pub use auth::Auth;

mod dashboard;
pub use dashboard::Dashboard;

mod profile;
pub use profile::Profile;
