// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Storefront-facing endpoints: request submission, downloads, testimonials,
// and the admin login that issues sessions for the protected tier.

pub mod download;
pub mod feedback;
pub mod login;
pub mod requests;

pub use download::download_get;
pub use feedback::{feedback_create, feedback_list};
pub use login::login_post;
pub use requests::request_create;
