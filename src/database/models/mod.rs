pub mod admin;
pub mod download;
pub mod feedback;
pub mod project;
pub mod request;
pub mod setting;
pub mod template;

pub use admin::AdminUser;
pub use download::DownloadLog;
pub use feedback::CustomerFeedback;
pub use project::Project;
pub use request::{NewProjectRequest, ProjectRequest, RequestStatus};
pub use setting::AdminSetting;
pub use template::EmailTemplate;
