pub mod envelope;
pub mod stored_file;
pub mod summary;
pub mod user;

pub use envelope::StageResult;
pub use stored_file::StoredFileReference;
pub use summary::{Summary, SummaryResponse, STATUS_COMPLETED};
pub use user::User;
