pub mod summaries;
pub mod users;

pub use summaries::SummaryRepository;
pub use users::UserRepository;
