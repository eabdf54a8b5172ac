pub mod formatters;
pub mod reading;
pub mod service;
pub mod sheets;

pub use reading::ReadingRecord;
pub use service::ServiceName;
