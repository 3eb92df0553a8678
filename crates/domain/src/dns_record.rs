mod record;
mod record_type;

pub use record::ResourceRecord;
pub use record_type::{RecordClass, RecordType};
