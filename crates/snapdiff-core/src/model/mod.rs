pub mod record;
pub mod router;
pub mod server;
pub mod value;

pub use record::Record;
pub use router::ContentRouter;
pub use server::{AssignmentMap, ContentServer, ServerTier};
pub use value::FieldValue;
