pub mod clock;
pub mod error;
pub mod types;
pub mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConsoleError, EntityKind, Result};
pub use types::{RecordId, coerce_id};
pub use value::Value;
