pub mod conversion;
pub mod cycle;
pub mod definition;
pub mod partition;
pub mod query;
pub mod topology;

pub use conversion::*;
pub use cycle::*;
pub use definition::*;
pub use partition::*;
pub use query::*;
pub use topology::*;
