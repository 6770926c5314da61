pub mod answer;
pub mod block;
pub mod connection;
pub mod conversion;
pub mod snapshot;

pub use answer::*;
pub use block::*;
pub use connection::*;
pub use conversion::*;
pub use snapshot::*;
