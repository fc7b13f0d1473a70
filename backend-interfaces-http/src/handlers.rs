pub mod key_handlers;
pub mod ops_handlers;
pub mod query_handlers;
pub mod report_handlers;

pub use key_handlers::*;
pub use ops_handlers::*;
pub use query_handlers::*;
pub use report_handlers::*;
