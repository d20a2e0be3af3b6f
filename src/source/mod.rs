pub mod cache;
pub mod fetch;
pub mod table;

pub use cache::*;
pub use fetch::*;
pub use table::*;
