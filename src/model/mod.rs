pub mod config;
pub mod filter;
pub mod list;
pub mod task;
pub mod workspace;

pub use config::*;
pub use filter::*;
pub use list::*;
pub use task::*;
pub use workspace::*;
