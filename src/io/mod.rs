pub mod config_io;
pub mod lock;
pub mod recovery;
pub mod slot;
pub mod store;
pub mod watcher;
pub mod workspace_io;
