pub mod filter;
pub mod projector;
pub mod sequencer;
pub mod summary;
pub mod task_ops;
