//! Greyscale conversion pipeline components.
//!
//! This module contains all the stages of a run:
//! - **validate**: Check the source folder and prepare the destination
//! - **discovery**: Find image files directly inside a folder
//! - **chunk**: Split the discovered list into one chunk per worker
//! - **resolve**: Derive each output path
//! - **transform**: Decode, convert to luma, and write one image
//! - **pool**: Run one worker per chunk and join them all
//! - **channel**: Bounded result channel from workers to the pool

pub mod channel;
pub mod chunk;
pub mod discovery;
pub mod pool;
pub mod resolve;
pub mod transform;
pub mod validate;

// Re-exports for convenient access
pub use chunk::split_chunks;
pub use discovery::FileDiscovery;
pub use pool::WorkerPool;
pub use resolve::resolve_output_path;
pub use transform::{Convert, ImageTransformer};
pub use validate::RunTarget;
