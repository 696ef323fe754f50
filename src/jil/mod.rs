//! Core JIL data model and rendering.

pub mod models;
pub mod order;
pub mod process;
pub mod render;

pub use models::{AttrValue, BaseJob, BoxJob, CommandJob, FileWatchJob, JobRecord, OpenJob};
pub use order::FieldOrderPolicy;
pub use process::ProcessCollection;
pub use render::Renderer;
