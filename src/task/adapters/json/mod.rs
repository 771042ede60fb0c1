//! Durable JSON-file adapter for the task repository.

mod repository;

pub use repository::JsonFileTaskRepository;
