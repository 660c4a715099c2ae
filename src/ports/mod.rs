//! Ports (trait boundaries) for external dependencies.
//!
//! The training loop and the persistence layer talk to the outside world
//! only through these traits; concrete implementations live in `adapters`
//! and `pipeline::observers`.

pub mod observer;
pub mod repository;

pub use observer::Observer;
pub use repository::QTableRepository;
