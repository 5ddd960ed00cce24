//! Background trending worker.
//!
//! Keeps trending-store traffic off the runtime's control flow: the runtime
//! posts messages and later receives responses as events.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol types
//! - `handler`: `TrendingRecorder` and its worker task

pub mod handler;
pub mod messages;

pub use handler::{TrendingRecorder, WorkerHandle, DEFAULT_IMAGE_BASE_URL};
pub use messages::{WorkerMessage, WorkerResponse};
