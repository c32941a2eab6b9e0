//! Diagram persistence: the export record, share links and storage backends.

mod diagram;
mod link;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use diagram::{Diagram, DiagramEntry};
pub use link::{DATA_PARAM, get_data_in_url, set_data_in_url};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Diagram not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for diagram storage backends.
///
/// Backends only ever see the exported [`Diagram`]; connections between shapes
/// are not part of it.
pub trait Storage {
    /// Save a diagram.
    fn save(&self, id: &str, diagram: &Diagram) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a diagram.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Diagram>>;

    /// Delete a diagram.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all diagram IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a diagram exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Simple blocking executor for storage tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
