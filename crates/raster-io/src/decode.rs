//! One-shot asynchronous decode.
//!
//! Decoding is the only step of the editor that may take longer than one
//! input event. [`decode_async`] moves the encoded bytes to a worker thread
//! and returns a [`DecodeHandle`]; the editor keeps handling input and
//! collects the buffer once it is ready:
//!
//! ```rust,ignore
//! let handle = raster_io::decode_async(std::fs::read("photo.png")?);
//! // ... later, on the event thread
//! if let Some(result) = handle.poll() {
//!     session.handle(InputEvent::ImageDecoded(result?));
//! }
//! ```

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use raster_core::PixelBuffer;
use tracing::{debug, warn};

use crate::{IoError, IoResult};

/// Pending result of a background decode. Delivers exactly one result.
#[derive(Debug)]
pub struct DecodeHandle {
    rx: Receiver<IoResult<PixelBuffer>>,
}

impl DecodeHandle {
    /// Blocks until the decode finishes.
    pub fn wait(self) -> IoResult<PixelBuffer> {
        self.rx.recv().unwrap_or(Err(IoError::Disconnected))
    }

    /// Returns the result if the decode has finished, `None` otherwise.
    ///
    /// After the result has been returned once, later calls report
    /// [`IoError::Disconnected`].
    pub fn poll(&self) -> Option<IoResult<PixelBuffer>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(IoError::Disconnected)),
        }
    }
}

/// Starts decoding PNG `bytes` on a worker thread.
pub fn decode_async(bytes: Vec<u8>) -> DecodeHandle {
    let (tx, rx) = mpsc::channel();
    let worker_tx = tx.clone();
    let len = bytes.len();

    let spawned = thread::Builder::new()
        .name("raster-decode".into())
        .spawn(move || {
            let result = crate::png::decode(&bytes);
            if let Err(e) = &result {
                warn!("background decode failed: {e}");
            }
            // Receiver may be gone if the caller lost interest.
            let _ = worker_tx.send(result);
        });

    match spawned {
        Ok(_) => debug!(bytes = len, "decode started"),
        Err(e) => {
            let _ = tx.send(Err(IoError::Io(e)));
        }
    }

    DecodeHandle { rx }
}
