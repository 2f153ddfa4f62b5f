//! Awaitable image decoding.
//!
//! A [`DecodeHandle`] is a one-shot completion cell: decoding runs on a
//! background thread and any number of clones can poll or block on the
//! result. Each handle is tied to a single [`ImageId`].
use super::source::{ImageId, SourceImage};
use crate::error::Error;
use log::{debug, warn};
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

type Outcome = Result<Arc<SourceImage>, Error>;

#[derive(Default)]
struct DecodeSlot {
    outcome: Mutex<Option<Outcome>>,
    done: Condvar,
}

impl DecodeSlot {
    fn lock(&self) -> MutexGuard<'_, Option<Outcome>> {
        self.outcome.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(&self, outcome: Outcome) {
        let mut guard = self.lock();
        if guard.is_none() {
            *guard = Some(outcome);
            self.done.notify_all();
        }
    }
}

/// Fills the slot with an error if the decoder thread unwinds before
/// completing, so waiters never hang.
struct CompleteOnDrop(Arc<DecodeSlot>);

impl Drop for CompleteOnDrop {
    fn drop(&mut self) {
        self.0
            .complete(Err(Error::Decode("decoder thread exited early".to_string())));
    }
}

#[derive(Clone)]
pub struct DecodeHandle {
    id: ImageId,
    slot: Arc<DecodeSlot>,
}

impl DecodeHandle {
    /// Start decoding `bytes` (any format the `image` crate was built with).
    pub fn spawn(bytes: Vec<u8>) -> Self {
        let id = ImageId::next();
        let slot = Arc::new(DecodeSlot::default());
        let guard = CompleteOnDrop(Arc::clone(&slot));
        let spawned = thread::Builder::new()
            .name(format!("decode-{}", id.get()))
            .spawn(move || {
                let outcome = decode_bytes(id, &bytes).map(Arc::new);
                guard.0.complete(outcome);
            });
        if let Err(e) = spawned {
            warn!("DecodeHandle::spawn could not start decoder for {id}: {e}");
            slot.complete(Err(Error::Decode(format!("failed to start decoder: {e}"))));
        }
        Self { id, slot }
    }

    /// Handle that is already complete.
    pub fn ready(image: SourceImage) -> Self {
        let handle = Self {
            id: image.id(),
            slot: Arc::new(DecodeSlot::default()),
        };
        handle.slot.complete(Ok(Arc::new(image)));
        handle
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn is_ready(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Non-blocking poll.
    pub fn try_get(&self) -> Option<Outcome> {
        self.slot.lock().clone()
    }

    /// Block until decoding finishes.
    pub fn wait(&self) -> Outcome {
        let mut guard = self.slot.lock();
        loop {
            if let Some(outcome) = guard.as_ref() {
                return outcome.clone();
            }
            guard = self
                .slot
                .done
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl fmt::Debug for DecodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeHandle")
            .field("id", &self.id)
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Decode encoded bytes into an RGBA source image.
pub fn decode_bytes(id: ImageId, bytes: &[u8]) -> Result<SourceImage, Error> {
    let decoded = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let pixels = decoded.into_rgba8();
    debug!(
        "decode_bytes {id} decoded {}x{}",
        pixels.width(),
        pixels.height()
    );
    Ok(SourceImage::with_id(id, pixels))
}
