/// Request normalization and input-buffer pinning
use bytes::Bytes;
use glint_core::{GlintError, ImageSource, Result};
use std::path::PathBuf;
use tracing::trace;

/// A metadata probe request
///
/// Carries the input (a file path or an in-memory byte buffer) plus
/// optional extraction hints.
///
/// # Example
///
/// ```rust
/// use glint_probe::ProbeRequest;
///
/// let request = ProbeRequest::new().path("/photos/cat.jpg").density(300);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProbeRequest {
    pub(crate) input: Option<ProbeInput>,
    pub(crate) density: Option<u32>,
}

/// Request input variants
#[derive(Debug, Clone)]
pub(crate) enum ProbeInput {
    Path(PathBuf),
    Buffer(Bytes),
}

impl ProbeRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an image file on disk as the input
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(ProbeInput::Path(path.into()));
        self
    }

    /// Use encoded image bytes in memory as the input
    pub fn buffer(mut self, bytes: impl Into<Bytes>) -> Self {
        self.input = Some(ProbeInput::Buffer(bytes.into()));
        self
    }

    /// Density in DPI to assume when the container carries none
    pub fn density(mut self, dpi: u32) -> Self {
        self.density = Some(dpi);
        self
    }
}

/// Ordered set of buffer handles kept alive for a task's duration
///
/// Pinned at submission, released in the same index order after the
/// completion callback's outcome is assembled. Pin count always equals
/// release count: `release_all` drains every entry.
#[derive(Debug, Default)]
pub(crate) struct PinnedBufferSet {
    pins: Vec<Bytes>,
}

impl PinnedBufferSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a shared handle to the buffer, returning the reader's clone
    ///
    /// The set's handle keeps the backing allocation alive even if the
    /// caller drops its own handle before the task completes.
    pub(crate) fn pin(&mut self, buffer: Bytes) -> Bytes {
        let reader = buffer.clone();
        trace!(index = self.pins.len(), len = buffer.len(), "pinning input buffer");
        self.pins.push(buffer);
        reader
    }

    pub(crate) fn len(&self) -> usize {
        self.pins.len()
    }

    /// Release every pinned handle in original index order
    pub(crate) fn release_all(&mut self) {
        for (index, handle) in self.pins.drain(..).enumerate() {
            trace!(index, len = handle.len(), "unpinning input buffer");
            drop(handle);
        }
    }
}

/// Normalized task input, owned exclusively by the task
#[derive(Debug)]
pub(crate) struct InputDescriptor {
    pub(crate) source: ImageSource,
    pub(crate) density_hint: Option<u32>,
}

impl InputDescriptor {
    /// Normalize a request, pinning any buffer input for the task's lifetime
    pub(crate) fn from_request(request: ProbeRequest, pins: &mut PinnedBufferSet) -> Result<Self> {
        let source = match request.input {
            Some(ProbeInput::Path(path)) => {
                if path.as_os_str().is_empty() {
                    return Err(GlintError::input("input file path is empty"));
                }
                ImageSource::Path(path)
            }
            Some(ProbeInput::Buffer(buffer)) => {
                if buffer.is_empty() {
                    return Err(GlintError::input("input buffer is empty"));
                }
                ImageSource::Buffer(pins.pin(buffer))
            }
            None => {
                return Err(GlintError::input(
                    "missing input: expected a file path or byte buffer",
                ));
            }
        };
        Ok(Self {
            source,
            density_hint: request.density,
        })
    }
}
