/// Baton-to-result assembly and exactly-once dispatch
use crate::task::MetadataBaton;
use glint_core::{ImageMetadata, Result};

/// Convert a finished baton into the externally visible outcome
///
/// An error baton yields only the error. A success baton yields a record
/// with the always-present structural fields; density, orientation, and
/// blob fields are included only when non-default. Blob ownership moves
/// out of the baton exactly once.
pub(crate) fn assemble(baton: MetadataBaton) -> Result<ImageMetadata> {
    if let Some(err) = baton.error {
        return Err(err);
    }
    Ok(ImageMetadata {
        format: baton.format,
        width: baton.width,
        height: baton.height,
        space: baton.space,
        channels: baton.channels,
        density: (baton.density > 0).then_some(baton.density),
        has_profile: baton.has_profile,
        has_alpha: baton.has_alpha,
        orientation: (baton.orientation > 0).then_some(baton.orientation),
        exif: (!baton.exif.is_empty()).then_some(baton.exif),
        icc: (!baton.icc.is_empty()).then_some(baton.icc),
    })
}

/// Fires the completion callback exactly once
///
/// The callback is consumed on the first dispatch; any later call is a
/// no-op by construction.
pub(crate) struct CallbackDispatcher<F>
where
    F: FnOnce(Result<ImageMetadata>) + Send + 'static,
{
    on_complete: Option<F>,
}

impl<F> CallbackDispatcher<F>
where
    F: FnOnce(Result<ImageMetadata>) + Send + 'static,
{
    pub(crate) fn new(on_complete: F) -> Self {
        Self {
            on_complete: Some(on_complete),
        }
    }

    pub(crate) fn dispatch(&mut self, outcome: Result<ImageMetadata>) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::GlintError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn success_baton() -> MetadataBaton {
        let mut baton = MetadataBaton::new();
        baton.format = "jpeg".to_string();
        baton.width = 640;
        baton.height = 480;
        baton.space = "srgb".to_string();
        baton.channels = 3;
        baton
    }

    #[test]
    fn error_baton_yields_only_the_error() {
        let mut baton = MetadataBaton::new();
        baton.error = Some(GlintError::decode("corrupt header"));

        let err = assemble(baton).unwrap_err();
        assert_eq!(err.to_string(), "Decode error: corrupt header");
    }

    #[test]
    fn default_fields_stay_absent() {
        let metadata = assemble(success_baton()).unwrap();

        assert_eq!(metadata.format, "jpeg");
        assert_eq!(metadata.density, None);
        assert_eq!(metadata.orientation, None);
        assert_eq!(metadata.exif, None);
        assert_eq!(metadata.icc, None);
    }

    #[test]
    fn non_default_fields_come_through() {
        let mut baton = success_baton();
        baton.density = 300;
        baton.orientation = 6;
        baton.exif = vec![0xAA, 0xBB];
        baton.icc = vec![0x01];

        let metadata = assemble(baton).unwrap();
        assert_eq!(metadata.density, Some(300));
        assert_eq!(metadata.orientation, Some(6));
        assert_eq!(metadata.exif.as_deref(), Some(&[0xAA, 0xBB][..]));
        assert_eq!(metadata.icc.as_deref(), Some(&[0x01][..]));
    }

    #[test]
    fn dispatcher_fires_exactly_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_callback = fired.clone();
        let mut dispatcher = CallbackDispatcher::new(move |_outcome| {
            fired_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch(assemble(success_baton()));
        dispatcher.dispatch(Err(GlintError::other("second outcome")));

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
