/// Background metadata task execution
use crate::counter::TaskCounter;
use crate::input::{InputDescriptor, PinnedBufferSet};
use glint_core::{AccessHint, GlintError, HeaderDecoder, ImageHeader, ImageKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Mutable result holder carried from submission through to completion
///
/// Written exactly once by the worker, read exactly once by the assembler.
/// Exactly one of the error slot or the format/width/height trio is valid.
#[derive(Debug, Default)]
pub(crate) struct MetadataBaton {
    pub(crate) error: Option<GlintError>,
    pub(crate) format: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) space: String,
    pub(crate) channels: u32,
    pub(crate) density: u32,
    pub(crate) has_profile: bool,
    pub(crate) has_alpha: bool,
    pub(crate) orientation: u8,
    pub(crate) exif: Vec<u8>,
    pub(crate) icc: Vec<u8>,
}

impl MetadataBaton {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// The unit of asynchronous work
///
/// Owns its descriptor, pinned buffers, and baton for the whole run.
/// `execute` runs on a blocking-capable worker thread and may block on
/// file I/O or engine calls.
pub(crate) struct MetadataTask<E: HeaderDecoder> {
    pub(crate) engine: Arc<E>,
    pub(crate) counter: Arc<TaskCounter>,
    // None when input normalization already failed at submission
    pub(crate) descriptor: Option<InputDescriptor>,
    pub(crate) pins: PinnedBufferSet,
    pub(crate) baton: MetadataBaton,
}

impl<E: HeaderDecoder> MetadataTask<E> {
    pub(crate) fn new(
        engine: Arc<E>,
        counter: Arc<TaskCounter>,
        descriptor: Option<InputDescriptor>,
        pins: PinnedBufferSet,
        baton: MetadataBaton,
    ) -> Self {
        Self {
            engine,
            counter,
            descriptor,
            pins,
            baton,
        }
    }

    /// Run the header read, populating the baton or its error slot
    ///
    /// Terminal either way: no retry path exists. Engine failures land in
    /// the baton, never unwind out of the worker.
    pub(crate) fn execute(&mut self) {
        // Leaving the queue, now executing
        self.counter.decrement_and_test();

        let opened = match self.descriptor.as_ref() {
            Some(descriptor) if self.baton.error.is_none() => {
                Some(self.engine.open_header(&descriptor.source, AccessHint::Sequential))
            }
            // Input failure recorded at submission; nothing to open
            _ => None,
        };
        let density_hint = self.descriptor.as_ref().and_then(|d| d.density_hint);

        if let Some(result) = opened {
            match result {
                Ok((header, kind)) => {
                    if kind.is_unknown() {
                        // Opened but unrecognized: an error, not a partial result
                        self.baton.error = Some(GlintError::decode("unsupported image format"));
                    } else {
                        self.populate(header.as_ref(), kind, density_hint);
                    }
                    // Engine handle is released here on both branches
                    drop(header);
                }
                Err(err) => {
                    warn!(%err, "header open failed");
                    self.baton.error = Some(err);
                }
            }
        }

        debug!(
            success = self.baton.error.is_none(),
            format = %self.baton.format,
            "metadata task finished"
        );
    }

    fn populate(&mut self, header: &dyn ImageHeader, kind: ImageKind, density_hint: Option<u32>) {
        let baton = &mut self.baton;
        baton.format = kind.as_str().to_string();
        baton.width = header.width();
        baton.height = header.height();
        baton.space = header.color_space().to_string();
        baton.channels = header.channels();
        if header.has_density() {
            baton.density = header.density();
        } else if let Some(dpi) = density_hint {
            baton.density = dpi;
        }
        baton.has_profile = header.has_profile();
        // Derived attributes
        baton.has_alpha = header.has_alpha();
        baton.orientation = header.orientation();
        // Blob copies sized exactly to the attached block; absence allocates nothing
        if let Some(exif) = header.exif() {
            baton.exif = exif.to_vec();
        }
        if let Some(icc) = header.icc() {
            baton.icc = icc.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{ImageSource, Result};

    /// Engine double returning a fixed header
    struct FixedEngine {
        kind: ImageKind,
    }

    struct FixedHeader;

    impl ImageHeader for FixedHeader {
        fn width(&self) -> u32 {
            10
        }
        fn height(&self) -> u32 {
            20
        }
        fn color_space(&self) -> &str {
            "srgb"
        }
        fn channels(&self) -> u32 {
            3
        }
        fn has_density(&self) -> bool {
            false
        }
        fn density(&self) -> u32 {
            0
        }
        fn has_profile(&self) -> bool {
            false
        }
        fn has_alpha(&self) -> bool {
            false
        }
        fn orientation(&self) -> u8 {
            0
        }
        fn exif(&self) -> Option<&[u8]> {
            None
        }
        fn icc(&self) -> Option<&[u8]> {
            None
        }
    }

    impl HeaderDecoder for FixedEngine {
        fn open_header(
            &self,
            _source: &ImageSource,
            _access: AccessHint,
        ) -> Result<(Box<dyn ImageHeader>, ImageKind)> {
            Ok((Box::new(FixedHeader), self.kind))
        }
    }

    fn task_for(kind: ImageKind, density_hint: Option<u32>) -> MetadataTask<FixedEngine> {
        let descriptor = InputDescriptor {
            source: ImageSource::Path("/fixture.png".into()),
            density_hint,
        };
        let counter = Arc::new(TaskCounter::new());
        counter.increment();
        MetadataTask::new(
            Arc::new(FixedEngine { kind }),
            counter,
            Some(descriptor),
            PinnedBufferSet::new(),
            MetadataBaton::new(),
        )
    }

    #[test]
    fn successful_execution_fills_the_baton() {
        let mut task = task_for(ImageKind::Png, None);
        task.execute();

        assert!(task.baton.error.is_none());
        assert_eq!(task.baton.format, "png");
        assert_eq!(task.baton.width, 10);
        assert_eq!(task.baton.height, 20);
        assert_eq!(task.baton.density, 0);
    }

    #[test]
    fn unknown_format_becomes_an_error() {
        let mut task = task_for(ImageKind::Unknown, None);
        task.execute();

        let err = task.baton.error.expect("unknown format must error");
        assert!(err.to_string().contains("unsupported"));
        assert!(task.baton.format.is_empty());
    }

    #[test]
    fn density_hint_fills_in_when_container_has_none() {
        let mut task = task_for(ImageKind::Png, Some(300));
        task.execute();

        assert_eq!(task.baton.density, 300);
    }

    #[test]
    fn execution_decrements_the_counter() {
        let mut task = task_for(ImageKind::Png, None);
        assert_eq!(task.counter.queued(), 1);
        task.execute();
        assert_eq!(task.counter.queued(), 0);
    }

    #[test]
    fn pre_recorded_input_error_skips_the_engine() {
        let counter = Arc::new(TaskCounter::new());
        counter.increment();
        let mut baton = MetadataBaton::new();
        baton.error = Some(GlintError::input("missing input"));
        let mut task = MetadataTask::new(
            Arc::new(FixedEngine {
                kind: ImageKind::Png,
            }),
            counter.clone(),
            None,
            PinnedBufferSet::new(),
            baton,
        );

        task.execute();

        assert_eq!(counter.queued(), 0);
        assert!(matches!(task.baton.error, Some(GlintError::Input(_))));
        assert!(task.baton.format.is_empty());
    }
}
