//! Worker-per-face cubemap rendering.
//!
//! Every face is rendered on its own scoped thread. Workers share only the
//! read-only source image and report back over a channel; results are stored
//! by face, so arrival order never matters. An optional low-resolution preview
//! pass runs before the full render of the same face.

use std::iter;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ScopedJoinHandle;
use std::time::Instant;

use crossbeam_channel::unbounded;
use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::kernel::LanczosRadius;
use crate::render::{Interpolation, RenderRequest, face_size, render_face};
use crate::resample::SourceView;
use crate::{CubeFace, CubemapError};

/// Parameters shared by the six face renders of one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubemapSettings {
    /// Rotation about the vertical axis, in radians.
    pub rotation: f64,
    /// Reconstruction filter.
    pub interpolation: Interpolation,
    /// Upper bound on the face side; `None` means `source_width / 4`.
    pub max_width: Option<u32>,
    /// Support radius used for Lanczos.
    pub lanczos_radius: LanczosRadius,
}

impl Default for CubemapSettings {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            interpolation: Interpolation::Lanczos,
            max_width: None,
            lanczos_radius: LanczosRadius::default(),
        }
    }
}

impl CubemapSettings {
    /// Cheap preview pass: bilinear, at most 200 px per face.
    #[must_use]
    pub fn preview(rotation: f64) -> Self {
        Self {
            rotation,
            interpolation: Interpolation::Linear,
            max_width: Some(200),
            lanczos_radius: LanczosRadius::default(),
        }
    }

    /// The render request for `face` under these settings.
    #[must_use]
    pub fn request<'a>(&self, source: &'a RgbaImage, face: CubeFace) -> RenderRequest<'a> {
        RenderRequest::new(source, face)
            .with_rotation(self.rotation)
            .with_interpolation(self.interpolation)
            .with_max_width(self.max_width)
            .with_lanczos_radius(self.lanczos_radius)
    }

    fn validate(&self, source: &RgbaImage) -> Result<(), CubemapError> {
        SourceView::new(source)?;
        if face_size(source.width(), self.max_width) == 0 {
            return Err(CubemapError::EmptyFace {
                source_width: source.width(),
                max_width: self.max_width,
            });
        }
        Ok(())
    }
}

/// Which pass produced a [`FaceUpdate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderStage {
    /// Low-resolution preview.
    Preview,
    /// Final render.
    Full,
}

/// One finished face render, delivered as soon as it is ready.
#[derive(Debug)]
pub struct FaceUpdate {
    /// Face that was rendered.
    pub face: CubeFace,
    /// Pass that produced it.
    pub stage: RenderStage,
    /// The rendered face.
    pub image: RgbaImage,
}

/// Shared flag used to abandon a cubemap render.
///
/// Workers check it before each pass; a pass already running completes and
/// its result is dropped.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The six full-quality faces of a cubemap.
#[derive(Clone, Debug, PartialEq)]
pub struct Cubemap {
    /// Indexed by [`CubeFace::index`].
    faces: Vec<RgbaImage>,
}

impl Cubemap {
    /// The image of `face`.
    #[must_use]
    pub fn face(&self, face: CubeFace) -> &RgbaImage {
        &self.faces[face.index()]
    }

    /// Side length shared by all faces.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.faces[0].width()
    }

    /// Faces paired with their identifiers, in [`CubeFace::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &RgbaImage)> {
        CubeFace::ALL.into_iter().zip(&self.faces)
    }
}

struct WorkerMessage {
    face: CubeFace,
    stage: RenderStage,
    result: Result<RgbaImage, CubemapError>,
}

/// Render all six faces in parallel.
pub fn render_cubemap(
    source: &RgbaImage,
    settings: &CubemapSettings,
) -> Result<Cubemap, CubemapError> {
    render_cubemap_progressive(source, settings, None, &CancelToken::new(), |_| {})
}

/// Render all six faces in parallel, reporting each face as it finishes.
///
/// With `preview` set, every worker first renders its face with the preview
/// settings and then with `settings`. For any given face, `on_update` sees the
/// preview before the full render. Updates stop once `cancel` fires, and the
/// call returns [`CubemapError::Cancelled`].
pub fn render_cubemap_progressive<F>(
    source: &RgbaImage,
    settings: &CubemapSettings,
    preview: Option<&CubemapSettings>,
    cancel: &CancelToken,
    mut on_update: F,
) -> Result<Cubemap, CubemapError>
where
    F: FnMut(&FaceUpdate),
{
    settings.validate(source)?;
    if let Some(preview) = preview {
        preview.validate(source)?;
    }

    let started = Instant::now();
    let mut full: Vec<Option<RgbaImage>> = vec![None; CubeFace::ALL.len()];
    let mut first_error: Option<CubemapError> = None;

    std::thread::scope(|scope| -> Result<(), CubemapError> {
        let (sender, receiver) = unbounded::<WorkerMessage>();
        let mut handles = Vec::with_capacity(CubeFace::ALL.len());

        for face in CubeFace::ALL {
            let sender = sender.clone();
            let cancel = cancel.clone();
            let handle = std::thread::Builder::new()
                .name(format!("cubemap-face-{face}"))
                .spawn_scoped(scope, move || {
                    let passes = preview
                        .map(|p| (RenderStage::Preview, p))
                        .into_iter()
                        .chain(iter::once((RenderStage::Full, settings)));
                    for (stage, pass) in passes {
                        if cancel.is_cancelled() {
                            return;
                        }
                        let result = render_face(&pass.request(source, face));
                        let failed = result.is_err();
                        let message = WorkerMessage {
                            face,
                            stage,
                            result,
                        };
                        if sender.send(message).is_err() || failed {
                            return;
                        }
                    }
                })
                .map_err(|e| CubemapError::Worker(format!("failed to spawn {face}: {e}")))?;
            handles.push((face, handle));
        }
        drop(sender);

        for message in receiver {
            match message.result {
                Ok(image) => {
                    if cancel.is_cancelled() {
                        continue;
                    }
                    debug!(face = %message.face, stage = ?message.stage, "face ready");
                    let update = FaceUpdate {
                        face: message.face,
                        stage: message.stage,
                        image,
                    };
                    on_update(&update);
                    if update.stage == RenderStage::Full {
                        full[update.face.index()] = Some(update.image);
                    }
                }
                Err(err) => {
                    warn!(face = %message.face, error = %err, "face render failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        join_workers(handles)
    })?;

    if let Some(err) = first_error {
        return Err(err);
    }
    if cancel.is_cancelled() {
        return Err(CubemapError::Cancelled);
    }

    let faces = full
        .into_iter()
        .zip(CubeFace::ALL)
        .map(|(slot, face)| {
            slot.ok_or_else(|| CubemapError::Worker(format!("no image for {face}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        size = faces[0].width(),
        interpolation = %settings.interpolation,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "cubemap rendered"
    );
    Ok(Cubemap { faces })
}

/// Join every worker, then report the first one that panicked.
fn join_workers(handles: Vec<(CubeFace, ScopedJoinHandle<'_, ()>)>) -> Result<(), CubemapError> {
    let panicked: Vec<CubeFace> = handles
        .into_iter()
        .filter_map(|(face, handle)| handle.join().is_err().then_some(face))
        .collect();
    match panicked.first() {
        Some(face) => Err(CubemapError::Worker(format!("worker for {face} panicked"))),
        None => Ok(()),
    }
}
