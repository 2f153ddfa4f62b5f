//! Application shell state: upload → crop → image, view settings, and
//! export requests.
//!
//! Everything geometric is delegated to the pure layout and grid modules; the
//! session only decides which image and parameters are current.
use crate::error::Error;
use crate::image::{Cropper, DecodeHandle, ImageId, SourceImage};
use crate::layout::{Layout, Viewport};
use crate::paper::PaperSize;
use crate::render::{build_preview, export_png, ExportArtifact, PreviewScene};
use crate::types::GridSpec;
use crate::units::DEFAULT_DPI;
use log::{debug, info, warn};
use std::sync::Arc;

/// An uploaded file waiting for the crop step. Dropping it releases the
/// decoded original.
#[derive(Debug)]
struct Upload {
    handle: DecodeHandle,
}

impl Upload {
    fn release(self, reason: &str) {
        info!("Session: releasing upload {} ({reason})", self.handle.id());
    }
}

#[derive(Debug)]
pub struct Session {
    spec: GridSpec,
    viewport: Viewport,
    upload: Option<Upload>,
    /// Image requested most recently; may still be decoding.
    pending: Option<DecodeHandle>,
    /// Last image that decoded successfully.
    current: Option<Arc<SourceImage>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PaperSize::default(), DEFAULT_DPI)
    }
}

impl Session {
    pub fn new(paper: PaperSize, dpi: u32) -> Self {
        Self {
            spec: GridSpec::default(),
            viewport: Viewport::new(paper, dpi),
            upload: None,
            pending: None,
            current: None,
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn set_spec(&mut self, spec: GridSpec) {
        self.spec = spec;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn paper(&self) -> PaperSize {
        self.viewport.paper()
    }

    pub fn dpi(&self) -> u32 {
        self.viewport.dpi()
    }

    pub fn set_paper(&mut self, paper: PaperSize) {
        self.viewport.set_paper(paper);
    }

    pub fn toggle_real_size(&mut self) {
        self.viewport.toggle_real_size();
    }

    pub fn set_container(&mut self, width_px: f64, height_px: f64) {
        self.viewport.set_container(width_px, height_px);
    }

    pub fn has_upload(&self) -> bool {
        self.upload.is_some()
    }

    /// Start decoding an uploaded file for cropping. Any earlier upload that
    /// was never confirmed is released.
    pub fn upload(&mut self, bytes: Vec<u8>) -> ImageId {
        if let Some(previous) = self.upload.take() {
            previous.release("superseded");
        }
        let handle = DecodeHandle::spawn(bytes);
        let id = handle.id();
        debug!("Session::upload started decoding {id}");
        self.upload = Some(Upload { handle });
        id
    }

    /// Run the crop collaborator on the pending upload at the paper aspect.
    ///
    /// On decode failure or cancellation the upload is released and the
    /// current image is left as it was.
    pub fn confirm_crop(&mut self, cropper: &dyn Cropper) -> Result<ImageId, Error> {
        let upload = self
            .upload
            .take()
            .ok_or(Error::NotReady("no upload to crop"))?;
        let original = match upload.handle.wait() {
            Ok(image) => image,
            Err(e) => {
                warn!("Session::confirm_crop decode failed for {}: {e}", upload.handle.id());
                upload.release("decode failed");
                return Err(e);
            }
        };
        let Some(cropped) = cropper.crop(original.pixels(), self.paper().aspect_ratio()) else {
            upload.release("crop cancelled");
            return Err(Error::CropCancelled);
        };
        upload.release("cropped");
        let image = SourceImage::new(cropped);
        let id = image.id();
        self.set_image(DecodeHandle::ready(image));
        Ok(id)
    }

    /// Abandon the crop flow.
    pub fn cancel_crop(&mut self) {
        if let Some(upload) = self.upload.take() {
            upload.release("crop abandoned");
        }
    }

    /// Decode already-cropped bytes and make them the current image once
    /// ready.
    pub fn load_image(&mut self, bytes: Vec<u8>) -> ImageId {
        let handle = DecodeHandle::spawn(bytes);
        let id = handle.id();
        self.set_image(handle);
        id
    }

    pub fn set_image(&mut self, handle: DecodeHandle) {
        self.pending = Some(handle);
        self.refresh();
    }

    /// Promote a finished decode to the current image. Failures are logged
    /// and dropped, keeping the previous image.
    pub fn refresh(&mut self) {
        let Some(outcome) = self.pending.as_ref().and_then(DecodeHandle::try_get) else {
            return;
        };
        self.pending = None;
        match outcome {
            Ok(image) => {
                let (w, h) = image.natural_size();
                self.viewport.set_image_size(w, h);
                self.current = Some(image);
            }
            Err(e) => warn!("Session::refresh dropping image that failed to decode: {e}"),
        }
    }

    /// Block until the most recently requested image has decoded.
    pub fn wait_for_image(&mut self) -> Result<Arc<SourceImage>, Error> {
        if let Some(handle) = &self.pending {
            handle.wait()?;
        }
        self.refresh();
        self.current
            .clone()
            .ok_or(Error::NotReady("no image loaded"))
    }

    /// Current decoded image, if any.
    pub fn image(&mut self) -> Option<Arc<SourceImage>> {
        self.refresh();
        self.current.clone()
    }

    pub fn layout(&mut self) -> Layout {
        self.refresh();
        self.viewport.layout()
    }

    /// Preview of the current view, or `None` while nothing is displayable.
    pub fn preview(&mut self, image_href: &str) -> Option<PreviewScene> {
        let layout = self.layout();
        let scene = build_preview(
            &layout,
            &self.spec,
            self.viewport.offset(),
            self.viewport.is_real_size(),
            image_href,
        );
        if scene.is_none() {
            debug!("Session::preview skipped: nothing to display yet");
        }
        scene
    }

    /// Capture an export of the most recently requested image with the
    /// current parameters. `None` if no image was ever set.
    pub fn export_job(&self) -> Option<ExportJob> {
        let source = match (&self.pending, &self.current) {
            (Some(handle), _) => ExportSource::Pending(handle.clone()),
            (None, Some(image)) => ExportSource::Decoded(Arc::clone(image)),
            (None, None) => return None,
        };
        Some(ExportJob {
            source,
            spec: self.spec.clone(),
            paper: self.paper(),
            dpi: self.dpi(),
        })
    }
}

#[derive(Clone, Debug)]
enum ExportSource {
    Pending(DecodeHandle),
    Decoded(Arc<SourceImage>),
}

/// An export request bound to one specific image instance.
#[derive(Clone, Debug)]
pub struct ExportJob {
    source: ExportSource,
    spec: GridSpec,
    paper: PaperSize,
    dpi: u32,
}

impl ExportJob {
    pub fn image_id(&self) -> ImageId {
        match &self.source {
            ExportSource::Pending(handle) => handle.id(),
            ExportSource::Decoded(image) => image.id(),
        }
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    /// Wait for the bound image to finish decoding, then rasterize.
    pub fn run(&self) -> Result<ExportArtifact, Error> {
        let image = match &self.source {
            ExportSource::Pending(handle) => handle.wait().inspect_err(|e| {
                warn!("ExportJob::run decode failed for {}: {e}", handle.id());
            })?,
            ExportSource::Decoded(image) => Arc::clone(image),
        };
        export_png(&image, &self.spec, self.paper, self.dpi)
    }
}
