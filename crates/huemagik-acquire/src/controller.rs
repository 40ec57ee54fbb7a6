// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Acquisition controller.
//
// Owns the current image, the camera lease and the state machine. Requests
// run in spawned Tokio tasks; their results come back through the ticket
// check in `Machine::resolve`, so only the latest request can change state.
//
// The mutex is never held across an `.await`. Every transition publishes on
// the watch channel while the lock is held, so subscribers see transitions in
// order.

use std::sync::{Arc, Mutex, Weak};

use huemagik_bridge::{CameraLease, NativeCamera};
use huemagik_core::config::AppConfig;
use huemagik_core::cursor::{Direction, LabelCursor, LabelMode};
use huemagik_core::error::{HuemagikError, Result};
use huemagik_core::types::{
    AcquisitionState, ColorSample, ErrorKind, ExportFormat, Failure, ImageSource, Palette,
    RequestConfig,
};
use huemagik_document::Renderer;
use huemagik_extract::{ExtractionClient, ExtractionRequest, HttpExtractionClient, failure_from_error};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::machine::{Machine, Resolution, Ticket};

/// Shared handle to one acquisition session.
///
/// Clones are cheap and all refer to the same session. Methods that issue a
/// request must be called from inside a Tokio runtime.
#[derive(Clone)]
pub struct AcquisitionController {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<AcquisitionState>,
    client: Arc<dyn ExtractionClient>,
    camera: Arc<dyn NativeCamera>,
    request: RequestConfig,
    renderer: Renderer,
}

#[derive(Default)]
struct Inner {
    machine: Machine,
    image: Option<Arc<ImageSource>>,
    lease: Option<CameraLease>,
    in_flight: Option<JoinHandle<()>>,
    cursor: LabelCursor,
}

impl Inner {
    /// Stop the camera and drop any request task.
    fn release_resources(&mut self) {
        if let Some(lease) = self.lease.take() {
            lease.release();
        }
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.release_resources();
    }
}

impl AcquisitionController {
    pub fn new(
        client: Arc<dyn ExtractionClient>,
        camera: Arc<dyn NativeCamera>,
        request: RequestConfig,
        renderer: Renderer,
    ) -> Self {
        let (state_tx, _) = watch::channel(AcquisitionState::Idle);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state_tx,
                client,
                camera,
                request,
                renderer,
            }),
        }
    }

    /// Controller talking HTTP to the configured service.
    pub fn from_config(config: &AppConfig, camera: Arc<dyn NativeCamera>) -> Result<Self> {
        config.validate()?;
        let client = HttpExtractionClient::from_config(config)?;
        info!(url = client.url(), colors = config.color_count, "acquisition controller ready");
        Ok(Self::new(
            Arc::new(client),
            camera,
            config.request_config()?,
            Renderer::new(config.brand.clone()),
        ))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.shared.inner.lock().expect("acquisition lock poisoned")
    }

    fn publish(&self, inner: &Inner) {
        let state = inner.machine.state().clone();
        debug!(state = state.name(), ticket = inner.machine.latest().value(), "state published");
        self.shared.state_tx.send_replace(state);
    }

    // -- Commands -------------------------------------------------------------

    /// Replace the image and request its palette. Ends any live capture.
    #[instrument(skip(self, source), fields(digest = %source.digest(), mime = source.mime_type()))]
    pub fn submit_file(&self, source: ImageSource) {
        let mut inner = self.lock();
        self.submit_locked(&mut inner, source);
    }

    fn submit_locked(&self, inner: &mut Inner, source: ImageSource) {
        inner.release_resources();

        let ticket = inner.machine.begin_request();
        let request = ExtractionRequest {
            bytes: source.bytes().to_vec(),
            format: source.format(),
            config: self.shared.request,
        };
        inner.image = Some(Arc::new(source));
        self.publish(inner);

        let client = Arc::clone(&self.shared.client);
        let weak = Arc::downgrade(&self.shared);
        inner.in_flight = Some(tokio::spawn(async move {
            let outcome = client.extract(request).await;
            resolve(&weak, ticket, outcome);
        }));
    }

    /// Open the camera. Already capturing keeps the current lease.
    #[instrument(skip(self))]
    pub fn start_capture(&self) {
        let mut inner = self.lock();
        if matches!(inner.machine.state(), AcquisitionState::Capturing) && inner.lease.is_some() {
            debug!("camera already live");
            return;
        }

        inner.release_resources();
        inner.image = None;
        match CameraLease::acquire(self.shared.camera.as_ref()) {
            Ok(lease) => {
                inner.lease = Some(lease);
                inner.machine.begin_capture();
            }
            Err(err) => {
                warn!(error = %err, "camera unavailable");
                inner.machine.fail(permission_failure(&err));
            }
        }
        self.publish(&inner);
    }

    /// Snapshot the live camera and submit the frame. The camera is released
    /// whatever the outcome.
    #[instrument(skip(self))]
    pub fn capture_frame(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.machine.ensure_capturing()?;

        let frame = match inner.lease.take() {
            Some(lease) => lease.capture(),
            None => Err(HuemagikError::Bridge("no camera lease while capturing".into())),
        };
        match frame {
            Ok(source) => self.submit_locked(&mut inner, source),
            Err(err) => {
                warn!(error = %err, "frame capture failed");
                inner.image = None;
                inner.machine.fail(permission_failure(&err));
                self.publish(&inner);
            }
        }
        Ok(())
    }

    /// Back to `Idle`, releasing image, palette, camera and request.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.release_resources();
        inner.image = None;
        inner.machine.reset();
        self.publish(&inner);
    }

    /// Move the on-screen label mode. Does not touch acquisition state.
    pub fn cycle_label_mode(&self, direction: Direction) -> LabelMode {
        self.lock().cursor.cycle(direction)
    }

    // -- Queries --------------------------------------------------------------

    pub fn state(&self) -> AcquisitionState {
        self.lock().machine.state().clone()
    }

    /// Receiver that sees every published transition.
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionState> {
        self.shared.state_tx.subscribe()
    }

    pub fn palette(&self) -> Option<Palette> {
        self.lock().machine.state().palette().cloned()
    }

    pub fn has_image(&self) -> bool {
        self.lock().image.is_some()
    }

    pub fn label_mode(&self) -> LabelMode {
        self.lock().cursor.mode()
    }

    /// On-screen label for `sample` under the current mode.
    pub fn label_for(&self, sample: &ColorSample) -> String {
        self.label_mode().label(sample)
    }

    /// Wait until the state is anything but `Loading`.
    pub async fn wait_settled(&self) -> AcquisitionState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Render the current palette together with the held image. Rendering
    /// runs on a snapshot taken under the lock, not while holding it.
    #[instrument(skip(self))]
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        let (palette, image) = {
            let inner = self.lock();
            let palette = inner.machine.state().palette().ok_or(HuemagikError::NotReady)?;
            (palette.clone(), inner.image.clone())
        };
        self.shared
            .renderer
            .render(&palette, image.as_deref(), format)
    }
}

fn resolve(shared: &Weak<Shared>, ticket: Ticket, outcome: Result<Palette>) {
    let Some(shared) = shared.upgrade() else {
        debug!(ticket = ticket.value(), "controller gone, response dropped");
        return;
    };
    let controller = AcquisitionController { shared };
    let mut inner = controller.lock();

    let outcome = outcome.map_err(|err| failure_from_error(&err));
    if let Err(failure) = &outcome {
        warn!(kind = %failure.kind, status = ?failure.status, message = %failure.message, "extraction failed");
    }
    match inner.machine.resolve(ticket, outcome) {
        Resolution::Applied => {
            inner.in_flight = None;
            if let Some(palette) = inner.machine.state().palette() {
                info!(colors = palette.len(), hex = ?palette.hex_codes(), "palette ready");
            }
            controller.publish(&inner);
        }
        Resolution::Superseded => {
            debug!(
                ticket = ticket.value(),
                latest = inner.machine.latest().value(),
                "stale response dropped"
            );
        }
    }
}

/// Camera problems always surface as permission failures.
fn permission_failure(err: &HuemagikError) -> Failure {
    Failure {
        kind: ErrorKind::PermissionError,
        ..failure_from_error(err)
    }
}
