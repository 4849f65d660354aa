//! Angle widget session
//!
//! One `AngleSession` backs one widget instance: the hosting `AngleNode`,
//! the pointer `Manipulator` and the optional decorative subject image.
//! Every input is applied synchronously and answered with a full
//! `AngleSnapshot`, so the prompt the frontend shows always matches the
//! handle positions the scene draws.

use bevy::math::Vec2;
use serde::Serialize;

use crate::angle::{
    numeric_readout, view_description, AngleNode, AngleParameters, AngleUpdate,
    ClassificationResult, Locale,
};
use crate::config::scene::SUBJECT_MAX_TEXTURE_SIZE;
use crate::error::BridgeError;
use crate::manipulator::{CursorHint, Manipulator, ManipulatorInteractionState};

/// Decoded RGBA8 subject image shown on the plane in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SubjectImage {
    /// Decode a PNG or JPEG file's bytes
    ///
    /// Images larger than `SUBJECT_MAX_TEXTURE_SIZE` on either side are
    /// scaled down, keeping their aspect ratio, so they always fit a texture.
    pub fn decode(bytes: &[u8]) -> Result<Self, BridgeError> {
        let mut decoded = image::load_from_memory(bytes)?;
        let (width, height) = (decoded.width(), decoded.height());
        if width > SUBJECT_MAX_TEXTURE_SIZE || height > SUBJECT_MAX_TEXTURE_SIZE {
            log::debug!("[Session] Downscaling {}x{} subject image", width, height);
            decoded = decoded.thumbnail(SUBJECT_MAX_TEXTURE_SIZE, SUBJECT_MAX_TEXTURE_SIZE);
        }
        let rgba = decoded.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

/// Everything the frontend needs after a change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleSnapshot {
    pub parameters: AngleParameters,
    pub result: ClassificationResult,
    /// Prompt fragment stored with the node data
    pub angle_prompt: String,
    /// Numeric status row, e.g. `0° 0° 5.0`
    pub readout: String,
    pub description: String,
    pub interaction: ManipulatorInteractionState,
    pub cursor: CursorHint,
    pub has_subject: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AngleSession {
    node: AngleNode,
    manipulator: Manipulator,
    locale: Locale,
    subject: Option<SubjectImage>,
    /// Bumped whenever the subject image changes so the renderer can
    /// rebuild its texture lazily
    subject_revision: u64,
}

impl AngleSession {
    pub fn new(parameters: AngleParameters) -> Self {
        Self {
            node: AngleNode::new(parameters),
            ..Self::default()
        }
    }

    pub fn parameters(&self) -> AngleParameters {
        self.node.parameters()
    }

    pub fn interaction(&self) -> &ManipulatorInteractionState {
        self.manipulator.state()
    }

    pub fn snapshot(&self) -> AngleSnapshot {
        let parameters = self.node.parameters();
        let interaction = *self.manipulator.state();
        AngleSnapshot {
            parameters,
            result: self.node.classification(),
            angle_prompt: self.node.angle_prompt().to_owned(),
            readout: numeric_readout(&parameters),
            description: view_description(&parameters, self.locale),
            cursor: interaction.cursor(),
            interaction,
            has_subject: self.subject.is_some(),
        }
    }

    // =========================================================================
    // Parameter changes
    // =========================================================================

    pub fn update(&mut self, update: &AngleUpdate) -> AngleSnapshot {
        if !update.is_empty() {
            self.node.apply(update);
        }
        self.snapshot()
    }

    pub fn set_verbose_mode(&mut self, verbose: bool) -> AngleSnapshot {
        self.update(&AngleUpdate::verbose(verbose))
    }

    pub fn reset(&mut self) -> AngleSnapshot {
        self.node.reset();
        log::info!("[Session] Angles reset to defaults");
        self.snapshot()
    }

    pub fn set_locale(&mut self, locale: Locale) -> AngleSnapshot {
        self.locale = locale;
        self.snapshot()
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn pointer_down(&mut self, position: Vec2) -> AngleSnapshot {
        let parameters = self.node.parameters();
        self.manipulator.pointer_down(&parameters, position);
        self.snapshot()
    }

    pub fn pointer_move(&mut self, position: Vec2) -> AngleSnapshot {
        let parameters = self.node.parameters();
        if let Some(update) = self.manipulator.pointer_move(&parameters, position) {
            self.node.apply(&update);
        }
        self.snapshot()
    }

    pub fn pointer_up(&mut self) -> AngleSnapshot {
        self.manipulator.pointer_up();
        self.snapshot()
    }

    pub fn pointer_leave(&mut self) -> AngleSnapshot {
        self.manipulator.pointer_leave();
        self.snapshot()
    }

    pub fn wheel(&mut self, delta_y: f64) -> AngleSnapshot {
        let update = self.manipulator.wheel(&self.node.parameters(), delta_y);
        self.node.apply(&update);
        self.snapshot()
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.manipulator
            .picker_mut()
            .camera
            .set_viewport(Vec2::new(width, height));
    }

    // =========================================================================
    // Subject image
    // =========================================================================

    pub fn subject(&self) -> Option<&SubjectImage> {
        self.subject.as_ref()
    }

    pub fn subject_revision(&self) -> u64 {
        self.subject_revision
    }

    pub fn set_subject(&mut self, subject: Option<SubjectImage>) -> AngleSnapshot {
        self.subject = subject;
        self.subject_revision += 1;
        self.snapshot()
    }
}
