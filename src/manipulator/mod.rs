//! Interactive 3D angle manipulator
//!
//! The manipulator turns pointer input over the rendered scene into proposed
//! parameter updates. It never writes the authoritative parameters: every
//! handler receives the host's current `AngleParameters` and returns an
//! `AngleUpdate` for the host to apply.
//!
//! - `state`: interaction state machine and drag sensitivities
//! - `layout`: scene placement of the handles and subject
//! - `picking`: viewport camera rays and handle hit tests

pub mod layout;
pub mod picking;
pub mod state;

pub use layout::{HandleLayout, SubjectPose};
pub use picking::{HandlePicker, ViewportCamera};
pub use state::{CursorHint, DragMode, HandleKind, Manipulator, ManipulatorInteractionState};
