//! On-screen virtual joystick widget for touch and mouse game controls.
//!
//! A [`Joystick`] tracks a single drag gesture: pointer-down starts it,
//! pointer-move turns the delta into an angle, a clamped magnitude and a
//! cardinal [`Direction`], pointer-up ends it. The widget renders as two
//! concentric circles, the inner knob following the drag within the
//! bezel. A [`Stage`] owns the window and framebuffer, feeds the shared
//! pointer-event stream to every registered widget and runs the
//! frame-paced render loop; registration returns a [`JoystickId`] whose
//! removal releases the widget and its callbacks in one step.
//!
//! Sizing a surface into a parent area goes through the two explicit
//! [`FitPolicy`] strategies.

pub mod canvas;
pub mod config;
pub mod joystick;
pub mod stage;
pub mod surface;

pub use canvas::Canvas;
pub use config::{Color, JoystickConfig, Placement, StageConfig, Visibility};
pub use joystick::{
    Circle, Direction, DragEnd, DragMove, DragStart, Joystick, Pointer, PointerPhase,
    PointerSource, Rect, Vec2,
};
pub use stage::{JoystickId, Stage};
pub use surface::{create_canvas, Extent, FitPolicy};
