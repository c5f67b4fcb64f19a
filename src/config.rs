use bon::Builder;

use crate::surface::{Extent, FitPolicy};

/// Paint color for widget elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
}

/// Where the widget sits when a drag begins.
///
/// `Dynamic` relocates the whole widget to the pointer-down position;
/// `Fixed` leaves it wherever the host placed it and only accepts drags
/// that start on the inner knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    Dynamic,
    #[default]
    Fixed,
}

/// Whether the widget is always painted or fades in and out with the
/// drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Dynamic,
    #[default]
    Fixed,
}

/// Construction options for a [`Joystick`](crate::Joystick).
///
/// Radii follow the widget's literal layout arithmetic: the overall
/// widget extent is `outer_radius + min(0.9, inner_radius) * outer_radius`
/// pixels, and the painted circle radii are half of each term.
#[derive(Debug, Clone, Builder)]
pub struct JoystickConfig {
    #[builder(default)]
    pub placement: Placement,
    #[builder(default)]
    pub visibility: Visibility,
    /// Clamp knob travel to `outer - inner` so the knob's edge never
    /// leaves the bezel.
    #[builder(default = false)]
    pub throttle_within: bool,
    #[builder(default = 100.0)]
    pub outer_radius: f64,
    /// Inner radius as a fraction of the outer radius, capped at 0.9.
    #[builder(default = 0.3)]
    pub inner_radius: f64,
    /// Bezel fill. Unset leaves the bezel interior unpainted.
    pub outer_fill: Option<Color>,
    /// Bezel outline. Unset falls back to `#222`.
    pub outer_outline: Option<Color>,
    #[builder(default = 5.0)]
    pub outer_outline_width: f64,
    /// Knob fill. Unset falls back to white.
    pub inner_fill: Option<Color>,
    /// Knob outline. Unset falls back to `#222`.
    pub inner_outline: Option<Color>,
    #[builder(default = 2.0)]
    pub inner_outline_width: f64,
}

/// Configuration for a [`Stage`](crate::Stage): the window, its sizing
/// policy, frame pacing and the pointer source feeding the widgets.
#[derive(Debug, Clone, Builder)]
pub struct StageConfig {
    #[builder(default = "thumbstick".to_string())]
    pub title: String,
    /// Extent of the area the stage surface is fitted into.
    #[builder(default = Extent::new(640.0, 480.0))]
    pub parent: Extent,
    #[builder(default = FitPolicy::AspectRatio { aspect_width: 4.0, aspect_height: 3.0, scale: 1.0 })]
    pub fit: FitPolicy,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = Color::new(0x10, 0x10, 0x14))]
    pub background: Color,
    /// Pointer capability, fixed at construction. When set, touch events
    /// drive the widgets and mouse events are ignored; otherwise the
    /// reverse.
    #[builder(default = false)]
    pub touch_support: bool,
}
