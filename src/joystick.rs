//! The joystick widget: drag state machine, geometry and per-frame
//! animation.

use crate::canvas::Canvas;
use crate::config::{Color, JoystickConfig, Placement, Visibility};

/// Opacity lost per frame while a dynamically-visible widget is idle.
const FADE_STEP: f64 = 0.03;

/// The inner radius request is capped at this fraction of the outer.
const INNER_RADIUS_CAP: f64 = 0.9;

const DEFAULT_OUTLINE: Color = Color::new(0x22, 0x22, 0x22);

/// 2D point or vector in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

/// Cardinal drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Dominant-axis classification of a drag delta, independent of any
    /// drag history. A tie between the axes falls to the vertical branch.
    pub fn from_delta(delta: Vec2) -> Direction {
        if delta.x.abs() > delta.y.abs() {
            if delta.x < 0.0 {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if delta.y < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Raw pointer sample that produced a drag event, for consumers that
/// need more than the derived fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub source: PointerSource,
    pub phase: PointerPhase,
}

/// Payload of the drag-start callback. The direction is by definition
/// not yet known at the start of a gesture.
#[derive(Debug, Clone, Copy)]
pub struct DragStart {
    pub start: Vec2,
    pub current: Vec2,
    pub delta: Vec2,
    pub pointer: Pointer,
}

/// Payload of the per-move drag callback.
#[derive(Debug, Clone, Copy)]
pub struct DragMove {
    pub direction: Direction,
    pub start: Vec2,
    pub current: Vec2,
    /// Raw pointer delta since the drag started, unclamped.
    pub delta: Vec2,
    /// `atan2` of the delta, in radians.
    pub angle: f64,
    /// Delta length clamped to the widget's travel bound, in pixels.
    pub magnitude: f64,
    pub pointer: Pointer,
}

/// Payload of the drag-end callback. The direction is the last one
/// computed during the gesture, absent when the pointer never moved.
#[derive(Debug, Clone, Copy)]
pub struct DragEnd {
    pub direction: Option<Direction>,
    pub start: Vec2,
    pub current: Vec2,
    pub delta: Vec2,
    pub pointer: Pointer,
}

/// Drawable disc. `None` fill or outline means that part is not painted.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f64,
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    pub outline_width: f64,
}

/// Axis-aligned widget bounds in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// On-screen virtual joystick.
///
/// The widget tracks a single active drag gesture at a time: pointer-down
/// starts it (subject to the placement-mode gate), pointer-move updates
/// angle, magnitude and direction, pointer-up ends it. A stage feeds every
/// pointer event to every registered joystick; each widget decides
/// activation on its own.
pub struct Joystick {
    placement: Placement,
    visibility: Visibility,
    throttle_within: bool,
    outer: Circle,
    inner: Circle,
    radius: f64,
    origin: Vec2,
    attached: bool,
    opacity: f64,
    active: bool,
    angle: f64,
    magnitude: f64,
    direction: Option<Direction>,
    start_pos: Vec2,
    end_pos: Vec2,
    on_drag_start: Option<Box<dyn FnMut(&DragStart)>>,
    on_drag: Option<Box<dyn FnMut(&DragMove)>>,
    on_drag_end: Option<Box<dyn FnMut(&DragEnd)>>,
}

impl Joystick {
    pub fn new(config: JoystickConfig) -> Self {
        let r1 = config.outer_radius;
        let r2 = config.inner_radius.min(INNER_RADIUS_CAP) * r1;
        let radius = r1 + r2;
        // Painted radii are half the requested terms.
        let (r1, r2) = (r1 * 0.5, r2 * 0.5);
        let mid = Vec2::new(radius * 0.5, radius * 0.5);

        let outer = Circle {
            pos: mid,
            radius: r1,
            fill: config.outer_fill,
            outline: Some(config.outer_outline.unwrap_or(DEFAULT_OUTLINE)),
            outline_width: config.outer_outline_width,
        };
        let inner = Circle {
            pos: mid,
            radius: r2,
            fill: Some(config.inner_fill.unwrap_or(Color::WHITE)),
            outline: Some(config.inner_outline.unwrap_or(DEFAULT_OUTLINE)),
            outline_width: config.inner_outline_width,
        };

        let mut stick = Self {
            placement: config.placement,
            visibility: config.visibility,
            throttle_within: config.throttle_within,
            outer,
            inner,
            radius,
            origin: Vec2::ZERO,
            attached: true,
            opacity: 1.0,
            active: false,
            angle: 0.0,
            magnitude: 0.0,
            direction: None,
            start_pos: Vec2::ZERO,
            end_pos: Vec2::ZERO,
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
        };
        // Dynamically-visible widgets appear only once a drag activates
        // them.
        if stick.visibility == Visibility::Dynamic {
            stick.deactivate();
        }
        stick
    }

    /// Attach a drag-start handler. Chainable at construction time.
    pub fn on_drag_start(mut self, handler: impl FnMut(&DragStart) + 'static) -> Self {
        self.on_drag_start = Some(Box::new(handler));
        self
    }

    /// Attach a per-move drag handler.
    pub fn on_drag(mut self, handler: impl FnMut(&DragMove) + 'static) -> Self {
        self.on_drag = Some(Box::new(handler));
        self
    }

    /// Attach a drag-end handler.
    pub fn on_drag_end(mut self, handler: impl FnMut(&DragEnd) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(handler));
        self
    }

    /// True only while a drag that originated on this widget is in
    /// progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the widget currently paints at all.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Overall widget extent in pixels; the surface is `radius x radius`.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Resize the widget surface. The circles keep the layout computed at
    /// construction.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// Top-left corner of the widget on the stage, for host positioning.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect {
            left: self.origin.x,
            top: self.origin.y,
            width: self.radius,
            height: self.radius,
        }
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn outer_circle(&self) -> &Circle {
        &self.outer
    }

    pub fn inner_circle(&self) -> &Circle {
        &self.inner
    }

    /// Show the widget at full opacity. Idempotent.
    pub fn activate(&mut self) {
        self.opacity = 1.0;
        self.attached = true;
    }

    /// Hide the widget. Idempotent.
    pub fn deactivate(&mut self) {
        self.attached = false;
    }

    /// Pointer-down: possibly starts a drag, depending on the placement
    /// mode.
    pub fn pointer_down(&mut self, position: Vec2, source: PointerSource) {
        match self.placement {
            Placement::Dynamic => {
                // Relocate the widget so its center sits under the
                // pointer.
                let half = self.radius * 0.5;
                self.origin = position - Vec2::new(half, half);
                if self.visibility == Visibility::Dynamic {
                    self.activate();
                }
                self.active = true;
            }
            Placement::Fixed => {
                let rect = self.bounding_rect();
                let center = Vec2::new(rect.left + self.radius * 0.5, rect.top + self.radius * 0.5);
                let offset = position - center;
                // The outer circle shows the widget; only the inner knob
                // accepts the drag.
                if self.visibility == Visibility::Dynamic && offset.hypot() <= self.outer.radius {
                    self.activate();
                }
                if offset.hypot() <= self.inner.radius {
                    self.active = true;
                }
            }
        }

        self.angle = 0.0;
        self.magnitude = 0.0;
        self.direction = None;
        self.start_pos = position;

        if self.active {
            let event = DragStart {
                start: position,
                current: position,
                delta: Vec2::ZERO,
                pointer: Pointer {
                    position,
                    source,
                    phase: PointerPhase::Down,
                },
            };
            if let Some(handler) = self.on_drag_start.as_mut() {
                handler(&event);
            }
        }
    }

    /// Pointer-move: updates the drag state. Ignored while inactive.
    pub fn pointer_move(&mut self, position: Vec2, source: PointerSource) {
        if !self.active {
            return;
        }
        // Re-assert visibility even if a fade was in progress.
        self.opacity = 1.0;
        self.end_pos = position;
        let delta = self.end_pos - self.start_pos;
        self.angle = delta.y.atan2(delta.x);
        let buffer = if self.throttle_within {
            self.inner.radius
        } else {
            0.0
        };
        self.magnitude = delta.hypot().min(self.outer.radius - buffer);
        let direction = Direction::from_delta(delta);
        self.direction = Some(direction);

        let event = DragMove {
            direction,
            start: self.start_pos,
            current: position,
            delta,
            angle: self.angle,
            magnitude: self.magnitude,
            pointer: Pointer {
                position,
                source,
                phase: PointerPhase::Move,
            },
        };
        if let Some(handler) = self.on_drag.as_mut() {
            handler(&event);
        }
    }

    /// Pointer-up: ends the drag and resets the state. Ignored while
    /// inactive.
    pub fn pointer_up(&mut self, position: Vec2, source: PointerSource) {
        if !self.active {
            return;
        }
        let event = DragEnd {
            direction: self.direction,
            start: self.start_pos,
            current: position,
            delta: Vec2::ZERO,
            pointer: Pointer {
                position,
                source,
                phase: PointerPhase::Up,
            },
        };
        if let Some(handler) = self.on_drag_end.as_mut() {
            handler(&event);
        }

        self.start_pos = Vec2::ZERO;
        self.angle = 0.0;
        self.magnitude = 0.0;
        self.active = false;
        self.direction = None;
    }

    /// Per-frame animation: opacity fade and knob placement.
    pub fn update(&mut self) {
        match self.visibility {
            Visibility::Fixed => self.opacity = 1.0,
            Visibility::Dynamic => {
                if !self.active {
                    self.opacity -= FADE_STEP;
                }
                if self.opacity <= 0.0 {
                    self.opacity = 0.0;
                }
            }
        }
        let mid = self.radius * 0.5;
        self.inner.pos = Vec2::new(
            mid + self.angle.cos() * self.magnitude,
            mid + self.angle.sin() * self.magnitude,
        );
    }

    /// Paint the bezel then the knob, modulated by the current opacity.
    pub fn draw(&self, canvas: &mut Canvas) {
        if !self.attached || self.opacity <= 0.0 {
            return;
        }
        let opacity = self.opacity as f32;
        canvas.paint_circle(self.origin, &self.outer, opacity);
        canvas.paint_circle(self.origin, &self.inner, opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JoystickConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn default_stick() -> Joystick {
        Joystick::new(JoystickConfig::builder().build())
    }

    fn dynamic_stick() -> Joystick {
        Joystick::new(
            JoystickConfig::builder()
                .placement(Placement::Dynamic)
                .build(),
        )
    }

    #[test]
    fn default_radius_arithmetic() {
        let stick = default_stick();
        // 100 + min(0.9, 0.3) * 100, painted radii halved.
        assert_eq!(stick.radius(), 130.0);
        assert_eq!(stick.outer_circle().radius, 50.0);
        assert_eq!(stick.inner_circle().radius, 15.0);
        let rect = stick.bounding_rect();
        assert_eq!(rect.width, 130.0);
        assert_eq!(rect.height, 130.0);
    }

    #[test]
    fn inner_radius_capped_at_ninety_percent() {
        let stick = Joystick::new(JoystickConfig::builder().inner_radius(2.0).build());
        assert_eq!(stick.radius(), 190.0);
        assert_eq!(stick.inner_circle().radius, 45.0);
    }

    #[test]
    fn set_radius_resizes_bounds() {
        let mut stick = default_stick();
        stick.set_radius(200.0);
        assert_eq!(stick.radius(), 200.0);
        assert_eq!(stick.bounding_rect().width, 200.0);
    }

    #[test]
    fn direction_is_pure_dominant_axis() {
        assert_eq!(Direction::from_delta(Vec2::new(-3.0, 1.0)), Direction::Left);
        assert_eq!(Direction::from_delta(Vec2::new(3.0, -1.0)), Direction::Right);
        assert_eq!(Direction::from_delta(Vec2::new(1.0, -3.0)), Direction::Up);
        assert_eq!(Direction::from_delta(Vec2::new(-1.0, 3.0)), Direction::Down);
    }

    #[test]
    fn direction_tie_falls_to_vertical_axis() {
        assert_eq!(Direction::from_delta(Vec2::new(5.0, 5.0)), Direction::Down);
        assert_eq!(Direction::from_delta(Vec2::new(5.0, -5.0)), Direction::Up);
        assert_eq!(Direction::from_delta(Vec2::new(-5.0, -5.0)), Direction::Up);
    }

    #[test]
    fn magnitude_clamped_to_outer_circle() {
        let mut stick = dynamic_stick();
        stick.pointer_down(Vec2::new(200.0, 200.0), PointerSource::Mouse);
        stick.pointer_move(Vec2::new(5000.0, 200.0), PointerSource::Mouse);
        assert_eq!(stick.magnitude(), 50.0);
    }

    #[test]
    fn throttle_within_shrinks_the_clamp() {
        let mut stick = Joystick::new(
            JoystickConfig::builder()
                .placement(Placement::Dynamic)
                .throttle_within(true)
                .build(),
        );
        stick.pointer_down(Vec2::new(200.0, 200.0), PointerSource::Mouse);
        stick.pointer_move(Vec2::new(200.0, 5000.0), PointerSource::Mouse);
        assert_eq!(stick.magnitude(), 35.0);
    }

    #[test]
    fn dynamic_placement_recenters_on_pointer_down() {
        let mut stick = dynamic_stick();
        stick.pointer_down(Vec2::new(300.0, 220.0), PointerSource::Mouse);
        assert!(stick.is_active());
        let rect = stick.bounding_rect();
        assert_eq!(rect.left, 300.0 - 65.0);
        assert_eq!(rect.top, 220.0 - 65.0);
    }

    #[test]
    fn fixed_placement_requires_inner_circle_hit() {
        // Widget at origin: center (65, 65), inner radius 15, outer 50.
        let mut stick = default_stick();
        stick.pointer_down(Vec2::new(95.0, 65.0), PointerSource::Mouse);
        assert!(!stick.is_active());
        stick.pointer_down(Vec2::new(75.0, 65.0), PointerSource::Mouse);
        assert!(stick.is_active());
    }

    #[test]
    fn fixed_placement_dynamic_visibility_shows_without_drag() {
        let mut stick = Joystick::new(
            JoystickConfig::builder()
                .visibility(Visibility::Dynamic)
                .build(),
        );
        assert!(!stick.is_attached());
        // Inside the outer circle but outside the inner knob.
        stick.pointer_down(Vec2::new(95.0, 65.0), PointerSource::Mouse);
        assert!(stick.is_attached());
        assert!(!stick.is_active());
    }

    #[test]
    fn activate_deactivate_idempotent() {
        let mut stick = default_stick();
        stick.deactivate();
        stick.deactivate();
        assert!(!stick.is_attached());
        stick.activate();
        stick.activate();
        assert!(stick.is_attached());
        assert_eq!(stick.opacity(), 1.0);
    }

    #[test]
    fn drag_lifecycle_fires_typed_events() {
        let starts: Rc<RefCell<Vec<DragStart>>> = Rc::new(RefCell::new(Vec::new()));
        let moves: Rc<RefCell<Vec<DragMove>>> = Rc::new(RefCell::new(Vec::new()));
        let ends: Rc<RefCell<Vec<DragEnd>>> = Rc::new(RefCell::new(Vec::new()));

        let mut stick = {
            let (starts, moves, ends) = (starts.clone(), moves.clone(), ends.clone());
            Joystick::new(
                JoystickConfig::builder()
                    .placement(Placement::Dynamic)
                    .build(),
            )
            .on_drag_start(move |event| starts.borrow_mut().push(*event))
            .on_drag(move |event| moves.borrow_mut().push(*event))
            .on_drag_end(move |event| ends.borrow_mut().push(*event))
        };

        stick.pointer_down(Vec2::new(100.0, 100.0), PointerSource::Mouse);
        stick.pointer_move(Vec2::new(160.0, 100.0), PointerSource::Mouse);
        stick.pointer_up(Vec2::new(160.0, 100.0), PointerSource::Mouse);

        let start = starts.borrow()[0];
        assert_eq!(start.start, Vec2::new(100.0, 100.0));
        assert_eq!(start.current, Vec2::new(100.0, 100.0));
        assert_eq!(start.delta, Vec2::ZERO);
        assert_eq!(start.pointer.phase, PointerPhase::Down);

        let moved = moves.borrow()[0];
        assert_eq!(moved.direction, Direction::Right);
        assert_eq!(moved.delta, Vec2::new(60.0, 0.0));
        assert_eq!(moved.angle, 0.0);
        assert_eq!(moved.magnitude, 50.0);

        let end = ends.borrow()[0];
        assert_eq!(end.direction, Some(Direction::Right));
        assert_eq!(end.delta, Vec2::ZERO);
        assert_eq!(end.current, Vec2::new(160.0, 100.0));

        assert!(!stick.is_active());
        assert_eq!(stick.magnitude(), 0.0);
        assert_eq!(stick.direction(), None);
    }

    #[test]
    fn end_without_move_carries_no_direction() {
        let ends: Rc<RefCell<Vec<DragEnd>>> = Rc::new(RefCell::new(Vec::new()));
        let mut stick = {
            let ends = ends.clone();
            dynamic_stick().on_drag_end(move |event| ends.borrow_mut().push(*event))
        };
        stick.pointer_down(Vec2::new(50.0, 50.0), PointerSource::Mouse);
        stick.pointer_up(Vec2::new(50.0, 50.0), PointerSource::Mouse);
        assert_eq!(ends.borrow()[0].direction, None);
    }

    #[test]
    fn pointer_events_ignored_while_inactive() {
        let moves: Rc<RefCell<Vec<DragMove>>> = Rc::new(RefCell::new(Vec::new()));
        let mut stick = {
            let moves = moves.clone();
            default_stick().on_drag(move |event| moves.borrow_mut().push(*event))
        };
        stick.pointer_move(Vec2::new(10.0, 10.0), PointerSource::Mouse);
        stick.pointer_up(Vec2::new(10.0, 10.0), PointerSource::Mouse);
        assert!(moves.borrow().is_empty());
        assert!(!stick.is_active());
        assert_eq!(stick.magnitude(), 0.0);
    }

    #[test]
    fn opacity_fades_out_after_release() {
        let mut stick = Joystick::new(
            JoystickConfig::builder()
                .placement(Placement::Dynamic)
                .visibility(Visibility::Dynamic)
                .build(),
        );
        stick.pointer_down(Vec2::new(100.0, 100.0), PointerSource::Mouse);
        assert!(stick.is_attached());
        assert_eq!(stick.opacity(), 1.0);
        stick.pointer_up(Vec2::new(100.0, 100.0), PointerSource::Mouse);

        stick.update();
        assert!((stick.opacity() - 0.97).abs() < 1e-12);
        for _ in 0..200 {
            stick.update();
        }
        assert_eq!(stick.opacity(), 0.0);
    }

    #[test]
    fn fixed_visibility_pins_opacity() {
        let mut stick = default_stick();
        for _ in 0..3 {
            stick.update();
        }
        assert_eq!(stick.opacity(), 1.0);
    }

    #[test]
    fn knob_follows_drag_within_bezel() {
        let mut stick = dynamic_stick();
        stick.pointer_down(Vec2::new(200.0, 200.0), PointerSource::Mouse);
        stick.pointer_move(Vec2::new(200.0, 240.0), PointerSource::Mouse);
        stick.update();
        let knob = stick.inner_circle().pos;
        assert!((knob.x - 65.0).abs() < 1e-9);
        assert!((knob.y - 105.0).abs() < 1e-9);
    }
}
