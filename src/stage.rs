//! The stage: one window, one framebuffer, one shared pointer-event
//! stream feeding every registered joystick, and the frame-paced render
//! loop.

use std::error::Error;
use std::time::{Duration, Instant};

use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::canvas::Canvas;
use crate::config::StageConfig;
use crate::joystick::{Joystick, PointerSource, Vec2};
use crate::surface::create_canvas;

/// Handle to a joystick registered on a stage. Passing it to
/// [`Stage::remove`] is the single teardown operation: the widget and its
/// callbacks are dropped together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickId(usize);

pub struct Stage {
    config: StageConfig,
    slots: Vec<Option<Joystick>>,
    cursor: Vec2,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Register a joystick. It receives every pointer event from now on.
    pub fn add(&mut self, joystick: Joystick) -> JoystickId {
        let free = self.slots.iter().position(|slot| slot.is_none());
        match free {
            Some(index) => {
                self.slots[index] = Some(joystick);
                JoystickId(index)
            }
            None => {
                self.slots.push(Some(joystick));
                JoystickId(self.slots.len() - 1)
            }
        }
    }

    /// Remove a joystick and release its callbacks. Idempotent: removing
    /// an already-removed handle returns `None`.
    pub fn remove(&mut self, id: JoystickId) -> Option<Joystick> {
        self.slots.get_mut(id.0)?.take()
    }

    pub fn joystick(&self, id: JoystickId) -> Option<&Joystick> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn joystick_mut(&mut self, id: JoystickId) -> Option<&mut Joystick> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    fn widgets_mut(&mut self) -> impl Iterator<Item = &mut Joystick> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.as_mut())
    }

    /// Deliver a pointer-down to every registered widget; each decides
    /// activation independently.
    pub fn pointer_down(&mut self, position: Vec2, source: PointerSource) {
        for stick in self.widgets_mut() {
            stick.pointer_down(position, source);
        }
    }

    pub fn pointer_move(&mut self, position: Vec2, source: PointerSource) {
        for stick in self.widgets_mut() {
            stick.pointer_move(position, source);
        }
    }

    pub fn pointer_up(&mut self, position: Vec2, source: PointerSource) {
        for stick in self.widgets_mut() {
            stick.pointer_up(position, source);
        }
    }

    fn update(&mut self) {
        for stick in self.widgets_mut() {
            stick.update();
        }
    }

    fn draw(&mut self, canvas: &mut Canvas) {
        for stick in self.widgets_mut() {
            stick.draw(canvas);
        }
    }

    /// Run the stage until its window closes. `scene` is the caller's
    /// per-frame hook, drawn under the widgets; the update of every
    /// widget precedes all drawing within a frame.
    pub fn run<F>(mut self, mut scene: F) -> Result<(), Box<dyn Error>>
    where
        F: FnMut(&mut Canvas),
    {
        let event_loop = EventLoop::new()?;
        let (window, mut pixels) =
            create_canvas(&event_loop, &self.config.title, self.config.parent, self.config.fit)?;

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();
        let background = self.config.background;
        let touch_support = self.config.touch_support;
        let window_clone = window.clone();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                    }
                    WindowEvent::CursorMoved { position, .. } if !touch_support => {
                        self.cursor = Vec2::new(position.x, position.y);
                        self.pointer_move(self.cursor, PointerSource::Mouse);
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } if !touch_support => match state {
                        ElementState::Pressed => {
                            self.pointer_down(self.cursor, PointerSource::Mouse);
                        }
                        ElementState::Released => {
                            self.pointer_up(self.cursor, PointerSource::Mouse);
                        }
                    },
                    WindowEvent::Touch(Touch {
                        phase, location, ..
                    }) if touch_support => {
                        let position = Vec2::new(location.x, location.y);
                        match phase {
                            TouchPhase::Started => {
                                self.pointer_down(position, PointerSource::Touch);
                            }
                            TouchPhase::Moved => {
                                self.pointer_move(position, PointerSource::Touch);
                            }
                            TouchPhase::Ended | TouchPhase::Cancelled => {
                                self.pointer_up(position, PointerSource::Touch);
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        self.update();
                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        canvas.clear(background);
                        scene(&mut canvas);
                        self.draw(&mut canvas);
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
