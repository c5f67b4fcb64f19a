//! Surface sizing: fit a drawing surface into a parent area, and build
//! the window-backed framebuffer it renders through.

use std::error::Error;
use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How a surface is sized within its parent. The two policies are
/// genuinely different formulas and are selected explicitly.
///
/// No validation is performed: non-positive inputs or a zero-sized
/// parent silently yield a degenerate surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitPolicy {
    /// Exact target aspect ratio: fit to whichever parent side is the
    /// limiting one, derive the other side, then scale both.
    AspectRatio {
        aspect_width: f64,
        aspect_height: f64,
        scale: f64,
    },
    /// Approximate: starts from the square of the parent's smaller side,
    /// applies `ratio` to the width only, and folds in a corrective
    /// factor so the result still fits that square. The resulting aspect
    /// only approximates the request.
    SquareRatio { scale: f64, ratio: f64 },
}

impl FitPolicy {
    pub fn fit(&self, parent: Extent) -> Extent {
        match *self {
            FitPolicy::AspectRatio {
                aspect_width,
                aspect_height,
                scale,
            } => {
                let parent_aspect = parent.width / parent.height;
                let target_aspect = aspect_width / aspect_height;
                let (width, height) = if parent_aspect > target_aspect {
                    (parent.height * target_aspect, parent.height)
                } else {
                    (parent.width, parent.width / target_aspect)
                };
                Extent::new(width * scale, height * scale)
            }
            FitPolicy::SquareRatio { scale, ratio } => {
                let base = parent.width.min(parent.height);
                let width = base * ratio;
                let corrective = if ratio > 1.0 { 1.0 / ratio } else { 1.0 };
                Extent::new(width * corrective * scale, base * corrective * scale)
            }
        }
    }
}

/// Create a window of the policy-fitted size together with its
/// framebuffer.
pub fn create_canvas(
    event_loop: &EventLoop<()>,
    title: &str,
    parent: Extent,
    policy: FitPolicy,
) -> Result<(Arc<Window>, Pixels<'static>), Box<dyn Error>> {
    let size = policy.fit(parent);
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_resizable(false)
            .build(event_loop)?,
    );
    let physical = window.inner_size();
    let surface_texture = SurfaceTexture::new(physical.width, physical.height, window.clone());
    let pixels = Pixels::new(physical.width, physical.height, surface_texture)?;
    Ok((window, pixels))
}
