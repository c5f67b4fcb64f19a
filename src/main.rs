//! Demo: steer a sprite onto randomly placed targets with a
//! dynamically-placed joystick.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use rand::Rng;

use thumbstick::{
    Canvas, Color, Extent, FitPolicy, Joystick, JoystickConfig, Placement, Stage, StageConfig,
    Vec2, Visibility,
};

const ARENA: Extent = Extent::new(960.0, 540.0);
const SPRITE_RADIUS: f64 = 14.0;
const TARGET_RADIUS: f64 = 9.0;
const SPEED_FACTOR: f64 = 0.12;

struct Game {
    sprite: Vec2,
    velocity: Vec2,
    target: Vec2,
    score: u32,
}

impl Game {
    fn new() -> Self {
        Self {
            sprite: Vec2::new(ARENA.width * 0.5, ARENA.height * 0.5),
            velocity: Vec2::ZERO,
            target: random_target(),
            score: 0,
        }
    }

    fn steer(&mut self, angle: f64, magnitude: f64) {
        let speed = magnitude * SPEED_FACTOR;
        self.velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
    }

    fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    fn step(&mut self) {
        self.sprite = self.sprite + self.velocity;
        self.sprite.x = self.sprite.x.clamp(SPRITE_RADIUS, ARENA.width - SPRITE_RADIUS);
        self.sprite.y = self.sprite.y.clamp(SPRITE_RADIUS, ARENA.height - SPRITE_RADIUS);
        if (self.sprite - self.target).hypot() < SPRITE_RADIUS + TARGET_RADIUS {
            self.score += 1;
            println!("score: {}", self.score);
            self.target = random_target();
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_circle(
            self.target.x,
            self.target.y,
            TARGET_RADIUS,
            Color::new(0xe8, 0x4d, 0x4d),
            1.0,
        );
        canvas.fill_circle(
            self.sprite.x,
            self.sprite.y,
            SPRITE_RADIUS,
            Color::new(0x4d, 0x9d, 0xe8),
            1.0,
        );
    }
}

fn random_target() -> Vec2 {
    let mut rng = rand::rng();
    Vec2::new(
        rng.random_range(40.0..ARENA.width - 40.0),
        rng.random_range(40.0..ARENA.height - 40.0),
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let stage_config = StageConfig::builder()
        .title("thumbstick demo".to_string())
        .parent(ARENA)
        .fit(FitPolicy::AspectRatio {
            aspect_width: 16.0,
            aspect_height: 9.0,
            scale: 1.0,
        })
        .build();
    let mut stage = Stage::new(stage_config);

    let game = Rc::new(RefCell::new(Game::new()));

    let stick_config = JoystickConfig::builder()
        .placement(Placement::Dynamic)
        .visibility(Visibility::Dynamic)
        .throttle_within(true)
        .outer_outline(Color::new(0xdd, 0xdd, 0xdd))
        .build();
    let stick = {
        let on_move = game.clone();
        let on_end = game.clone();
        Joystick::new(stick_config)
            .on_drag(move |event| on_move.borrow_mut().steer(event.angle, event.magnitude))
            .on_drag_end(move |_| on_end.borrow_mut().stop())
    };
    let _stick = stage.add(stick);

    println!("drag anywhere to steer the sprite onto the red target");
    stage.run(move |canvas| {
        let mut game = game.borrow_mut();
        game.step();
        game.draw(canvas);
    })
}
