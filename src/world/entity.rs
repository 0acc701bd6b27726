use crate::config::{PlayerConfig, ProjectileConfig};
use crate::engine::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Point,
    pub size: f64,
    pub speed: f64,
    /// where the pointer wants the player, `None` until the first move event
    pub target_x: Option<f64>,
    pub can_shoot: bool,
}

impl Player {
    /// Horizontally centered, `bottom_offset` above the bottom edge
    pub fn new(canvas: Size, config: &PlayerConfig) -> Self {
        Player {
            position: Point {
                x: canvas.width / 2.0 - config.size / 2.0,
                y: canvas.height - config.bottom_offset,
            },
            size: config.size,
            speed: config.speed,
            target_x: None,
            can_shoot: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, self.size)
    }

    pub fn center_x(&self) -> f64 {
        self.position.x + self.size / 2.0
    }

    /// Pointer x is where the player's center should end up
    pub fn aim_at(&mut self, pointer_x: f64) {
        self.target_x = Some(pointer_x - self.size / 2.0);
    }

    /// Constant speed toward the target, never past it
    pub fn chase(&mut self) {
        let Some(target) = self.target_x else {
            return;
        };
        let x = &mut self.position.x;
        if *x < target {
            *x = (*x + self.speed).min(target);
        } else if *x > target {
            *x = (*x - self.speed).max(target);
        }
    }

    pub fn clamp_to(&mut self, canvas_width: f64) {
        if self.position.x < 0.0 {
            self.position.x = 0.0;
        }
        if self.position.x + self.size > canvas_width {
            self.position.x = canvas_width - self.size;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub position: Point,
    pub size: f64,
    /// pixels per frame, fixed for the obstacle's lifetime
    pub speed: f64,
    /// slot in the shared obstacle image table
    pub image: usize,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, self.size)
    }

    pub fn fall(&mut self) {
        self.position.y += self.speed;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub size: f64,
    pub speed: f64,
}

impl Projectile {
    /// Leaves from the player's horizontal center, at the player's top edge
    pub fn fired_by(player: &Player, config: &ProjectileConfig) -> Self {
        Projectile {
            position: Point {
                x: player.center_x(),
                y: player.position.y,
            },
            size: config.size,
            speed: config.speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, self.size)
    }

    pub fn rise(&mut self) {
        self.position.y -= self.speed;
    }
}
