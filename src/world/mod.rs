//! Session state and the per-frame simulation.
//!
//! ┌──────────────────────── One step ─────────────────────────┐
//! │  1. elapsed seconds   <- now - started_at                 │
//! │  2. player            -> chase target, clamp to canvas    │
//! │  3. obstacles         -> fall, any touching player: over  │
//! │  4. projectiles       -> rise, hit newest obstacle, leave │
//! │  5. obstacles         -> drop the ones below the canvas   │
//! │  6. score += 1, unlock shooting at the threshold          │
//! └───────────────────────────────────────────────────────────┘

pub mod entity;
pub mod render;

use self::entity::{Obstacle, Player, Projectile};
use crate::audio::{AudioSink, Cue};
use crate::config::GameConfig;
use crate::engine::{Point, Size};
use rand::Rng;

/// What the HUD and the game over dialog show
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u64,
    pub elapsed_secs: u64,
    pub shots: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// session already over, nothing moved
    Stopped,
    /// `unlocked` is true only on the frame shooting became available
    Running { unlocked: bool },
    GameOver(SessionSummary),
}

pub struct World {
    config: GameConfig,
    canvas: Size,
    player: Player,
    obstacles: Vec<Obstacle>,
    projectiles: Vec<Projectile>,
    score: u64,
    shots: u32,
    started_at: f64,
    elapsed_secs: u64,
    running: bool,
    // edge latch, the unlock cue must fire once per session
    unlock_announced: bool,
}

impl World {
    /// Fresh session; `now` is the clock `step` will be fed with
    pub fn new(config: GameConfig, canvas: Size, now: f64) -> Self {
        let player = Player::new(canvas, &config.player);
        World {
            config,
            canvas,
            player,
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            shots: 0,
            started_at: now,
            elapsed_secs: 0,
            running: true,
            unlock_announced: false,
        }
    }

    /// Throw the session away and start over, keeping config and canvas size
    pub fn reset(&mut self, now: f64) {
        *self = World::new(self.config.clone(), self.canvas, now);
    }

    pub fn step(&mut self, now: f64, audio: &impl AudioSink) -> StepOutcome {
        if !self.running {
            return StepOutcome::Stopped;
        }

        self.elapsed_secs = ((now - self.started_at) / 1000.0).floor().max(0.0) as u64;

        self.player.chase();
        self.player.clamp_to(self.canvas.width);

        for obstacle in &mut self.obstacles {
            obstacle.fall();
        }
        let player_box = self.player.bounds();
        if self
            .obstacles
            .iter()
            .any(|obstacle| obstacle.bounds().intersects(&player_box))
        {
            return self.game_over(audio);
        }

        self.advance_projectiles(audio);

        let floor = self.canvas.height;
        self.obstacles.retain(|obstacle| obstacle.position.y < floor);

        self.score += 1;
        let unlocked = self.update_shoot_capability(audio);

        StepOutcome::Running { unlocked }
    }

    /// Fire one projectile. Rejected while shooting is locked or a projectile
    /// is still in flight.
    pub fn shoot(&mut self, audio: &impl AudioSink) -> bool {
        if !self.running || !self.player.can_shoot || !self.projectiles.is_empty() {
            return false;
        }
        audio.play(Cue::Shoot);
        self.shots += 1;
        self.projectiles
            .push(Projectile::fired_by(&self.player, &self.config.projectile));
        true
    }

    /// Drop a new obstacle just above the top edge
    pub fn spawn_obstacle(&mut self, rng: &mut impl Rng) -> bool {
        if !self.running {
            return false;
        }
        let tuning = &self.config.obstacle;
        let span = (self.canvas.width - tuning.size).max(0.0);
        let speed = if tuning.min_speed < tuning.max_speed {
            rng.gen_range(tuning.min_speed..tuning.max_speed)
        } else {
            tuning.min_speed
        };
        let image = if tuning.image_count > 0 {
            rng.gen_range(0..tuning.image_count)
        } else {
            0
        };
        self.obstacles.push(Obstacle {
            position: Point {
                x: rng.gen::<f64>() * span,
                y: -tuning.size,
            },
            size: tuning.size,
            speed,
            image,
        });
        true
    }

    pub fn aim_at(&mut self, pointer_x: f64) {
        self.player.aim_at(pointer_x);
    }

    /// Entities stay where they are, the next step clamps the player
    pub fn resize(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            shots: self.shots,
        }
    }

    fn game_over(&mut self, audio: &impl AudioSink) -> StepOutcome {
        self.running = false;
        audio.play(Cue::GameOver);
        audio.stop_music();
        log::info!(
            "Game over : score {}, {}s, {} shots",
            self.score,
            self.elapsed_secs,
            self.shots
        );
        StepOutcome::GameOver(self.summary())
    }

    /// Each projectile takes out at most one obstacle, the newest one it touches
    fn advance_projectiles(&mut self, audio: &impl AudioSink) {
        let obstacles = &mut self.obstacles;
        self.projectiles.retain_mut(|projectile| {
            projectile.rise();
            let bounds = projectile.bounds();
            if let Some(hit) = obstacles
                .iter()
                .rposition(|obstacle| obstacle.bounds().intersects(&bounds))
            {
                obstacles.remove(hit);
                audio.play(Cue::Destroy);
                return false;
            }
            projectile.position.y >= 0.0
        });
    }

    fn update_shoot_capability(&mut self, audio: &impl AudioSink) -> bool {
        if self.score >= self.config.rules.shoot_unlock_score {
            self.player.can_shoot = true;
        }
        if self.player.can_shoot && !self.unlock_announced {
            self.unlock_announced = true;
            audio.play(Cue::Unlock);
            return true;
        }
        false
    }
}
