use super::World;
use crate::engine::{Point, Rect};

/// Which preloaded image a box should be filled with
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sprite {
    Player,
    /// index into the obstacle image table
    Obstacle(usize),
}

/// Anything the world can be drawn onto
pub trait Surface {
    fn clear(&self, area: &Rect);
    fn draw_sprite(&self, sprite: Sprite, destination: &Rect);
    fn draw_glyph(&self, glyph: &str, position: Point, font_px: f64);
}

/// Draw order: player, obstacles, projectiles
pub fn draw(world: &World, surface: &impl Surface) {
    surface.clear(&Rect::new(Point::default(), world.canvas()));
    surface.draw_sprite(Sprite::Player, &world.player().bounds());
    for obstacle in world.obstacles() {
        surface.draw_sprite(Sprite::Obstacle(obstacle.image), &obstacle.bounds());
    }
    let projectile = &world.config().projectile;
    for shot in world.projectiles() {
        surface.draw_glyph(&projectile.glyph, shot.position, projectile.font_px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::Size;
    use crate::world::entity::{Obstacle, Projectile};
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear(Rect),
        Sprite(Sprite, Rect),
        Glyph(String, Point, f64),
    }

    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<Call>>,
    }

    impl Surface for Recording {
        fn clear(&self, area: &Rect) {
            self.calls.borrow_mut().push(Call::Clear(*area));
        }

        fn draw_sprite(&self, sprite: Sprite, destination: &Rect) {
            self.calls.borrow_mut().push(Call::Sprite(sprite, *destination));
        }

        fn draw_glyph(&self, glyph: &str, position: Point, font_px: f64) {
            self.calls
                .borrow_mut()
                .push(Call::Glyph(glyph.to_string(), position, font_px));
        }
    }

    fn canvas() -> Size {
        Size {
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn empty_world_draws_only_the_player() {
        let world = World::new(GameConfig::default(), canvas(), 0.0);
        let surface = Recording::default();
        draw(&world, &surface);

        assert_eq!(
            *surface.calls.borrow(),
            vec![
                Call::Clear(Rect::new(Point::default(), canvas())),
                Call::Sprite(
                    Sprite::Player,
                    Rect::square(Point { x: 375.0, y: 540.0 }, 50.0)
                ),
            ]
        );
    }

    #[test]
    fn obstacles_and_projectiles_follow_the_player() {
        let mut world = World::new(GameConfig::default(), canvas(), 0.0);
        world.obstacles.push(Obstacle {
            position: Point { x: 10.0, y: 20.0 },
            size: 60.0,
            speed: 3.0,
            image: 17,
        });
        world.projectiles.push(Projectile {
            position: Point { x: 400.0, y: 300.0 },
            size: 60.0,
            speed: 10.0,
        });
        let surface = Recording::default();
        draw(&world, &surface);

        let calls = surface.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[2],
            Call::Sprite(
                Sprite::Obstacle(17),
                Rect::square(Point { x: 10.0, y: 20.0 }, 60.0)
            )
        );
        assert_eq!(
            calls[3],
            Call::Glyph("💩".to_string(), Point { x: 400.0, y: 300.0 }, 50.0)
        );
    }

    #[test]
    fn drawing_leaves_the_world_untouched() {
        let world = World::new(GameConfig::default(), canvas(), 0.0);
        let before = world.summary();
        draw(&world, &Recording::default());
        assert_eq!(world.summary(), before);
        assert_eq!(world.player().position, Point { x: 375.0, y: 540.0 });
    }
}
