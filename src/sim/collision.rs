//! Axis-aligned collision detection and bounce resolution
//!
//! Every collidable in the field is a box: blocks and the paddle by their
//! sprite extents, the ball by the square around its radius. A bounce flips
//! exactly one direction flag, chosen by comparing how deep the ball box
//! penetrates each face of the target.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square box around a circle, which is how the ball collides
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::from_center_size(center, Vec2::splat(radius * 2.0))
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Which direction flag a bounce sets, and to what
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    Horizontal { moving_right: bool },
    Vertical { moving_up: bool },
}

/// Resolve the bounce of a ball box against a target box
///
/// The ball exits through the face it penetrated least. An exact tie between
/// the axes bounces vertically; callers rely on that, so it is load-bearing
/// behavior, not an accident of ordering.
pub fn bounce_axis(ball: &Aabb, target: &Aabb) -> Option<BounceAxis> {
    if !ball.overlaps(target) {
        return None;
    }

    let overlap_left = ball.max.x - target.min.x;
    let overlap_right = target.max.x - ball.min.x;
    let overlap_top = ball.max.y - target.min.y;
    let overlap_bottom = target.max.y - ball.min.y;

    let min_x = overlap_left.min(overlap_right);
    let min_y = overlap_top.min(overlap_bottom);

    if min_x < min_y {
        // Shallower on the left face means the ball came from the left
        Some(BounceAxis::Horizontal {
            moving_right: overlap_left > overlap_right,
        })
    } else {
        // Shallower on the top face means the ball came from above;
        // remember screen y grows downward
        Some(BounceAxis::Vertical {
            moving_up: overlap_top < overlap_bottom,
        })
    }
}

/// The paddle's collision box at a given center position
pub fn paddle_rect(paddle_x: f32) -> Aabb {
    Aabb::from_center_size(
        Vec2::new(paddle_x, PADDLE_Y),
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
    )
}

/// A block's collision box at its center position
pub fn block_rect(pos: Vec2) -> Aabb {
    Aabb::from_center_size(pos, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_at_origin() -> Aabb {
        // 60x20 box centered on (0, 0)
        block_rect(Vec2::ZERO)
    }

    #[test]
    fn separated_boxes_do_not_bounce() {
        let ball = Aabb::around(Vec2::new(100.0, 100.0), BALL_RADIUS);
        assert_eq!(bounce_axis(&ball, &block_at_origin()), None);
    }

    #[test]
    fn hit_from_above_bounces_up() {
        // Ball centered over the block, bottom edge barely inside the top face
        let ball = Aabb::around(Vec2::new(0.0, -16.0), BALL_RADIUS);
        assert_eq!(
            bounce_axis(&ball, &block_at_origin()),
            Some(BounceAxis::Vertical { moving_up: true })
        );
    }

    #[test]
    fn hit_from_below_bounces_down() {
        let ball = Aabb::around(Vec2::new(0.0, 16.0), BALL_RADIUS);
        assert_eq!(
            bounce_axis(&ball, &block_at_origin()),
            Some(BounceAxis::Vertical { moving_up: false })
        );
    }

    #[test]
    fn hit_from_the_left_bounces_left() {
        // Dead-center vertically so the horizontal penetration is smaller
        let ball = Aabb::around(Vec2::new(-36.0, 0.0), BALL_RADIUS);
        assert_eq!(
            bounce_axis(&ball, &block_at_origin()),
            Some(BounceAxis::Horizontal {
                moving_right: false
            })
        );
    }

    #[test]
    fn hit_from_the_right_bounces_right() {
        let ball = Aabb::around(Vec2::new(36.0, 0.0), BALL_RADIUS);
        assert_eq!(
            bounce_axis(&ball, &block_at_origin()),
            Some(BounceAxis::Horizontal { moving_right: true })
        );
    }

    #[test]
    fn exact_corner_tie_bounces_vertically() {
        // Both penetrations equal: 2 px into the left face, 2 px into the
        // bottom face
        let target = Aabb::from_center_size(Vec2::ZERO, Vec2::new(20.0, 20.0));
        let ball = Aabb::from_center_size(Vec2::new(-12.0, 12.0), Vec2::new(8.0, 8.0));

        let left = ball.max.x - target.min.x;
        let bottom = target.max.y - ball.min.y;
        assert_eq!(left, bottom, "setup must produce an exact tie");

        assert_eq!(
            bounce_axis(&ball, &target),
            Some(BounceAxis::Vertical { moving_up: false })
        );
    }

    #[test]
    fn paddle_rect_tracks_the_paddle() {
        let rect = paddle_rect(400.0);
        assert_eq!(rect.min, Vec2::new(350.0, PADDLE_Y - PADDLE_HEIGHT / 2.0));
        assert_eq!(rect.max, Vec2::new(450.0, PADDLE_Y + PADDLE_HEIGHT / 2.0));
    }
}
