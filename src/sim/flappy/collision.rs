//! Collision detection for the continuous simulation
//!
//! Axis-aligned overlap tests between the actor's bounding box and the
//! ground plane or a pipe pair. Outcomes are binary and terminal; this
//! variant has no invincibility bypass by design.

use crate::consts::{BIRD_RADIUS, BIRD_X, FIELD_HEIGHT, GROUND_Y, PIPE_WIDTH};

use super::state::Pipe;

/// True once the actor's lower edge reaches the ground plane
pub fn hits_ground(y: f32) -> bool {
    y + BIRD_RADIUS >= GROUND_Y
}

/// AABB overlap between the actor and one pipe pair
pub fn hits_pipe(y: f32, pipe: &Pipe) -> bool {
    let left = BIRD_X - BIRD_RADIUS;
    let right = BIRD_X + BIRD_RADIUS;
    if right <= pipe.x || left >= pipe.x + PIPE_WIDTH {
        return false;
    }
    let top = y - BIRD_RADIUS;
    let bottom = y + BIRD_RADIUS;
    top < pipe.top_height || bottom > FIELD_HEIGHT - pipe.bottom_height
}

/// Terminal check against every hazard currently on screen
pub fn bird_collides(y: f32, pipes: &[Pipe]) -> bool {
    hits_ground(y) || pipes.iter().any(|p| hits_pipe(y, p))
}
