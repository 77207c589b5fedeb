//! Per-tick level update
//!
//! Processing order while running:
//!   1. Per ball: advance, walls, holes (a capture removes the ball at once)
//!   2. Per surviving ball: acceleration tiles, then player lines
//!   3. Immediate respawns of balls rejected while the queue was empty
//!   4. Hole bookkeeping
//!   5. End checks (all balls resolved, then timer expiry)
//!
//! Once ended, ticks only drain the time bonus.

use super::hole::Capture;
use super::services::{LevelTimer, ScoreSink, WaitingQueue};
use super::state::{EndReason, Level, LevelPhase, SimEvent};
use super::wall::WallHit;

/// Advance the level by one tick
pub fn tick(
    level: &mut Level,
    scores: &mut dyn ScoreSink,
    waiting: &mut dyn WaitingQueue,
    timer: &dyn LevelTimer,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    level.time_ticks += 1;

    if let LevelPhase::Ended(_) = level.phase {
        drain_time_bonus(level, scores);
        return events;
    }

    let mut respawns = Vec::new();

    {
        let Level {
            balls,
            walls,
            holes,
            accel_tiles,
            lines,
            ..
        } = &mut *level;

        // Index walk: a captured ball is removed in place and the index is
        // not advanced, so the next ball is neither skipped nor revisited.
        let mut i = 0;
        while i < balls.len() {
            let ball = &mut balls[i];
            ball.advance();

            for wall in walls.iter_mut() {
                if let Some(WallHit {
                    recolored: Some(color),
                }) = wall.resolve(ball)
                {
                    events.push(SimEvent::BallRecolored { id: ball.id, color });
                }
            }

            let mut capture = None;
            for hole in holes.iter_mut() {
                if let Some(outcome) = hole.attract(ball, &mut *scores) {
                    capture = Some(outcome);
                    break;
                }
            }

            let Some(capture) = capture else {
                i += 1;
                continue;
            };

            let ball = balls.remove(i);
            match capture {
                Capture::Accepted => {
                    events.push(SimEvent::BallCaptured {
                        id: ball.id,
                        color: ball.color,
                    });
                }
                Capture::Rejected => {
                    events.push(SimEvent::BallRejected {
                        id: ball.id,
                        color: ball.color,
                    });
                    if waiting.is_empty() {
                        respawns.push(ball);
                    } else {
                        waiting.push(ball);
                    }
                }
            }
        }

        for ball in balls.iter_mut() {
            for tile in accel_tiles.iter_mut() {
                tile.check_collision(ball);
            }
            for (index, line) in lines.iter_mut().enumerate() {
                if line.check_collision(ball) {
                    events.push(SimEvent::LineCleared { index });
                }
            }
        }
    }

    for ball in respawns {
        let id = level.spawn_ball(ball);
        log::debug!("ball {} respawned immediately (queue empty)", id);
        events.push(SimEvent::BallRespawned { id });
    }

    for hole in level.holes.iter_mut() {
        hole.prune_attracted(&mut level.balls);
    }

    if level.balls.is_empty()
        && waiting.is_empty()
        && level.end(EndReason::Normal, timer.remaining_secs())
    {
        events.push(SimEvent::LevelEnded {
            reason: EndReason::Normal,
        });
    }

    if timer.has_expired() && level.end(EndReason::TimeUp, 0) {
        events.push(SimEvent::LevelEnded {
            reason: EndReason::TimeUp,
        });
    }

    events
}

/// Pay out one bonus point every other tick, walking the edge tiles in step
fn drain_time_bonus(level: &mut Level, scores: &mut dyn ScoreSink) {
    if level.time_bonus > 0 && level.time_ticks % 2 == 0 {
        scores.add_bonus(1);
        level.time_bonus -= 1;
        for tile in level.perimeter_tiles.iter_mut() {
            tile.step();
        }
        if level.time_bonus == 0 {
            level.perimeter_tiles.clear();
        }
    }
}

impl Level {
    /// Advance this level by one tick; see [`tick`]
    pub fn update(
        &mut self,
        scores: &mut dyn ScoreSink,
        waiting: &mut dyn WaitingQueue,
        timer: &dyn LevelTimer,
    ) -> Vec<SimEvent> {
        tick(self, scores, waiting, timer)
    }
}
