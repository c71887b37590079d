use crate::{Ball, Config, Events, GameEvent, GameRng, MatchState, Score, Side};
use hecs::World;

/// Check if ball left the field and award the point
///
/// Sets `state` to game over when the scorer reaches the win score; otherwise
/// the ball is served again from the centre at its current speed.
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = if ball.left() < 0.0 {
            Side::Right
        } else if ball.right() > config.field_width {
            Side::Left
        } else {
            continue;
        };

        score.increment(scorer);
        events.push(GameEvent::Scored {
            scorer,
            score: *score,
        });
        log::info!(
            "{:?} scores ({} - {})",
            scorer,
            score.left,
            score.right
        );

        if let Some(winner) = score.has_winner(config.win_score) {
            *state = MatchState::GameOver { winner };
            events.push(GameEvent::GameOver { winner });
            log::info!("game over, {:?} wins", winner);
        } else {
            ball.reset(config.center(), rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ball;
    use glam::Vec2;

    fn setup_world() -> (World, Config, Score, MatchState, Events, GameRng) {
        (
            World::new(),
            Config::new(),
            Score::new(),
            MatchState::Playing,
            Events::new(),
            GameRng::new(12345), // Fixed seed for deterministic tests
        )
    }

    #[test]
    fn test_right_player_scores_when_ball_exits_left() {
        let (mut world, config, mut score, mut state, mut events, mut rng) = setup_world();
        create_ball(&mut world, &config, Vec2::new(9.0, 200.0), Vec2::new(-2.0, 2.0));

        check_scoring(&mut world, &config, &mut score, &mut state, &mut events, &mut rng);

        assert_eq!(score.right, 1, "Right player should score");
        assert_eq!(score.left, 0, "Left player should not score");
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Scored { scorer: Side::Right, .. })));
    }

    #[test]
    fn test_left_player_scores_when_ball_exits_right() {
        let (mut world, config, mut score, mut state, mut events, mut rng) = setup_world();
        create_ball(&mut world, &config, Vec2::new(791.0, 200.0), Vec2::new(2.0, 2.0));

        check_scoring(&mut world, &config, &mut score, &mut state, &mut events, &mut rng);

        assert_eq!(score.left, 1, "Left player should score");
        assert_eq!(score.right, 0, "Right player should not score");
    }

    #[test]
    fn test_ball_resets_after_scoring() {
        let (mut world, config, mut score, mut state, mut events, mut rng) = setup_world();
        let ball = create_ball(&mut world, &config, Vec2::new(5.0, 300.0), Vec2::new(-2.0, 2.0));
        world.get::<&mut Ball>(ball).unwrap().speed = 4.0;

        check_scoring(&mut world, &config, &mut score, &mut state, &mut events, &mut rng);

        let ball = world.get::<&Ball>(ball).unwrap();
        assert_eq!(ball.pos, config.center(), "Ball should reset to center");
        assert_eq!(ball.vel.x.abs(), 4.0, "Serve keeps the boosted speed");
        assert_eq!(ball.vel.y.abs(), 4.0);
        assert_eq!(state, MatchState::Playing);
    }

    #[test]
    fn test_no_scoring_when_ball_in_bounds() {
        let (mut world, config, mut score, mut state, mut events, mut rng) = setup_world();
        create_ball(&mut world, &config, Vec2::new(10.0, 200.0), Vec2::new(-2.0, 2.0));

        check_scoring(&mut world, &config, &mut score, &mut state, &mut events, &mut rng);

        assert_eq!(score, Score::new(), "Touching the edge is not an exit");
        assert!(events.is_empty(), "No scoring events");
    }

    #[test]
    fn test_reaching_win_score_ends_match() {
        let (mut world, config, mut score, mut state, mut events, mut rng) = setup_world();
        score.right = config.win_score - 1;
        let exit_pos = Vec2::new(5.0, 300.0);
        let ball = create_ball(&mut world, &config, exit_pos, Vec2::new(-2.0, 2.0));

        check_scoring(&mut world, &config, &mut score, &mut state, &mut events, &mut rng);

        assert_eq!(state, MatchState::GameOver { winner: Side::Right });
        assert_eq!(
            events.drain().last().copied(),
            Some(GameEvent::GameOver { winner: Side::Right })
        );
        assert_eq!(
            world.get::<&Ball>(ball).unwrap().pos,
            exit_pos,
            "Ball is left where it went out"
        );
    }
}
