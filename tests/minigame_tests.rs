//! Scenario tests for the three mini-games.

use panel_arcade::audio::Audio;
use panel_arcade::core::grid::{Heading, MOVE_INTERVAL_START};
use panel_arcade::core::paddle::WIN_SCORE;
use panel_arcade::core::{CanvasGame, GridGame, PaddleGame};
use panel_arcade::display::FrameBuffer;
use panel_arcade::types::{LogicalInput, PlayerInput};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn paddle_match_with_parked_paddles_runs_to_a_winner_and_freezes() {
    let mut game = PaddleGame::new(128, 19);
    let audio = Audio::disabled();

    // Both players hold up: paddles park at the top and every rally whiffs,
    // so points alternate until someone reaches the win score.
    let mut input = LogicalInput::default();
    input.players[0] = PlayerInput { up: true, ..Default::default() };
    input.players[1] = PlayerInput { up: true, ..Default::default() };

    let mut ticks = 0u32;
    while game.winner.is_none() {
        game.update(&input, &audio);
        ticks += 1;
        assert!(ticks < 100_000, "match never ended");
    }
    let winner = game.winner.unwrap();
    assert_eq!(game.scores[winner], WIN_SCORE);

    // Nothing mutates once the match is decided.
    let frozen = game.scores;
    for _ in 0..500 {
        game.update(&input, &audio);
    }
    assert_eq!(game.scores, frozen);

    let mut fb = FrameBuffer::new(128, 19);
    game.render(&mut fb);
}

#[test]
fn grid_snake_turns_on_the_move_cadence_and_dies_at_the_wall() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut game = GridGame::new(&mut rng, 128, 19);
    let audio = Audio::disabled();

    // Steer down; the turn applies on the next movement tick, not instantly.
    let mut down = LogicalInput::default();
    down.players[0].down = true;
    let (hx, hy) = game.head();
    game.update(&mut rng, &down, &audio);
    assert_eq!(game.head(), (hx, hy), "no movement between cadence ticks");

    let idle = LogicalInput::default();
    for _ in 0..MOVE_INTERVAL_START {
        game.update(&mut rng, &idle, &audio);
    }
    assert_eq!(game.heading(), Heading::Down);
    assert_eq!(game.head(), (hx, hy + 1));

    // Keep going down until the bottom wall ends the game.
    for _ in 0..2_000 {
        game.update(&mut rng, &down, &audio);
        if game.game_over {
            break;
        }
    }
    assert!(game.game_over);

    // Jump restarts with fresh state.
    let mut restart = LogicalInput::default();
    restart.jump = true;
    game.update(&mut rng, &restart, &audio);
    assert!(!game.game_over);
    assert_eq!(game.score, 0);
    assert_eq!(game.len(), 3);
}

#[test]
fn canvas_paint_undo_and_idle_exit() {
    let mut game = CanvasGame::new(128, 19);
    let audio = Audio::disabled();

    let mut paint = LogicalInput::default();
    paint.jump = true;
    game.update(&paint, &audio);
    assert_eq!(game.cell_count(), 1);

    // Drag the cursor right while painting: more cells appear.
    let mut drag = LogicalInput::default();
    drag.players[0].left.x = 1.0;
    drag.duck = true;
    for _ in 0..30 {
        game.update(&drag, &audio);
    }
    let painted = game.cell_count();
    assert!(painted > 3);

    // Undo everything.
    let mut undo = LogicalInput::default();
    undo.back = true;
    for _ in 0..painted {
        game.update(&undo, &audio);
    }
    assert_eq!(game.cell_count(), 0);

    // Untouched, the canvas eventually asks to exit.
    let idle = LogicalInput::default();
    let mut exited = false;
    for _ in 0..2_000 {
        if game.update(&idle, &audio) {
            exited = true;
            break;
        }
    }
    assert!(exited);
}
