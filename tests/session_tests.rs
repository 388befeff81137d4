//! End-to-end session behavior through the public API.

use panel_arcade::audio::Audio;
use panel_arcade::core::session::speed_for;
use panel_arcade::core::{Mode, SessionState};
use panel_arcade::display::FrameBuffer;
use panel_arcade::score::HighScoreStore;
use panel_arcade::types::{LogicalInput, MenuTarget, MAX_SPEED};

fn session(seed: u64) -> SessionState {
    SessionState::with_seed(
        128,
        19,
        true,
        Audio::disabled(),
        HighScoreStore::at("/nonexistent/panel-arcade-it"),
        seed,
    )
}

fn idle() -> LogicalInput {
    LogicalInput {
        controller_present: true,
        ..Default::default()
    }
}

fn jump() -> LogicalInput {
    LogicalInput {
        jump: true,
        ..idle()
    }
}

#[test]
fn long_run_accumulates_score_without_leaving_valid_modes() {
    let mut s = session(11);
    let mut fb = FrameBuffer::new(128, 19);
    s.update(&jump());
    let mut best = 0;
    for tick in 0..20_000u32 {
        // Mash jump on a fixed cadence to clear most obstacles.
        let input = if tick % 35 == 0 { jump() } else { idle() };
        s.update(&input);
        s.render(&mut fb);
        best = best.max(s.score);
    }
    assert!(best > 0, "a long run must clear some obstacles");
    assert!(matches!(
        s.mode,
        Mode::Running | Mode::GameOver | Mode::Cutscene | Mode::Menu
    ));
}

#[test]
fn identical_seeds_and_inputs_replay_identically() {
    let mut a = session(77);
    let mut b = session(77);
    a.update(&jump());
    b.update(&jump());
    for tick in 0..5_000u32 {
        let input = if tick % 40 == 0 { jump() } else { idle() };
        a.update(&input);
        b.update(&input);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.mode, b.mode);
    }
}

#[test]
fn crossing_five_hundred_triggers_the_cutscene() {
    let mut s = session(3);
    s.update(&jump());
    s.score = 500;
    s.update(&idle());
    assert_eq!(s.mode, Mode::Cutscene);
}

#[test]
fn scroll_speed_never_decreases_and_respects_the_cap() {
    let mut last = 0.0;
    for score in 0..3_000 {
        let speed = speed_for(score);
        assert!(speed >= last);
        assert!(speed <= MAX_SPEED + f32::EPSILON);
        last = speed;
    }
}

#[test]
fn menu_round_trip_through_every_mini_game() {
    let mut s = session(5);
    for target in [MenuTarget::Paddle, MenuTarget::Grid, MenuTarget::Canvas] {
        let mut select = idle();
        select.select = Some(target);
        s.update(&select);
        assert_ne!(s.mode, Mode::Menu);
        let mut exit = idle();
        exit.exit_to_menu = true;
        s.update(&exit);
        assert_eq!(s.mode, Mode::Menu);
    }
}

#[test]
fn controller_loss_mid_run_pauses_until_it_returns() {
    let mut s = session(9);
    s.update(&jump());
    assert_eq!(s.mode, Mode::Running);
    s.update(&LogicalInput::default());
    assert_eq!(s.mode, Mode::Paused);
    // Stays paused while disconnected.
    for _ in 0..100 {
        s.update(&LogicalInput::default());
        assert_eq!(s.mode, Mode::Paused);
    }
    s.update(&idle());
    assert_eq!(s.mode, Mode::Running);
}

#[test]
fn render_output_is_stable_sized_and_draws_the_ground() {
    let mut s = session(2);
    let mut fb = FrameBuffer::new(128, 19);
    s.update(&jump());
    s.render(&mut fb);
    let len = fb.bytes().len();
    assert_eq!(len, 16 * 19);
    // Ground line spans the bottom row while running.
    for x in 0..128 {
        assert!(fb.get_pixel(x, 18), "ground missing at x={x}");
    }
    for _ in 0..100 {
        s.update(&idle());
        s.render(&mut fb);
        assert_eq!(fb.bytes().len(), len);
    }
}
