//! Tenpin demo driver
//!
//! Plays a scripted game against the simulation and prints the scoreboard
//! as each frame resolves. Pass a settings JSON path as the only argument
//! to play on a custom lane.

use std::path::Path;

use tenpin::Settings;
use tenpin::sim::{GameEngine, GamePhase, GameSnapshot};

/// Ticks per shot before giving up on settlement
const MAX_TICKS_PER_SHOT: u32 = 2000;

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(Path::new(&path)),
        None => Settings::default(),
    };
    if let Err(err) = settings.validate() {
        eprintln!("bad settings: {err}");
        std::process::exit(1);
    }

    let center = settings.lane_center_x();
    // A mixed line: pocket shots, a couple of off-center hits, one gutter
    let aims = [
        center,
        center + 70.0,
        center,
        center - 180.0,
        center,
        center + 40.0,
        center - 60.0,
        center,
    ];

    let mut engine = GameEngine::new(settings);
    let mut shot_index = 0usize;

    while engine.phase() != GamePhase::GameOver {
        let target = aims[shot_index % aims.len()];
        shot_index += 1;
        if !engine.request_throw(target) {
            break;
        }

        let mut settled = false;
        for _ in 0..MAX_TICKS_PER_SHOT {
            engine.tick();
            if matches!(
                engine.phase(),
                GamePhase::AwaitingThrow | GamePhase::GameOver
            ) {
                settled = true;
                break;
            }
        }
        if !settled {
            eprintln!("shot never settled, aborting");
            std::process::exit(1);
        }

        print_scoreboard(&engine.snapshot());
    }

    let snap = engine.snapshot();
    println!("\nFinal score: {}", snap.total_score);
}

fn print_scoreboard(snap: &GameSnapshot) {
    let mut line = String::new();
    let mut running = 0u32;
    for frame in &snap.frames {
        if frame.shots.is_empty() {
            line.push_str("|      ");
            continue;
        }
        let shots: Vec<String> = frame.shots.iter().map(|s| s.to_string()).collect();
        if frame.closed {
            running += frame.total;
            line.push_str(&format!("| {:<5}", format!("{}={running}", shots.join(","))));
        } else {
            line.push_str(&format!("| {:<5}", shots.join(",")));
        }
    }
    println!("{line}|  total {}", snap.total_score);
}
