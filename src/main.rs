use anyhow::Result;
use tokio::sync::mpsc;

use holotrace::config::Config;
use holotrace::playback::{PlaybackSession, PlaybackState, TickEvent};
use holotrace::render::BufferCanvas;
use holotrace::sequence::Sequence;

const CONFIG_PATH: &str = "config.toml";

enum Step {
    Tick,
    Command(String),
    Eof,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== holotrace replay console ({}) ===", env!("GIT_VERSION"));
    println!();
    println!("Commands:");
    println!("  o <file>   - load a sequence file");
    println!("  p          - play");
    println!("  a          - pause");
    println!("  s          - stop (reset to frame 0)");
    println!("  x <speed>  - set speed multiplier (e.g. x 0.5)");
    println!("  i          - show status");
    println!("  q          - quit");
    println!();

    let canvas = BufferCanvas::new(config.playback.canvas_width, config.playback.canvas_height);
    let mut session = PlaybackSession::new(Some(canvas));
    session.set_speed(config.playback.speed);

    // Blocking stdin reader on its own thread; line delivery is
    // cancellation-safe through the channel.
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if cmd_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let step = tokio::select! {
            _ = session.next_tick(), if session.is_playing() => Step::Tick,
            line = cmd_rx.recv() => match line {
                Some(l) => Step::Command(l),
                None => Step::Eof,
            },
        };

        match step {
            Step::Tick => match session.tick() {
                Ok(TickEvent::Finished) => println!("playback finished"),
                Ok(_) => {}
                Err(e) => eprintln!("playback stopped: {e}"),
            },
            Step::Command(line) => {
                if !handle_command(&mut session, line.trim()) {
                    break;
                }
            }
            Step::Eof => break,
        }
    }

    println!("bye");
    Ok(())
}

fn handle_command(session: &mut PlaybackSession<BufferCanvas>, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return true;
    }

    match parts[0] {
        "o" if parts.len() == 2 => match Sequence::load(parts[1]) {
            Ok(seq) => {
                let frames = seq.len();
                match session.load(seq) {
                    Ok(()) => println!("loaded {} ({frames} frames)", parts[1]),
                    Err(e) => eprintln!("load failed: {e}"),
                }
            }
            Err(e) => eprintln!("load failed: {e}"),
        },
        "p" => match session.play() {
            Ok(()) if session.is_playing() => println!("playing at {}x", session.speed()),
            Ok(()) => println!("nothing loaded"),
            Err(e) => eprintln!("play failed: {e}"),
        },
        "a" => {
            session.pause();
            println!("paused at frame {}", session.index());
        }
        "s" => match session.stop() {
            Ok(()) => println!("stopped"),
            Err(e) => eprintln!("stop failed: {e}"),
        },
        "x" if parts.len() == 2 => match parts[1].parse::<f64>() {
            Ok(speed) if speed > 0.0 => {
                session.set_speed(speed);
                println!("speed: {}x", session.speed());
            }
            _ => eprintln!("speed must be a positive number"),
        },
        "i" => {
            let state = match session.state() {
                PlaybackState::Idle => "idle",
                PlaybackState::Stopped => "stopped",
                PlaybackState::Playing => "playing",
                PlaybackState::Paused => "paused",
            };
            let frames = session.sequence().map(|s| s.len()).unwrap_or(0);
            println!(
                "state: {state}, frame: {}/{frames}, speed: {}x",
                session.index(),
                session.speed()
            );
        }
        "q" => return false,
        _ => eprintln!("unknown command: {line}"),
    }
    true
}
