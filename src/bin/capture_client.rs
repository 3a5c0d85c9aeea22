//! Capture client: samples the webcam at a fixed rate, streams JPEG frames
//! to the detector server and collects per-frame landmark results until
//! Ctrl-C, then writes the collected session as a replayable sequence file.
//!
//! Dispatch is fire-and-forget with no backpressure: a slow detector means
//! fewer collected results, never delay. Results are correlated purely by
//! arrival order.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use holotrace::camera::WebcamSource;
use holotrace::capture::CaptureSession;
use holotrace::config::Config;
use holotrace::protocol::{self, ClientMessage, DetectorReply, ServerMessage};
use holotrace::sequence::Sequence;

const CONFIG_PATH: &str = "config.toml";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

type LogFile = Arc<Mutex<std::io::BufWriter<std::fs::File>>>;

fn open_log_file() -> Result<LogFile> {
    std::fs::create_dir_all("logs")?;
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = format!("logs/capture_{}.log", ts);
    let file = std::fs::File::create(&path)?;
    eprintln!("Log: {}", path);
    Ok(Arc::new(Mutex::new(std::io::BufWriter::new(file))))
}

macro_rules! log {
    ($logfile:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        eprintln!("{}", msg);
        if let Ok(mut f) = $logfile.lock() {
            let _ = writeln!(f, "{}", msg);
            let _ = f.flush();
        }
    }};
}

// ---------------------------------------------------------------------------

enum Step {
    Sample,
    Result(DetectorReply),
    Quit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    let logfile = open_log_file()?;

    log!(logfile, "[tcp] connecting to {}", config.detector.addr);
    let stream = TcpStream::connect(&config.detector.addr)
        .await
        .with_context(|| format!("failed to connect to {}", config.detector.addr))?;
    let (mut sink, mut reader) = protocol::message_stream(stream).split();
    log!(logfile, "[tcp] connected");

    let (frames_tx, mut frames_rx) = mpsc::unbounded_channel();
    let (results_tx, mut results_rx) = mpsc::unbounded_channel();

    // Writer task: drains dispatched frames onto the wire. The sampler never
    // awaits this.
    let writer_logfile = logfile.clone();
    tokio::spawn(async move {
        while let Some(packet) = frames_rx.recv().await {
            let msg = ClientMessage::Frame(packet);
            if let Err(e) = protocol::send_message(&mut sink, &msg).await {
                log!(writer_logfile, "[tcp] send failed: {e}");
                break;
            }
        }
    });

    // Reader task: delivers detector results out-of-band.
    let reader_logfile = logfile.clone();
    tokio::spawn(async move {
        loop {
            match protocol::recv_message::<ServerMessage>(&mut reader).await {
                Ok(Some(ServerMessage::FrameResult(reply))) => {
                    if results_tx.send(reply).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    log!(reader_logfile, "[tcp] connection closed");
                    break;
                }
                Err(e) => {
                    log!(reader_logfile, "[tcp] read error: {e}");
                    break;
                }
            }
        }
    });

    let mut session = CaptureSession::new(frames_tx, config.capture.jpeg_quality);
    let camera_index = config.capture.camera_index;
    session
        .start(move || WebcamSource::open(camera_index))
        .context("capture source unavailable")?;
    if let Some((width, height)) = session.resolution() {
        log!(logfile, "[camera {camera_index}] opened at {width}x{height}");
    }
    log!(logfile, "[capture] sampling at 15/s, Ctrl-C to stop");

    loop {
        let step = tokio::select! {
            _ = session.next_sample(), if session.is_capturing() => Step::Sample,
            reply = results_rx.recv() => match reply {
                Some(r) => Step::Result(r),
                None => Step::Quit,
            },
            _ = tokio::signal::ctrl_c() => Step::Quit,
        };

        match step {
            Step::Sample => session.sample(),
            Step::Result(reply) => session.on_result(reply),
            Step::Quit => break,
        }
    }

    let (sampled, skipped, errors) = session.stats();
    log!(
        logfile,
        "[capture] stopping: {sampled} dispatched, {skipped} skipped, {errors} errors"
    );

    match session.stop() {
        Some(collected) => {
            let sequence = Sequence::from_landmarks(&collected);
            let path = sequence
                .save(&config.capture.output_dir, "capture")
                .map_err(|e| anyhow::anyhow!("failed to save artifact: {e}"))?;
            log!(
                logfile,
                "[capture] saved {} frames to {}",
                collected.len(),
                path.display()
            );
        }
        None => log!(logfile, "[capture] no results collected, nothing saved"),
    }

    Ok(())
}
