//! headless — runs the gas on its background thread and consumes it the way
//! a renderer would, without a window.
//!
//! Every frame advances the display clock by `FRAME_TIME_STEP` and pulls all
//! diffs up to that time into a `BodyMirror`, logging each one to CSV.  Every
//! `HUD_EVERY` frames the kinetic energy and momentum are printed.  Halfway
//! through, the population is swapped for a freshly seeded one.
//!
//! Usage: `headless [config.json]`.  Without an argument the default 500 light
//! / 10 heavy population in an 800×600 box is used.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use bm_core::GasConfig;
use bm_driver::{BodyMirror, SimDriver};
use bm_output::{CsvWriter, DiffLogObserver};
use bm_sim::SimObserver;

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_TIME_STEP: f64      = 17.0; // simulation time per displayed frame
const FRAMES:          u64      = 600;
const HUD_EVERY:       u64      = 60;
const LOAD_TIMEOUT:    Duration = Duration::from_secs(10);
const OUTPUT_DIR:      &str     = "output/headless";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => GasConfig::default(),
    };

    println!("=== headless — hard-disc gas ===");
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!();

    // 1. Start the producer and let it fill the stream.
    let driver = SimDriver::spawn(config.clone())?;
    let mut stream = driver.stream();
    if !stream.wait_loaded(LOAD_TIMEOUT) {
        println!("stream not full after {LOAD_TIMEOUT:?}; starting anyway");
    }
    let mut mirror = BodyMirror::new(driver.initial_bodies());

    // 2. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = DiffLogObserver::new(writer);

    // 3. Frame loop.
    println!("{:>6} {:>10} {:>14} {:>22}", "frame", "time", "energy", "momentum");
    println!("{}", "-".repeat(55));
    let t0 = Instant::now();
    let mut clock = 0.0;
    for frame in 1..=FRAMES {
        clock += FRAME_TIME_STEP;
        mirror.sync_to(&stream, clock, &mut obs);

        if frame % HUD_EVERY == 0 {
            let p = mirror.momentum();
            println!(
                "{:>6} {:>10.1} {:>14.4} {:>22}",
                frame,
                clock,
                mirror.kinetic_energy(),
                format!("({:.4}, {:.4})", p.x, p.y),
            );
        }

        if frame == FRAMES / 2 {
            let seed = config.seed.wrapping_add(1);
            let bodies = driver.pause_and_replace(GasConfig { seed, ..config.clone() })?;
            println!("-- replaced population ({} bodies, seed {seed}) --", bodies.len());
            stream = driver.stream();
            mirror.reset(bodies);
            clock = 0.0;
        }
    }
    let elapsed = t0.elapsed();

    // 4. Shut down and flush.
    let (now, resolved) = driver.progress();
    driver.join()?;
    obs.on_run_end(now, resolved);
    obs.finish().context("writing output")?;

    println!();
    println!("Ran {FRAMES} frames in {:.3} s", elapsed.as_secs_f64());
    println!("  events logged       : {}", obs.events_logged());
    println!("  producer ran ahead to t = {now:.1} ({resolved} events since last reset)");
    println!("  output              : {OUTPUT_DIR}/");
    Ok(())
}

fn load_config(path: &Path) -> Result<GasConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: GasConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    if let Err(e) = config.validate() {
        bail!("invalid config {}: {e}", path.display());
    }
    Ok(config)
}
