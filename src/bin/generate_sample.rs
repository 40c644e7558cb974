use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;

use pitch_stability::data::calibration::MAX_CHANNELS;
use pitch_stability::data::scan::{HEADER_LINES, TIMESTAMP_LINE};

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic pitch-scan dataset plus a matching config.json")]
struct Args {
    /// Output directory (created if missing)
    #[arg(long, default_value = "sample_data")]
    out: PathBuf,

    /// Number of measurement loops
    #[arg(long, default_value_t = 4)]
    loops: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Pitch angles visited in each loop, ending at the zenith.
const ANGLES: [i32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Channel wavelengths: 200 nm → ~1000 nm, linear.
fn wavelengths() -> Vec<f64> {
    (0..MAX_CHANNELS).map(|i| 200.0 + i as f64 * 0.39).collect()
}

/// Sky radiance model: brighter towards the zenith, bluer at low angles.
fn radiance(wavelength: f64, angle: i32, rng: &mut SimpleRng) -> f64 {
    let elevation = (angle as f64).to_radians().sin();
    let scatter = (400.0 / wavelength).powi(4);
    let level = 1000.0 * (0.4 + 0.6 * elevation) * (0.5 + 0.5 * scatter);
    (level + rng.gauss(0.0, 5.0)).max(0.0)
}

fn scan_text(wl: &[f64], angle: i32, seconds: f64, rng: &mut SimpleRng) -> String {
    let mut text = String::new();
    let header = [
        "synthetic scan".to_string(),
        format!("pitch {angle}"),
        format!("channels {}", wl.len()),
    ];
    for line in header.iter().take(HEADER_LINES) {
        let _ = writeln!(text, "{line}");
    }

    for &w in wl {
        let _ = writeln!(text, "{:.3}", radiance(w, angle, rng));
    }
    for _ in HEADER_LINES + wl.len()..TIMESTAMP_LINE {
        let _ = writeln!(text, "0");
    }

    let h = (seconds / 3600.0).floor();
    let m = ((seconds - h * 3600.0) / 60.0).floor();
    let s = seconds - h * 3600.0 - m * 60.0;
    let _ = writeln!(text, "{h:02}:{m:02}:{s:06.3}");
    text
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let scans = args.out.join("scans");
    std::fs::create_dir_all(&scans).with_context(|| format!("creating {}", scans.display()))?;

    let wl = wavelengths();
    let cali: String = wl.iter().map(|w| format!("{w:.4}\n")).collect();
    let cali_path = args.out.join("cali.txt");
    write_file(&cali_path, &cali)?;

    // 09:00:00 start, 20 s per scan
    let mut seconds = 9.0 * 3600.0;
    let mut seq = 0usize;
    for _ in 0..args.loops {
        // one horizontal reference per loop, ignored by the reducer
        let name = format!("SYN_{seq:04}_horizontal_0.txt");
        write_file(&scans.join(name), &scan_text(&wl, 0, seconds, &mut rng))?;
        seq += 1;
        seconds += 20.0;

        for &angle in &ANGLES {
            let name = format!("SYN_{seq:04}_pitch_{angle}.txt");
            write_file(&scans.join(name), &scan_text(&wl, angle, seconds, &mut rng))?;
            seq += 1;
            seconds += 20.0;
        }
    }

    let config = json!({
        "spectrum_path": scans,
        "cali_path": cali_path,
        "angle_num": ANGLES.len(),
        "output_path": args.out.join("result.json"),
        "csv_path": args.out.join("records.csv"),
    });
    let config_path = args.out.join("config.json");
    write_file(&config_path, &serde_json::to_string_pretty(&config)?)?;

    info!(
        "Wrote {} loops ({} scans) to {}; run with --config {}",
        args.loops,
        seq,
        scans.display(),
        config_path.display()
    );
    Ok(())
}
