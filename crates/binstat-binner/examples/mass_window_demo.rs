//! Splits weighted events into in-window and sideband sums per bin of a
//! second variable, then prints a per-bin signal estimate.
//!
//! Run with `RUST_LOG=debug` to see the binner's construction logs.

use binstat_binner::{parse_layouts, Window, WindowSplit};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

struct MassWindow;

impl Window for MassWindow {
    const LOW: f64 = 121_000.0;
    const HIGH: f64 = 129_000.0;
}

const MASS_RANGE: (f64, f64) = (105_000.0, 160_000.0);

const LAYOUTS: &str = "\
# variable edges...
pT_yy 0 20e3 40e3 60e3 100e3 200e3 inf
Njets 0 1 2 3 inf
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let layouts = parse_layouts(LAYOUTS)?;
    let mut binners = layouts
        .iter()
        .map(|l| Ok((l.name.as_str(), l.build::<WindowSplit<MassWindow>>()?)))
        .collect::<binstat_binner::Result<Vec<_>>>()?;

    let mut rng = StdRng::seed_from_u64(42);
    let pt = Normal::<f64>::new(50e3, 40e3)?;
    let njets = Uniform::new(0u32, 5);
    let peak = Normal::<f64>::new(125e3, 1.7e3)?;
    let continuum = Uniform::new(MASS_RANGE.0, MASS_RANGE.1);
    let pick = Uniform::new(0.0, 1.0);

    for _ in 0..200_000 {
        let m = if pick.sample(&mut rng) < 0.02 {
            peak.sample(&mut rng)
        } else {
            continuum.sample(&mut rng)
        };
        if m < MASS_RANGE.0 || m > MASS_RANGE.1 {
            continue;
        }
        let w = 0.01;
        let observed = [pt.sample(&mut rng).abs(), f64::from(njets.sample(&mut rng))];
        for ((_, binner), x) in binners.iter_mut().zip(observed) {
            binner.fill_with(x, (m, w));
        }
    }

    // Sideband weight scaled to the window width
    let sidebands = (MASS_RANGE.1 - MASS_RANGE.0) - MassWindow::width();
    let factor = MassWindow::width() / sidebands;

    for (name, binner) in &mut binners {
        if name.starts_with('N') {
            let last = binner.edges()[binner.bin_count() - 1];
            binner.cap_last_edge(last + 1.0)?;
        } else if name.starts_with("pT") {
            binner.cap_last_edge(500e3)?;
            binner.scale_edges(1e-3)?;
        }

        println!("{name}");
        for view in binner.finite() {
            let split = view.state;
            let background = factor * split.outside;
            let signif = if background > 0.0 {
                split.inside / background.sqrt()
            } else {
                0.0
            };
            println!(
                "[{:>6}, {:>6}): {:>10.3} {:>10.3} {:>8.3}",
                view.left, view.right, split.inside, split.outside, signif
            );
        }
        println!();
    }

    Ok(())
}
