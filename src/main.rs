use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use metalrefl::materials::CATALOG;
use metalrefl::prompt;
use metalrefl::settings::{self, CliArgs};
use metalrefl::spectral::SpectralSweep;

/// Initialises logging; `RUST_LOG` refines the level chosen by `-v`.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let top_level_module = record
                .module_path()
                .and_then(|path| path.split("::").next())
                .unwrap_or("metalrefl");
            writeln!(
                buf,
                "{:5} [{}]: {}",
                record.level(),
                top_level_module,
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    if args.list {
        for material in CATALOG.iter() {
            println!(
                "{:<10} omega_p = {:e} rad/s, gamma = {:e} rad/s, epsilon_inf = {}",
                material.name,
                material.params.omega_p,
                material.params.gamma,
                material.params.epsilon_inf
            );
        }
        return Ok(());
    }

    let mut settings = settings::load_config_from(&args)?;
    if args.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        settings = prompt::interactive_settings(&mut stdin.lock(), &mut stdout, settings)?;
    }
    println!("{}", settings);

    let mut spectral = SpectralSweep::new(settings)?;
    spectral.solve()?;

    for summary in spectral.summary().sweeps.iter() {
        let p = &summary.params;
        println!(
            "{} nm: epsilon = {:.4}, n = {:.4}, R(0) = {}, pseudo-Brewster = {} deg",
            summary.wavelength_nm,
            summary.epsilon,
            summary.refractive_index,
            p.normal_reflectance
                .map_or("-".to_string(), |r| format!("{:.4}", r)),
            p.pseudo_brewster_angle
                .map_or("-".to_string(), |a| format!("{:.2}", a)),
        );
    }

    for path in spectral.writeup()? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
