//! Sortstep terminal driver
//!
//! Autoplays one algorithm (or all of them) over the configured seed dataset,
//! printing each step.
//! Usage: `sortstep [ALGORITHM|all] [--config PATH] [--speed slow|normal|fast|instant]`

use std::path::PathBuf;
use std::process::ExitCode;

use sortstep::engine::element::values;
use sortstep::{
    AlgorithmId, LogReporter, PlaybackSpeed, ProgressLog, ProgressReporter, Session, Settings,
};

const USAGE: &str =
    "usage: sortstep [ALGORITHM|all] [--config PATH] [--speed slow|normal|fast|instant]";

struct Args {
    algorithms: Option<Vec<AlgorithmId>>,
    config: Option<PathBuf>,
    speed: Option<PlaybackSpeed>,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args {
        algorithms: None,
        config: None,
        speed: None,
    };
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--speed" => {
                let value = iter.next().ok_or("--speed needs a value")?;
                let speed = PlaybackSpeed::from_str(&value)
                    .ok_or_else(|| format!("unknown speed '{}'", value))?;
                args.speed = Some(speed);
            }
            "all" => args.algorithms = Some(AlgorithmId::ALL.to_vec()),
            name => {
                let algorithm = name.parse::<AlgorithmId>().map_err(|e| format!("{}", e))?;
                args.algorithms = Some(vec![algorithm]);
            }
        }
    }
    Ok(args)
}

fn run(
    settings: &Settings,
    algorithm: AlgorithmId,
    reporter: &mut dyn ProgressReporter,
) -> sortstep::Result<()> {
    let seed = settings.dataset().generate_for(algorithm);
    let mut session = Session::new(algorithm, &seed)?.with_max_history(settings.max_history);
    let delay = settings.speed.step_delay();

    println!("\n== {} ==", algorithm);
    println!("start: {:?}", values(session.dataset()));
    while !session.is_complete() {
        let event = session.step(reporter);
        println!("{:>5}  {}", session.step_count(), event);
        // presentation pacing only
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    println!("done:  {:?} in {} steps", values(session.dataset()), session.step_count());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    let mut settings = args
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(speed) = args.speed {
        settings.speed = speed;
    }
    let algorithms = args.algorithms.unwrap_or_else(|| vec![settings.algorithm]);
    log::info!(
        "Sortstep starting with seed {} at {} speed",
        settings.rng_seed,
        settings.speed.as_str()
    );

    let mut progress = match &settings.progress_path {
        Some(path) => match ProgressLog::load(path) {
            Ok(progress) => Some(progress),
            Err(e) => {
                log::warn!("Ignoring unreadable progress log: {}", e);
                Some(ProgressLog::new())
            }
        },
        None => None,
    };

    for algorithm in algorithms {
        let result = match progress.as_mut() {
            Some(progress) => run(&settings, algorithm, progress),
            None => run(&settings, algorithm, &mut LogReporter),
        };
        if let Err(e) = result {
            eprintln!("error: {}: {}", algorithm, e);
            return ExitCode::FAILURE;
        }
    }

    if let (Some(progress), Some(path)) = (&progress, &settings.progress_path) {
        if let Err(e) = progress.save(path) {
            log::warn!("Failed to save progress: {}", e);
        }
    }
    ExitCode::SUCCESS
}
