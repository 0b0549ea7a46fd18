use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use predict_hazard::policy::Hazard;
use predict_hazard::{input, predict, PredictError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufWriter, IsTerminal, Write};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// The fatal error from `main` is logged here and this target is always
/// enabled at `error`, whatever RUST_LOG says.
const FATAL_TARGET: &str = "predict_hazard::fatal";

fn main() {
    let args = parse_cmdline();
    if let Err(e) = init_tracing(args.verbosity) {
        eprintln!("failed to set up logging: {e:#}");
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        error!(target: FATAL_TARGET, "{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive(format!("{FATAL_TARGET}=error").parse()?);
    // stdout carries the JSON records only.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
    Ok(())
}

fn run(args: CmdlineArgs) -> anyhow::Result<()> {
    if args.list {
        return write_policy_list();
    }

    let hazard = args
        .hazard
        .ok_or_else(|| PredictError::InvalidInput("no hazard type supplied".to_string()))?;
    let json = match args.base_json.as_deref() {
        None => {
            return Err(
                PredictError::InvalidInput("no base coordinate supplied".to_string()).into(),
            )
        }
        Some("-") => io::read_to_string(io::stdin())
            .context("failed to read the base coordinate from stdin")?,
        Some(json) => json.to_string(),
    };
    let base = input::parse_base(&json).context("failed to read the base coordinate")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        "{hazard}: generating {} prediction(s) from {base}",
        args.count
    );
    let policy = hazard.policy();
    let mut writer = BufWriter::new(io::stdout().lock());
    for n in 1..=args.count {
        let prediction = predict(base, policy, &mut rng)
            .with_context(|| format!("{hazard}: prediction {n} failed"))?;
        let line = serde_json::to_string(&prediction)
            .with_context(|| format!("{hazard}: failed to serialize prediction {n}"))?;
        writeln!(writer, "{line}")?;
    }
    writer.flush().context("failed to write predictions")?;

    Ok(())
}

fn write_policy_list() -> anyhow::Result<()> {
    let mut writer = BufWriter::new(io::stdout().lock());
    for hazard in Hazard::ALL {
        let policy = hazard.policy();
        writeln!(
            writer,
            "{:<22}{:<26}{:<10}{}",
            hazard.name(),
            policy.kind,
            policy.severity,
            policy.title
        )?;
    }
    writer.flush()?;
    Ok(())
}

struct CmdlineArgs {
    hazard: Option<Hazard>,
    base_json: Option<String>,
    seed: Option<u64>,
    count: u32,
    list: bool,
    verbosity: u8,
}

fn parse_cmdline() -> CmdlineArgs {
    let cmd = Command::new("predict_hazard")
        .version("0.1.0")
        .about("Generates a mock predicted hazard location near a base coordinate and prints it as JSON.")
        .arg(
            Arg::new("hazard")
                .value_name("HAZARD")
                .required_unless_present("list")
                .value_parser(|s: &str| s.parse::<Hazard>())
                .help("The hazard policy: coral, deforestation, deforestation-offset or plastic.")
        )
        .arg(
            Arg::new("base")
                .value_name("JSON")
                .help(r#"The base coordinate as {"lat": <number>, "lng": <number>}, or '-' to read it from stdin."#)
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("Seeds the random source so that output is reproducible.")
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .value_name("N")
                .default_value("1")
                .value_parser(value_parser!(u32).range(1..))
                .help("The number of predictions to generate, one JSON object per line.")
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Lists the available hazard policies and exits.")
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Increases log verbosity on stderr; repeat for more detail.")
        );

    let m = cmd.get_matches();
    CmdlineArgs {
        hazard: m.get_one::<Hazard>("hazard").copied(),
        base_json: m.get_one::<String>("base").cloned(),
        seed: m.get_one::<u64>("seed").copied(),
        count: m.get_one::<u32>("count").copied().unwrap_or(1),
        list: m.get_flag("list"),
        verbosity: m.get_count("verbose"),
    }
}
