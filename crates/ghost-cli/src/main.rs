use std::collections::BTreeMap;
use std::env;
use std::io;
use std::path::Path;

use contracts::{GhostType, QuestionId, TuningConfig, WordCategory};
use ghost_core::{
    assess_tuning, emf_level_with_breakpoints, generate_overlap_report, print_validation_report,
    select_contextual_word, should_ghost_respond, GhostRegistry,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn print_usage() {
    println!("ghost-cli <command>");
    println!("commands:");
    println!("  validate");
    println!("    prints the deduction overlap report; exits 1 when the registry is unbalanced");
    println!("  report");
    println!("  profile <ghost>");
    println!("  ask <ghost> <question> [seed]");
    println!("  emf <distance_m>");
    println!("  lock <ghost> <knob_a> <knob_b>");
    println!("  sample <ghost> <question> [draws] [seed]");
    println!("ghosts: wraith shade poltergeist banshee phantom onyx trickster");
    println!("questions: q1 (intent) q2 (location) q3 (confirmation)");
    println!("env: GHOST_TUNING_PATH=<json> overrides tuning defaults");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ghost_core=info,ghost_cli=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn load_tuning() -> Result<TuningConfig, String> {
    let Some(path) = env::var("GHOST_TUNING_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        return Ok(TuningConfig::default());
    };

    let raw = std::fs::read_to_string(Path::new(&path))
        .map_err(|err| format!("failed to read tuning config {path}: {err}"))?;
    let tuning: TuningConfig = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid tuning config {path}: {err}"))?;
    tuning.validate()?;
    debug!(%path, "loaded tuning config");
    Ok(tuning)
}

fn parse_ghost(value: Option<&String>) -> Result<GhostType, String> {
    let raw = value.ok_or_else(|| "missing ghost".to_string())?;
    raw.parse::<GhostType>().map_err(|err| err.to_string())
}

fn parse_question(value: Option<&String>) -> Result<QuestionId, String> {
    let raw = value.ok_or_else(|| "missing question".to_string())?;
    raw.parse::<QuestionId>().map_err(|err| err.to_string())
}

fn parse_f64(value: Option<&String>, label: &str) -> Result<f64, String> {
    let raw = value.ok_or_else(|| format!("missing {label}"))?;
    raw.parse::<f64>()
        .map_err(|_| format!("invalid {label}: {raw}"))
}

fn parse_u64_or(value: Option<&String>, label: &str, default: u64) -> Result<u64, String> {
    value
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|_| format!("invalid {label}: {raw}"))
        })
        .transpose()
        .map(|parsed| parsed.unwrap_or(default))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode json: {err}"))
}

fn run_ask(registry: &GhostRegistry, tuning: &TuningConfig, args: &[String]) -> Result<(), String> {
    let ghost = parse_ghost(args.get(2))?;
    let question = parse_question(args.get(3))?;
    let seed = parse_u64_or(args.get(4), "seed", tuning.seed)?;
    let mut rng = StdRng::seed_from_u64(seed);

    println!("{} {}", question, question.prompt());
    if !should_ghost_respond(registry, ghost, &mut rng).map_err(|err| err.to_string())? {
        println!("... static ...");
        return Ok(());
    }
    let selected =
        select_contextual_word(registry, ghost, question, &mut rng).map_err(|err| err.to_string())?;
    println!("{} ({})", selected.word.to_uppercase(), selected.category);
    Ok(())
}

fn run_lock(registry: &GhostRegistry, tuning: &TuningConfig, args: &[String]) -> Result<(), String> {
    let ghost = parse_ghost(args.get(2))?;
    let knob_a = parse_f64(args.get(3), "knob_a")?;
    let knob_b = parse_f64(args.get(4), "knob_b")?;
    let profile = registry.profile(ghost).map_err(|err| err.to_string())?;
    tuning.check_close_band(profile.spirit_box.tolerance)?;

    let assessment = assess_tuning(
        contracts::KnobPositions::clamped(knob_a, knob_b),
        &profile.spirit_box,
        tuning.lock_close_tolerance,
    );
    println!("{}", to_json(&assessment)?);
    Ok(())
}

fn run_sample(registry: &GhostRegistry, tuning: &TuningConfig, args: &[String]) -> Result<(), String> {
    let ghost = parse_ghost(args.get(2))?;
    let question = parse_question(args.get(3))?;
    let draws = parse_u64_or(args.get(4), "draws", 1000)?.max(1);
    let seed = parse_u64_or(args.get(5), "seed", tuning.seed)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut categories = BTreeMap::<WordCategory, u64>::new();
    let mut responses = 0_u64;
    for _ in 0..draws {
        if should_ghost_respond(registry, ghost, &mut rng).map_err(|err| err.to_string())? {
            responses += 1;
        }
        let selected = select_contextual_word(registry, ghost, question, &mut rng)
            .map_err(|err| err.to_string())?;
        *categories.entry(selected.category).or_insert(0) += 1;
    }

    let percent = |count: u64| count as f64 * 100.0 / draws as f64;
    println!("ghost={ghost} question={question} draws={draws} seed={seed}");
    println!("  responded   {:>6.2}%", percent(responses));
    for category in WordCategory::ALL {
        let count = categories.get(&category).copied().unwrap_or(0);
        println!("  {:<11} {:>6.2}%", category.as_str(), percent(count));
    }
    Ok(())
}

fn run(command: Option<&str>, args: &[String]) -> Result<i32, String> {
    let tuning = load_tuning()?;
    let registry = GhostRegistry::standard();

    match command {
        Some("validate") => {
            let stdout = io::stdout();
            let outcome = print_validation_report(&registry, &mut stdout.lock())
                .map_err(|err| format!("failed to write report: {err}"))?;
            Ok(if outcome.valid { 0 } else { 1 })
        }
        Some("report") => {
            println!("{}", to_json(&generate_overlap_report(&registry))?);
            Ok(0)
        }
        Some("profile") => {
            let ghost = parse_ghost(args.get(2))?;
            let profile = registry.profile(ghost).map_err(|err| err.to_string())?;
            println!("{}", to_json(profile)?);
            Ok(0)
        }
        Some("ask") => run_ask(&registry, &tuning, args).map(|_| 0),
        Some("emf") => {
            let distance = parse_f64(args.get(2), "distance_m")?;
            let level = emf_level_with_breakpoints(distance, &tuning.emf_breakpoints_m);
            println!("distance={distance}m level={level}");
            Ok(0)
        }
        Some("lock") => run_lock(&registry, &tuning, args).map(|_| 0),
        Some("sample") => run_sample(&registry, &tuning, args).map(|_| 0),
        _ => {
            print_usage();
            Ok(0)
        }
    }
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match run(command, &args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            print_usage();
            std::process::exit(2);
        }
    }
}
