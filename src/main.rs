use log::{LevelFilter, debug};
use planner_stats::analytics::aggregate;
use planner_stats::api::{InputPaths, load_snapshot};
use planner_stats::cli::Args;
use planner_stats::config::AggregationConfig;
use planner_stats::date_provider::DateProvider;
use planner_stats::error::Result;
use planner_stats::report::render;

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AggregationConfig::load_from(path)?,
        None => AggregationConfig::default(),
    };
    if let Some(days) = args.window_days {
        config = config.with_due_soon_days(days);
    }

    let now = args.date_provider()?.get_current_time();
    debug!("Aggregating snapshot as of {}", now.to_rfc3339());

    let input = load_snapshot(&InputPaths {
        tasks: args.tasks.as_deref(),
        sessions: args.sessions.as_deref(),
        reminders: args.reminders.as_deref(),
        timetable: args.timetable.as_deref(),
    })?;
    let snapshot = aggregate(&input, &now, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        if args.no_color {
            colored::control::set_override(false);
        }
        print!("{}", render(&snapshot, &now, &config, !args.no_color));
    }
    Ok(())
}

fn main() {
    let args = Args::parse_args();

    let default_level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
