use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use knapsack_ga::batch::run_batch;
use knapsack_ga::demo_data::random_problem;
use knapsack_ga::interactive::{choose_problem_file, FileDirStore};
use knapsack_ga::loader::ProblemLoader;
use knapsack_ga::printing::{history_table, run_summary, selected_items};
use knapsack_ga::prompt::{ask_parsed, ask_yes_no, resolve_capacity, Prompt, StdinPrompt};
use knapsack_ga::visualization::plot_history;
use knapsack_ga::{solve, History, KnapsackConfig, KnapsackProblem, LoadError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Solves 0/1 knapsack problems with a genetic algorithm.
///
/// Without --input or --demo an interactive session is started.
#[derive(Parser, Debug)]
#[command(name = "knapsack-ga")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the problem definition
    #[arg(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Solve a random instance with this many items
    #[arg(long, value_name = "ITEMS")]
    demo: Option<usize>,

    /// Capacity to use when the JSON file has none
    #[arg(short, long)]
    capacity: Option<u64>,

    /// JSON file with engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pick population size, generations and mutation rate from the problem size
    #[arg(long)]
    auto: bool,

    /// Record and print the per-generation history
    #[arg(long)]
    show: bool,

    /// Population size
    #[arg(long)]
    pop_size: Option<usize>,

    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,

    /// Mutation rate per gene
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Crossover probability
    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Tournament size
    #[arg(long)]
    tournament_size: Option<usize>,

    /// Do not carry the best individual into the next generation
    #[arg(long)]
    no_elitism: bool,

    /// Time budget in seconds
    #[arg(long)]
    max_time: Option<f64>,

    /// Run without a time budget
    #[arg(long, conflicts_with = "max_time")]
    no_time_limit: bool,

    /// Stop once the best value is unchanged for this many generations (0 = run all generations)
    #[arg(long)]
    stable_limit: Option<u32>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Write the history as CSV (defaults to history_<timestamp>.csv)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    history_csv: Option<Option<PathBuf>>,

    /// Draw best and average fitness per generation into a PNG
    #[arg(long, value_name = "PATH")]
    plot: Option<PathBuf>,

    /// Run this many independently seeded runs in parallel and report statistics
    #[arg(long, value_name = "RUNS", conflicts_with_all = ["show", "history_csv", "plot"])]
    repeat: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn cli_defaults() -> KnapsackConfig {
    KnapsackConfig {
        population_size: 80,
        generations: 150,
        mutation_rate: 0.02,
        max_time: Some(5.0),
        stable_limit: Some(15),
        ..Default::default()
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn build_config(cli: &Cli, item_count: usize) -> Result<KnapsackConfig> {
    let mut config = match &cli.config {
        Some(path) => KnapsackConfig::from_json_file(path)?,
        None => cli_defaults(),
    };

    if cli.auto {
        config.apply_auto(item_count);
        println!(
            "Auto-selected parameters: pop_size={}, generations={}, mutation_rate={:.3}",
            config.population_size, config.generations, config.mutation_rate
        );
    }

    if let Some(population_size) = cli.pop_size {
        config.population_size = population_size;
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }
    if let Some(mutation_rate) = cli.mutation_rate {
        config.mutation_rate = mutation_rate;
    }
    if let Some(crossover_rate) = cli.crossover_rate {
        config.crossover_rate = crossover_rate;
    }
    if let Some(tournament_size) = cli.tournament_size {
        config.tournament_size = tournament_size;
    }
    if cli.no_elitism {
        config.elitism = false;
    }
    if cli.max_time.is_some() {
        config.max_time = cli.max_time;
    }
    if cli.no_time_limit {
        config.max_time = None;
    }
    if let Some(stable_limit) = cli.stable_limit {
        config.stable_limit = Some(stable_limit);
    }

    config.record_history =
        config.record_history || cli.show || cli.history_csv.is_some() || cli.plot.is_some();
    config.validate()?;
    Ok(config)
}

fn load_problem(cli: &Cli, loader: &mut ProblemLoader) -> Result<KnapsackProblem> {
    if let Some(count) = cli.demo {
        let mut rng = rng_from(cli.seed);
        return Ok(random_problem(count, &mut rng));
    }

    let Some(path) = &cli.input else {
        bail!("no input given");
    };
    if !path.exists() {
        bail!("input file not found: {}", path.display());
    }

    let file = loader
        .load(path)
        .with_context(|| format!("cannot load {}", path.display()))?;

    let mut stdin_prompt = StdinPrompt;
    let prompt = io::stdin()
        .is_terminal()
        .then_some(&mut stdin_prompt as &mut dyn Prompt);
    let capacity = resolve_capacity(file.capacity, cli.capacity, prompt)?;

    Ok(file.into_problem(capacity))
}

fn describe_stopping(config: &KnapsackConfig) {
    match config.max_time {
        Some(max_time) => println!("Time budget: {} seconds", max_time),
        None => println!("Time budget: none"),
    }
    match config.stable_limit.filter(|&limit| limit > 0) {
        Some(limit) => println!(
            "Criterion: stop once the same best value is seen {} generations in a row",
            limit
        ),
        None => println!("Criterion: run {} generations", config.generations),
    }
}

fn export_history(cli: &Cli, history: &History) -> Result<()> {
    if let Some(target) = &cli.history_csv {
        let path = target.clone().unwrap_or_else(|| {
            let date_str = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
            PathBuf::from(format!("history_{}.csv", date_str))
        });
        history
            .write_csv(&path)
            .map_err(|err| anyhow::anyhow!("cannot write {}: {}", path.display(), err))?;
        println!("History written to {}", path.display());
    }

    if let Some(path) = &cli.plot {
        plot_history(history, path)
            .map_err(|err| anyhow::anyhow!("cannot draw {}: {}", path.display(), err))?;
        println!("Chart saved to {}", path.display());
    }

    Ok(())
}

fn run_single(cli: &Cli, problem: &KnapsackProblem, config: &KnapsackConfig) -> Result<()> {
    describe_stopping(config);

    let mut rng = rng_from(cli.seed);
    let outcome = solve(problem, config, &mut rng)?;

    println!();
    println!("{}", run_summary(&outcome, problem));
    println!();
    println!("{}", selected_items(&outcome.best, problem));

    if let Some(history) = &outcome.history {
        if cli.show {
            println!();
            println!("{}", "Per-generation history:".bold());
            println!("{}", history_table(history));
        }
        export_history(cli, history)?;
    }

    Ok(())
}

fn run_repeated(
    cli: &Cli,
    problem: &KnapsackProblem,
    config: &KnapsackConfig,
    runs: usize,
) -> Result<()> {
    describe_stopping(config);

    let base_seed = cli.seed.unwrap_or_else(rand::random);
    let summary = run_batch(problem, config, runs, base_seed)?;

    println!();
    for run in &summary.runs {
        println!(
            "Run {:>3} (seed {}): value={}, weight={}, generations={}, {:.4} s, {}",
            run.run, run.seed, run.total_value, run.total_weight, run.generations, run.runtime, run.reason
        );
    }
    println!();
    println!("{} {}", "Best value:".bold(), summary.best_value.to_string().green());
    println!(
        "Value: mean {:.2}, variance {:.2}",
        summary.mean_value, summary.var_value
    );
    println!(
        "Generations: mean {:.2}, variance {:.2}",
        summary.mean_generations, summary.var_generations
    );
    println!(
        "Runtime: mean {:.4} s, variance {:.6}",
        summary.mean_runtime, summary.var_runtime
    );

    Ok(())
}

fn interactive(loader: &mut ProblemLoader) -> Result<()> {
    let mut prompt = StdinPrompt;
    let dir = std::env::current_dir().context("cannot read the working directory")?;
    let mut store = FileDirStore::new(&dir);

    println!("{}", "Knapsack GA - interactive".bold());
    println!("-------------------------");

    loop {
        let path = choose_problem_file(&mut prompt, &dir, &mut store)?;
        let Some(path) = path.filter(|path| path.exists()) else {
            println!("File not found.");
            if ask_yes_no(&mut prompt, "Try again?", true)? {
                continue;
            }
            break;
        };

        if let Err(err) = interactive_run(&mut prompt, loader, &path) {
            println!("{} {:#}", "Error:".red().bold(), err);
        }

        if !ask_yes_no(&mut prompt, "Continue with another file?", true)? {
            break;
        }
    }

    println!("Bye.");
    Ok(())
}

fn interactive_run(prompt: &mut dyn Prompt, loader: &mut ProblemLoader, path: &Path) -> Result<()> {
    let file = loader.load(path)?;
    let capacity = resolve_capacity(file.capacity, None, Some(&mut *prompt))?;
    let problem = file.into_problem(capacity);

    let mut config = cli_defaults();
    config.record_history = true;

    if ask_yes_no(prompt, "Select parameters automatically?", true)? {
        config.apply_auto(problem.len());
        println!(
            "Auto-selected parameters: pop_size={}, generations={}, mutation_rate={:.3}",
            config.population_size, config.generations, config.mutation_rate
        );
    } else {
        config.population_size = ask_parsed(prompt, "Population size", 80)?;
        config.generations = ask_parsed(prompt, "Generations", 150)?;
        config.mutation_rate = ask_parsed(prompt, "Mutation rate (e.g. 0.02)", 0.05)?;
    }

    println!();
    describe_stopping(&config);
    println!("Running...");

    let outcome = solve(&problem, &config, &mut StdRng::from_entropy())?;

    println!();
    println!("{}", run_summary(&outcome, &problem));
    println!();
    println!("{}", selected_items(&outcome.best, &problem));

    if let Some(history) = &outcome.history {
        if ask_yes_no(prompt, "Show per-generation history?", false)? {
            println!("{}", history_table(history));
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut loader = ProblemLoader::default();

    if cli.input.is_none() && cli.demo.is_none() {
        return match interactive(&mut loader) {
            Err(err)
                if err
                    .downcast_ref::<io::Error>()
                    .is_some_and(|err| err.kind() == io::ErrorKind::UnexpectedEof) =>
            {
                println!();
                println!("Input closed. Bye.");
                Ok(())
            }
            result => result,
        };
    }

    let problem = match load_problem(&cli, &mut loader) {
        Err(err) if matches!(err.downcast_ref::<LoadError>(), Some(LoadError::Cancelled)) => {
            println!("Cancelled.");
            return Ok(());
        }
        result => result?,
    };

    let config = build_config(&cli, problem.len())?;

    match cli.repeat {
        Some(runs) if runs > 1 => run_repeated(&cli, &problem, &config, runs),
        _ => run_single(&cli, &problem, &config),
    }
}
