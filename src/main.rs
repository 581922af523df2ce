use clap::Parser;
use dotsasa::{
    get_sasa, load_model, log_pdb_warnings, run_with_threads, sum_sasa, write_df, Error,
    NeighborSearch, OutputFormat, SasaLevel, SasaSettings, StructureFilter,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, Level};

/// Calculate the solvent accessible surface area of a structure
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = dotsasa::WATER_PROBE_RADIUS)]
    probe_radius: f64,

    /// Number of points on the sphere for sampling
    #[arg(short = 'n', long = "num-points", default_value_t = dotsasa::DEFAULT_SPHERE_POINTS)]
    n_points: usize,

    /// Aggregation level of the reported areas
    #[arg(short = 'l', long, default_value_t = SasaLevel::Atom)]
    level: SasaLevel,

    /// Output format written to stdout
    #[arg(short = 'f', long = "format", default_value_t = OutputFormat::Table)]
    output_format: OutputFormat,

    /// Model number to analyze (default: 0, the first model)
    #[arg(short = 'm', long = "model", default_value_t = 0)]
    model_num: usize,

    /// Strategy for finding neighboring atoms
    #[arg(long, default_value_t = NeighborSearch::BruteForce)]
    neighbor_search: NeighborSearch,

    /// Keep hydrogen atoms
    #[arg(long)]
    hydrogens: bool,

    /// Keep water molecules
    #[arg(long)]
    water: bool,

    /// Number of threads to use for parallel processing (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 0)]
    num_threads: usize,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), Error> {
    trace!("{args:?}");

    // Make sure `input` exists
    let input_path = Path::new(&args.input).canonicalize()?;
    let input_file = input_path.to_string_lossy();
    debug!("Using input file {input_file}");

    // Load file as complex structure
    let (pdb, pdb_warnings) = load_model(&input_file)?;
    log_pdb_warnings(&pdb_warnings);

    let settings = SasaSettings::default()
        .with_probe_radius(args.probe_radius)
        .with_n_points(args.n_points)
        .with_neighbor_search(args.neighbor_search);
    let filter = StructureFilter {
        model_num: args.model_num,
        include_hydrogens: args.hydrogens,
        include_water: args.water,
    };

    let mut df_sasa = run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        get_sasa(&pdb, args.level, &settings, &filter)
    })??;

    info!(
        "Total accessible surface area over {} {} row(s): {:.1} Å²",
        df_sasa.height(),
        args.level,
        sum_sasa(&df_sasa)?
    );

    write_df(&mut df_sasa, args.output_format, std::io::stdout().lock())
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
