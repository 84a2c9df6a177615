use std::path::PathBuf;

use cashcast::data::{DataDirectory, load_plan};
use cashcast::util::format::format_currency;
use cashcast::{init_logging, report};
use cashcast_core::analysis::{compare_scenarios, expense_breakdown, moving_average, runway};
use cashcast_core::query::{DEFAULT_MILESTONES, milestone_table, min_n_balances};
use cashcast_core::{Cast, CastSnapshot, Prop};
use clap::{Args, Parser, Subcommand};
use jiff::civil::Date;

#[derive(Parser, Debug)]
#[command(name = "cashcast")]
#[command(about = "Day-by-day cash balance forecasting")]
struct Cli {
    /// Path to the data directory (default: ~/.cashcast/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Date that milestone and runway figures count from (default: today)
    #[arg(long)]
    today: Option<Date>,

    /// How many of the lowest balances to list
    #[arg(long, default_value_t = 5)]
    worst: usize,

    /// Also print the trailing average daily change over this many days
    #[arg(long, value_name = "DAYS")]
    average: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forecast a YAML plan and print the full report
    Run {
        plan: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        /// Alternative APR to compare every scenario at (repeatable)
        #[arg(long = "apr", value_name = "RATE")]
        aprs: Vec<f64>,
    },
    /// Expand a plan and store it as a named snapshot
    Save {
        plan: PathBuf,
        name: String,

        /// Store the events of every prop along with the base plan
        #[arg(long)]
        with_props: bool,
    },
    /// Forecast a stored snapshot, by name or by path
    Load {
        snapshot: String,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// List stored snapshots
    List,
}

fn print_report(
    cast: &Cast,
    props: &[Prop],
    milestones: &[f64],
    aprs: &[f64],
    args: &ReportArgs,
) {
    let today = args.today.unwrap_or_else(|| jiff::Zoned::now().date());
    let series = cast.running_balance();

    println!("{}", report::summary(cast, &series));
    println!("{}", report::milestones(&milestone_table(cast, milestones, today)));
    println!("{}", report::runway(&runway(cast, props, today)));
    println!("{}", report::worst_balances(&min_n_balances(&series, args.worst)));
    println!("{}", report::scenarios(&compare_scenarios(cast, props, aprs)));
    print!("{}", report::expenses(&expense_breakdown(cast.events())));

    if let Some(days) = args.average
        && let Some((date, avg)) = moving_average(&cast.daily_changes(), days).last()
    {
        println!();
        println!("Average daily change over {days} days to {date}: {}", format_currency(*avg));
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let data_dir = DataDirectory::new(cli.data_dir.unwrap_or_else(DataDirectory::default_path));

    init_logging(data_dir.root(), &cli.log_level)?;

    match cli.command {
        Command::Run { plan, report, aprs } => {
            let plan = load_plan(&plan)?;
            let (cast, props) = plan.build()?;
            print_report(&cast, &props, plan.milestones(), &aprs, &report);
        }
        Command::Save {
            plan,
            name,
            with_props,
        } => {
            let (mut cast, props) = load_plan(&plan)?.build()?;
            let snapshot = if with_props {
                cast.with_props(&props);
                CastSnapshot::from_cast(&cast)
            } else {
                CastSnapshot::from_cast_base(&cast)
            };
            let path = data_dir.save(&name, &snapshot)?;
            println!("Saved {} events to {}", snapshot.events.len(), path.display());
        }
        Command::Load { snapshot, report } => {
            let cast = data_dir.load(&snapshot)?.into_cast()?;
            print_report(&cast, &[], &DEFAULT_MILESTONES, &[], &report);
        }
        Command::List => {
            for name in data_dir.list()? {
                println!("{name}");
            }
        }
    }

    tracing::info!("done");
    Ok(())
}
