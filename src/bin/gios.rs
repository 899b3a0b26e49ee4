use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gios_rs::api::DEFAULT_BASE_URL;
use gios_rs::filter::{self, Report};
use gios_rs::models::{SensorList, StationList};
use gios_rs::{Client, Error, Window};
use gios_rs::{storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gios",
    version,
    about = "Browse GIOŚ air-quality stations and chart recent sensor readings"
)]
struct Cli {
    /// API root URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all stations, sorted by name.
    Stations,
    /// List the sensors (measured parameters) of a station.
    Sensors {
        /// Station id (see `gios stations`).
        #[arg(short, long)]
        station: u32,
    },
    /// Fetch a parameter's readings inside a date window (and optionally plot/save them).
    Data(DataArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Station id.
    #[arg(short, long)]
    station: u32,
    /// Parameter name or code (e.g., PM10), case-insensitive.
    #[arg(short, long)]
    param: String,
    /// Window start, "DD-MM-YYYY HH:MM".
    #[arg(long)]
    from: String,
    /// Window end, "DD-MM-YYYY HH:MM".
    #[arg(long)]
    to: String,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the plot (default 200).
    #[arg(long, default_value_t = 200)]
    height: u32,
    /// Save the report lines to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::new(cli.base_url);
    match cli.cmd {
        Command::Stations => cmd_stations(&client),
        Command::Sensors { station } => cmd_sensors(&client, station),
        Command::Data(args) => cmd_data(&client, args),
    }
}

fn cmd_stations(client: &Client) -> Result<()> {
    let stations = StationList::from_stations(client.fetch_stations()?);
    for s in stations.iter() {
        println!("{}\t{}", s.id, s.station_name);
    }
    Ok(())
}

fn cmd_sensors(client: &Client, station: u32) -> Result<()> {
    for s in client.fetch_sensors(station)? {
        match s.param.param_code.as_deref() {
            Some(code) => println!("{}\t{}\t{}", s.id, code, s.param.param_name),
            None => println!("{}\t\t{}", s.id, s.param.param_name),
        }
    }
    Ok(())
}

fn cmd_data(client: &Client, args: DataArgs) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    let window = Window::from_input(&args.from, &args.to, now)?;

    let sensors = SensorList::new(client.fetch_sensors(args.station)?);
    let (_, sensor) = sensors.find_param(&args.param).ok_or_else(|| {
        anyhow::anyhow!(
            "station {} has no parameter {:?} (available: {})",
            args.station,
            args.param,
            sensors.param_names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let values = client
        .fetch_data(sensor.id)?
        .values
        .ok_or(Error::MissingValues)?;
    let selection = filter::select_in_range(&values, &window)?;

    print!(
        "{}",
        Report {
            parameter: &sensor.param.param_name,
            lines: &selection.lines,
        }
    );

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&selection.lines, path)?,
            "json" => storage::save_json(&selection.lines, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", selection.matched(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        if selection.series.is_empty() {
            eprintln!("No numeric readings in the window; chart not written");
        } else {
            viz::save_chart(&selection.series, plot_path, args.width, args.height)
                .with_context(|| format!("write chart {}", plot_path.display()))?;
            eprintln!("Wrote plot to {}", plot_path.display());
        }
    }

    Ok(())
}
