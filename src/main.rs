use anyhow::{bail, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};
use orderflow::{
    CsvSource, Dataset, EtlConfig, EtlPipeline, OutputFormat, ProductId, ProductTable, RestApi,
    SimilarityScorer, TypeCaster, WarehouseSink, WriteMode,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Orders/products ETL with product similarity
#[derive(Parser, Debug)]
#[command(name = "orderflow")]
#[command(about = "Denormalize orders onto products and score product similarity", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline and write the joined table
    Run(RunArgs),
    /// Serve similarity queries over the product table
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug)]
struct RunArgs {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Orders CSV
    #[arg(long)]
    orders: Option<PathBuf>,

    /// Products CSV
    #[arg(long)]
    products: Option<PathBuf>,

    /// Output table as dataset.table
    #[arg(long)]
    destination: Option<String>,

    /// Root directory of the local warehouse
    #[arg(long)]
    warehouse_dir: Option<PathBuf>,

    /// Write mode: fail, replace or append
    #[arg(long)]
    mode: Option<WriteMode>,

    /// Output format: csv or jsonl
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Product to score similar products against
    #[arg(long, requires = "candidates")]
    target: Option<ProductId>,

    /// Comma-separated candidate product ids
    #[arg(long, value_delimiter = ',', requires = "target")]
    candidates: Vec<ProductId>,
}

#[derive(ClapArgs, Debug)]
struct ServeArgs {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Products CSV
    #[arg(long)]
    products: Option<PathBuf>,

    /// HTTP API port
    #[arg(long)]
    http_port: Option<u16>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EtlConfig> {
    match path {
        Some(path) => EtlConfig::from_file(path),
        None => Ok(EtlConfig::default()),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(orders) = args.orders {
        config.orders_csv = orders;
    }
    if let Some(products) = args.products {
        config.products_csv = products;
    }
    if let Some(destination) = args.destination {
        config.destination = destination;
    }
    if let Some(dir) = args.warehouse_dir {
        config.warehouse_dir = dir;
    }
    if let Some(mode) = args.mode {
        config.write_mode = mode;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    config.validate()?;

    info!("Orders: {:?}", config.orders_csv);
    info!("Products: {:?}", config.products_csv);
    info!("Warehouse: {:?}", config.warehouse_dir);

    let sink = WarehouseSink::new(&config.warehouse_dir, config.format);
    let (output, summary) = EtlPipeline::new().run(&config, &sink)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(target) = args.target {
        let scorer = output.scorer(config.weights)?;
        let report = scorer.score(target, &args.candidates)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn load_products(config: &EtlConfig) -> anyhow::Result<ProductTable> {
    let raw = CsvSource::new().read(&config.products_csv, Dataset::Products)?;
    let products = TypeCaster::cast_products(&raw).context("malformed products input")?;
    Ok(ProductTable::new(products))
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(products) = args.products {
        config.products_csv = products;
    }
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    config.validate()?;

    let products = Arc::new(load_products(&config)?);
    let scorer = Arc::new(SimilarityScorer::with_weights(products, config.weights)?);
    info!("Products loaded: {}", scorer.products().len());

    let http_port = config.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async move { RestApi::start(scorer, http_port).await })
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    let server = tokio::task::spawn_blocking(move || http_handle.join());
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = server => {
            match joined? {
                Ok(Ok(())) => info!("HTTP server stopped"),
                Ok(Err(e)) => bail!("HTTP server error: {}", e),
                Err(_) => bail!("HTTP server thread panicked"),
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting orderflow v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Run(run_args) => run(run_args),
        Command::Serve(serve_args) => serve(serve_args).await,
    }
}
