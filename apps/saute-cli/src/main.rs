use clap::{Parser, Subcommand};
use saute_core::{MassUnit, Quantity, TemperatureUnit, UnitCategory, VolumeUnit};
use saute_graph::{FlowGraph, FlowResult, ProductSpec, TransformationRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saute-cli")]
#[command(about = "Saute CLI - unit-safe resource flow graphs", long_about = None)]
struct Cli {
    /// Log graph construction (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the bundled bread recipe and print its graph
    Demo,
    /// Convert a quantity to another unit of the same category
    Convert {
        /// Magnitude to convert
        #[arg(allow_negative_numbers = true)]
        magnitude: f64,
        /// Unit the magnitude is given in (e.g. grams)
        unit: String,
        /// Unit category (time, mass, volume, temperature, count)
        #[arg(value_parser = parse_category)]
        category: UnitCategory,
        /// Target unit
        target: String,
    },
    /// List registered units, per category
    Units,
}

fn parse_category(s: &str) -> Result<UnitCategory, String> {
    UnitCategory::from_name(s).ok_or_else(|| {
        let known: Vec<_> = UnitCategory::ALL.iter().map(|c| c.name()).collect();
        format!("unknown category '{}' (expected one of: {})", s, known.join(", "))
    })
}

fn main() -> FlowResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Demo => cmd_demo(),
        Commands::Convert {
            magnitude,
            unit,
            category,
            target,
        } => cmd_convert(magnitude, &unit, category, &target),
        Commands::Units => {
            cmd_units();
            Ok(())
        }
    }
}

fn cmd_demo() -> FlowResult<()> {
    let mut graph = FlowGraph::new();

    let flour = graph.add_material("flour", 500.0, "grams", UnitCategory::Mass)?;
    let water = graph.add_material("water", 300.0, "milliliters", UnitCategory::Volume)?;
    let salt = graph.add_material("salt", 10.0, "grams", UnitCategory::Mass)?;

    let mixing_bowl = graph.add_tool("mixing bowl");
    let whisk = graph.add_tool("whisk");
    let oven = graph.add_tool("oven");
    let baking_sheet = graph.add_tool("baking sheet");

    let mixed = graph.add_transformation(
        TransformationRequest::new(
            "mix ingredients",
            "Mix flour, water, and salt to form dough",
            5.0,
            "minutes",
        )
        .input(flour, Quantity::of(400.0, MassUnit::Grams)?)
        .input(water, Quantity::of(250.0, VolumeUnit::Milliliters)?)
        .input(salt, Quantity::of(5.0, MassUnit::Grams)?)
        .tool(mixing_bowl)
        .tool(whisk)
        .product(ProductSpec::named("dough").with_amount(500.0, "grams", UnitCategory::Mass)),
    )?;

    let preheated = graph.add_transformation(
        TransformationRequest::new("preheat oven", "Preheat oven to 400", 25.0, "minutes")
            .tool(oven)
            .product(ProductSpec::named("preheated oven").with_amount(
                400.0,
                "fahrenheit",
                UnitCategory::Temperature,
            )),
    )?;

    let baked = graph.add_transformation(
        TransformationRequest::new(
            "bake",
            "Place dough on baking sheet and bake in oven",
            30.0,
            "minutes",
        )
        .input(
            preheated.product,
            Quantity::of(400.0, TemperatureUnit::Fahrenheit)?,
        )
        .input(mixed.product, Quantity::of(500.0, MassUnit::Grams)?)
        .tool(baking_sheet)
        .product(ProductSpec::named("bread").with_amount(500.0, "grams", UnitCategory::Mass)),
    )?;

    graph.validate()?;

    println!("--- Graph ---");
    for line in graph.listing() {
        println!("  {}", line);
    }

    println!("\n--- Remaining ingredients ---");
    for id in &mixed.remaining {
        if let Some(m) = graph.material(*id) {
            println!("  {}", m);
        }
    }

    println!("\n--- Produced product ---");
    if let Some(bread) = graph.material(baked.product) {
        println!("  {}", bread);
    }

    println!("\n--- Topological generations ---");
    for (layer, nodes) in graph.topological_generations()?.iter().enumerate() {
        let names: Vec<_> = nodes
            .iter()
            .filter_map(|&n| graph.node(n).map(|node| node.name().to_string()))
            .collect();
        println!("  {}: {}", layer, names.join(", "));
    }

    Ok(())
}

fn cmd_convert(
    magnitude: f64,
    unit: &str,
    category: UnitCategory,
    target: &str,
) -> FlowResult<()> {
    let quantity = Quantity::new(magnitude, unit, category)?;
    let converted = quantity.convert_to(target)?;
    println!("{} = {}", quantity, converted);
    Ok(())
}

fn cmd_units() {
    for category in UnitCategory::ALL {
        let names: Vec<_> = category.units().iter().map(|u| u.name()).collect();
        println!(
            "{:<12} base={:<12} consumable={:<5} units: {}",
            category.name(),
            category.base_unit().name(),
            category.is_consumable(),
            names.join(", ")
        );
    }
}
