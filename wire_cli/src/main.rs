//! # Wiresize CLI
//!
//! Command line front end for `wire_core`.
//!
//! ```text
//! wiresize size --standard NEC --current 20 --length 100 --voltage 120
//! wiresize size --input request.json --config wiresize.toml --json
//! wiresize convert --from NEC --to IEC --length 100 --size 12
//! wiresize standards
//! ```
//!
//! Reports go to stdout, logs to stderr. `RUST_LOG` takes precedence over
//! `--log-level`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wire_core::conversion::{
    default_installation_method, nominal_voltages, switch_standard, CircuitSelection, StandardSwitch,
};
use wire_core::installation::{DcMethod, NecMethod, ReferenceMethod};
use wire_core::sizing::dc::{DcApplication, DcLoadType};
use wire_core::standards::{ConductorMaterial, Standard, VoltageSystem};
use wire_core::{load_settings, CalcError, CalcResult, CalculationInput, CalculationResult, Router, SizingSettings};

#[derive(Debug, Parser)]
#[command(name = "wiresize", version, about = "Conductor sizing for NEC, IEC 60364, BS 7671 and DC circuits")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Size a conductor from a JSON request file or from flags
    Size(SizeArgs),
    /// Carry a circuit selection over to another standard
    Convert(ConvertArgs),
    /// List standards, installation methods and nominal voltages
    Standards {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct SizeArgs {
    /// JSON request file; flags given alongside override its fields
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Settings file (TOML) overriding the voltage-drop limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Standard identifier (NEC, IEC, BS7671, DC)
    #[arg(long, required_unless_present = "input")]
    standard: Option<String>,

    /// Load current (A)
    #[arg(long, required_unless_present = "input")]
    current: Option<f64>,

    /// One-way length (ft for NEC/DC, m for IEC/BS 7671)
    #[arg(long, required_unless_present = "input")]
    length: Option<f64>,

    /// Supply voltage (V)
    #[arg(long, required_unless_present = "input")]
    voltage: Option<f64>,

    /// single_phase, three_phase or dc
    #[arg(long)]
    system: Option<String>,

    /// Installation method code
    #[arg(long)]
    method: Option<String>,

    /// copper or aluminum
    #[arg(long)]
    material: Option<String>,

    /// Ambient temperature (°C)
    #[arg(long)]
    ambient: Option<f64>,

    /// Current-carrying conductors grouped together
    #[arg(long)]
    count: Option<u32>,

    /// AC power factor
    #[arg(long)]
    power_factor: Option<f64>,

    /// Grouping factor replacing the tabulated one
    #[arg(long)]
    grouping: Option<f64>,

    /// Soil thermal resistivity (K·m/W)
    #[arg(long)]
    soil: Option<f64>,

    /// Insulation temperature rating (°C)
    #[arg(long)]
    rating: Option<u16>,

    /// Skip the NEC 125 % continuous-load multiplier
    #[arg(long)]
    no_continuous: bool,

    /// DC voltage tag (12V, 24V, 48V, ...)
    #[arg(long)]
    dc_voltage: Option<String>,

    /// DC application (automotive, marine, solar, telecom)
    #[arg(long)]
    application: Option<String>,

    /// DC load type (general, critical, non_critical)
    #[arg(long)]
    load_type: Option<String>,

    /// Voltage-drop limit (%) replacing the DC application limit
    #[arg(long)]
    vd_limit: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl SizeArgs {
    fn to_input(&self) -> CalcResult<CalculationInput> {
        let mut input = match &self.input {
            Some(path) => read_request(path)?,
            None => CalculationInput::default(),
        };

        if let Some(standard) = &self.standard {
            input.standard = standard.clone();
        }
        if let Some(current) = self.current {
            input.current = current;
        }
        if let Some(length) = self.length {
            input.length = length;
        }
        if let Some(voltage) = self.voltage {
            input.voltage = voltage;
        }
        if self.no_continuous {
            input.include_continuous_multiplier = Some(false);
        }

        overlay(&mut input.voltage_system, &self.system);
        overlay(&mut input.installation_method, &self.method);
        overlay(&mut input.conductor_material, &self.material);
        overlay(&mut input.ambient_temperature, &self.ambient);
        overlay(&mut input.conductor_count, &self.count);
        overlay(&mut input.power_factor, &self.power_factor);
        overlay(&mut input.grouping_factor_override, &self.grouping);
        overlay(&mut input.soil_thermal_resistivity, &self.soil);
        overlay(&mut input.temperature_rating, &self.rating);
        overlay(&mut input.dc_voltage_system, &self.dc_voltage);
        overlay(&mut input.application_type, &self.application);
        overlay(&mut input.load_type, &self.load_type);
        overlay(&mut input.custom_voltage_drop_limit, &self.vd_limit);

        Ok(input)
    }
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Standard the selection was made under
    #[arg(long)]
    from: String,

    /// Standard to switch to
    #[arg(long)]
    to: String,

    /// One-way length in the source standard's unit
    #[arg(long)]
    length: f64,

    /// Supply voltage (V); defaults to the source standard's default
    #[arg(long)]
    voltage: Option<f64>,

    /// Installation method code; defaults to the source standard's default
    #[arg(long)]
    method: Option<String>,

    /// Selected conductor size label
    #[arg(long)]
    size: Option<String>,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn overlay<T: Clone>(field: &mut Option<T>, flag: &Option<T>) {
    if flag.is_some() {
        field.clone_from(flag);
    }
}

fn read_request(path: &Path) -> CalcResult<CalculationInput> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let input = serde_json::from_str(&text)?;
    debug!(path = %path.display(), "loaded sizing request");
    Ok(input)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CalcResult<()> {
    match command {
        Commands::Size(args) => {
            let settings = match &args.config {
                Some(path) => load_settings(path)?,
                None => SizingSettings::default(),
            };
            let input = args.to_input()?;
            info!(standard = %input.standard, current = input.current, "sizing conductor");
            let result = Router::new(settings).size(&input)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&input, &result);
            }
        }
        Commands::Convert(args) => {
            let from: Standard = args.from.parse()?;
            let to: Standard = args.to.parse()?;
            let mut selection = CircuitSelection::defaults_for(from, args.length);
            if let Some(voltage) = args.voltage {
                selection.voltage = voltage;
            }
            if let Some(method) = args.method {
                selection.installation_method = method;
            }
            selection.conductor_size = args.size;

            let switched = switch_standard(&selection, to);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&switched)?);
            } else {
                print_switch(&selection, &switched);
            }
        }
        Commands::Standards { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&standards_listing())?);
            } else {
                print_standards();
            }
        }
    }
    Ok(())
}

// ============================================================================
// Reports
// ============================================================================

fn print_result(input: &CalculationInput, result: &CalculationResult) {
    let meta = &result.metadata;
    let unit = meta.standard.length_unit().symbol();
    let factors = &result.correction_factors;

    println!("═══════════════════════════════════════");
    println!("  CONDUCTOR SIZING - {}", meta.standard.display_name());
    println!("═══════════════════════════════════════");
    println!();
    println!("Circuit:");
    println!("  Load:     {:.1} A ({:.1} A design)", input.current, result.design_current);
    println!("  Length:   {:.1} {} one-way", input.length, unit);
    println!("  Supply:   {:.0} V {}", input.voltage, meta.voltage_system);
    println!("  Method:   {}", meta.installation_method);
    println!(
        "  Material: {} ({} °C insulation, {:.0} °C ambient, {} conductors)",
        meta.conductor_material, meta.temperature_rating, meta.ambient_temperature, meta.conductor_count
    );
    println!();
    println!("Correction Factors:");
    println!("  Temperature:  {:.3}", factors.temperature);
    println!("  Grouping:     {:.3}", factors.grouping);
    println!("  Installation: {:.3}", factors.installation);
    println!("  Soil:         {:.3}", factors.thermal_resistivity);
    println!("  Combined:     {:.3}", result.combined_factor);
    println!();
    println!("Selection: {}", result.designation());
    println!(
        "  Ampacity:     {:.1} A derated ({:.0} A tabulated, {:.1} A required) {}",
        result.current_capacity,
        result.base_ampacity,
        result.required_ampacity,
        status_icon(result.compliance.current)
    );
    println!(
        "  Voltage drop: {:.2}% ({:.2} V, limit {:.1}%) {}",
        result.voltage_drop_percent,
        result.voltage_drop_volts,
        meta.voltage_drop_limit_percent,
        status_icon(result.compliance.voltage_drop)
    );
    println!(
        "  Temperature:  {:.0} °C within table {}",
        meta.ambient_temperature,
        status_icon(result.compliance.temperature)
    );
    println!("  Power loss:   {:.1} W ({:.2}% efficiency)", result.power_loss_w, result.efficiency_percent);

    if let Some(dc) = &result.dc_analysis {
        println!();
        println!("DC Analysis:");
        println!("  Application: {} ({} load)", dc.application.display_name(), dc.load_type.code());
        println!(
            "  Tag:         {} ({:.1} V at the load)",
            dc.voltage_system.label(),
            dc.effective_voltage
        );
        if let Some(target) = dc.efficiency_target_percent {
            println!(
                "  Efficiency:  target {:.1}% {}",
                target,
                status_icon(dc.meets_efficiency_target)
            );
        }
    }

    if !result.alternatives.is_empty() {
        println!();
        println!("Alternatives:");
        for alt in &result.alternatives {
            println!(
                "  {:>6} {:<4} {:>7.1} A {:>6.2}%  x{:.2} {}",
                alt.size,
                alt.size_unit.symbol(),
                alt.current_capacity,
                alt.voltage_drop_percent,
                alt.relative_cost,
                status_icon(alt.compliant)
            );
        }
    }

    print_list("Assumptions:", &meta.assumptions);
    print_list("Warnings:", &meta.warnings);

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} {}",
        result.designation(),
        if result.is_compliant() { "PASS" } else { "FAIL" }
    );
    println!("═══════════════════════════════════════");
}

fn print_switch(from: &CircuitSelection, switched: &StandardSwitch) {
    let to = &switched.selection;
    println!(
        "{} -> {}",
        from.standard.display_name(),
        to.standard.display_name()
    );
    println!(
        "  Length:  {:.2} {} -> {:.2} {}",
        from.length,
        from.standard.length_unit().symbol(),
        to.length,
        to.standard.length_unit().symbol()
    );
    println!("  Voltage: {:.0} V -> {:.0} V", from.voltage, to.voltage);
    println!("  Method:  {} -> {}", from.installation_method, to.installation_method);
    if let Some(size) = &to.conductor_size {
        println!(
            "  Size:    {} -> {}",
            from.conductor_size.as_deref().unwrap_or("-"),
            size
        );
    }
    print_list("Notes:", &switched.notes);
}

fn print_standards() {
    for standard in Standard::ALL {
        println!("{} - {}", standard.identifier(), standard.display_name());
        println!("  Length unit: {}", standard.length_unit().symbol());
        let voltages: Vec<String> = nominal_voltages(standard).iter().map(|v| format!("{v:.0}")).collect();
        println!("  Voltages:    {} V", voltages.join(", "));
        println!(
            "  Methods:     {} (default {})",
            installation_methods(standard).join(", "),
            default_installation_method(standard)
        );
        if standard.is_dc() {
            for app in DcApplication::ALL {
                let tags: Vec<&str> = app.supported_voltages().iter().map(|v| v.label()).collect();
                println!("  {:<12} {}", app.code(), tags.join(", "));
            }
            let loads: Vec<&str> = DcLoadType::ALL.iter().map(|l| l.code()).collect();
            println!("  Load types:  {}", loads.join(", "));
        }
        println!();
    }
    let systems: Vec<&str> = VoltageSystem::ALL.iter().map(|s| s.code()).collect();
    let materials: Vec<&str> = ConductorMaterial::ALL.iter().map(|m| m.code()).collect();
    println!("Voltage systems: {}", systems.join(", "));
    println!("Materials:       {}", materials.join(", "));
}

fn installation_methods(standard: Standard) -> Vec<&'static str> {
    match standard {
        Standard::Nec => NecMethod::ALL.iter().map(|m| m.code()).collect(),
        Standard::Iec | Standard::Bs7671 => ReferenceMethod::ALL.iter().map(|m| m.code()).collect(),
        Standard::Dc => DcMethod::ALL.iter().map(|m| m.code()).collect(),
    }
}

fn standards_listing() -> serde_json::Value {
    let standards: Vec<serde_json::Value> = Standard::ALL
        .iter()
        .map(|&standard| {
            serde_json::json!({
                "identifier": standard.identifier(),
                "name": standard.display_name(),
                "length_unit": standard.length_unit().symbol(),
                "voltages": nominal_voltages(standard),
                "installation_methods": installation_methods(standard),
                "default_installation_method": default_installation_method(standard),
            })
        })
        .collect();
    serde_json::json!({ "standards": standards })
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", title);
    for item in items {
        println!("  - {}", item);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
