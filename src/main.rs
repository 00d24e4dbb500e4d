//! Goal Projection CLI
//!
//! Projects a savings plan until it reaches its target, prints the yearly
//! table and the first months of the ledger, and exports CSV tables, workbooks
//! and charts.

use anyhow::Context;
use clap::Parser;
use goal_projection::{
    projection::{ProjectionConfig, ProjectionResult, DEFAULT_MAX_MONTHS},
    Exporter, ScenarioRunner, SimulationParameters,
};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "goal_projection",
    about = "Time to reach a savings goal with monthly contributions and compound interest"
)]
struct Cli {
    /// Starting balance
    #[arg(long, default_value = "100000")]
    initial_balance: Decimal,

    /// Contribution added every month
    #[arg(long, default_value = "1000")]
    monthly_contribution: Decimal,

    /// Monthly interest rate in percent
    #[arg(long, default_value = "1")]
    monthly_rate_pct: Decimal,

    /// Target balance
    #[arg(long, default_value = "1000000")]
    target: Decimal,

    /// Annual inflation in percent
    #[arg(long, default_value = "4")]
    inflation_pct: Decimal,

    /// Annual contribution growth in percent
    #[arg(long, default_value = "5")]
    contribution_growth_pct: Decimal,

    /// Tax withheld on interest in percent
    #[arg(long, default_value = "15")]
    tax_pct: Decimal,

    /// JSON parameter file; overrides every parameter flag
    #[arg(long)]
    params: Option<PathBuf>,

    /// Directory for CSV tables, xlsx workbooks and SVG charts
    #[arg(long, default_value = "projection_output")]
    output_dir: PathBuf,

    /// Skip writing tables, workbooks and charts
    #[arg(long)]
    no_export: bool,

    /// Safety horizon in months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Ledger months to print
    #[arg(long, default_value_t = 12)]
    preview_months: usize,

    /// Compare monthly rates (percent, comma separated) instead of a single run
    #[arg(long, value_delimiter = ',')]
    compare_rates: Vec<Decimal>,
}

impl Cli {
    fn parameters(&self) -> anyhow::Result<SimulationParameters> {
        if let Some(path) = &self.params {
            return SimulationParameters::from_json_path(path)
                .with_context(|| format!("loading parameters from {}", path.display()));
        }

        let hundred = Decimal::ONE_HUNDRED;
        Ok(SimulationParameters::new(
            self.initial_balance,
            self.monthly_contribution,
            self.monthly_rate_pct / hundred,
            self.target,
        )
        .with_inflation(self.inflation_pct / hundred)
        .with_contribution_growth(self.contribution_growth_pct / hundred)
        .with_interest_tax(self.tax_pct / hundred))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.parameters()?;
    let runner = ScenarioRunner::new(ProjectionConfig {
        max_months: cli.max_months,
    });

    println!("Goal Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    if !cli.compare_rates.is_empty() {
        let rates: Vec<Decimal> = cli
            .compare_rates
            .iter()
            .map(|pct| pct / Decimal::ONE_HUNDRED)
            .collect();
        print_rate_comparison(&runner, &params, &rates);
        return Ok(());
    }

    let result = runner.run(&params).context("projection failed")?;

    print_report(&result, cli.preview_months);

    if !cli.no_export {
        let exporter = Exporter::new(&cli.output_dir);
        let report = exporter.export_all(&result).context("export failed")?;
        println!("\nFiles written to {}:", exporter.output_dir().display());
        for file in &report.files {
            println!("  {}", file.display());
        }
    }

    Ok(())
}

fn print_report(result: &ProjectionResult, preview_months: usize) {
    let params = result.parameters();
    println!("Initial balance:      {:.2}", params.initial_balance);
    println!("Monthly contribution: {:.2}", params.monthly_contribution);
    println!("Monthly rate:         {}%", params.monthly_interest_rate * Decimal::ONE_HUNDRED);
    println!("Target:               {:.2}", params.target_balance);

    println!("\nTime to reach the goal: {}\n", result.elapsed());

    println!("Yearly table:");
    println!("{:>8} {:>6} {:>16} {:>16}", "Year", "Month", "Gross", "Real");
    println!("{}", "-".repeat(49));
    for checkpoint in result.annual() {
        println!(
            "{:>8} {:>6} {:>16.2} {:>16.2}",
            checkpoint.label(),
            checkpoint.month,
            checkpoint.gross_balance,
            checkpoint.real_balance
        );
    }

    if preview_months > 0 && !result.monthly().is_empty() {
        println!("\nFirst months:");
        println!(
            "{:>5} {:>14} {:>14} {:>10} {:>10} {:>9} {:>14} {:>14} {:>12}",
            "Month", "Gross", "Real", "Contrib", "Interest", "Tax", "Contributed", "Interest Tot", "Tax Tot"
        );
        println!("{}", "-".repeat(110));
        for r in result.monthly().iter().take(preview_months) {
            println!(
                "{:>5} {:>14.2} {:>14.2} {:>10.2} {:>10.2} {:>9.2} {:>14.2} {:>14.2} {:>12.2}",
                r.month,
                r.gross_balance,
                r.real_balance,
                r.contribution,
                r.interest,
                r.tax,
                r.cumulative_contributions,
                r.cumulative_interest,
                r.cumulative_tax,
            );
        }
        if result.monthly().len() > preview_months {
            println!("... ({} more months)", result.monthly().len() - preview_months);
        }
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total months:       {}", summary.total_months);
    println!("  Total invested:     {:.2}", summary.total_invested);
    println!("  Total interest:     {:.2}", summary.total_interest);
    println!("  Total tax paid:     {:.2}", summary.total_tax);
    println!("  Final balance:      {:.2}", summary.final_balance);
    println!("  Final real balance: {:.2}", summary.final_real_balance);
}

fn print_rate_comparison(runner: &ScenarioRunner, base: &SimulationParameters, rates: &[Decimal]) {
    println!("{:>10} {:>24} {:>16}", "Rate/mo", "Time to goal", "Final balance");
    println!("{}", "-".repeat(52));
    for (rate, outcome) in runner.sweep_interest_rates(base, rates) {
        let pct = format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize());
        match outcome {
            Ok(result) => println!(
                "{:>10} {:>24} {:>16.2}",
                pct,
                result.elapsed().to_string(),
                result.final_balance()
            ),
            Err(err) => println!("{:>10} {}", pct, err),
        }
    }
}
