//! Retirement Projection CLI
//!
//! Command-line interface for running retirement projections

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::info;

use retirement_projection::benefits::{sustainable_withdrawal, CoverageCalculator};
use retirement_projection::profile::samples::{sample_scenario, sample_scenarios};
use retirement_projection::profile::{load_default_profile, load_patch, load_profile};
use retirement_projection::projection::Phase;
use retirement_projection::{
    Assumptions, Profile, ProjectionConfig, ProjectionEngine, ProjectionResult, Scenario,
    ScenarioRunner,
};

#[derive(Parser, Debug)]
#[command(
    name = "retirement-projection",
    version,
    about = "Year-by-year retirement projection for a two-tier defined-benefit pension"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project one profile year by year
    Project(ProjectArgs),
    /// Compare lifetime totals across scenarios
    Compare(CompareArgs),
    /// List the built-in sample scenarios
    Samples,
    /// Show service and eligibility for one profile
    Eligibility(ProfileArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Valuation date anchoring ages and ongoing service (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,

    /// Directory with coverage_premiums.csv and mra_schedule.csv
    #[arg(long, value_name = "DIR")]
    assumptions: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Profile JSON file (defaults to the bundled example profile)
    #[arg(long, conflicts_with = "scenario")]
    profile: Option<PathBuf>,

    /// Built-in scenario id instead of a profile file
    #[arg(long)]
    scenario: Option<String>,

    /// Partial update merged into the profile before running
    #[arg(long, value_name = "FILE")]
    patch: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Write the yearly rows to a CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Extra profile files to compare alongside the samples
    #[arg(long = "profile", value_name = "FILE")]
    profiles: Vec<PathBuf>,

    /// Leave the built-in samples out
    #[arg(long)]
    no_samples: bool,

    #[command(flatten)]
    run: RunArgs,
}

impl RunArgs {
    fn config(&self) -> ProjectionConfig {
        ProjectionConfig::as_of(self.as_of.unwrap_or_else(|| Local::now().date_naive()))
    }

    fn assumptions(&self) -> Result<Assumptions> {
        match &self.assumptions {
            Some(dir) => Assumptions::from_csv_path(dir)
                .with_context(|| format!("loading assumptions from {}", dir.display())),
            None => Ok(Assumptions::standard()),
        }
    }
}

impl ProfileArgs {
    fn load(&self) -> Result<Profile> {
        let profile = match (&self.profile, &self.scenario) {
            (Some(path), _) => load_profile(path)
                .with_context(|| format!("loading profile {}", path.display()))?,
            (None, Some(id)) => sample_scenario(id)?.profile,
            (None, None) => load_default_profile().context("loading the bundled profile")?,
        };

        match &self.patch {
            Some(path) => {
                let patch = load_patch(path)
                    .with_context(|| format!("loading patch {}", path.display()))?;
                let merged = profile.merged(&patch);
                merged.validate().context("patched profile")?;
                Ok(merged)
            }
            None => Ok(profile),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project(args) => project(args),
        Command::Compare(args) => compare(args),
        Command::Samples => {
            for scenario in sample_scenarios() {
                println!("{:<24} {}", scenario.id, scenario.name);
                println!("{:<24} {}", "", scenario.description);
            }
            Ok(())
        }
        Command::Eligibility(args) => eligibility(args),
    }
}

fn project(args: ProjectArgs) -> Result<()> {
    let profile = args.profile.load()?;
    let run = &args.profile.run;
    let engine = ProjectionEngine::new(run.assumptions()?, run.config());
    let result = engine.project(&profile);

    if let Some(path) = &args.csv {
        write_csv(path, &result).with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {} rows to {}", result.years.len(), path.display());
    }

    if run.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_pension(&result);
    print_years(&result);
    print_summary(&result);
    print_planning_notes(&engine, &profile, &result);
    Ok(())
}

fn compare(args: CompareArgs) -> Result<()> {
    let mut scenarios = if args.no_samples {
        Vec::new()
    } else {
        sample_scenarios()
    };
    for path in &args.profiles {
        let profile = load_profile(path).with_context(|| format!("loading profile {}", path.display()))?;
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        scenarios.push(Scenario {
            id: id.clone(),
            name: id,
            description: String::new(),
            tags: Vec::new(),
            profile,
        });
    }

    let runner = ScenarioRunner::with_assumptions(args.run.assumptions()?);
    let comparison = runner.compare(&scenarios, args.run.config());

    if args.run.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!(
        "{:<24} {:>10} {:>8} {:>16} {:>14} {:>10} {:>16}",
        "Scenario", "Pension", "Earliest", "Lifetime Income", "Avg Income", "Depleted", "Final Net Worth"
    );
    println!("{}", "-".repeat(104));
    for entry in &comparison.entries {
        let summary = &entry.summary;
        println!(
            "{:<24} {:>10.0} {:>8} {:>16.0} {:>14.0} {:>10} {:>16.0}",
            entry.scenario_id,
            entry.annual_pension,
            entry.earliest_eligible_age,
            summary.lifetime_income,
            summary.average_annual_income,
            summary
                .savings_depletion_age
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string()),
            summary.final_net_worth,
        );
    }
    if let Some(best) = comparison.best_lifetime_income() {
        println!("\nHighest lifetime income: {}", best.name);
    }
    Ok(())
}

fn eligibility(args: ProfileArgs) -> Result<()> {
    let profile = args.load()?;
    let engine = ProjectionEngine::new(args.run.assumptions()?, args.run.config());
    let info = engine.eligibility(&profile);

    if args.run.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Eligibility as of {}:", engine.config().valuation_date);
    println!("  Current Age: {}", info.current_age);
    println!("  Minimum Retirement Age: {}", info.minimum_retirement_age);
    println!("  Tier A Years: {:.2}", info.service.tier_a_years);
    println!("  Tier B Years: {:.2}", info.service.tier_b_years);
    println!("  Sick-Leave Credit: {:.2}", info.service.sick_leave_years);
    println!("  Total Years: {:.2}", info.total_years_of_service);
    println!("  Primary Tier: {:?}", info.primary_tier);
    println!("  Can Retire Now: {}", info.can_retire_immediately);
    println!(
        "  Earliest Eligible: age {} ({})",
        info.earliest_eligible_age, info.earliest_eligible_date
    );
    println!("  Full Benefits: age {} ({})", info.full_benefits_age, info.full_benefits_date);
    println!("  Coverage Carries Into Retirement: {}", info.coverage_eligible);
    Ok(())
}

fn write_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &result.years {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_pension(result: &ProjectionResult) {
    let pension = &result.pension;
    println!("Pension:");
    println!("  High Average: ${:.2}", pension.high_average);
    println!("  Years of Service: {:.2}", pension.years_of_service);
    println!("  Accrual Rate: {:.4}", pension.accrual_rate);
    println!("  Annual: ${:.2} (monthly ${:.2})", pension.annual_pension, pension.monthly_pension);
    if pension.survivor_benefit > 0.0 {
        println!("  Survivor Benefit: ${:.2}", pension.survivor_benefit);
    }
    println!();
}

fn print_years(result: &ProjectionResult) {
    println!(
        "{:>3} {:>5} {:<8} {:>10} {:>10} {:>10} {:>10} {:>11} {:>11} {:>12} {:>13}",
        "Age", "Year", "Phase", "Pension", "Savings", "SocSec", "Premium", "Income", "Net", "Savings Bal", "Net Worth"
    );
    println!("{}", "-".repeat(120));
    for row in &result.years {
        println!(
            "{:>3} {:>5} {:<8} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>11.0} {:>11.0} {:>12.0} {:>13.0}",
            row.age,
            row.year,
            row.phase.as_str(),
            row.pension,
            row.savings_distribution,
            row.social_security,
            row.coverage_premium,
            row.total_income,
            row.net_income,
            row.savings_balance,
            row.net_worth,
        );
    }
}

fn print_summary(result: &ProjectionResult) {
    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years Projected: {}", summary.total_years);
    println!("  Lifetime Income: ${:.2}", summary.lifetime_income);
    println!("  Average Annual Income: ${:.2}", summary.average_annual_income);
    match summary.savings_depletion_age {
        Some(age) => println!("  Savings Depleted At: {}", age),
        None => println!("  Savings Depleted At: never"),
    }
    println!("  Final Savings Balance: ${:.2}", summary.final_savings_balance);
    println!("  Final Net Worth: ${:.2}", summary.final_net_worth);

    if !result.milestones.is_empty() {
        println!("\nMilestones:");
        for milestone in &result.milestones {
            match milestone.achieved_age {
                Some(age) => println!("  {}: age {}", milestone.name, age),
                None => println!("  {}: not reached", milestone.name),
            }
        }
    }
}

/// Informational figures that do not feed the projection
fn print_planning_notes(engine: &ProjectionEngine, profile: &Profile, result: &ProjectionResult) {
    let Some(leave_index) = result.years.iter().position(|y| y.phase != Phase::Working) else {
        return;
    };
    let years_left = (result.years.len() - leave_index) as u32;
    let balance_at_leave = match leave_index {
        0 => profile.savings.balance,
        i => result.years[i - 1].savings_balance,
    };
    let level = sustainable_withdrawal(balance_at_leave, profile.savings.return_rate, years_left);

    println!("\nPlanning Notes:");
    println!(
        "  Level withdrawal exhausting savings over {} years: ${:.2}",
        years_left, level
    );

    if let Some(row) = result.years.iter().find(|y| y.age == 65 && y.coverage_premium > 0.0) {
        let offset = CoverageCalculator::new(&engine.assumptions().coverage).medicare_offset(row.coverage_premium);
        println!("  Estimated Medicare offset at 65: ${:.2}", offset);
    }
}
