//! Scenario runner for batch projections and side-by-side comparison
//!
//! Holds one set of assumptions and runs any number of profiles against it.
//! Each projection is sequential; independent scenarios run in parallel.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::profile::{Profile, ProfilePatch};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary};

/// A named profile to project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub profile: Profile,
}

/// Projection of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario_id: String,
    pub name: String,
    pub result: ProjectionResult,
}

/// Lifetime totals of one scenario in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub scenario_id: String,
    pub name: String,
    pub annual_pension: f64,
    pub earliest_eligible_age: u32,
    pub summary: ProjectionSummary,
}

/// Scenarios side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// One entry per scenario, in input order
    pub entries: Vec<ComparisonEntry>,
}

impl ScenarioComparison {
    /// Entry with the highest lifetime income; the first wins a tie
    pub fn best_lifetime_income(&self) -> Option<&ComparisonEntry> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(current) if current.summary.lifetime_income >= entry.summary.lifetime_income => {
                Some(current)
            }
            _ => Some(entry),
        })
    }

    pub fn entry(&self, scenario_id: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.scenario_id == scenario_id)
    }
}

/// Pre-loaded scenario runner for batch projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the standard in-code assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::standard(),
        }
    }

    /// Create runner by loading assumptions from the default CSV directory
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from a specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    fn engine(&self, config: ProjectionConfig) -> ProjectionEngine {
        ProjectionEngine::new(self.base_assumptions.clone(), config)
    }

    /// Run a single projection
    pub fn run(&self, profile: &Profile, config: ProjectionConfig) -> ProjectionResult {
        self.engine(config).project(profile)
    }

    /// Run every scenario, in parallel, keeping input order
    pub fn run_batch(&self, scenarios: &[Scenario], config: ProjectionConfig) -> Vec<ScenarioOutcome> {
        info!("Running {} scenarios as of {}", scenarios.len(), config.valuation_date);
        let engine = self.engine(config);

        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                scenario_id: scenario.id.clone(),
                name: scenario.name.clone(),
                result: engine.project(&scenario.profile),
            })
            .collect()
    }

    /// Run a base profile once per partial update
    ///
    /// Each patch is merged into its own copy of the base profile.
    pub fn run_variants(
        &self,
        base: &Profile,
        patches: &[ProfilePatch],
        config: ProjectionConfig,
    ) -> Vec<ProjectionResult> {
        let engine = self.engine(config);
        patches
            .par_iter()
            .map(|patch| engine.project(&base.merged(patch)))
            .collect()
    }

    /// Project every scenario and aggregate lifetime totals
    pub fn compare(&self, scenarios: &[Scenario], config: ProjectionConfig) -> ScenarioComparison {
        let entries = self
            .run_batch(scenarios, config)
            .into_iter()
            .map(|outcome| ComparisonEntry {
                annual_pension: outcome.result.pension.annual_pension,
                earliest_eligible_age: outcome.result.eligibility.earliest_eligible_age,
                summary: outcome.result.summary(),
                scenario_id: outcome.scenario_id,
                name: outcome.name,
            })
            .collect();

        let comparison = ScenarioComparison { entries };
        if let Some(best) = comparison.best_lifetime_income() {
            info!(
                "Highest lifetime income: {} ({:.0})",
                best.scenario_id, best.summary.lifetime_income
            );
        }
        comparison
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Mutable access for customizing assumptions between runs
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::samples::sample_scenarios;
    use crate::profile::RetirementPatch;
    use chrono::NaiveDate;

    fn config() -> ProjectionConfig {
        ProjectionConfig::as_of(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let runner = ScenarioRunner::new();
        let scenarios = sample_scenarios();

        let outcomes = runner.run_batch(&scenarios, config());
        assert_eq!(outcomes.len(), scenarios.len());
        for (outcome, scenario) in outcomes.iter().zip(&scenarios) {
            assert_eq!(outcome.scenario_id, scenario.id);
            assert_eq!(outcome.result.years, runner.run(&scenario.profile, config()).years);
        }
    }

    #[test]
    fn test_compare_picks_highest_lifetime_income() {
        let runner = ScenarioRunner::new();
        let comparison = runner.compare(&sample_scenarios(), config());

        let best = comparison.best_lifetime_income().unwrap();
        assert!(comparison
            .entries
            .iter()
            .all(|e| e.summary.lifetime_income <= best.summary.lifetime_income));
        assert!(comparison.entry("boomerang-career").is_some());
    }

    #[test]
    fn test_empty_comparison() {
        let comparison = ScenarioRunner::new().compare(&[], config());
        assert!(comparison.entries.is_empty());
        assert!(comparison.best_lifetime_income().is_none());
    }

    #[test]
    fn test_variants_do_not_touch_base() {
        let runner = ScenarioRunner::new();
        let base = sample_scenarios().remove(0).profile;
        let snapshot = base.clone();

        let patches = vec![
            ProfilePatch {
                retirement: Some(RetirementPatch {
                    claim_age: Some(Some(62)),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ProfilePatch {
                retirement: Some(RetirementPatch {
                    claim_age: Some(Some(65)),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ];

        let results = runner.run_variants(&base, &patches, config());
        assert_eq!(base, snapshot);

        let first_pension = |r: &ProjectionResult| r.years.iter().find(|y| y.pension > 0.0).map(|y| y.age);
        assert_eq!(first_pension(&results[0]), Some(62));
        assert_eq!(first_pension(&results[1]), Some(65));
    }
}
