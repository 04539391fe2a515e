//! Advisory milestone evaluation over a finished projection
//!
//! Milestones only read the projected rows. Nothing here feeds back into the
//! simulation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::cashflows::ProjectionYear;
use crate::profile::{Milestone, MilestoneCriteria};

/// First projected age at which a milestone holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    pub id: String,
    pub name: String,
    pub achieved_age: Option<u32>,
    pub achieved_year: Option<i32>,
}

fn criterion_met(milestone: &Milestone, row: &ProjectionYear) -> bool {
    match (milestone.criteria, milestone.target_value) {
        (MilestoneCriteria::ReachAge, Some(target)) => row.age as f64 >= target,
        (MilestoneCriteria::NetWorthAbove, Some(target)) => row.net_worth > target,
        (MilestoneCriteria::LiquidNetWorthAbove, Some(target)) => row.liquid_net_worth > target,
        (MilestoneCriteria::TotalDebtBelow, target) => row.total_debt < target.unwrap_or(f64::MIN_POSITIVE),
        (MilestoneCriteria::ReachMilestone, _) => true,
        _ => false,
    }
}

/// Evaluate every milestone against the projected rows
///
/// A linked milestone must be reached at or before the same age. Links that
/// point at unknown ids or form a cycle are never reached.
pub fn evaluate_milestones(milestones: &[Milestone], years: &[ProjectionYear]) -> Vec<MilestoneStatus> {
    let by_id: HashMap<&str, &Milestone> = milestones.iter().map(|m| (m.id.as_str(), m)).collect();
    let mut resolved: HashMap<&str, Option<usize>> = HashMap::new();

    milestones
        .iter()
        .map(|milestone| {
            let index = resolve(milestone, &by_id, years, &mut resolved, &mut Vec::new());
            MilestoneStatus {
                id: milestone.id.clone(),
                name: milestone.name.clone(),
                achieved_age: index.map(|i| years[i].age),
                achieved_year: index.map(|i| years[i].year),
            }
        })
        .collect()
}

/// Row index at which a milestone is first reached
fn resolve<'m>(
    milestone: &'m Milestone,
    by_id: &HashMap<&'m str, &'m Milestone>,
    years: &[ProjectionYear],
    resolved: &mut HashMap<&'m str, Option<usize>>,
    visiting: &mut Vec<&'m str>,
) -> Option<usize> {
    let id = milestone.id.as_str();
    if let Some(index) = resolved.get(id) {
        return *index;
    }
    if visiting.contains(&id) {
        return None;
    }
    visiting.push(id);

    let earliest = match milestone.linked_milestone.as_deref() {
        Some(link) => by_id
            .get(link)
            .copied()
            .and_then(|linked| resolve(linked, by_id, years, resolved, visiting)),
        None if milestone.criteria == MilestoneCriteria::ReachMilestone => None,
        None => Some(0),
    };

    let index = earliest.and_then(|start| {
        years[start..]
            .iter()
            .position(|row| criterion_met(milestone, row))
            .map(|offset| start + offset)
    });

    visiting.pop();
    resolved.insert(id, index);
    index
}
