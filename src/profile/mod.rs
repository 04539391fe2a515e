//! Profile data structures, partial updates and loading

mod data;
mod merge;
pub mod loader;
pub mod samples;

pub use data::{
    AccountKind, Asset, AssetKind, AuxiliaryAccount, BridgeIncome, CoverageTier, Debt, DebtKind,
    Dependent, EmploymentInfo, HighThreeYears, LifeEvent, LifeEventKind, Milestone,
    MilestoneCriteria, MilestoneKind, PensionTier, PersonalInfo, PlanningInfo, Profile,
    RateAssumptions, RetirementChoices, SavingsAccountInfo, ServicePeriod, SpouseInfo,
    SurvivorElection, TierTag,
};
pub use loader::{load_default_profile, load_patch, load_profile, load_profile_from_reader};
pub use merge::{
    merge_profile, EmploymentPatch, PersonalPatch, PlanningPatch, ProfilePatch, RatesPatch,
    RetirementPatch, SavingsPatch,
};
