//! Load profiles and profile patches from JSON

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{Profile, ProfilePatch};
use crate::error::Result;

/// Default location of the example profile
pub const DEFAULT_PROFILE_PATH: &str = "data/profiles/profile.json";

/// Load a profile from a JSON file and check it for contradictions
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let file = File::open(path)?;
    load_profile_from_reader(BufReader::new(file))
}

/// Load a profile from any reader (e.g., string buffer, network stream)
pub fn load_profile_from_reader<R: Read>(reader: R) -> Result<Profile> {
    let profile: Profile = serde_json::from_reader(reader)?;
    profile.validate()?;
    Ok(profile)
}

/// Load a partial update from a JSON file
pub fn load_patch<P: AsRef<Path>>(path: P) -> Result<ProfilePatch> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load the example profile shipped with the crate
pub fn load_default_profile() -> Result<Profile> {
    load_profile(Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_PROFILE_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::Datelike;

    #[test]
    fn test_load_default_profile() {
        let profile = load_default_profile().expect("Failed to load profile");
        assert_eq!(profile.personal.birth_year, 1974);
        assert_eq!(profile.employment.service_periods.len(), 2);
        for period in &profile.employment.service_periods {
            assert!(period.start_date.year() - profile.personal.birth_year >= 18);
        }
        assert!(profile.personal.spouse.is_some());
        assert!(!profile.planning.debts.is_empty());
    }

    #[test]
    fn test_reader_rejects_contradictory_profile() {
        let json = r#"{
            "personal": { "birth_year": 1970 },
            "employment": {
                "service_periods": [{ "start_date": "1995-01-01" }],
                "current_salary": 80000
            },
            "retirement": { "leave_age": 60, "claim_age": 57 }
        }"#;
        let result = load_profile_from_reader(json.as_bytes());
        assert!(matches!(result, Err(Error::InvalidProfile(_))));
    }

    #[test]
    fn test_reader_rejects_bad_date() {
        let json = r#"{
            "personal": { "birth_year": 1970 },
            "employment": {
                "service_periods": [{ "start_date": "1995-02-30" }],
                "current_salary": 80000
            }
        }"#;
        assert!(matches!(load_profile_from_reader(json.as_bytes()), Err(Error::Json(_))));
    }
}
