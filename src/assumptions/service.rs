//! Service-crediting rules: tier cutoff, sick-leave conversion and the MRA schedule

use chrono::NaiveDate;

/// One birth-year band of the minimum retirement age schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MraBand {
    /// Last birth year in the band (None = open-ended)
    pub birth_year_through: Option<i32>,
    pub minimum_retirement_age: u32,
}

/// Minimum Retirement Age by birth year
#[derive(Debug, Clone)]
pub struct MraSchedule {
    /// Bands in ascending birth-year order
    bands: Vec<MraBand>,
}

impl Default for MraSchedule {
    fn default() -> Self {
        Self {
            bands: vec![
                MraBand { birth_year_through: Some(1947), minimum_retirement_age: 55 },
                MraBand { birth_year_through: Some(1952), minimum_retirement_age: 55 },
                MraBand { birth_year_through: Some(1969), minimum_retirement_age: 56 },
                MraBand { birth_year_through: None, minimum_retirement_age: 57 },
            ],
        }
    }
}

impl MraSchedule {
    /// Create from loaded CSV data
    pub fn from_loaded(bands: &[MraBand]) -> Self {
        Self {
            bands: bands.to_vec(),
        }
    }

    /// MRA for a birth year
    pub fn minimum_retirement_age(&self, birth_year: i32) -> u32 {
        for band in &self.bands {
            match band.birth_year_through {
                Some(through) if birth_year <= through => return band.minimum_retirement_age,
                None => return band.minimum_retirement_age,
                _ => {}
            }
        }
        // Beyond the last closed band
        self.bands.last().map(|b| b.minimum_retirement_age).unwrap_or(57)
    }
}

/// Rules for turning employment history into creditable service
#[derive(Debug, Clone)]
pub struct ServiceRules {
    /// `auto` periods starting before this date belong to tier A
    pub tier_cutoff: NaiveDate,

    /// Sick-leave hours per creditable year
    pub sick_leave_hours_per_year: f64,

    /// Days per service year
    pub days_per_year: f64,

    pub mra: MraSchedule,
}

impl Default for ServiceRules {
    fn default() -> Self {
        Self {
            tier_cutoff: NaiveDate::from_ymd_opt(1984, 1, 1).unwrap_or(NaiveDate::MIN),
            sick_leave_hours_per_year: 2087.0,
            days_per_year: 365.25,
            mra: MraSchedule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mra_bands() {
        let mra = MraSchedule::default();

        assert_eq!(mra.minimum_retirement_age(1940), 55);
        assert_eq!(mra.minimum_retirement_age(1948), 55);
        assert_eq!(mra.minimum_retirement_age(1952), 55);
        assert_eq!(mra.minimum_retirement_age(1953), 56);
        assert_eq!(mra.minimum_retirement_age(1969), 56);
        assert_eq!(mra.minimum_retirement_age(1970), 57);
        assert_eq!(mra.minimum_retirement_age(1995), 57);
    }

    #[test]
    fn test_mra_non_decreasing() {
        let mra = MraSchedule::default();
        let mut prev = 0;
        for year in 1930..2010 {
            let age = mra.minimum_retirement_age(year);
            assert!(age >= prev, "MRA dropped at {}", year);
            prev = age;
        }
    }
}
