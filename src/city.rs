use anyhow::{anyhow, Result};

/// Poverty cohort membership. Cities above a 20% poverty level are "high",
/// the rest "low"; a city can sit in neither cohort (Los Angeles does).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cohort {
    HighPoverty,
    LowPoverty,
}

impl Cohort {
    pub fn label(self) -> &'static str {
        match self {
            Cohort::HighPoverty => "High Poverty",
            Cohort::LowPoverty => "Low Poverty",
        }
    }
}

#[derive(Debug)]
pub struct City {
    pub name: &'static str,
    pub slug: &'static str,
    pub cohort: Option<Cohort>,
}

pub const CITIES: &[City] = &[
    City { name: "New Orleans", slug: "nola", cohort: Some(Cohort::HighPoverty) },
    City { name: "Detroit", slug: "det", cohort: Some(Cohort::HighPoverty) },
    City { name: "St. Louis", slug: "stl", cohort: Some(Cohort::HighPoverty) },
    City { name: "Miami", slug: "miami", cohort: Some(Cohort::HighPoverty) },
    City { name: "Philadelphia", slug: "philly", cohort: Some(Cohort::HighPoverty) },
    City { name: "Seattle", slug: "sea", cohort: Some(Cohort::LowPoverty) },
    City { name: "San Francisco", slug: "sf", cohort: Some(Cohort::LowPoverty) },
    City { name: "Austin", slug: "atx", cohort: Some(Cohort::LowPoverty) },
    City { name: "Kansas City", slug: "kansas-city", cohort: Some(Cohort::LowPoverty) },
    City { name: "Boston", slug: "bos", cohort: Some(Cohort::LowPoverty) },
    City { name: "Los Angeles", slug: "la", cohort: None },
];

impl City {
    /// Resolve a display name against the registry. Unknown names are a
    /// fail-fast error listing the valid choices.
    pub fn by_name(name: &str) -> Result<&'static City> {
        CITIES.iter().find(|c| c.name == name).ok_or_else(|| {
            let known: Vec<&str> = CITIES.iter().map(|c| c.name).collect();
            anyhow!("unknown city {:?}; expected one of: {}", name, known.join(", "))
        })
    }
}

pub fn cohort_cities(cohort: Cohort) -> Vec<&'static City> {
    CITIES.iter().filter(|c| c.cohort == Some(cohort)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_city() {
        let city = City::by_name("New Orleans").unwrap();
        assert_eq!(city.slug, "nola");
        assert_eq!(city.cohort, Some(Cohort::HighPoverty));
    }

    #[test]
    fn lookup_unknown_city_fails() {
        let err = City::by_name("Gotham").unwrap_err();
        assert!(err.to_string().contains("unknown city"));
    }

    #[test]
    fn cohorts_are_five_cities_each_and_disjoint() {
        let high = cohort_cities(Cohort::HighPoverty);
        let low = cohort_cities(Cohort::LowPoverty);
        assert_eq!(high.len(), 5);
        assert_eq!(low.len(), 5);
        for c in &high {
            assert!(!low.iter().any(|o| o.slug == c.slug));
        }
    }

    #[test]
    fn slugs_are_unique() {
        for (i, a) in CITIES.iter().enumerate() {
            for b in &CITIES[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }
}
