//! Client-side filtering over an already fetched list.
//!
//! A text query is a trimmed, case-insensitive substring match across a few
//! fields of the record; dropdowns are exact matches where `all` admits
//! everything. Both are recomputed from scratch on every call.

use std::convert::Infallible;
use std::str::FromStr;

use crate::models::{Availability, Building, BuildingType, Guide, User};

/// Decides whether a record stays visible.
pub trait RecordFilter<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Keep the records that pass `filter`, in their original order.
pub fn apply<'a, R, F: RecordFilter<R>>(records: &'a [R], filter: &F) -> Vec<&'a R> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// True when the trimmed query is empty or occurs in any of `fields`.
pub fn text_matches(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// A dropdown selection: either `all`, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Choice::All)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

/// Listing price bands offered on the home page search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    /// below 500,000
    Under500k,
    /// 500,000 up to (not including) 1,000,000
    From500kTo1m,
    /// 1,000,000 and above
    Over1m,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceRange::Under500k => price < 500_000.0,
            PriceRange::From500kTo1m => (500_000.0..1_000_000.0).contains(&price),
            PriceRange::Over1m => price >= 1_000_000.0,
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-500000" => Ok(PriceRange::Under500k),
            "500000-1000000" => Ok(PriceRange::From500kTo1m),
            "1000000+" => Ok(PriceRange::Over1m),
            other => Err(format!(
                "unknown price range '{other}' (expected all, 0-500000, 500000-1000000 or 1000000+)"
            )),
        }
    }
}

impl Choice<PriceRange> {
    pub fn admits_price(&self, price: f64) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(range) => range.contains(price),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub query: String,
}

impl RecordFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        text_matches(&self.query, &[user.username.as_str(), user.email.as_str()])
    }
}

#[derive(Debug, Clone, Default)]
pub struct GuideFilter {
    pub query: String,
    /// Substring of the specialization, e.g. `luxury homes`
    pub specialization: Choice<Specialization>,
}

/// Specialization dropdown value, matched as a case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialization(pub String);

impl FromStr for Specialization {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Specialization(s.to_string()))
    }
}

impl RecordFilter<Guide> for GuideFilter {
    fn matches(&self, guide: &Guide) -> bool {
        let specialization_ok = match &self.specialization {
            Choice::All => true,
            Choice::Only(Specialization(wanted)) => guide
                .specialization
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
        };
        specialization_ok
            && text_matches(
                &self.query,
                &[
                    guide.specialization.as_str(),
                    guide.name.as_str(),
                    guide.city.as_str(),
                    guide.state.as_str(),
                ],
            )
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildingFilter {
    pub query: String,
    pub kind: Choice<BuildingType>,
    pub availability: Choice<Availability>,
    pub price: Choice<PriceRange>,
}

impl RecordFilter<Building> for BuildingFilter {
    fn matches(&self, building: &Building) -> bool {
        self.kind.admits(&building.kind)
            && self.availability.admits(&building.availability)
            && self.price.admits_price(building.price)
            && text_matches(
                &self.query,
                &[
                    building.name.as_str(),
                    building.city.as_str(),
                    building.state.as_str(),
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(name: &str, city: &str, kind: BuildingType) -> Building {
        Building {
            name: name.into(),
            city: city.into(),
            kind,
            ..Default::default()
        }
    }

    fn pune_pair() -> Vec<Building> {
        vec![
            building("Oak Villa", "Pune", BuildingType::House),
            building("Lake Condo", "Pune", BuildingType::Condo),
        ]
    }

    fn names<'a>(records: &[&'a Building]) -> Vec<&'a str> {
        records.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_type_dropdown_is_exact() {
        let buildings = pune_pair();
        let filter = BuildingFilter {
            kind: Choice::Only(BuildingType::Condo),
            ..Default::default()
        };
        assert_eq!(names(&apply(&buildings, &filter)), vec!["Lake Condo"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let buildings = pune_pair();
        let filter = BuildingFilter {
            query: "oak".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&buildings, &filter)), vec!["Oak Villa"]);

        let filter = BuildingFilter {
            query: "  PUNE ".into(),
            ..Default::default()
        };
        assert_eq!(apply(&buildings, &filter).len(), 2);
    }

    #[test]
    fn test_all_is_identity() {
        let mut buildings = pune_pair();
        buildings[1].availability = Availability::Sold;
        buildings[0].price = 2_500_000.0;
        let filter = BuildingFilter {
            query: String::new(),
            kind: "all".parse().unwrap(),
            availability: "ALL".parse().unwrap(),
            price: "all".parse().unwrap(),
        };
        assert_eq!(apply(&buildings, &filter).len(), buildings.len());
    }

    #[test]
    fn test_narrowing_query_never_grows_result() {
        let buildings = vec![
            building("Oak Villa", "Pune", BuildingType::House),
            building("Oakwood Heights", "Nashik", BuildingType::Apartment),
            building("Lake Condo", "Pune", BuildingType::Condo),
            building("Palm Grove", "Goa", BuildingType::Townhouse),
        ];
        let full = "oakwood heights";
        let mut previous = usize::MAX;
        for end in 0..=full.len() {
            let filter = BuildingFilter {
                query: full[..end].to_string(),
                ..Default::default()
            };
            let count = apply(&buildings, &filter).len();
            assert!(count <= previous, "query {:?} grew the result", &full[..end]);
            previous = count;
        }
        assert_eq!(previous, 1);
    }

    #[test]
    fn test_price_ranges() {
        assert!(PriceRange::Under500k.contains(499_999.0));
        assert!(!PriceRange::Under500k.contains(500_000.0));
        assert!(PriceRange::From500kTo1m.contains(500_000.0));
        assert!(PriceRange::Over1m.contains(1_000_000.0));
        assert!("1000000+".parse::<Choice<PriceRange>>().is_ok());
        assert!("cheap".parse::<Choice<PriceRange>>().is_err());
    }

    #[test]
    fn test_user_search_covers_username_and_email() {
        let users = vec![
            User {
                username: "asha".into(),
                email: "asha@example.test".into(),
                ..Default::default()
            },
            User {
                username: "vikram".into(),
                email: "vk@corp.test".into(),
                ..Default::default()
            },
        ];
        let filter = UserFilter {
            query: "CORP".into(),
        };
        let found = apply(&users, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "vikram");
    }

    #[test]
    fn test_guide_specialization_is_substring() {
        let guides = vec![
            Guide {
                name: "Meera".into(),
                specialization: "Luxury Homes & Villas".into(),
                ..Default::default()
            },
            Guide {
                name: "Ravi".into(),
                specialization: "Commercial".into(),
                city: "Mumbai".into(),
                ..Default::default()
            },
        ];
        let filter = GuideFilter {
            specialization: "luxury homes".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(apply(&guides, &filter)[0].name, "Meera");

        let filter = GuideFilter {
            query: "mumbai".into(),
            ..Default::default()
        };
        assert_eq!(apply(&guides, &filter)[0].name, "Ravi");
    }
}
