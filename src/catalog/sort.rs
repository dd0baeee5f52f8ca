use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Building, Guide};

/// Ordering offered on the public listings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildingSort {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    /// most bedrooms first
    Bedrooms,
    /// largest first
    Area,
}

impl BuildingSort {
    pub const ALL: [BuildingSort; 5] = [
        BuildingSort::Name,
        BuildingSort::PriceLow,
        BuildingSort::PriceHigh,
        BuildingSort::Bedrooms,
        BuildingSort::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingSort::Name => "name",
            BuildingSort::PriceLow => "price-low",
            BuildingSort::PriceHigh => "price-high",
            BuildingSort::Bedrooms => "bedrooms",
            BuildingSort::Area => "area",
        }
    }

    pub fn compare(&self, a: &Building, b: &Building) -> Ordering {
        match self {
            BuildingSort::Name => by_name(&a.name, &b.name),
            BuildingSort::PriceLow => a.price.total_cmp(&b.price),
            BuildingSort::PriceHigh => b.price.total_cmp(&a.price),
            BuildingSort::Bedrooms => b.bedrooms.cmp(&a.bedrooms),
            BuildingSort::Area => b.area_sqft.cmp(&a.area_sqft),
        }
    }

    /// Stable sort, so equal keys keep backend order.
    pub fn sort(&self, buildings: &mut [&Building]) {
        buildings.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideSort {
    /// best rated first
    #[default]
    Rating,
    /// most experienced first
    Experience,
    Name,
}

impl GuideSort {
    pub const ALL: [GuideSort; 3] = [GuideSort::Rating, GuideSort::Experience, GuideSort::Name];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuideSort::Rating => "rating",
            GuideSort::Experience => "experience",
            GuideSort::Name => "name",
        }
    }

    pub fn compare(&self, a: &Guide, b: &Guide) -> Ordering {
        match self {
            GuideSort::Rating => b.rating.total_cmp(&a.rating),
            GuideSort::Experience => b.experience_years.cmp(&a.experience_years),
            GuideSort::Name => by_name(&a.name, &b.name),
        }
    }

    pub fn sort(&self, guides: &mut [&Guide]) {
        guides.sort_by(|a, b| self.compare(a, b));
    }
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn unknown(value: &str, options: &[&str]) -> String {
    format!(
        "unknown sort '{}' (expected one of: {})",
        value,
        options.join(", ")
    )
}

impl FromStr for BuildingSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BuildingSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == wanted)
            .ok_or_else(|| unknown(s, &BuildingSort::ALL.map(|sort| sort.as_str())))
    }
}

impl FromStr for GuideSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GuideSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == wanted)
            .ok_or_else(|| unknown(s, &GuideSort::ALL.map(|sort| sort.as_str())))
    }
}

impl fmt::Display for BuildingSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GuideSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
