use serde::Serialize;

use crate::models::{Building, Guide, User};

/// Crore, the unit the dashboard reports total listing value in.
pub const CRORE: f64 = 10_000_000.0;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub users: usize,
    pub guides: usize,
    pub properties: usize,
    pub total_value: f64,
}

impl DashboardStats {
    pub fn collect(users: &[User], guides: &[Guide], buildings: &[Building]) -> Self {
        Self {
            users: users.len(),
            guides: guides.len(),
            properties: buildings.len(),
            total_value: buildings.iter().fold(0.0, |sum, b| sum + b.price),
        }
    }

    /// Total value as `₹12.3Cr`
    pub fn total_value_label(&self) -> String {
        format!("₹{:.1}Cr", self.total_value / CRORE)
    }
}

/// Summary line above the guide directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideStats {
    pub count: usize,
    /// rounded to whole years
    pub average_experience: u32,
    /// rounded to one decimal
    pub average_rating: f64,
}

impl GuideStats {
    /// Averages over an empty directory are zero.
    pub fn collect<'a, I>(guides: I) -> Self
    where
        I: IntoIterator<Item = &'a Guide>,
    {
        let (count, years, rating) = guides
            .into_iter()
            .fold((0usize, 0f64, 0f64), |(n, years, rating), g| {
                (n + 1, years + g.experience_years as f64, rating + g.rating)
            });
        if count == 0 {
            return Self {
                count,
                average_experience: 0,
                average_rating: 0.0,
            };
        }
        let n = count as f64;
        Self {
            count,
            average_experience: (years / n).round() as u32,
            average_rating: (rating / n * 10.0).round() / 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_reports_crore() {
        let buildings = vec![
            Building {
                price: 40_00_000.0,
                ..Default::default()
            },
            Building {
                price: 1_20_00_000.0,
                ..Default::default()
            },
        ];
        let stats = DashboardStats::collect(&[User::default()], &[], &buildings);
        assert_eq!(stats.users, 1);
        assert_eq!(stats.guides, 0);
        assert_eq!(stats.properties, 2);
        assert_eq!(stats.total_value_label(), "₹1.6Cr");
    }

    #[test]
    fn test_empty_catalog_total_is_positive_zero() {
        let stats = DashboardStats::collect(&[], &[], &[]);
        assert!(stats.total_value.is_sign_positive());
        assert_eq!(stats.total_value_label(), "₹0.0Cr");
    }

    #[test]
    fn test_guide_averages() {
        let guides = vec![
            Guide {
                experience_years: 4,
                rating: 4.5,
                ..Default::default()
            },
            Guide {
                experience_years: 7,
                rating: 4.0,
                ..Default::default()
            },
            Guide {
                experience_years: 10,
                rating: 3.8,
                ..Default::default()
            },
        ];
        let stats = GuideStats::collect(&guides);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average_experience, 7);
        assert_eq!(stats.average_rating, 4.1);

        let empty = GuideStats::collect(&[] as &[Guide]);
        assert_eq!(empty.average_experience, 0);
        assert_eq!(empty.average_rating, 0.0);
    }
}
