//! Read-only views over the public collections: the home page, the listings
//! browser, the guide directory and the admin dashboard figures.

pub mod sort;
pub mod stats;

pub use sort::{BuildingSort, GuideSort};
pub use stats::{DashboardStats, GuideStats};

use tracing::{error, info};

use crate::api::{BuildingsApi, CrudResource, GuidesApi};
use crate::models::{Building, Guide};
use crate::panel::{filter, BuildingFilter, GuideFilter, ToastSlot};

/// How many listings the home page shows.
pub const HOME_LIMIT: usize = 20;

/// Buildings and guides as the public pages see them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub buildings: Vec<Building>,
    pub guides: Vec<Guide>,
}

/// The home page: the newest slice of listings plus the featured ones in it.
#[derive(Debug)]
pub struct HomeView<'a> {
    pub listings: &'a [Building],
    pub featured: Vec<&'a Building>,
}

impl Catalog {
    /// Fetch both collections. A failed fetch leaves that collection empty and
    /// posts an error toast; the other one still loads.
    pub async fn fetch(buildings: &BuildingsApi, guides: &GuidesApi, toasts: &mut ToastSlot) -> Self {
        let (building_result, guide_result) = tokio::join!(buildings.list(), guides.list());
        let mut catalog = Catalog::default();

        match building_result {
            Ok(list) => catalog.buildings = list,
            Err(err) => {
                error!("Error loading properties: {}", err);
                toasts.error(format!("Failed to load {}!", buildings.labels().plural));
            }
        }
        match guide_result {
            Ok(list) => catalog.guides = list,
            Err(err) => {
                error!("Error loading guides: {}", err);
                toasts.error(format!("Failed to load {}!", guides.labels().plural));
            }
        }

        info!(
            "📦 Catalog has {} properties and {} guides",
            catalog.buildings.len(),
            catalog.guides.len()
        );
        catalog
    }

    pub fn home(&self) -> HomeView<'_> {
        let listings = &self.buildings[..self.buildings.len().min(HOME_LIMIT)];
        HomeView {
            listings,
            featured: listings.iter().filter(|b| b.featured).collect(),
        }
    }

    pub fn browse_buildings(&self, filter: &BuildingFilter, sort: BuildingSort) -> Vec<&Building> {
        let mut found = filter::apply(&self.buildings, filter);
        sort.sort(&mut found);
        found
    }

    pub fn browse_guides(&self, filter: &GuideFilter, sort: GuideSort) -> Vec<&Guide> {
        let mut found = filter::apply(&self.guides, filter);
        sort.sort(&mut found);
        found
    }

    pub fn guide(&self, id: i64) -> Option<&Guide> {
        self.guides.iter().find(|g| g.id == Some(id))
    }

    /// The guide a listing names, when it names one we know.
    pub fn guide_for(&self, building: &Building) -> Option<&Guide> {
        building.guide_id.and_then(|id| self.guide(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::models::BuildingType;
    use crate::panel::Choice;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_home_caps_listings_and_picks_featured() {
        let buildings = (1..=25)
            .map(|i| Building {
                id: Some(i),
                featured: i % 10 == 0,
                ..Default::default()
            })
            .collect();
        let catalog = Catalog {
            buildings,
            guides: Vec::new(),
        };
        let home = catalog.home();
        assert_eq!(home.listings.len(), HOME_LIMIT);
        let featured: Vec<_> = home.featured.iter().map(|b| b.id).collect();
        assert_eq!(featured, vec![Some(10), Some(20)]);
    }

    #[test]
    fn test_browse_filters_then_sorts() {
        let catalog = Catalog {
            buildings: vec![
                Building {
                    name: "Oak Villa".into(),
                    city: "Pune".into(),
                    price: 12_000_000.0,
                    ..Default::default()
                },
                Building {
                    name: "Lake Condo".into(),
                    city: "Pune".into(),
                    kind: BuildingType::Condo,
                    price: 3_500_000.0,
                    ..Default::default()
                },
                Building {
                    name: "Palm Grove".into(),
                    city: "Goa".into(),
                    price: 800_000.0,
                    ..Default::default()
                },
            ],
            guides: Vec::new(),
        };
        let filter = BuildingFilter {
            query: "pune".into(),
            ..Default::default()
        };
        let found = catalog.browse_buildings(&filter, BuildingSort::PriceLow);
        let names: Vec<_> = found.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Lake Condo", "Oak Villa"]);

        let filter = BuildingFilter {
            price: Choice::Only(crate::panel::PriceRange::From500kTo1m),
            ..Default::default()
        };
        assert_eq!(
            catalog.browse_buildings(&filter, BuildingSort::Name)[0].name,
            "Palm Grove"
        );
    }

    #[test]
    fn test_guide_for_building() {
        let catalog = Catalog {
            buildings: Vec::new(),
            guides: vec![Guide {
                id: Some(3),
                name: "Meera".into(),
                ..Default::default()
            }],
        };
        let listed = Building {
            guide_id: Some(3),
            ..Default::default()
        };
        assert_eq!(catalog.guide_for(&listed).unwrap().name, "Meera");
        assert!(catalog.guide_for(&Building::default()).is_none());
    }

    #[tokio::test]
    async fn test_fetch_keeps_what_loaded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/buildings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "building_id": 1, "name": "Oak Villa" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/guides"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let mut toasts = ToastSlot::default();
        let catalog = Catalog::fetch(
            &BuildingsApi::new(client.clone()),
            &GuidesApi::new(client),
            &mut toasts,
        )
        .await;
        assert_eq!(catalog.buildings.len(), 1);
        assert!(catalog.guides.is_empty());
        assert_eq!(toasts.visible().unwrap().message, "Failed to load guides!");
    }
}
