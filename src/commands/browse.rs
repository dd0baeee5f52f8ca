use super::{flush_toast, App};
use crate::catalog::{Catalog, GuideStats};
use crate::cli::BrowseCommand;
use crate::render;

async fn catalog(app: &mut App) -> Catalog {
    Catalog::fetch(&app.buildings, &app.guides, &mut app.toasts).await
}

pub async fn home(app: &mut App) -> bool {
    let catalog = catalog(app).await;
    let ok = flush_toast(&mut app.toasts);
    println!("{}", render::home(&catalog.home()));
    ok
}

pub async fn run(app: &mut App, command: BrowseCommand) -> bool {
    let catalog = catalog(app).await;
    let ok = flush_toast(&mut app.toasts);

    match command {
        BrowseCommand::Buildings { filter, sort } => {
            let found = catalog.browse_buildings(&filter.to_filter(), sort);
            println!("{} of {} properties", found.len(), catalog.buildings.len());
            println!("{}", render::buildings_table(&found));
            ok
        }
        BrowseCommand::Building { id } => {
            match catalog.buildings.iter().find(|b| b.id == Some(id)) {
                Some(building) => {
                    println!(
                        "{}",
                        render::building_card(building, catalog.guide_for(building))
                    );
                    ok
                }
                None => {
                    println!("No property with ID {}", id);
                    false
                }
            }
        }
        BrowseCommand::Guides { filter, sort } => {
            let found = catalog.browse_guides(&filter.to_filter(), sort);
            println!("{}", render::guide_stats(&GuideStats::collect(&catalog.guides)));
            println!(
                "{} agent{} found",
                found.len(),
                if found.len() == 1 { "" } else { "s" }
            );
            println!("{}", render::guides_table(&found));
            ok
        }
    }
}
