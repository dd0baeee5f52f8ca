use anyhow::Result;
use tracing::info;

use super::{confirm_prompt, flush_toast, App};
use crate::api::{CrudResource, UsersApi};
use crate::catalog::{Catalog, DashboardStats};
use crate::cli::{AdminCommand, BuildingsCommand, GuidesCommand, UsersCommand};
use crate::form;
use crate::models::User;
use crate::panel::{LoadState, Panel, ToastSlot};
use crate::render;
use crate::session::{require, Capability};

/// One panel interaction, whatever the resource.
enum PanelAction<K, F> {
    List(F),
    Add(Vec<String>),
    Edit(K, Vec<String>),
    Delete { key: K, yes: bool },
}

pub async fn run(app: &mut App, command: AdminCommand) -> Result<bool> {
    let session = app.session().await?;
    let capability = match &command {
        AdminCommand::Dashboard => Capability::ViewDashboard,
        AdminCommand::Users(_) => Capability::ManageUsers,
        AdminCommand::Guides(_) => Capability::ManageGuides,
        AdminCommand::Buildings(_) => Capability::ManageBuildings,
    };
    let admin = require(session.as_ref(), capability)?;
    info!("🔑 {} as {}", capability, admin.username());

    match command {
        AdminCommand::Dashboard => Ok(dashboard(app).await),
        AdminCommand::Users(command) => {
            let action = match command {
                UsersCommand::List { search } => {
                    PanelAction::List(crate::cli::user_filter(&search))
                }
                UsersCommand::Add(record) => PanelAction::Add(record.fields),
                UsersCommand::Edit { username, record } => {
                    PanelAction::Edit(username, record.fields)
                }
                UsersCommand::Delete { username, confirm } => PanelAction::Delete {
                    key: username,
                    yes: confirm.yes,
                },
            };
            let panel = Panel::new(app.users.clone()).with_toast_ttl(app.config.toast_ttl);
            run_panel(panel, action, render::users_table).await
        }
        AdminCommand::Guides(command) => {
            let action = match command {
                GuidesCommand::List { filter } => PanelAction::List(filter.to_filter()),
                GuidesCommand::Add(record) => PanelAction::Add(record.fields),
                GuidesCommand::Edit { id, record } => PanelAction::Edit(id, record.fields),
                GuidesCommand::Delete { id, confirm } => PanelAction::Delete {
                    key: id,
                    yes: confirm.yes,
                },
            };
            let panel = Panel::new(app.guides.clone()).with_toast_ttl(app.config.toast_ttl);
            run_panel(panel, action, render::guides_table).await
        }
        AdminCommand::Buildings(command) => {
            let action = match command {
                BuildingsCommand::List { filter } => PanelAction::List(filter.to_filter()),
                BuildingsCommand::Add(record) => PanelAction::Add(record.fields),
                BuildingsCommand::Edit { id, record } => PanelAction::Edit(id, record.fields),
                BuildingsCommand::Delete { id, confirm } => PanelAction::Delete {
                    key: id,
                    yes: confirm.yes,
                },
            };
            let panel = Panel::new(app.buildings.clone()).with_toast_ttl(app.config.toast_ttl);
            run_panel(panel, action, render::buildings_table).await
        }
    }
}

async fn dashboard(app: &mut App) -> bool {
    let users = load_users(&app.users, &mut app.toasts).await;
    let catalog = Catalog::fetch(&app.buildings, &app.guides, &mut app.toasts).await;
    let ok = flush_toast(&mut app.toasts);
    let stats = DashboardStats::collect(&users, &catalog.guides, &catalog.buildings);
    println!("{}", render::dashboard(&stats));
    ok
}

async fn load_users(users: &UsersApi, toasts: &mut ToastSlot) -> Vec<User> {
    let mut panel = Panel::new(users.clone());
    panel.load().await;
    if let Some(toast) = panel.toasts_mut().take() {
        toasts.show(toast.kind, toast.message);
    }
    panel.records().to_vec()
}

async fn run_panel<R, Render>(
    mut panel: Panel<R>,
    action: PanelAction<R::Key, R::Filter>,
    render_list: Render,
) -> Result<bool>
where
    R: CrudResource,
    Render: Fn(&[&R::Record]) -> String,
{
    match action {
        PanelAction::List(filter) => {
            *panel.filter_mut() = filter;
            panel.load().await;
            let ok = flush_toast(panel.toasts_mut());
            let visible = panel.visible();
            println!(
                "{} of {} {}",
                visible.len(),
                panel.records().len(),
                panel.resource().labels().plural
            );
            println!("{}", render_list(visible.as_slice()));
            Ok(ok)
        }
        PanelAction::Add(fields) => {
            let fields = form::parse_assignments(&fields)?;
            panel.open_create();
            if let Err(err) = panel.set_fields(fields) {
                panel.close_modal();
                return Err(err.into());
            }
            panel.submit().await;
            Ok(flush_toast(panel.toasts_mut()))
        }
        PanelAction::Edit(key, fields) => {
            let fields = form::parse_assignments(&fields)?;
            panel.load().await;
            if panel.state() == LoadState::LoadFailed {
                flush_toast(panel.toasts_mut());
                return Ok(false);
            }
            if !panel.open_edit_key(&key) {
                let labels = panel.resource().labels();
                println!("No {} '{}' found", labels.noun, key);
                return Ok(false);
            }
            if let Err(err) = panel.set_fields(fields) {
                panel.close_modal();
                return Err(err.into());
            }
            panel.submit().await;
            Ok(flush_toast(panel.toasts_mut()))
        }
        PanelAction::Delete { key, yes } => {
            panel.request_delete(key);
            let question = panel.confirm_message().unwrap_or_default().to_string();
            if yes || confirm_prompt(&question).await? {
                panel.confirm().await;
                Ok(flush_toast(panel.toasts_mut()))
            } else {
                panel.cancel_confirm();
                println!("Cancelled");
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, BuildingsApi};
    use crate::config::Config;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_edit_loads_then_puts_merged_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/buildings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "buildingId": 7, "name": "Oak Villa", "city": "Pune", "price": 9000000 }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/buildings/7"))
            .and(body_partial_json(json!({
                "buildingId": 7, "name": "Oak Villa", "city": "Pune", "price": 8500000.0, "featured": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("Building updated"))
            .expect(1)
            .mount(&server)
            .await;

        let panel = Panel::new(BuildingsApi::new(ApiClient::new(&server.uri(), None).unwrap()));
        let ok = run_panel(
            panel,
            PanelAction::Edit(7, vec!["price=8500000".into(), "featured=yes".into()]),
            render::buildings_table,
        )
        .await
        .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn test_delete_with_yes_skips_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/buildings/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Building deleted"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/buildings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let panel = Panel::new(BuildingsApi::new(ApiClient::new(&server.uri(), None).unwrap()));
        let ok = run_panel(panel, PanelAction::Delete { key: 3, yes: true }, render::buildings_table)
        .await
        .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn test_list_failure_fails_even_after_toast_expires() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/buildings"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let panel = Panel::new(BuildingsApi::new(ApiClient::new(&server.uri(), None).unwrap()))
            .with_toast_ttl(Duration::ZERO);
        let ok = run_panel(
            panel,
            PanelAction::List(Default::default()),
            render::buildings_table,
        )
        .await
        .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_dashboard_reports_user_load_failure_behind_slow_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/buildings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(1200)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/guides"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let uri = server.uri();
        let config = Config::from_lookup(|key| match key {
            "ESTATE_API_URL" => Some(uri.clone()),
            "ESTATE_TOAST_SECS" => Some("1".to_string()),
            _ => None,
        })
        .unwrap();
        let mut app = App::new(config).unwrap();
        assert!(!dashboard(&mut app).await);
    }

    #[tokio::test]
    async fn test_bad_assignment_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let panel = Panel::new(BuildingsApi::new(ApiClient::new(&server.uri(), None).unwrap()));
        let result = run_panel(panel, PanelAction::Add(vec!["colour=red".into()]), render::buildings_table)
        .await;
        assert!(result.is_err());
    }
}
