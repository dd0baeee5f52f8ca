use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{BuildingSort, GuideSort};
use crate::models::{Availability, BuildingType};
use crate::panel::{BuildingFilter, Choice, GuideFilter, PriceRange, Specialization, UserFilter};

#[derive(Parser, Debug)]
#[command(name = "estate")]
#[command(about = "Browse property listings and manage the listing backend")]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "ESTATE_API_URL")]
    pub api_url: Option<String>,

    /// Where the login is remembered
    #[arg(long, global = true, env = "ESTATE_SESSION_PATH")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Create an account
    Register(RegisterArgs),
    /// Show the logged-in user and role
    Whoami,
    /// Change your email, phone or password
    Profile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Featured and latest listings
    Home,
    /// Public listings and guide directory
    #[command(subcommand)]
    Browse(BrowseCommand),
    /// Admin panels (admin role required)
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(short, long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    /// Accept the terms and conditions
    #[arg(long)]
    pub agree: bool,
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommand {
    /// Search and sort listings
    Buildings {
        #[command(flatten)]
        filter: BuildingFilterArgs,
        /// name, price-low, price-high, bedrooms or area
        #[arg(long, default_value = "name")]
        sort: BuildingSort,
    },
    /// One listing in detail
    Building { id: i64 },
    /// Search and sort guides
    Guides {
        #[command(flatten)]
        filter: GuideFilterArgs,
        /// rating, experience or name
        #[arg(long, default_value = "rating")]
        sort: GuideSort,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Counts and total listing value
    Dashboard,
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Guides(GuidesCommand),
    #[command(subcommand)]
    Buildings(BuildingsCommand),
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        /// Matches username or email
        #[arg(short, long, default_value = "")]
        search: String,
    },
    Add(RecordArgs),
    Edit {
        username: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    Delete {
        username: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum GuidesCommand {
    List {
        #[command(flatten)]
        filter: GuideFilterArgs,
    },
    Add(RecordArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        record: RecordArgs,
    },
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum BuildingsCommand {
    List {
        #[command(flatten)]
        filter: BuildingFilterArgs,
    },
    Add(RecordArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        record: RecordArgs,
    },
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Field assignment, repeatable: --set name="Oak Villa" --set price=4500000
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct BuildingFilterArgs {
    /// Matches name, city or state
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// house, apartment, condo, townhouse or all
    #[arg(long = "type", default_value = "all")]
    pub kind: Choice<BuildingType>,
    /// available, pending, sold or all
    #[arg(long, default_value = "all")]
    pub availability: Choice<Availability>,
    /// 0-500000, 500000-1000000, 1000000+ or all
    #[arg(long, default_value = "all")]
    pub price: Choice<PriceRange>,
}

impl BuildingFilterArgs {
    pub fn to_filter(&self) -> BuildingFilter {
        BuildingFilter {
            query: self.search.clone(),
            kind: self.kind.clone(),
            availability: self.availability.clone(),
            price: self.price.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct GuideFilterArgs {
    /// Matches specialization, name, city or state
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// e.g. "luxury homes", "commercial", "first-time buyers" or all
    #[arg(long, default_value = "all")]
    pub specialization: Choice<Specialization>,
}

impl GuideFilterArgs {
    pub fn to_filter(&self) -> GuideFilter {
        GuideFilter {
            query: self.search.clone(),
            specialization: self.specialization.clone(),
        }
    }
}

pub fn user_filter(search: &str) -> UserFilter {
    UserFilter {
        query: search.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_building_filters() {
        let cli = Cli::try_parse_from([
            "estate", "browse", "buildings", "--type", "Condo", "--price", "1000000+", "--sort",
            "price-high",
        ])
        .unwrap();
        let Command::Browse(BrowseCommand::Buildings { filter, sort }) = cli.command else {
            panic!("parsed into the wrong command");
        };
        assert_eq!(sort, BuildingSort::PriceHigh);
        let filter = filter.to_filter();
        assert_eq!(filter.kind, Choice::Only(BuildingType::Condo));
        assert_eq!(filter.price, Choice::Only(PriceRange::Over1m));
        assert_eq!(filter.availability, Choice::All);
    }

    #[test]
    fn test_parse_admin_edit() {
        let cli = Cli::try_parse_from([
            "estate", "admin", "buildings", "edit", "7", "--set", "price=4500000", "--set",
            "featured=yes",
        ])
        .unwrap();
        let Command::Admin(AdminCommand::Buildings(BuildingsCommand::Edit { id, record })) =
            cli.command
        else {
            panic!("parsed into the wrong command");
        };
        assert_eq!(id, 7);
        assert_eq!(record.fields, vec!["price=4500000", "featured=yes"]);
    }

    #[test]
    fn test_bad_price_range_is_rejected() {
        assert!(Cli::try_parse_from(["estate", "browse", "buildings", "--price", "cheap"]).is_err());
    }
}
