pub mod buildings;
pub mod client;
pub mod error;
pub mod guides;
pub mod traits;
pub mod types;
pub mod users;

pub use buildings::BuildingsApi;
pub use client::ApiClient;
pub use error::ApiError;
pub use guides::GuidesApi;
pub use traits::CrudResource;
pub use types::{LoginOutcome, LoginRequest, ProfileEdit, Registration};
pub use users::UsersApi;
