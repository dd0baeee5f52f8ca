mod building;
mod guide;
mod user;

pub use building::{Availability, Building, BuildingType};
pub use guide::Guide;
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
///
/// The backend serializes unset entity columns as `null`, which would
/// otherwise fail the whole list for a single sparse record.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
