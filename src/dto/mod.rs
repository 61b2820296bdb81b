use serde::{Deserialize, Deserializer};

pub mod accessories;
pub mod auth;
pub mod colors;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod reviews;
pub mod users;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
