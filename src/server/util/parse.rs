use std::str::FromStr;

use crate::{model::enums::Multimedia, server::error::internal::InternalError};

/// Parses an enumerated value read from a string column.
///
/// # Arguments
/// - `column` - Table and column the value was read from, used in the error
/// - `value` - The stored string
///
/// # Returns
/// - `Ok(T)` - Successfully parsed value
/// - `Err(InternalError::InvalidStoredValue)` - The stored string is not a known variant
pub fn parse_stored<T>(column: &'static str, value: &str) -> Result<T, InternalError>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(|reason| InternalError::InvalidStoredValue { column, reason })
}

/// Parses the comma separated multimedia column of a car.
///
/// An empty string yields an empty list.
pub fn parse_multimedia(value: &str) -> Result<Vec<Multimedia>, InternalError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_stored("car.multimedia", item))
        .collect()
}

/// Joins multimedia flags into their stored form, without duplicates.
pub fn join_multimedia(values: &[Multimedia]) -> String {
    let mut stored: Vec<&str> = Vec::with_capacity(values.len());
    for value in values {
        if !stored.contains(&value.as_str()) {
            stored.push(value.as_str());
        }
    }
    stored.join(",")
}
