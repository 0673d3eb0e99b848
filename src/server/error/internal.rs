use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enumerated column holds a value the application does not know.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Invalid value stored in column '{column}': {reason}")]
    InvalidStoredValue {
        /// Table and column the value was read from
        column: &'static str,
        /// The parse error
        reason: String,
    },

    /// A row referenced by a foreign key was not found while assembling a response.
    #[error("Missing related {entity} {id}")]
    MissingRelation {
        /// Referenced entity name
        entity: &'static str,
        /// Referenced id
        id: i32,
    },
}
