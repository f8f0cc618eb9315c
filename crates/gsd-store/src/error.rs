use thiserror::Error;

/// Failure reading or writing the status database.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    /// A row exists but one of its columns cannot be interpreted.
    #[error("corrupt status row for control '{control_id}': {reason}")]
    CorruptRow { control_id: String, reason: String },
}
