use thiserror::Error;

/// Errors that can arise while parsing offers or persisting the registry.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Item text did not split into a name and an amount.
    #[error("expected '<item> <amount>', got '{0}'")]
    InvalidItemText(String),

    /// Amount token was not an integer in the stackable range.
    #[error("item amount must be a whole number from 1 to 64, got '{0}'")]
    AmountOutOfRange(String),

    /// Item name resolved to nothing in the catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Sign lines do not carry the want/give offer layout.
    #[error("sign does not describe a want/give offer")]
    InvalidOfferFormat,

    /// No chest beneath the sign to back the shop.
    #[error("no chest found below the sign")]
    ChestNotFound,

    /// Wrapper around IO errors from the shop document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json document errors.
    #[error("shop document error: {0}")]
    Json(#[from] serde_json::Error),
}
