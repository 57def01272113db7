use thiserror::Error;

/// A required input was absent or malformed.
///
/// The `Display` text of each variant is shown to the user verbatim, inside the
/// handler's error page or the `message` of a JSON acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Purchase Order ID (poId) was not provided as a URL parameter.")]
    MissingPoIdParameter,
    #[error("Purchase Order ID (poId) was not provided.")]
    MissingPoId,
    #[error("You must select a defective item to continue.")]
    MissingItem,
    #[error("The selected item data was malformed. Please go back and try again.")]
    MalformedItem,
    #[error("You must select a fault issue to continue.")]
    MissingFaultIssue,
}

/// Failures of the report button.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Could not get the Purchase Order ID.")]
    MissingPoId,
    #[error("unknown trigger transport `{0}` (expected `navigate` or `async`)")]
    UnknownTransport(String),
    #[error("the defect handler returned an unreadable response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
