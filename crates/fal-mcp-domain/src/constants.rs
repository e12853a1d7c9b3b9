//! Domain constants

/// Environment variable holding the fal.ai credential
pub const FAL_KEY_ENV: &str = "FAL_KEY";

/// Queue status reported once a job has finished
pub const QUEUE_STATUS_COMPLETED: &str = "COMPLETED";

/// Message used when a tool needs the credential and none is configured
pub const MISSING_CREDENTIAL_MESSAGE: &str = "FAL_KEY environment variable not set";
