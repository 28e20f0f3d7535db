//! Common constants used throughout opfill.

/// Token file looked up in the home directory when no token is given
pub const DEFAULT_TOKEN_FILE: &str = ".1passtoken";

/// Environment variable the 1Password CLI reads a service account token from
pub const TOKEN_ENV: &str = "OP_SERVICE_ACCOUNT_TOKEN";

/// The 1Password CLI executable
pub const OP_BINARY: &str = "op";

/// Custom field of a 1Password item holding the JSON payload
pub const PAYLOAD_FIELD: &str = "json";
