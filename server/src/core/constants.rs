// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "LqlGate";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "lqlgate";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".lqlgate";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "lqlgate.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "LQLGATE_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "LQLGATE_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "LQLGATE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "LQLGATE_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "LQLGATE_LOG";

/// Environment variable for the trusted user header name
pub const ENV_USER_HEADER: &str = "LQLGATE_USER_HEADER";

// =============================================================================
// Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Header set by the fronting proxy with the authenticated user name
pub const DEFAULT_USER_HEADER: &str = "x-remote-user";

/// Request body limit (all routes are GET)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Maximum table name length accepted in paths
pub const MAX_TABLE_NAME_LENGTH: usize = 128;
