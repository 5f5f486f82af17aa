// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Guildhall";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "guildhall";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".guildhall";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "guildhall.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "GUILDHALL_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "GUILDHALL_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "GUILDHALL_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "GUILDHALL_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "GUILDHALL_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 6742;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "GUILDHALL_DATA_DIR";

/// Environment variable to override the database file path
pub const ENV_DATABASE_PATH: &str = "GUILDHALL_DATABASE_PATH";

/// Environment variable for the connection pool size
pub const ENV_DATABASE_MAX_CONNECTIONS: &str = "GUILDHALL_DATABASE_MAX_CONNECTIONS";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "guildhall.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 8;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -16000 = 16MB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for API requests (64 KB, player bodies are tiny)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Shutdown
// =============================================================================

/// Time allowed for background tasks to finish after a shutdown signal
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
