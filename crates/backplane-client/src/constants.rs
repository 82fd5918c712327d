//! Backplane 2.0 wire constants
//!
//! Endpoint paths are relative to the configured server URL.

/// Token endpoint for client-credential grants, refreshes and regular tokens
pub const TOKEN_PATH: &str = "/v2/token";

/// Endpoint for publishing a single message
pub const MESSAGE_PATH: &str = "/v2/message";

/// Endpoint for the first poll; later polls follow `nextURL`
pub const MESSAGES_PATH: &str = "/v2/messages";

/// JSONP callback name requested for regular tokens. The server wraps the
/// token JSON as `f(...)`.
pub const REGULAR_TOKEN_CALLBACK: &str = "f";

/// Query parameter for long-poll duration in seconds
pub const BLOCK_PARAM: &str = "block";

/// Body type of token endpoint requests
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body type of posted messages
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP status of a successful token or poll response
pub const STATUS_OK: u16 = 200;

/// HTTP status of a successfully posted message
pub const STATUS_CREATED: u16 = 201;
