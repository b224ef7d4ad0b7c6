use std::time::Duration;

/// Bound on establishing the FTP control connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Credentials for anonymous FTP login
pub const ANONYMOUS_USER: &str = "anonymous";
pub const ANONYMOUS_PASSWORD: &str = "anonymous@";
