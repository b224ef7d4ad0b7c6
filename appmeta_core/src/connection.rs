use crate::error::AppMetaError;

/// Root of the per-application metadata directories on the console
pub const APPMETA_ROOT: &str = "/user/appmeta";

/// Connection parameters as entered in the form.
///
/// Fields are kept raw; trimming and case normalization happen on access so the
/// form can round-trip whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: String,
    pub app_id: String,
}

impl ConnectionParams {
    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            app_id: app_id.into(),
        }
    }

    pub fn host(&self) -> &str {
        self.host.trim()
    }

    pub fn port(&self) -> &str {
        self.port.trim()
    }

    /// Trimmed, uppercased application identifier (e.g. `CUSA00001`)
    pub fn app_id(&self) -> String {
        self.app_id.trim().to_uppercase()
    }

    /// All three fields must be non-empty after trimming
    pub fn validate(&self) -> Result<(), AppMetaError> {
        if self.host().is_empty() || self.port().is_empty() || self.app_id().is_empty() {
            return Err(AppMetaError::IncompleteData);
        }
        Ok(())
    }

    pub fn port_number(&self) -> Result<u16, AppMetaError> {
        self.port()
            .parse::<u16>()
            .map_err(|_| AppMetaError::InvalidPort(self.port().to_string()))
    }

    /// `host:port` for display and logging
    pub fn display_addr(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    /// Remote directory holding the application's metadata images
    pub fn remote_dir(&self) -> String {
        format!("{}/{}", APPMETA_ROOT, self.app_id())
    }
}
