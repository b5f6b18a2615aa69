use std::time::Duration;

/// Where and how patiently to reach the classification service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Scheme, host and port, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    pub predict_path: String,
    /// Whole-request timeout; expiry is reported as a connectivity error
    pub timeout: Duration,
    /// Honour `HTTP_PROXY`/`NO_PROXY` from the environment
    pub use_system_proxy: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            predict_path: "/predict".to_string(),
            timeout: Duration::from_secs(10),
            use_system_proxy: true,
        }
    }
}

impl ClassifierConfig {
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.predict_path.trim_start_matches('/')
        )
    }
}

#[derive(Default)]
pub struct ClassifierConfigBuilder {
    base_url: Option<String>,
    predict_path: Option<String>,
    timeout: Option<Duration>,
    use_system_proxy: Option<bool>,
}

impl ClassifierConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn predict_path(mut self, path: impl Into<String>) -> Self {
        self.predict_path = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn use_system_proxy(mut self, enable: bool) -> Self {
        self.use_system_proxy = Some(enable);
        self
    }

    pub fn build(self) -> ClassifierConfig {
        let default = ClassifierConfig::default();
        ClassifierConfig {
            base_url: self.base_url.unwrap_or(default.base_url),
            predict_path: self.predict_path.unwrap_or(default.predict_path),
            timeout: self.timeout.unwrap_or(default.timeout),
            use_system_proxy: self.use_system_proxy.unwrap_or(default.use_system_proxy),
        }
    }
}
