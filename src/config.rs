/// Configuration constants for the REST APIs
pub mod api {
    /// Query parameter carrying the pagination cursor
    pub const START_PARAM: &str = "_start";

    /// Usage Reports v4 service
    pub mod usage_reports {
        /// Default service URL
        pub const DEFAULT_URL: &str = "https://billing.cloud.ibm.com";

        /// Default service name (prefix for external config keys)
        pub const SERVICE_NAME: &str = "usage_reports";

        /// Account-scoped usage API prefix
        pub const ACCOUNTS: &str = "/v4/accounts";

        /// Snapshot configuration endpoint
        pub const SNAPSHOT_CONFIG: &str = "/v1/billing-reports-snapshot-config";

        /// Snapshot listing endpoint
        pub const SNAPSHOTS: &str = "/v1/billing-reports-snapshots";
    }

    /// User Management v1 service
    pub mod user_management {
        /// Default service URL
        pub const DEFAULT_URL: &str = "https://user-management.cloud.ibm.com";

        /// Default service name (prefix for external config keys)
        pub const SERVICE_NAME: &str = "user_management";

        /// v2 account-scoped API prefix
        pub const ACCOUNTS_V2: &str = "/v2/accounts";

        /// v3 account-scoped API prefix
        pub const ACCOUNTS_V3: &str = "/v3/accounts";

        /// Invitation acceptance endpoint
        pub const ACCEPT: &str = "/v2/users/accept";
    }
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable naming an explicit credentials file
    pub const FILE_ENV_VAR: &str = "IBM_CREDENTIALS_FILE";

    /// Default credentials file name (looked up in cwd, then HOME)
    pub const FILE_NAME: &str = "ibm-credentials.env";

    /// Supported values for `<SERVICE>_AUTH_TYPE`
    pub const AUTH_TYPES: &[&str] = &["noauth", "bearertoken", "basic"];
}

/// HTTP client tuning
pub mod http {
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Idle pooled connections kept per host
    pub const POOL_MAX_IDLE_PER_HOST: usize = 20;
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Environment variable for the CLI bearer token
    pub const TOKEN_ENV_VAR: &str = "PSCTL_TOKEN";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_are_https() {
        assert!(api::usage_reports::DEFAULT_URL.starts_with("https://"));
        assert!(api::user_management::DEFAULT_URL.starts_with("https://"));
    }

    #[test]
    fn test_api_paths_format() {
        assert!(api::usage_reports::ACCOUNTS.starts_with('/'));
        assert!(api::usage_reports::SNAPSHOTS.starts_with('/'));
        assert!(api::user_management::ACCOUNTS_V2.starts_with('/'));
        assert!(!api::user_management::ACCOUNTS_V3.ends_with('/'));
    }

    #[test]
    fn test_auth_types_lowercase() {
        for t in credentials::AUTH_TYPES {
            assert_eq!(*t, t.to_lowercase());
        }
    }
}
