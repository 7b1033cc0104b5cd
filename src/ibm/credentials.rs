//! External service configuration from environment and credentials files

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::credentials;
use crate::error::{PsError, Result};
use crate::ibm::{Authenticator, ServiceOptions};

/// Resolves `ServiceOptions` for one service name
///
/// Properties are keyed `<SERVICE_NAME>_<PROPERTY>` with the service name
/// upper-cased, e.g. `USAGE_REPORTS_URL` or `USER_MANAGEMENT_AUTH_TYPE`.
pub struct ConfigResolver {
    service_name: String,
}

impl ConfigResolver {
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
        }
    }

    /// Resolve options with fallback:
    /// 1. CLI arguments (if provided)
    /// 2. Environment variables
    /// 3. Credentials file (`$IBM_CREDENTIALS_FILE`, `./ibm-credentials.env`, `~/ibm-credentials.env`)
    pub fn resolve(&self, cli_url: Option<&str>, cli_token: Option<&str>) -> Result<ServiceOptions> {
        let env: HashMap<String, String> = std::env::vars().collect();
        self.resolve_from(&env, cli_url, cli_token)
    }

    fn resolve_from(
        &self,
        env: &HashMap<String, String>,
        cli_url: Option<&str>,
        cli_token: Option<&str>,
    ) -> Result<ServiceOptions> {
        if cli_url.is_some() && cli_token.is_some() {
            debug!("Using URL and token from CLI arguments");
            return self.build_options(&HashMap::new(), cli_url, cli_token);
        }

        let mut props = self.properties_from(env);

        if props.is_empty() {
            if let Some(path) = Self::credentials_file_path(env) {
                debug!("Reading credentials file {}", path.display());
                let content = fs::read_to_string(&path).map_err(|e| {
                    PsError::Credentials(format!(
                        "Could not read credentials file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                props = self.properties_from(&parse_env_file(&content));
            }
        } else {
            debug!("Using {} configuration from environment", self.prefix());
        }

        self.build_options(&props, cli_url, cli_token)
    }

    /// Combine CLI overrides with resolved properties
    fn build_options(
        &self,
        props: &HashMap<String, String>,
        cli_url: Option<&str>,
        cli_token: Option<&str>,
    ) -> Result<ServiceOptions> {
        let mut options = ServiceOptions::new(&self.service_name);

        options.url = cli_url
            .map(str::to_string)
            .or_else(|| props.get("URL").cloned());

        options.authenticator = match cli_token {
            Some(token) => {
                debug!("Using bearer token from CLI argument");
                Authenticator::BearerToken(token.to_string())
            }
            None => self.authenticator_from(props)?,
        };

        Ok(options)
    }

    /// Build an authenticator from `AUTH_TYPE` and its companion properties
    fn authenticator_from(&self, props: &HashMap<String, String>) -> Result<Authenticator> {
        let auth_type = match props.get("AUTH_TYPE") {
            Some(t) => t.to_lowercase(),
            None if props.contains_key("BEARER_TOKEN") => "bearertoken".to_string(),
            None if props.contains_key("USERNAME") => "basic".to_string(),
            None => {
                return Err(PsError::CredentialsNotFound(
                    self.not_found_message(),
                ))
            }
        };

        let required = |key: &str| {
            props.get(key).cloned().ok_or_else(|| {
                PsError::Config(format!(
                    "{}_AUTH_TYPE={} requires {}_{}",
                    self.prefix(),
                    auth_type,
                    self.prefix(),
                    key
                ))
            })
        };

        match auth_type.as_str() {
            "noauth" => Ok(Authenticator::NoAuth),
            "bearertoken" => Ok(Authenticator::BearerToken(required("BEARER_TOKEN")?)),
            "basic" => Ok(Authenticator::Basic {
                username: required("USERNAME")?,
                password: required("PASSWORD")?,
            }),
            other => Err(PsError::Config(format!(
                "Unsupported authentication type '{}' (expected one of: {})",
                other,
                credentials::AUTH_TYPES.join(", ")
            ))),
        }
    }

    /// Collect properties for this service, stripping the name prefix
    fn properties_from(&self, source: &HashMap<String, String>) -> HashMap<String, String> {
        let prefix = format!("{}_", self.prefix());
        source
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(&prefix)
                    .filter(|key| !key.is_empty())
                    .map(|key| (key.to_string(), v.clone()))
            })
            .collect()
    }

    fn prefix(&self) -> String {
        self.service_name.to_uppercase().replace('-', "_")
    }

    fn not_found_message(&self) -> String {
        format!(
            "No configuration found for service '{}'. Provide one of:\n\
             \n\
             1. CLI arguments:     psctl --url <URL> --token <TOKEN>\n\
             2. Environment vars:  export {}_AUTH_TYPE=bearertoken {}_BEARER_TOKEN=<TOKEN>\n\
             3. Credentials file:  {} (or set {})",
            self.service_name,
            self.prefix(),
            self.prefix(),
            credentials::FILE_NAME,
            credentials::FILE_ENV_VAR
        )
    }

    /// First existing credentials file in lookup order
    fn credentials_file_path(env: &HashMap<String, String>) -> Option<PathBuf> {
        if let Some(path) = env.get(credentials::FILE_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let cwd = Path::new(credentials::FILE_NAME).to_path_buf();
        if cwd.is_file() {
            return Some(cwd);
        }
        dirs::home_dir()
            .map(|p| p.join(credentials::FILE_NAME))
            .filter(|p| p.is_file())
    }
}

impl ServiceOptions {
    /// Resolve options for `service_name` from environment and credentials file
    pub fn from_external_config(service_name: &str) -> Result<Self> {
        ConfigResolver::new(service_name).resolve(None, None)
    }
}

/// Parse `KEY=value` lines, ignoring blanks and `#` comments
fn parse_env_file(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_properties_strip_prefix() {
        let resolver = ConfigResolver::new("usage_reports");
        let env = props(&[
            ("USAGE_REPORTS_URL", "https://example.com"),
            ("USAGE_REPORTS_AUTH_TYPE", "noauth"),
            ("USER_MANAGEMENT_URL", "https://other.example.com"),
            ("PATH", "/usr/bin"),
        ]);
        let found = resolver.properties_from(&env);
        assert_eq!(found.len(), 2);
        assert_eq!(found.get("URL").unwrap(), "https://example.com");
        assert_eq!(found.get("AUTH_TYPE").unwrap(), "noauth");
    }

    #[test]
    fn test_cli_arguments_take_precedence() {
        let resolver = ConfigResolver::new("usage_reports");
        let found = props(&[("URL", "https://env.example.com"), ("AUTH_TYPE", "noauth")]);
        let options = resolver
            .build_options(&found, Some("https://cli.example.com"), Some("cli-token"))
            .unwrap();
        assert_eq!(options.url.as_deref(), Some("https://cli.example.com"));
        assert_eq!(
            options.authenticator,
            Authenticator::BearerToken("cli-token".to_string())
        );
    }

    #[test]
    fn test_noauth_from_properties() {
        let resolver = ConfigResolver::new("usage_reports");
        let found = props(&[("URL", "https://env.example.com"), ("AUTH_TYPE", "NOAUTH")]);
        let options = resolver.build_options(&found, None, None).unwrap();
        assert_eq!(options.service_name, "usage_reports");
        assert_eq!(options.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(options.authenticator, Authenticator::NoAuth);
    }

    #[test]
    fn test_bearer_inferred_without_auth_type() {
        let resolver = ConfigResolver::new("user_management");
        let found = props(&[("BEARER_TOKEN", "abc")]);
        let options = resolver.build_options(&found, None, None).unwrap();
        assert!(options.url.is_none());
        assert_eq!(
            options.authenticator,
            Authenticator::BearerToken("abc".to_string())
        );
    }

    #[test]
    fn test_basic_requires_password() {
        let resolver = ConfigResolver::new("user_management");
        let found = props(&[("AUTH_TYPE", "basic"), ("USERNAME", "alice")]);
        match resolver.build_options(&found, None, None) {
            Err(PsError::Config(msg)) => assert!(msg.contains("USER_MANAGEMENT_PASSWORD")),
            other => panic!("Expected PsError::Config, got {:?}", other),
        }
    }

    #[test]
    fn test_iam_rejected() {
        let resolver = ConfigResolver::new("usage_reports");
        let found = props(&[("AUTH_TYPE", "iam"), ("APIKEY", "xyz")]);
        match resolver.build_options(&found, None, None) {
            Err(PsError::Config(msg)) => assert!(msg.contains("iam")),
            other => panic!("Expected PsError::Config, got {:?}", other),
        }
    }

    #[test]
    fn test_nothing_configured() {
        let resolver = ConfigResolver::new("usage_reports");
        match resolver.build_options(&HashMap::new(), None, None) {
            Err(PsError::CredentialsNotFound(msg)) => {
                assert!(msg.contains("usage_reports"));
                assert!(msg.contains("USAGE_REPORTS_BEARER_TOKEN"));
                assert!(msg.contains("psctl --url"));
            }
            other => panic!("Expected PsError::CredentialsNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_env_file() {
        let content = "\n# comment\nUSAGE_REPORTS_URL = https://example.com/api?x=1\nUSAGE_REPORTS_AUTH_TYPE=noauth\nnot a property\n";
        let parsed = parse_env_file(content);
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed.get("USAGE_REPORTS_URL").unwrap(),
            "https://example.com/api?x=1"
        );
    }

    #[test]
    fn test_cli_arguments_skip_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.env");
        let env = props(&[(credentials::FILE_ENV_VAR, missing.to_str().unwrap())]);
        let resolver = ConfigResolver::new("user_management");

        let options = resolver
            .resolve_from(&env, Some("http://localhost:8080"), Some("cli-token"))
            .unwrap();
        assert_eq!(options.url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(
            options.authenticator,
            Authenticator::BearerToken("cli-token".to_string())
        );

        // With only one CLI value the file is still consulted
        assert!(matches!(
            resolver.resolve_from(&env, None, Some("cli-token")),
            Err(PsError::Credentials(_))
        ));
    }

    #[test]
    fn test_credentials_file_from_env_var() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "USER_MANAGEMENT_AUTH_TYPE=bearertoken").unwrap();
        writeln!(file, "USER_MANAGEMENT_BEARER_TOKEN=file-token").unwrap();

        let env = props(&[(
            credentials::FILE_ENV_VAR,
            file.path().to_str().unwrap(),
        )]);
        let path = ConfigResolver::credentials_file_path(&env).unwrap();
        assert_eq!(path, file.path());

        let resolver = ConfigResolver::new("user_management");
        let content = fs::read_to_string(path).unwrap();
        let found = resolver.properties_from(&parse_env_file(&content));
        let options = resolver.build_options(&found, None, None).unwrap();
        assert_eq!(
            options.authenticator,
            Authenticator::BearerToken("file-token".to_string())
        );
    }
}
