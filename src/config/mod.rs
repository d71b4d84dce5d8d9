//! Environment configuration
//!
//! Every variable is validated up front and all problems are reported
//! together, so a misconfigured process never gets as far as binding a port.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 3001;

/// Deployment mode, read from `NODE_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
    Staging,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
            Environment::Staging => "staging",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            "staging" => Ok(Environment::Staging),
            other => Err(format!(
                "expected one of development, production, test, staging (received '{}')",
                other
            )),
        }
    }
}

/// A single invalid or missing variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub variable: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variable, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment configuration: {}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

impl ConfigError {
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            ConfigError::Invalid(issues) => issues,
        }
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validated process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub mongodb_uri: String,
    pub client_url: String,
}

impl Config {
    /// Read and validate configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Validate configuration from an explicit set of variables
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut issues = Vec::new();

        let environment = match lookup("NODE_ENV") {
            None => Environment::default(),
            Some(raw) => raw.parse::<Environment>().unwrap_or_else(|message| {
                issues.push(ConfigIssue {
                    variable: "NODE_ENV",
                    message,
                });
                Environment::default()
            }),
        };

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => parse_port(&raw).unwrap_or_else(|message| {
                issues.push(ConfigIssue {
                    variable: "PORT",
                    message,
                });
                DEFAULT_PORT
            }),
        };

        let mongodb_uri = required_url(&lookup, "MONGODB_URI", &mut issues);
        let client_url = required_url(&lookup, "CLIENT_URL", &mut issues);

        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }

        Ok(Self {
            environment,
            port,
            mongodb_uri,
            client_url,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("expected an integer port (received '{}')", raw))?;
    if !(1..=65535).contains(&value) {
        return Err(format!("port must be between 1 and 65535 (received {})", value));
    }
    // Range checked above
    Ok(value as u16)
}

fn required_url(
    lookup: &impl Fn(&str) -> Option<String>,
    variable: &'static str,
    issues: &mut Vec<ConfigIssue>,
) -> String {
    match lookup(variable) {
        None => {
            issues.push(ConfigIssue {
                variable,
                message: "Required".to_string(),
            });
            String::new()
        }
        Some(raw) => match Url::parse(&raw) {
            Ok(_) => raw,
            Err(e) => {
                issues.push(ConfigIssue {
                    variable,
                    message: format!("Invalid url: {}", e),
                });
                String::new()
            }
        },
    }
}
