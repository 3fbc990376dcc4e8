//! Configuration Builder
//!
//! Fluent builder for client configuration.

use secrecy::SecretString;
use std::collections::HashMap;

use crate::error::{OidcError, OidcResult};
use crate::types::{
    ClientConfiguration, DEFAULT_REDIRECT_URI, DEFAULT_SCOPES, RESERVED_AUTHORIZATION_PARAMETERS,
};

/// Client configuration builder.
#[derive(Default)]
pub struct ClientConfigurationBuilder {
    discovery_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    redirect_uri: Option<String>,
    scopes: Option<Vec<String>>,
    resource: Option<String>,
    additional_parameters: HashMap<String, String>,
}

impl ClientConfigurationBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the discovery document URL.
    pub fn discovery_url(mut self, url: impl Into<String>) -> Self {
        self.discovery_url = Some(url.into());
        self
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set redirect URI.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Replace the requested scopes.
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Append a scope, starting from an empty list rather than the defaults.
    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.get_or_insert_with(Vec::new).push(scope.into());
        self
    }

    /// Set resource indicator.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Add an extra authorization request parameter.
    pub fn additional_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_parameters.insert(key.into(), value.into());
        self
    }

    /// Replace all extra authorization request parameters.
    pub fn additional_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.additional_parameters = parameters;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OidcResult<ClientConfiguration> {
        let discovery_url = self
            .discovery_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| OidcError::Configuration {
                message: "discovery_url is required".to_string(),
            })?;

        let client_id = self
            .client_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| OidcError::Configuration {
                message: "client_id is required".to_string(),
            })?;

        if let Some(key) = RESERVED_AUTHORIZATION_PARAMETERS
            .iter()
            .find(|key| self.additional_parameters.contains_key(**key))
        {
            return Err(OidcError::Configuration {
                message: format!("additional parameter '{}' is reserved", key),
            });
        }

        let scopes = self
            .scopes
            .unwrap_or_else(|| DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect());

        Ok(ClientConfiguration {
            discovery_url,
            client_id,
            client_secret: self.client_secret,
            redirect_uri: self
                .redirect_uri
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scopes,
            resource: self.resource,
            additional_parameters: self.additional_parameters,
        })
    }
}

impl ClientConfiguration {
    /// Creates a new configuration builder.
    pub fn builder() -> ClientConfigurationBuilder {
        ClientConfigurationBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OIDC_DISCOVERY_URL` (required): discovery document URL
    /// - `OIDC_CLIENT_ID` (required): client identifier
    /// - `OIDC_CLIENT_SECRET` (optional): client secret
    /// - `OIDC_REDIRECT_URI` (optional): redirect URI
    /// - `OIDC_SCOPES` (optional): space separated scopes
    /// - `OIDC_RESOURCE` (optional): resource indicator
    pub fn from_env() -> OidcResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> OidcResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| OidcError::Configuration {
                message: format!("{} environment variable not set", key),
            })
        };

        let mut builder = ClientConfigurationBuilder::new()
            .discovery_url(required("OIDC_DISCOVERY_URL")?)
            .client_id(required("OIDC_CLIENT_ID")?);

        if let Some(secret) = lookup("OIDC_CLIENT_SECRET") {
            builder = builder.client_secret(secret);
        }
        if let Some(redirect_uri) = lookup("OIDC_REDIRECT_URI") {
            builder = builder.redirect_uri(redirect_uri);
        }
        if let Some(scopes) = lookup("OIDC_SCOPES") {
            builder = builder.scopes(scopes.split_whitespace());
        }
        if let Some(resource) = lookup("OIDC_RESOURCE") {
            builder = builder.resource(resource);
        }

        builder.build()
    }
}

/// Create a new client configuration builder.
pub fn oidc_config() -> ClientConfigurationBuilder {
    ClientConfigurationBuilder::new()
}
