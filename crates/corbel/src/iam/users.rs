//! User resource operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::error::{Error, InvalidInputError};
use crate::http::endpoints::{IAM, USER};
use crate::iam::search::Search;

/// A user of an IAM domain.
///
/// Fields the platform has not set come back empty; `properties` carries
/// free-form per-domain data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub domain: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub profile_url: String,
    pub phone_number: String,
    pub scopes: Vec<String>,
    pub properties: HashMap<String, serde_json::Value>,
    pub country: String,
}

impl Client {
    /// Create a user.
    ///
    /// Returns the identifier of the created user, taken from the
    /// `Location` header of the response.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn user_add(&self, user: &IamUser) -> Result<String, Error> {
        debug!("Creating user");

        let token = self.bearer_token().await?;
        self.http()
            .post_authed_created(IAM, USER, user, &token)
            .await
    }

    /// Fetch a user by identifier.
    #[instrument(skip(self))]
    pub async fn user_get(&self, id: &str) -> Result<IamUser, Error> {
        if id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Getting user");

        let token = self.bearer_token().await?;
        self.http()
            .get_authed(IAM, &format!("{}/{}", USER, id), &token)
            .await
    }

    /// Update a user.
    #[instrument(skip(self, user))]
    pub async fn user_update(&self, id: &str, user: &IamUser) -> Result<(), Error> {
        if id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Updating user");

        let token = self.bearer_token().await?;
        self.http()
            .put_authed_no_response(IAM, &format!("{}/{}", USER, id), user, &token)
            .await
    }

    /// Delete a user.
    #[instrument(skip(self))]
    pub async fn user_delete(&self, id: &str) -> Result<(), Error> {
        if id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Deleting user");

        let token = self.bearer_token().await?;
        self.http()
            .delete_authed(IAM, &format!("{}/{}", USER, id), &token)
            .await
    }

    /// Find a user by username.
    ///
    /// Returns `Ok(None)` when no user in the domain has that username.
    #[instrument(skip(self))]
    pub async fn user_by_username(&self, username: &str) -> Result<Option<IamUser>, Error> {
        if username.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Finding user by username");

        let mut users = self
            .user_search()
            .eq("username", username)
            .page_size(1)
            .page(0)
            .await?;
        Ok(users.pop())
    }

    /// Check whether a username exists in the domain.
    pub async fn user_exists(&self, username: &str) -> Result<bool, Error> {
        Ok(self.user_by_username(username).await?.is_some())
    }

    /// Fetch the user the session is logged in as.
    ///
    /// Requires a token acquired with a basic-auth grant; a
    /// client-credentials-only token has no user behind it and the
    /// platform rejects the call.
    #[instrument(skip(self))]
    pub async fn user_get_me(&self) -> Result<IamUser, Error> {
        debug!("Getting authenticated user");

        let token = self.bearer_token().await?;
        self.http()
            .get_authed(IAM, &format!("{}/me", USER), &token)
            .await
    }

    /// Update the user the session is logged in as.
    #[instrument(skip(self, user))]
    pub async fn user_update_me(&self, user: &IamUser) -> Result<(), Error> {
        debug!("Updating authenticated user");

        let token = self.bearer_token().await?;
        self.http()
            .put_authed_no_response(IAM, &format!("{}/me", USER), user, &token)
            .await
    }

    /// Delete the user the session is logged in as.
    #[instrument(skip(self))]
    pub async fn user_delete_me(&self) -> Result<(), Error> {
        debug!("Deleting authenticated user");

        let token = self.bearer_token().await?;
        self.http()
            .delete_authed(IAM, &format!("{}/me", USER), &token)
            .await
    }

    /// Add a user to a set of groups.
    #[instrument(skip(self, group_ids))]
    pub async fn user_add_groups(&self, id: &str, group_ids: &[String]) -> Result<(), Error> {
        if id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!(groups = group_ids.len(), "Adding user to groups");

        let token = self.bearer_token().await?;
        self.http()
            .put_authed_no_response(IAM, &format!("{}/{}/groups", USER, id), &group_ids, &token)
            .await
    }

    /// Remove a user from a group.
    #[instrument(skip(self))]
    pub async fn user_delete_group(&self, id: &str, group_id: &str) -> Result<(), Error> {
        if id.is_empty() || group_id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Removing user from group");

        let token = self.bearer_token().await?;
        self.http()
            .delete_authed(IAM, &format!("{}/{}/groups/{}", USER, id, group_id), &token)
            .await
    }

    /// Start a paged search over the domain's users.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: corbel::Client) -> Result<(), corbel::Error> {
    /// let users = client.user_search().eq("username", "corbel-rs").page(0).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn user_search(&self) -> Search<'_, IamUser> {
        Search::new(self, USER)
    }
}
