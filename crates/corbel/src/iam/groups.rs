//! Group resource operations.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::error::{Error, InvalidInputError};
use crate::http::endpoints::{GROUP, IAM};
use crate::iam::search::Search;

/// A scope-granting group within an IAM domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub domain: String,
    pub scopes: Vec<String>,
}

impl Client {
    /// Create a group.
    ///
    /// Returns the identifier of the created group, taken from the
    /// `Location` header of the response.
    #[instrument(skip(self, group), fields(name = %group.name))]
    pub async fn group_add(&self, group: &IamGroup) -> Result<String, Error> {
        debug!("Creating group");

        let token = self.bearer_token().await?;
        self.http()
            .post_authed_created(IAM, GROUP, group, &token)
            .await
    }

    /// Fetch a group by identifier.
    #[instrument(skip(self))]
    pub async fn group_get(&self, id: &str) -> Result<IamGroup, Error> {
        if id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Getting group");

        let token = self.bearer_token().await?;
        self.http()
            .get_authed(IAM, &format!("{}/{}", GROUP, id), &token)
            .await
    }

    /// Delete a group.
    #[instrument(skip(self))]
    pub async fn group_delete(&self, id: &str) -> Result<(), Error> {
        if id.is_empty() {
            return Err(InvalidInputError::EmptyIdentifier.into());
        }

        debug!("Deleting group");

        let token = self.bearer_token().await?;
        self.http()
            .delete_authed(IAM, &format!("{}/{}", GROUP, id), &token)
            .await
    }

    /// Start a paged search over the domain's groups.
    pub fn group_search(&self) -> Search<'_, IamGroup> {
        Search::new(self, GROUP)
    }
}
