//! Tag name suggestions.

use async_trait::async_trait;
use std::sync::Arc;
use tagbot_core::{AutocompleteChoice, FocusedOption, InboundEvent};
use tagbot_error::TagbotResult;
use tagbot_interactions::{AutocompleteHandler, InteractionContext};
use tagbot_storage::TagStore;

/// Suggests tag names containing what the user typed, case-insensitively.
#[derive(Clone)]
pub struct TagAutocomplete {
    tags: Arc<dyn TagStore>,
}

impl TagAutocomplete {
    /// Create the handler.
    pub fn new(tags: Arc<dyn TagStore>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl AutocompleteHandler for TagAutocomplete {
    async fn suggest(
        &self,
        _ctx: &InteractionContext,
        event: &InboundEvent,
        focused: &FocusedOption,
    ) -> TagbotResult<Vec<AutocompleteChoice>> {
        let Some(guild_id) = event.guild_id() else {
            return Ok(Vec::new());
        };
        let needle = focused.value.to_lowercase();
        Ok(self
            .tags
            .list(guild_id)
            .await?
            .into_iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .map(|tag| AutocompleteChoice::new(tag.name))
            .collect())
    }
}
