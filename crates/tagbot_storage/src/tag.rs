//! Support tag records.

use async_trait::async_trait;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tagbot_core::{GuildId, UserId};
use tagbot_error::TagbotResult;

/// A support tag: a named, reusable embed.
///
/// # Examples
///
/// ```
/// use tagbot_core::UserId;
/// use tagbot_storage::Tag;
///
/// let tag = Tag::new("faq", "Frequently asked questions")
///     .with_description("Read this first")
///     .with_author(UserId::new(42));
/// assert_eq!(tag.footer, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct Tag {
    /// Unique name within the guild
    #[setters(skip)]
    pub name: String,
    /// Embed title
    #[setters(skip)]
    pub title: String,
    /// Embed body
    #[serde(default)]
    pub description: Option<String>,
    /// Embed footer
    #[serde(default)]
    pub footer: Option<String>,
    /// Embed image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Creator
    #[serde(default)]
    pub author: Option<UserId>,
    /// Last editor
    #[serde(default)]
    pub edited_by: Option<UserId>,
}

impl Tag {
    /// Create a tag with only a name and title.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: None,
            footer: None,
            image_url: None,
            author: None,
            edited_by: None,
        }
    }

    /// Apply an edit.
    pub fn apply(&mut self, update: TagUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        self.description = update.description;
        self.footer = update.footer;
        self.image_url = update.image_url;
        self.edited_by = Some(update.edited_by);
    }
}

/// An edit to an existing tag.
///
/// `title` is kept when `None`; the optional fields are replaced, so `None`
/// clears them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpdate {
    /// New title
    pub title: Option<String>,
    /// New body
    pub description: Option<String>,
    /// New footer
    pub footer: Option<String>,
    /// New image
    pub image_url: Option<String>,
    /// Editor
    pub edited_by: UserId,
}

/// Tag persistence.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Look up a tag.
    async fn get(&self, guild_id: GuildId, name: &str) -> TagbotResult<Option<Tag>>;

    /// True when a tag with `name` exists.
    async fn exists(&self, guild_id: GuildId, name: &str) -> TagbotResult<bool> {
        Ok(self.get(guild_id, name).await?.is_some())
    }

    /// Insert a new tag.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if the name is taken.
    async fn create(&self, guild_id: GuildId, tag: Tag) -> TagbotResult<()>;

    /// Edit an existing tag and return the result.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if there is no such tag.
    async fn update(&self, guild_id: GuildId, name: &str, update: TagUpdate) -> TagbotResult<Tag>;

    /// Remove a tag. Returns whether it existed.
    async fn delete(&self, guild_id: GuildId, name: &str) -> TagbotResult<bool>;

    /// Every tag in the guild, ordered by name.
    async fn list(&self, guild_id: GuildId) -> TagbotResult<Vec<Tag>>;
}
