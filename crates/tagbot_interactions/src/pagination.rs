//! Paginated views driven by navigation buttons.

use crate::{InteractionContext, SessionKey, SessionKind, SessionStore};
use std::collections::HashMap;
use std::sync::Arc;
use tagbot_core::{Button, ButtonRow, ButtonStyle, CustomId, Reply, UserId};
use tracing::{debug, instrument};

/// Navigation button actions.
///
/// The lowercase name is the action segment of the button's custom id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PageAction {
    /// Back to the first page
    Home,
    /// Forward one page, wrapping to the first
    Next,
    /// Back one page, wrapping to the last
    Previous,
}

impl PageAction {
    /// New index after applying this action at `index` over `len` pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagbot_interactions::PageAction;
    ///
    /// assert_eq!(PageAction::Next.apply(1, 2), 0);
    /// assert_eq!(PageAction::Previous.apply(0, 3), 2);
    /// assert_eq!(PageAction::Home.apply(2, 3), 0);
    /// ```
    pub fn apply(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            Self::Home => 0,
            Self::Next => (index + 1) % len,
            Self::Previous => (index + len - 1) % len,
        }
    }
}

/// One page of a session, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Session kind, also the button namespace
    pub kind: SessionKind,
    /// Session owner
    pub owner: UserId,
    /// Zero-based page index
    pub index: usize,
    /// Number of pages
    pub page_count: usize,
    /// Rows on this page
    pub rows: Vec<String>,
    /// One-based position of the first row across all pages
    pub first_ordinal: usize,
    /// Rows across all pages
    pub total_items: usize,
    /// First page shown
    pub previous_disabled: bool,
    /// Last page shown
    pub next_disabled: bool,
}

impl PageView {
    /// One-based page number for footers.
    pub fn page_number(&self) -> usize {
        self.index + 1
    }
}

/// Turns a [`PageView`] into the message that replaces the paginated one.
pub trait PageRenderer: Send + Sync {
    /// Render `view`.
    fn render(&self, ctx: &InteractionContext, view: &PageView) -> Reply;
}

/// Previous / Home / Next buttons for a view.
///
/// Previous is disabled on the first page and Next on the last; Home is always
/// enabled.
pub fn navigation_row(view: &PageView) -> ButtonRow {
    let id = |action: PageAction| {
        CustomId::new(view.kind.as_str(), action.to_string(), view.owner).encode()
    };
    ButtonRow::new(vec![
        Button::new(id(PageAction::Previous), "Previous", ButtonStyle::Primary)
            .disabled(view.previous_disabled),
        Button::new(id(PageAction::Home), "Home", ButtonStyle::Secondary),
        Button::new(id(PageAction::Next), "Next", ButtonStyle::Primary)
            .disabled(view.next_disabled),
    ])
}

/// Split rows into pages of `per_page`.
///
/// # Examples
///
/// ```
/// use tagbot_interactions::paginate;
///
/// let pages = paginate(vec!["a", "b", "c"], 2);
/// assert_eq!(pages, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
/// ```
pub fn paginate<S: Into<String>>(rows: Vec<S>, per_page: usize) -> Vec<Vec<String>> {
    let per_page = per_page.max(1);
    let mut pages = Vec::new();
    let mut page = Vec::with_capacity(per_page);
    for row in rows {
        page.push(row.into());
        if page.len() == per_page {
            pages.push(std::mem::replace(&mut page, Vec::with_capacity(per_page)));
        }
    }
    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

/// Routes navigation buttons to sessions and their renderers.
pub struct PaginationController {
    sessions: Arc<SessionStore>,
    renderers: HashMap<String, Arc<dyn PageRenderer>>,
}

impl PaginationController {
    /// Create a controller over a session store.
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self {
            sessions,
            renderers: HashMap::new(),
        }
    }

    /// Claim a button namespace.
    ///
    /// Buttons whose id starts with `<namespace>_` are routed here instead of
    /// the one-shot registry.
    pub fn register<R: PageRenderer + 'static>(
        &mut self,
        namespace: impl Into<String>,
        renderer: R,
    ) -> &mut Self {
        let namespace = namespace.into();
        if self.renderers.contains_key(&namespace) {
            tracing::warn!(namespace = %namespace, "Pagination namespace already registered, overwriting");
        } else {
            tracing::info!(namespace = %namespace, "Registering pagination namespace");
        }
        self.renderers.insert(namespace, Arc::new(renderer));
        self
    }

    /// Registered namespace `custom_id` belongs to, if any.
    pub fn namespace_for(&self, custom_id: &str) -> Option<&str> {
        self.renderers
            .keys()
            .filter(|namespace| CustomId::has_namespace(custom_id, namespace))
            .max_by_key(|namespace| namespace.len())
            .map(String::as_str)
    }

    /// Renderer for a namespace.
    pub fn renderer(&self, namespace: &str) -> Option<&Arc<dyn PageRenderer>> {
        self.renderers.get(namespace)
    }

    /// Registered namespaces.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        namespaces.sort_unstable();
        namespaces
    }

    /// Apply `action` to the owner's session of `kind`.
    ///
    /// `None` when the owner has no live session of that kind.
    #[instrument(skip(self), fields(owner = %owner, kind = %kind, action = %action))]
    pub fn handle(&self, owner: UserId, action: PageAction, kind: &SessionKind) -> Option<PageView> {
        let key = SessionKey::new(owner, kind.clone());
        let view = self.sessions.apply(&key, action);
        match &view {
            Some(view) => debug!(index = view.index, page_count = view.page_count, "Page changed"),
            None => debug!("No pagination session"),
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_action_names_match_button_ids() {
        assert_eq!(PageAction::Previous.to_string(), "previous");
        assert_eq!("home".parse::<PageAction>().ok(), Some(PageAction::Home));
        assert!("last".parse::<PageAction>().is_err());
    }

    #[test]
    fn test_index_stays_in_bounds() {
        for len in 1..6 {
            let mut index = 0;
            for step in 0..50 {
                let action = PageAction::iter().nth(step % 3).unwrap();
                index = action.apply(index, len);
                assert!(index < len, "{action} produced {index} for {len} pages");
            }
        }
    }

    #[test]
    fn test_every_short_action_sequence_stays_in_bounds() {
        let actions: Vec<PageAction> = PageAction::iter().collect();
        for len in 1..6 {
            for steps in 0..=4u32 {
                for code in 0..actions.len().pow(steps) {
                    let store = SessionStore::default();
                    let key = SessionKey::new(UserId::new(7), "list_subcommand_button");
                    let pages: Vec<Vec<String>> =
                        (0..len).map(|page| vec![page.to_string()]).collect();
                    store.open(key.clone(), pages).unwrap();

                    let mut expected = 0;
                    let mut rest = code;
                    for _ in 0..steps {
                        let action = actions[rest % actions.len()];
                        rest /= actions.len();
                        expected = action.apply(expected, len);

                        let view = store.apply(&key, action).unwrap();
                        assert_eq!(view.index, expected, "{action} over {len} pages");
                        assert!(view.index < view.page_count);
                        assert_eq!(view.rows, vec![expected.to_string()]);
                        assert_eq!(view.previous_disabled, expected == 0);
                        assert_eq!(view.next_disabled, expected + 1 == len);
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_page_disables_both_directions() {
        let store = Arc::new(SessionStore::default());
        let key = SessionKey::new(UserId::new(7), "add_topic_subcommand_button");
        let view = store.open(key, vec![vec!["only".into()]]).unwrap();
        assert!(view.previous_disabled);
        assert!(view.next_disabled);

        let row = navigation_row(&view);
        assert_eq!(row.buttons[0].custom_id, "add_topic_subcommand_button_previous_7");
        assert_eq!(row.buttons[1].custom_id, "add_topic_subcommand_button_home_7");
        assert!(!row.buttons[1].disabled);
        assert_eq!(row.buttons[2].custom_id, "add_topic_subcommand_button_next_7");
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let rows: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let pages = paginate(rows, 10);
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|page| page.len() == 10));
    }

    #[test]
    fn test_paginate_empty() {
        assert!(paginate(Vec::<String>::new(), 10).is_empty());
    }
}
