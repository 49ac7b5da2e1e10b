//! Tag list pages.

use tagbot_core::Reply;
use tagbot_interactions::{InteractionContext, PageRenderer, PageView, navigation_row};
use tagbot_storage::Tag;

/// One list row, without its ordinal.
pub(super) fn row(tag: &Tag) -> String {
    let author = match tag.author {
        Some(author) => format!("<@{}>", author),
        None => "None".to_string(),
    };
    format!("`{}` **•** {}", tag.name, author)
}

/// Renders a page of the server tag list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagListRenderer;

impl PageRenderer for TagListRenderer {
    fn render(&self, ctx: &InteractionContext, view: &PageView) -> Reply {
        let description = view
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| format!("> **{}.** {}", view.first_ordinal + i, row))
            .collect::<Vec<_>>()
            .join("\n");

        let embed = ctx
            .embed()
            .with_title("Server Tag List")
            .with_description(description)
            .with_footer(format!("Page: {}/{}", view.page_number(), view.page_count));

        Reply::embed(embed).with_row(navigation_row(view))
    }
}
