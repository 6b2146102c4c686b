//! Panel renderers
//!
//! Each renderer owns one panel and replaces its content wholesale: the
//! container is emptied and refilled in a single synchronous call, so no
//! caller ever observes a half-built panel.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::types::{Episode, Show};

/// Class of the per-show container; carries `data-show-id`
pub const SHOW_CLASS: &str = "Show";

/// Class of the per-show "view episodes" control
pub const EPISODES_BUTTON_CLASS: &str = "Show-getEpisodes";

/// Data key under which the show id is embedded
pub const SHOW_ID_KEY: &str = "show-id";

/// Replace the content of the shows panel with one container per show
///
/// Input order is kept. Rendering the same list twice leaves the same
/// number of containers as rendering it once.
pub fn render_shows(doc: &mut Document, shows_list: NodeId, shows: &[Show]) {
    doc.empty(shows_list);

    for show in shows {
        let container = build_show(doc, show);
        doc.append_child(shows_list, container);
    }

    debug!(count = shows.len(), "shows rendered");
}

/// Replace the content of the episodes list and reveal the episodes area
pub fn render_episodes(
    doc: &mut Document,
    episodes_list: NodeId,
    episodes_area: NodeId,
    episodes: &[Episode],
) {
    doc.empty(episodes_list);

    for episode in episodes {
        let item = doc.create_element("li");
        let label = doc.create_text(&episode.label());
        doc.append_child(item, label);
        doc.append_child(episodes_list, item);
    }

    doc.set_hidden(episodes_area, false);
    debug!(count = episodes.len(), "episodes rendered");
}

/// The "Episodes" control [`render_shows`] put in `container`
///
/// Follows the rendered layout rather than searching by class, so controls
/// carried in by summary markup never match.
pub(crate) fn episodes_control(doc: &Document, container: NodeId) -> Option<NodeId> {
    let media = *doc.child_elements(container).first()?;
    let body = *doc.child_elements(media).last()?;
    doc.child_elements(body)
        .last()
        .copied()
        .filter(|&button| doc.has_class(button, EPISODES_BUTTON_CLASS))
}

/// Builds:
///
/// ```text
/// div.Show[data-show-id]
///   div.media
///     img[src][alt]
///     div.media-body
///       h5.text-primary  name
///       div > small      summary markup
///       button.Show-getEpisodes  "Episodes"
/// ```
fn build_show(doc: &mut Document, show: &Show) -> NodeId {
    let container = doc.create_element_with_class("div", "Show col-md-12 col-lg-6 mb-4");
    doc.set_attr(container, &format!("data-{SHOW_ID_KEY}"), &show.id.to_string());

    let media = doc.create_element_with_class("div", "media");
    doc.append_child(container, media);

    let image = doc.create_element_with_class("img", "w-25 me-3");
    doc.set_attr(image, "src", &show.image);
    doc.set_attr(image, "alt", &show.name);
    doc.append_child(media, image);

    let body = doc.create_element_with_class("div", "media-body");
    doc.append_child(media, body);

    let title = doc.create_element_with_class("h5", "text-primary");
    let name = doc.create_text(&show.name);
    doc.append_child(title, name);
    doc.append_child(body, title);

    let summary = doc.create_element("div");
    let small = doc.create_element("small");
    doc.append_markup(small, &show.summary);
    doc.append_child(summary, small);
    doc.append_child(body, summary);

    let button = doc.create_element_with_class(
        "button",
        &format!("btn btn-outline-light btn-sm {EPISODES_BUTTON_CLASS}"),
    );
    let label = doc.create_text("Episodes");
    doc.append_child(button, label);
    doc.append_child(body, button);

    container
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            summary: format!("<p>About <b>{name}</b></p>"),
            image: format!("https://static.tvmaze.com/{id}.jpg"),
        }
    }

    fn panel() -> (Document, NodeId) {
        let mut doc = Document::new();
        let list = doc.create_element("div");
        doc.set_attr(list, "id", "showsList");
        doc.append_child(doc.root(), list);
        (doc, list)
    }

    #[test]
    fn test_render_shows_structure() {
        let (mut doc, list) = panel();
        render_shows(&mut doc, list, &[show(1767, "The Bletchley Circle")]);

        let html = Html::parse_fragment(&doc.outer_html(list));
        let shows = Selector::parse("div.Show").unwrap();
        let container = html.select(&shows).next().expect("one show container");
        assert_eq!(container.value().attr("data-show-id"), Some("1767"));

        let img = Selector::parse("div.Show img").unwrap();
        let img = html.select(&img).next().unwrap();
        assert_eq!(img.value().attr("src"), Some("https://static.tvmaze.com/1767.jpg"));
        assert_eq!(img.value().attr("alt"), Some("The Bletchley Circle"));

        let title = Selector::parse("h5.text-primary").unwrap();
        let title: String = html.select(&title).next().unwrap().text().collect();
        assert_eq!(title, "The Bletchley Circle");

        let summary_bold = Selector::parse("small p b").unwrap();
        assert_eq!(html.select(&summary_bold).count(), 1);

        let button = Selector::parse("button.Show-getEpisodes").unwrap();
        assert_eq!(html.select(&button).count(), 1);
    }

    #[test]
    fn test_render_shows_keeps_order() {
        let (mut doc, list) = panel();
        render_shows(&mut doc, list, &[show(3, "C"), show(1, "A"), show(2, "B")]);

        let ids: Vec<&str> = doc
            .find_by_class(list, SHOW_CLASS)
            .into_iter()
            .filter_map(|node| doc.data(node, SHOW_ID_KEY))
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_render_shows_is_idempotent() {
        let (mut doc, list) = panel();
        let shows = vec![show(1, "A"), show(2, "B")];

        render_shows(&mut doc, list, &shows);
        let once = doc.outer_html(list);
        render_shows(&mut doc, list, &shows);

        assert_eq!(doc.find_by_class(list, SHOW_CLASS).len(), 2);
        assert_eq!(doc.outer_html(list), once);
    }

    #[test]
    fn test_repeated_renders_reuse_page_nodes() {
        let (mut doc, list) = panel();
        let shows: Vec<Show> = (1..=10).map(|id| show(id, "Repeat")).collect();

        render_shows(&mut doc, list, &shows);
        let after_one = doc.node_count();
        for _ in 0..1000 {
            render_shows(&mut doc, list, &shows);
        }

        assert_eq!(doc.node_count(), after_one);
        assert_eq!(doc.find_by_class(list, SHOW_CLASS).len(), 10);
    }

    #[test]
    fn test_render_shows_replaces_previous_results() {
        let (mut doc, list) = panel();
        render_shows(&mut doc, list, &[show(1, "A"), show(2, "B")]);
        render_shows(&mut doc, list, &[show(9, "Z")]);

        let containers = doc.find_by_class(list, SHOW_CLASS);
        assert_eq!(containers.len(), 1);
        assert_eq!(doc.data(containers[0], SHOW_ID_KEY), Some("9"));

        render_shows(&mut doc, list, &[]);
        assert!(doc.children(list).is_empty());
    }

    #[test]
    fn test_each_button_resolves_to_its_own_show() {
        let (mut doc, list) = panel();
        render_shows(&mut doc, list, &[show(7, "A"), show(42, "B")]);

        let buttons = doc.find_by_class(list, EPISODES_BUTTON_CLASS);
        let ids: Vec<&str> = buttons
            .iter()
            .filter_map(|&b| doc.closest(b, SHOW_CLASS))
            .filter_map(|s| doc.data(s, SHOW_ID_KEY))
            .collect();
        assert_eq!(ids, vec!["7", "42"]);
    }

    #[test]
    fn test_episodes_control_skips_buttons_in_summary() {
        let (mut doc, list) = panel();
        let hostile = Show {
            summary: r#"<button class="Show-getEpisodes">Fake</button>"#.to_string(),
            ..show(7, "A")
        };
        render_shows(&mut doc, list, &[hostile]);

        let container = doc.child_elements(list)[0];
        let buttons = doc.find_by_class(container, EPISODES_BUTTON_CLASS);
        assert_eq!(buttons.len(), 2);
        assert_eq!(episodes_control(&doc, container), Some(buttons[1]));
        assert_eq!(doc.text_content(buttons[1]), "Episodes");
    }

    #[test]
    fn test_render_episodes_single_pilot() {
        let mut doc = Document::new();
        let area = doc.create_element("section");
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), area);
        doc.append_child(area, list);
        doc.set_hidden(area, true);

        let episodes = vec![Episode {
            id: 1,
            name: "Pilot".to_string(),
            season: 1,
            number: 1,
        }];
        render_episodes(&mut doc, list, area, &episodes);

        let items = doc.child_elements(list);
        assert_eq!(items.len(), 1);
        assert_eq!(doc.text_content(items[0]), "Pilot (season 1, episode 1)");
        assert!(!doc.is_hidden(area));
    }

    #[test]
    fn test_render_episodes_replaces_previous_list() {
        let mut doc = Document::new();
        let area = doc.create_element("section");
        let list = doc.create_element("ul");
        doc.append_child(area, list);

        let first: Vec<Episode> = (1..=3)
            .map(|n| Episode {
                id: n,
                name: format!("E{n}"),
                season: 1,
                number: n as u32,
            })
            .collect();
        render_episodes(&mut doc, list, area, &first);
        render_episodes(&mut doc, list, area, &first[..1]);

        assert_eq!(doc.child_elements(list).len(), 1);
        assert_eq!(doc.inner_html(list), "<li>E1 (season 1, episode 1)</li>");
    }
}
