use std::fmt::Write;

use catalog_core::{CardView, CatalogViewModel};

use super::constants::{DESCRIPTION, NAME_WIDTH, TITLE};

pub fn render(view: &CatalogViewModel) -> String {
    if view.fetching {
        return "Loading...".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{DESCRIPTION}");
    let _ = writeln!(out);

    if let Some(query) = &view.query {
        let _ = writeln!(out, "Search: {query:?}");
    }
    if let Some(error) = &view.error_message {
        let _ = writeln!(out, "{error}");
    }

    if view.cards.is_empty() {
        let _ = writeln!(out, "No characters loaded.");
    }
    for card in &view.cards {
        let _ = writeln!(out, "{}", format_card_row(card));
    }

    let shown = match view.total {
        Some(total) => format!("Showing {} of {}.", view.shown, total),
        None => format!("Showing {}.", view.shown),
    };
    if view.load_more_enabled {
        let _ = write!(out, "{shown} Type `more` to load more.");
    } else {
        let _ = write!(out, "{shown} End of listing.");
    }
    out
}

pub fn render_detail(card: &CardView) -> String {
    format!(
        "#{id} {name}\n  image:  {image}\n  detail: {path}",
        id = card.id,
        name = card.name,
        image = card.image_url,
        path = card.detail_path
    )
}

fn format_card_row(card: &CardView) -> String {
    let name: String = if card.name.chars().count() > NAME_WIDTH {
        let mut short: String = card.name.chars().take(NAME_WIDTH - 1).collect();
        short.push('~');
        short
    } else {
        card.name.clone()
    };
    format!(
        "  #{id:<5} {name:<width$} {image}",
        id = card.id,
        name = name,
        width = NAME_WIDTH,
        image = card.image_url
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn card(id: u64, name: &str) -> CardView {
        CardView {
            id,
            name: name.to_string(),
            image_url: format!("https://img.test/{id}.jpeg"),
            detail_path: format!("/character/{id}"),
        }
    }

    fn view(cards: Vec<CardView>) -> CatalogViewModel {
        CatalogViewModel {
            shown: cards.len(),
            cards,
            total: Some(826),
            load_more_enabled: true,
            ..CatalogViewModel::default()
        }
    }

    #[test]
    fn renders_grid_and_more_hint() {
        let text = render(&view(vec![card(1, "Rick Sanchez"), card(2, "Morty Smith")]));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert_eq!(
            lines[3],
            format!("  #1     {:<32} https://img.test/1.jpeg", "Rick Sanchez")
        );
        assert_eq!(
            lines.last().copied(),
            Some("Showing 2 of 826. Type `more` to load more.")
        );
    }

    #[test]
    fn hides_more_hint_at_end_of_listing() {
        let mut model = view(vec![card(1, "Rick Sanchez")]);
        model.load_more_enabled = false;
        model.total = None;
        assert!(render(&model).ends_with("Showing 1. End of listing."));
    }

    #[test]
    fn shows_error_line_and_query() {
        let mut model = view(vec![card(1, "Rick Sanchez")]);
        model.query = Some("zzz".to_string());
        model.error_message = Some("Sorry no results.".to_string());
        let text = render(&model);
        assert!(text.contains("Search: \"zzz\"\nSorry no results.\n"));
        assert!(text.contains("#1"));
    }

    #[test]
    fn fetching_renders_only_a_status_line() {
        let mut model = view(vec![card(1, "Rick Sanchez")]);
        model.fetching = true;
        assert_eq!(render(&model), "Loading...");
    }

    #[test]
    fn long_names_are_truncated() {
        let row = format_card_row(&card(7, &"x".repeat(40)));
        assert!(row.contains(&format!("{}~ ", "x".repeat(31))));
    }

    #[test]
    fn detail_includes_path() {
        assert_eq!(
            render_detail(&card(3, "Summer Smith")),
            "#3 Summer Smith\n  image:  https://img.test/3.jpeg\n  detail: /character/3"
        );
    }
}
