use newshub_core::{AppViewModel, Category, Phase};

const SKELETON_CARDS: usize = 6;

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel, updated_at: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(format!("NewsHub · updated {updated_at}"));

    match &view.headline {
        Some(headline) => {
            lines.push(format!(
                "BREAKING ({}/{}): {}",
                headline.position, headline.total, headline.title
            ));
            lines.push(format!("  {}", headline.link));
        }
        None => lines.push("BREAKING: loading headlines...".to_string()),
    }

    lines.push(category_bar(view.category));
    if !view.search_text.is_empty() {
        lines.push(format!("search: {}", view.search_text));
    }

    if view.show_skeleton {
        lines.extend((0..SKELETON_CARDS).map(|_| "  ░░░░░░░░░░░░░░░░░░░░".to_string()));
    } else if view.articles.is_empty() {
        lines.push("  no stories".to_string());
    }

    for (index, card) in view.articles.iter().enumerate() {
        let image = if card.image_url.is_some() { "🖼" } else { "📰" };
        lines.push(format!("{:>3}. {image} {}", index + 1, card.title));
        lines.push(format!("       {}", card.summary));
    }

    if view.phase == Phase::Error {
        if let Some(failure) = &view.last_failure {
            lines.push(format!("! {failure}"));
        }
    }
    if view.has_more {
        let hint = if view.loading {
            "Loading..."
        } else {
            "Load more stories: `more`"
        };
        lines.push(hint.to_string());
    } else if view.loading && !view.show_skeleton {
        lines.push("Loading...".to_string());
    }

    lines
}

fn category_bar(selected: Category) -> String {
    Category::ALL
        .iter()
        .map(|category| {
            let chip = format!("{} {}", category.icon(), category.label());
            if *category == selected {
                format!("[{chip}]")
            } else {
                chip
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
