use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use octofit::present::{Field, Present, Tone};
use octofit::{Phase, Resource, ViewState};

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Table with one row per item, in server order
pub fn render_table<T: Present>(items: &[T]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(T::columns().iter().map(|c| Cell::new(c).add_attribute(Attribute::Bold)));

    for (index, item) in items.iter().enumerate() {
        let cells = item.row(index).into_iter().map(|field| {
            let cell = tone_cell(&field);
            if T::highlighted(index) {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        });
        table.add_row(cells);
    }

    table
}

/// Text for every phase of a view: progress line, error alert, empty notice
/// or the item table followed by a total.
pub fn render_view<T: Present>(resource: Resource, state: &ViewState<T>) -> String {
    match state.phase() {
        Phase::Loading => resource.loading_label(),
        Phase::Error => format!("Error!\n{}", state.error().unwrap_or_default()),
        Phase::Empty => resource.empty_notice().to_string(),
        Phase::Ready => {
            let items = state.items();
            format!(
                "{}\n{}\n\n{}\nTotal: {} {}",
                resource.title(),
                "=".repeat(resource.title().chars().count()),
                render_table(items),
                items.len(),
                resource
            )
        }
    }
}

pub fn tone_cell(field: &Field) -> Cell {
    let cell = Cell::new(&field.text);
    match field.tone {
        Tone::Plain => cell,
        Tone::Primary => cell.fg(Color::Blue),
        Tone::Info => cell.fg(Color::Cyan),
        Tone::Success => cell.fg(Color::Green),
        Tone::Warning => cell.fg(Color::Yellow),
        Tone::Danger => cell.fg(Color::Red),
        Tone::Muted => cell.fg(Color::DarkGrey),
        Tone::Strong => cell.add_attribute(Attribute::Bold),
        Tone::Gold => cell.fg(Color::Yellow).add_attribute(Attribute::Bold),
        Tone::Silver => cell.fg(Color::Grey).add_attribute(Attribute::Bold),
        Tone::Bronze => cell.fg(Color::DarkYellow).add_attribute(Attribute::Bold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofit::OctofitError;
    use octofit::models::{LeaderboardEntry, Workout};
    use serde_json::json;

    fn workouts() -> Vec<Workout> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Burpees", "workout_type": "Cardio", "difficulty": "Difficile", "duration": 20, "calories_estimate": 250},
            {"id": 2, "name": "Yoga", "workout_type": "Stretching", "difficulty": "Facile", "duration": 30, "calories_estimate": 90}
        ]))
        .unwrap()
    }

    #[test]
    fn loading_shows_progress_label() {
        let state: ViewState<Workout> = ViewState::new();
        assert_eq!(render_view(Resource::Workouts, &state), "Loading workouts...");
    }

    #[test]
    fn error_shows_alert_without_table() {
        let mut state: ViewState<Workout> = ViewState::new();
        state.resolve(Err(OctofitError::Fetch("HTTP error! status: 502".to_string())));
        let out = render_view(Resource::Workouts, &state);
        assert!(out.starts_with("Error!"));
        assert!(out.contains("HTTP error! status: 502"));
        assert!(!out.contains("Difficulty"));
    }

    #[test]
    fn empty_shows_notice() {
        let mut state: ViewState<Workout> = ViewState::new();
        state.resolve(Ok(Vec::new()));
        assert_eq!(render_view(Resource::Workouts, &state), "No workouts available.");
    }

    #[test]
    fn ready_renders_one_row_per_item() {
        let mut state = ViewState::new();
        state.resolve(Ok(workouts()));
        let out = render_view(Resource::Workouts, &state);
        assert!(out.contains("Burpees"));
        assert!(out.contains("Yoga"));
        assert!(out.contains("Total: 2 workouts"));
        assert!(!out.contains("Loading"));
    }

    #[test]
    fn table_row_count_matches_items() {
        let table = render_table(&workouts());
        assert_eq!(table.row_iter().count(), 2);
    }

    #[test]
    fn difficulty_cells_are_coloured() {
        let items = workouts();
        assert_eq!(items[0].row(0)[2].tone, Tone::Danger);
        assert_eq!(items[1].row(1)[2].tone, Tone::Success);
    }

    #[test]
    fn leaderboard_table_shows_medals() {
        let entries: Vec<LeaderboardEntry> = serde_json::from_value(json!([
            {"user": "a"}, {"user": "b"}, {"user": "c"}, {"user": "d"}
        ]))
        .unwrap();
        let out = render_table(&entries).to_string();
        assert!(out.contains("🥇 1"));
        assert!(out.contains("🥈 2"));
        assert!(out.contains("🥉 3"));
        assert!(out.contains(" 4 "));
    }
}
