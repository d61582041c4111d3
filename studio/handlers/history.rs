use ferrite_digits::HistoryEntry;

use crate::render::{html_escape, render_page, Page};
use crate::routes::PageResponse;
use crate::state::{lock, SharedState};

/// `GET /history`: read-only list of past predictions, oldest first.
pub fn handle_get(state: SharedState) -> PageResponse {
    let store = lock(&state).form.history().clone();
    crate::routes::html_response(build_history_page(&store.read_all()))
}

pub fn build_history_page(entries: &[HistoryEntry]) -> String {
    let list = if entries.is_empty() {
        "<p>No hay registros.</p>".to_owned()
    } else {
        let items: String = entries.iter().map(|e| {
            format!(
                r#"<li>Predicción: {}, Precisión: {} <span class="muted">{} · invert={}</span></li>"#,
                e.result.prediction,
                e.result.accuracy,
                html_escape(&e.timestamp_label().unwrap_or_default()),
                e.invert.as_flag(),
            )
        }).collect::<Vec<_>>().join("\n");
        format!("<ul class=\"history\">\n{}\n</ul>", items)
    };

    render_page(Page::History, |tmpl| {
        tmpl.replace("{{PAGE_BODY}}", &format!("<h1>Historial de Consultas</h1>\n{}", list))
    })
}
