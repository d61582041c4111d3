/// Page renderer for the digit studio.
///
/// One HTML template (`studio/assets/studio.html`) with `{{TOKEN}}`
/// placeholders, loaded at compile time. Navigation tokens are resolved
/// here; the caller's closure fills the page body. Tokens left over are
/// blanked so raw `{{TOKEN}}` text never reaches the browser.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Which view is active.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Predict,
    History,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Predict => "Inicio",
            Page::History => "Historial",
        }
    }
}

pub fn render_page<F>(page: Page, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let active = |p: Page| if p == page { "active" } else { "" };

    let html = TEMPLATE
        .replace("{{PAGE_TITLE}}", page.title())
        .replace("{{NAV_PREDICT}}", active(Page::Predict))
        .replace("{{NAV_HISTORY}}", active(Page::History));

    blank_remaining(fill(html))
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        match html[start..].find("}}") {
            Some(end) => html.replace_range(start..start + end + 2, ""),
            None => break,
        }
    }
    html
}
