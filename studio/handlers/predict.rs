use tiny_http::Request;
use tracing::warn;

use ferrite_digits::{FormController, Polarity, PolarityChoice, SourceImage, SubmitPhase};

use crate::render::{html_escape, render_page, Page};
use crate::routes::PageResponse;
use crate::state::{lock, SharedState};
use crate::util::multipart::{extract_boundary, file_field, parse_parts, text_field, FormPart};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20 MB

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> PageResponse {
    let mut st = lock(&state);
    let flash  = st.take_flash();
    let page   = build_predict_page(&st.form, flash.as_deref());
    drop(st);

    crate::routes::html_response(page)
}

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Fields posted by the upload form.
#[derive(Debug, PartialEq)]
pub struct UploadFields {
    pub image: Option<SourceImage>,
    /// "Auto" checkbox; absent when unchecked.
    pub auto: bool,
    /// Polarity selector; absent while disabled (auto on).
    pub manual: Option<Polarity>,
}

impl UploadFields {
    pub fn from_parts(parts: &[FormPart<'_>]) -> Self {
        let image = file_field(parts, "image").map(|p| {
            let name = p.filename.clone().filter(|n| !n.is_empty()).unwrap_or_else(|| "imagen".to_owned());
            SourceImage::new(name, p.data.to_vec())
        });
        UploadFields {
            image,
            auto: text_field(parts, "auto").is_some(),
            manual: text_field(parts, "invert").and_then(|v| Polarity::from_flag(&v)),
        }
    }

    /// Applies the posted selections to the form. An empty file input keeps
    /// the previously selected file so the same image can be resubmitted.
    pub fn apply(self, form: &mut FormController) {
        if let Some(image) = self.image {
            form.select_file(image);
        }
        if let Some(polarity) = self.manual {
            form.set_manual_polarity(polarity);
        }
        form.set_auto_detect(self.auto);
    }
}

pub fn handle_submit(request: &mut Request, state: SharedState) -> PageResponse {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let boundary = match extract_boundary(&content_type) {
        Some(b) => b,
        None    => return flash_and_return(&state, "Solicitud inválida."),
    };

    let mut body: Vec<u8> = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        warn!(error = %e, "could not read upload body");
        return flash_and_return(&state, "Solicitud inválida.");
    }
    if body.len() > MAX_UPLOAD_BYTES {
        return flash_and_return(&state, "La imagen supera el límite de 20 MB.");
    }

    let fields = UploadFields::from_parts(&parse_parts(&body, &boundary));

    // The lock is released while the image is processed and the classifier
    // is called. A newer submission supersedes this one in the form.
    let (begun, predictor) = {
        let mut st = lock(&state);
        fields.apply(&mut st.form);
        (st.form.begin_submit(), st.predictor.clone())
    };

    if let Ok(submission) = begun {
        let outcome = submission.run(predictor.as_ref());
        let _ = lock(&state).form.finish(&submission, outcome);
    }

    crate::routes::redirect("/")
}

fn flash_and_return(state: &SharedState, msg: &str) -> PageResponse {
    lock(state).flash = Some(msg.to_owned());
    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

pub fn build_predict_page(form: &FormController, flash: Option<&str>) -> String {
    let form_html   = build_form(form.polarity(), form.file().map(|f| f.name.as_str()));
    let status_html = build_status(form.phase(), flash);

    render_page(Page::Predict, |tmpl| {
        tmpl.replace("{{PAGE_BODY}}", &format!(
            "<h1>🔢 Reconocimiento de Dígitos</h1>\n{}\n{}",
            form_html, status_html
        ))
    })
}

fn build_form(choice: PolarityChoice, file_name: Option<&str>) -> String {
    let auto = choice.is_auto();
    let manual = choice.manual_value();

    let options: String = [Polarity::DarkOnLight, Polarity::LightOnDark]
        .iter()
        .map(|&p| {
            let sel = if p == manual { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, p.as_flag(), sel, p.label())
        })
        .collect();

    let current = match file_name {
        Some(name) => format!(
            r#"<p class="hint">Archivo seleccionado: {} (deja el selector vacío para reenviarlo)</p>"#,
            html_escape(name)
        ),
        None => String::new(),
    };

    format!(
        r#"<form class="upload" method="POST" action="/predict" enctype="multipart/form-data">
  <input type="file" name="image" accept="image/*">
  <select id="invert" name="invert"{disabled}
    title="false: número negro sobre fondo blanco | true: número blanco sobre fondo negro">{options}</select>
  <label><input type="checkbox" id="auto" name="auto" value="on"{checked}> Auto</label>
  <button type="submit" class="btn">🚀 Enviar</button>
</form>
{current}"#,
        disabled = if auto { " disabled" } else { "" },
        checked  = if auto { " checked" } else { "" },
        options  = options,
        current  = current,
    )
}

fn build_status(phase: &SubmitPhase, flash: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(msg) = flash {
        out.push_str(&error_html(msg));
    }
    match phase {
        SubmitPhase::Idle => {}
        SubmitPhase::Submitting => {
            out.push_str(r#"<div class="result-card"><p>Procesando…</p></div>"#);
        }
        SubmitPhase::Failed(msg) => out.push_str(&error_html(msg)),
        SubmitPhase::Success(result) => out.push_str(&format!(
            r#"<div class="result-card">
  <p><b>Predicción:</b> {}</p>
  <p><b>Precisión:</b> {}</p>
  <p><b>Tiempo:</b> {}</p>
</div>"#,
            result.prediction,
            result.accuracy,
            html_escape(&result.process_time)
        )),
    }
    out
}

fn error_html(msg: &str) -> String {
    format!(r#"<p class="error-box">⚠ {}</p>"#, html_escape(msg))
}
