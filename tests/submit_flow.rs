//! Drives the real HTTP client against an in-process classifier stand-in.

use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use image::{Rgba, RgbaImage};
use tiny_http::{Header, Response, Server};

use ferrite_digits::normalize::encode_png;
use ferrite_digits::{
    FormController, HistoryStore, Polarity, PredictionClient, SourceImage, SubmitError,
};

struct Captured {
    content_type: String,
    body: Vec<u8>,
}

/// Answers exactly one request with `status` and `reply`, handing back what
/// was posted.
fn serve_once(status: u16, reply: &'static str) -> (String, JoinHandle<Captured>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();

    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let content_type = request.headers().iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.as_str().to_owned())
            .unwrap_or_default();
        let mut body = Vec::new();
        request.as_reader().read_to_end(&mut body).unwrap();

        let header: Header = "Content-Type: application/json".parse().unwrap();
        let response = Response::from_string(reply)
            .with_status_code(status)
            .with_header(header);
        request.respond(response).unwrap();

        Captured { content_type, body }
    });

    (format!("http://{}/predict", addr), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// 100×50 white card with a black stroke in the middle.
fn handwritten_seven() -> SourceImage {
    let img = RgbaImage::from_fn(100, 50, |x, y| {
        if (45..55).contains(&x) && (5..45).contains(&y) {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    SourceImage::new("seven.png", encode_png(&img).unwrap())
}

fn form_in(dir: &tempfile::TempDir) -> FormController {
    FormController::new(HistoryStore::open(dir.path().join("history.json")))
}

#[test]
fn auto_detected_digit_round_trip() {
    let (endpoint, server) = serve_once(200, r#"{"process_time":"12ms","prediction":7,"accuracy":0.98}"#);
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_in(&dir);
    let client = PredictionClient::new(&endpoint).unwrap();

    form.select_file(handwritten_seven());
    let result = form.submit(&client).unwrap();
    assert_eq!(result.prediction, 7);
    assert_eq!(result.process_time, "12ms");
    assert!((result.accuracy - 0.98).abs() < 1e-12);

    let captured = server.join().unwrap();
    assert!(captured.content_type.starts_with("multipart/form-data"));

    let body = &captured.body;
    assert!(find(body, b"name=\"invert\"\r\n\r\nfalse\r\n").is_some());
    assert!(find(body, b"name=\"image\"; filename=\"digit.png\"").is_some());
    assert!(find(body, b"Content-Type: image/png").is_some());

    let png_start = find(body, b"\x89PNG").unwrap();
    let png_len = find(&body[png_start..], b"IEND").unwrap() + 8;
    let sent = image::load_from_memory(&body[png_start..png_start + png_len]).unwrap().to_rgba8();
    assert_eq!(sent.dimensions(), (28, 28));
    assert!(sent.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));

    let history = form.history().read_all();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].invert, Polarity::DarkOnLight);
    assert_eq!(history[0].result, result);
}

#[test]
fn manual_polarity_is_sent_verbatim() {
    let (endpoint, server) = serve_once(200, r#"{"process_time":"3ms","prediction":1,"accuracy":0.5}"#);
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_in(&dir);

    form.select_file(handwritten_seven());
    form.set_auto_detect(false);
    form.set_manual_polarity(Polarity::LightOnDark);
    form.submit(&PredictionClient::new(&endpoint).unwrap()).unwrap();

    let captured = server.join().unwrap();
    assert!(find(&captured.body, b"name=\"invert\"\r\n\r\ntrue\r\n").is_some());
    assert_eq!(form.history().read_all()[0].invert, Polarity::LightOnDark);
}

#[test]
fn server_error_leaves_history_untouched() {
    let (endpoint, server) = serve_once(500, r#"{"detail":"boom"}"#);
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_in(&dir);

    form.select_file(handwritten_seven());
    let err = form.submit(&PredictionClient::new(&endpoint).unwrap()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, SubmitError::Network(ref d) if d == "HTTP 500"));
    assert_eq!(form.phase().error(), Some("Error en la petición"));
    assert!(form.history().read_all().is_empty());
}

#[test]
fn malformed_json_is_a_parse_error() {
    let (endpoint, server) = serve_once(200, "<html>not json</html>");
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_in(&dir);

    form.select_file(handwritten_seven());
    let err = form.submit(&PredictionClient::new(&endpoint).unwrap()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, SubmitError::Parse(_)));
    assert!(form.history().read_all().is_empty());
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_in(&dir);

    form.select_file(handwritten_seven());
    let client = PredictionClient::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();
    let err = form.submit(&client).unwrap_err();

    assert!(matches!(err, SubmitError::Network(_)));
    assert!(form.history().read_all().is_empty());
}

#[test]
fn no_file_means_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_in(&dir);
    // Nothing listens here; reaching the network would surface a Network error.
    let client = PredictionClient::new("http://127.0.0.1:9/predict").unwrap();

    let err = form.submit(&client).unwrap_err();
    assert!(matches!(err, SubmitError::Validation));
    assert!(form.history().read_all().is_empty());
}
