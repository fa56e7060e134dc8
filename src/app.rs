//! Application State
//!
//! Central application state for cmedit: the form, which field has focus,
//! and the requests still on their way back.

use cmedit::cms::{Completion, ContentManagerClient};
use cmedit::config::Config;
use cmedit::editor::{self, CtypePolicy, FormState};
use cmedit::EditorError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Application modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Edit, // Editing the form
    Help, // F1 help popup
}

/// Form control with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Path,
    Content,
    ContentType,
    IncludeDate,
    ExpiresToggle,
    Expires,
    HeaderName(usize),
    HeaderValue(usize),
}

impl Focus {
    pub fn is_checkbox(self) -> bool {
        matches!(self, Focus::IncludeDate | Focus::ExpiresToggle)
    }

    pub fn header_index(self) -> Option<usize> {
        match self {
            Focus::HeaderName(i) | Focus::HeaderValue(i) => Some(i),
            _ => None,
        }
    }
}

/// A finished request, delivered back to the UI loop
#[derive(Debug)]
pub enum RequestEvent {
    Fetched {
        path: String,
        completion: Completion,
    },
    Stored {
        path: String,
        result: Result<Completion, EditorError>,
    },
}

/// Main application state
pub struct App {
    pub client: ContentManagerClient,
    pub form: FormState,
    pub focus: Focus,
    pub mode: Mode,

    /// Location the editor was opened at, used when the path field is empty
    pub location: Option<String>,
    pub ctype_policy: CtypePolicy,
    pub config: Config,

    /// Requests spawned but not yet completed
    pub in_flight: usize,
    /// Save tasks still running; awaited before exit
    saves: Vec<JoinHandle<()>>,

    events_tx: UnboundedSender<RequestEvent>,
    events_rx: UnboundedReceiver<RequestEvent>,
}

impl App {
    pub fn new(
        client: ContentManagerClient,
        config: Config,
        ctype_policy: CtypePolicy,
        location: Option<String>,
    ) -> Self {
        let (events_tx, events_rx) = unbounded_channel();

        Self {
            client,
            form: FormState::default(),
            focus: Focus::Path,
            mode: Mode::Edit,
            location,
            ctype_policy,
            config,
            in_flight: 0,
            saves: Vec::new(),
            events_tx,
            events_rx,
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Controls in display order; the expiry value only while its region is shown
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![
            Focus::Path,
            Focus::Content,
            Focus::ContentType,
            Focus::IncludeDate,
            Focus::ExpiresToggle,
        ];
        if self.form.expires_visible {
            order.push(Focus::Expires);
        }
        for i in 0..self.form.headers.len() {
            order.push(Focus::HeaderName(i));
            order.push(Focus::HeaderValue(i));
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    /// Move focus to a control that still exists after the form changed shape
    fn clamp_focus(&mut self) {
        let order = self.focus_order();
        if !order.contains(&self.focus) {
            self.focus = order.last().copied().unwrap_or(Focus::Path);
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Path => Some(&mut self.form.path),
            Focus::Content => Some(&mut self.form.content),
            Focus::ContentType => Some(&mut self.form.ctype),
            Focus::Expires => Some(&mut self.form.expires),
            Focus::HeaderName(i) => self.form.headers.get_mut(i).map(|row| &mut row.name),
            Focus::HeaderValue(i) => self.form.headers.get_mut(i).map(|row| &mut row.value),
            Focus::IncludeDate | Focus::ExpiresToggle => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if c == ' ' && self.focus.is_checkbox() {
            self.toggle_focused_checkbox();
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
        self.after_edit();
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
        self.after_edit();
    }

    fn after_edit(&mut self) {
        if self.focus == Focus::ContentType {
            self.form.ctype_edited();
        }
    }

    /// Newline in the content body, toggle on checkboxes, next field elsewhere
    pub fn enter(&mut self) {
        match self.focus {
            Focus::Content => self.form.content.push('\n'),
            f if f.is_checkbox() => self.toggle_focused_checkbox(),
            _ => self.focus_next(),
        }
    }

    pub fn toggle_focused_checkbox(&mut self) {
        match self.focus {
            Focus::IncludeDate => self.form.incdate = !self.form.incdate,
            Focus::ExpiresToggle => {
                let checked = !self.form.expires_checked;
                self.form.set_expires_checked(checked);
            },
            _ => {},
        }
    }

    pub fn add_header_row(&mut self) {
        self.form.add_header_row();
        self.focus = Focus::HeaderName(self.form.headers.len() - 1);
    }

    pub fn remove_focused_header_row(&mut self) {
        let Some(index) = self.focus.header_index() else {
            return;
        };
        if self.form.remove_header_row(index) {
            if self.form.headers.is_empty() {
                self.focus = Focus::ExpiresToggle;
            } else {
                self.focus = Focus::HeaderName(index.min(self.form.headers.len() - 1));
            }
        }
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.mode = Mode::Edit;
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Fetch the resource named by the path field (or the location)
    pub fn load(&mut self) {
        let Some(path) = editor::begin_load(&mut self.form, None, self.location.as_deref()) else {
            return;
        };

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let completion = client.fetch(&path).await;
            let _ = tx.send(RequestEvent::Fetched { path, completion });
        });
    }

    /// Store the form as a full replacement of its resource
    pub fn save(&mut self) {
        let form = self.form.clone();
        let policy = self.ctype_policy;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        self.in_flight += 1;

        let handle = tokio::spawn(async move {
            let result = editor::save(&client, &form, policy).await;
            let _ = tx.send(RequestEvent::Stored {
                path: form.path,
                result,
            });
        });
        self.saves.push(handle);
    }

    pub fn pending_saves(&self) -> usize {
        self.saves.iter().filter(|h| !h.is_finished()).count()
    }

    /// Apply every completion that has arrived, in arrival order
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_request_event(event);
        }
        self.saves.retain(|h| !h.is_finished());
    }

    /// Wait for every save still running, then apply what arrived.
    /// Pending loads are dropped.
    pub async fn finish_saves(&mut self) {
        for handle in std::mem::take(&mut self.saves) {
            if let Err(e) = handle.await {
                tracing::error!("Save task failed: {}", e);
            }
        }
        self.drain_events();
    }

    pub fn handle_request_event(&mut self, event: RequestEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            RequestEvent::Fetched { path, completion } => {
                if let Err(e) = editor::finish_load(&mut self.form, &path, &completion) {
                    tracing::error!("Loading {} failed: {}", path, e);
                    return;
                }
                self.clamp_focus();

                if let Err(e) = self.config.set_last_path(&path) {
                    tracing::warn!("Failed to save config: {}", e);
                }
            },
            RequestEvent::Stored { path, result } => match result {
                Ok(completion) if completion.is_success() => {
                    tracing::debug!("Stored resource {}", path);
                },
                Ok(completion) => {
                    tracing::warn!("Storing {} finished with {:?}", path, completion.status);
                },
                Err(e) => tracing::error!("Storing {} failed: {}", path, e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::handle_key_event;
    use crossterm::event::{KeyCode, KeyModifiers};
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app() -> App {
        let client = ContentManagerClient::new("http://127.0.0.1:9").unwrap();
        App::new(client, Config::default(), CtypePolicy::Omit, None)
    }

    fn fetched(body: &str) -> RequestEvent {
        RequestEvent::Fetched {
            path: "/foo".to_string(),
            completion: Completion {
                status: Some(StatusCode::OK),
                body: body.to_string(),
            },
        }
    }

    #[test]
    fn test_focus_order_hides_expires() {
        let mut app = test_app();
        assert!(!app.focus_order().contains(&Focus::Expires));

        app.focus = Focus::ExpiresToggle;
        app.input_char(' ');
        assert!(app.form.expires_checked);
        assert!(app.focus_order().contains(&Focus::Expires));
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut app = test_app();
        app.focus_prev();
        assert_eq!(app.focus, Focus::ExpiresToggle);
        app.focus_next();
        assert_eq!(app.focus, Focus::Path);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = test_app();
        for c in "/foo".chars() {
            app.input_char(c);
        }
        app.backspace();
        assert_eq!(app.form.path, "/fo");

        app.focus = Focus::Content;
        app.input_char('a');
        app.enter();
        app.input_char('b');
        assert_eq!(app.form.content, "a\nb");
    }

    #[test]
    fn test_header_rows() {
        let mut app = test_app();
        app.add_header_row();
        assert_eq!(app.focus, Focus::HeaderName(0));
        for c in "X-Custom".chars() {
            app.input_char(c);
        }
        app.focus_next();
        for c in "a:b".chars() {
            app.input_char(c);
        }
        assert_eq!(app.form.to_payload(CtypePolicy::Omit).headers, vec!["X-Custom:a:b"]);

        app.remove_focused_header_row();
        assert!(app.form.headers.is_empty());
        assert_eq!(app.focus, Focus::ExpiresToggle);
    }

    #[test]
    fn test_fetched_event_replaces_form() {
        let mut app = test_app();
        app.in_flight = 1;
        app.add_header_row();
        app.add_header_row();
        app.focus = Focus::HeaderValue(1);

        app.handle_request_event(fetched(r#"{"content":"hello","ctype":"text/plain"}"#));

        assert_eq!(app.in_flight, 0);
        assert_eq!(app.form.content, "hello");
        assert!(app.form.headers.is_empty());
        assert!(app.focus_order().contains(&app.focus));
    }

    #[test]
    fn test_typing_ctype_marks_it_set() {
        let mut app = test_app();
        app.handle_request_event(fetched(r#"{"content":"x","ctype":"a"}"#));
        app.focus = Focus::ContentType;

        app.backspace();
        assert!(!app.form.ctype_present);
        assert_eq!(app.form.to_payload(CtypePolicy::Omit).ctype, None);

        app.input_char('b');
        assert_eq!(app.form.to_payload(CtypePolicy::Omit).ctype.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_save_before_quit_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content_manager_json/page"))
            .and(body_json(json!({"content": "draft", "headers": []})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContentManagerClient::new(&server.uri()).unwrap();
        let mut app = App::new(client, Config::default(), CtypePolicy::Omit, None);
        app.form.path = "/page".to_string();
        app.form.content = "draft".to_string();

        assert!(!handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(handle_key_event(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert_eq!(app.in_flight, 1);

        app.finish_saves().await;
        assert_eq!(app.in_flight, 0);
        assert_eq!(app.pending_saves(), 0);
    }

    #[test]
    fn test_malformed_fetch_keeps_form() {
        let mut app = test_app();
        app.form.content = "draft".to_string();

        app.handle_request_event(fetched("not json"));
        assert_eq!(app.form.content, "draft");
    }
}
