// End-to-end session scenarios: format requests, copies and the notifications
// they produce, driven through SessionController with in-memory collaborators.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{block_on, LocalPool};
use futures::future::{self, LocalBoxFuture};
use futures::task::LocalSpawnExt;

use sciencv_formatter::clipboard::{ClipboardWriter, CopyOutcome, CopyStrategy, TierFailure};
use sciencv_formatter::models::{Channel, ClipboardPayload, RenderedOutput, NO_CONTENT_HTML};
use sciencv_formatter::notify::{DismissTimer, DismissWindows, NotificationPresenter, NotificationSurface};
use sciencv_formatter::session::{
    shortcut_for, KeyChord, ResponseOrdering, SessionController, SessionView,
};
use sciencv_formatter::transport::{HttpBackend, TransportClient};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct FakeView {
    input: RefCell<String>,
    loading: RefCell<Vec<bool>>,
    shown: RefCell<Vec<RenderedOutput>>,
    flashes: Cell<usize>,
}

impl FakeView {
    fn type_text(&self, text: &str) {
        *self.input.borrow_mut() = text.to_string();
    }
}

impl SessionView for FakeView {
    fn input_text(&self) -> String {
        self.input.borrow().clone()
    }

    fn set_loading(&self, loading: bool) {
        self.loading.borrow_mut().push(loading);
    }

    fn show_output(&self, output: &RenderedOutput) {
        self.shown.borrow_mut().push(output.clone());
    }

    fn flash_copied(&self) {
        self.flashes.set(self.flashes.get() + 1);
    }
}

type Reply = Result<String, String>;

enum Scripted {
    Now(Reply),
    Later(oneshot::Receiver<Reply>),
}

/// Backend answering from a queue; clones share the queue and request log
#[derive(Clone, Default)]
struct QueuedBackend {
    replies: Rc<RefCell<VecDeque<Scripted>>>,
    bodies: Rc<RefCell<Vec<String>>>,
}

impl QueuedBackend {
    fn reply(&self, body: &str) {
        self.replies.borrow_mut().push_back(Scripted::Now(Ok(body.to_string())));
    }

    fn fail(&self, message: &str) {
        self.replies.borrow_mut().push_back(Scripted::Now(Err(message.to_string())));
    }

    fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Scripted::Later(rx));
        tx
    }
}

impl HttpBackend for QueuedBackend {
    fn post_json<'a>(&'a self, _url: &'a str, body: String) -> LocalBoxFuture<'a, Reply> {
        self.bodies.borrow_mut().push(body);
        match self.replies.borrow_mut().pop_front() {
            Some(Scripted::Now(reply)) => Box::pin(future::ready(reply)),
            Some(Scripted::Later(rx)) => {
                Box::pin(async move { rx.await.unwrap_or_else(|_| Err("reply dropped".to_string())) })
            }
            None => Box::pin(future::ready(Err("no scripted reply".to_string()))),
        }
    }
}

type TierLog = Rc<RefCell<Vec<(CopyOutcome, ClipboardPayload)>>>;

struct ScriptedTier {
    outcome: CopyOutcome,
    works: bool,
    log: TierLog,
}

impl CopyStrategy for ScriptedTier {
    fn outcome(&self) -> CopyOutcome {
        self.outcome
    }

    fn attempt<'a>(&'a self, payload: &'a ClipboardPayload) -> LocalBoxFuture<'a, Result<(), TierFailure>> {
        self.log.borrow_mut().push((self.outcome, payload.clone()));
        let result = if self.works {
            Ok(())
        } else {
            Err(TierFailure::Unavailable("scripted"))
        };
        Box::pin(future::ready(result))
    }
}

struct SilentSurface;

impl NotificationSurface for SilentSurface {
    fn show(&self, _channel: Channel, _message: &str) {}
    fn hide(&self, _channel: Channel) {}
}

struct NeverFires;

impl DismissTimer for NeverFires {
    fn schedule(&self, _delay_ms: u32, _task: Box<dyn FnOnce()>) {}
}

struct Harness {
    controller: SessionController,
    view: Rc<FakeView>,
    backend: QueuedBackend,
    tiers: TierLog,
}

impl Harness {
    fn new(working_tiers: [bool; 3]) -> Self {
        Self::with_ordering(working_tiers, ResponseOrdering::default())
    }

    fn with_ordering(working_tiers: [bool; 3], ordering: ResponseOrdering) -> Self {
        let view = Rc::new(FakeView::default());
        let backend = QueuedBackend::default();
        let tiers: TierLog = Rc::new(RefCell::new(Vec::new()));

        let mut clipboard = ClipboardWriter::new();
        let outcomes = [CopyOutcome::RichHtml, CopyOutcome::LegacyHtml, CopyOutcome::PlainTextOnly];
        for (outcome, works) in outcomes.into_iter().zip(working_tiers) {
            clipboard = clipboard.with_tier(ScriptedTier {
                outcome,
                works,
                log: Rc::clone(&tiers),
            });
        }

        let controller = SessionController::new(
            TransportClient::new("/sciencv/format", Box::new(backend.clone())),
            clipboard,
            NotificationPresenter::new(SilentSurface, NeverFires, DismissWindows::default()),
            view.clone(),
            ordering,
        );

        Self {
            controller,
            view,
            backend,
            tiers,
        }
    }

    fn error(&self) -> Option<String> {
        let notifier = self.controller.notifier();
        notifier
            .is_visible(Channel::Error)
            .then(|| notifier.message(Channel::Error))
            .flatten()
    }

    fn success(&self) -> Option<String> {
        let notifier = self.controller.notifier();
        notifier
            .is_visible(Channel::Success)
            .then(|| notifier.message(Channel::Success))
            .flatten()
    }
}

// ============================================================================
// Format scenarios
// ============================================================================

#[test]
fn test_heading_formats_then_copies_with_formatting() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("# Hi");
    h.backend.reply(r#"{"html": "<h1>Hi</h1>"}"#);

    block_on(h.controller.format());

    assert_eq!(h.controller.output(), RenderedOutput::Html("<h1>Hi</h1>".to_string()));
    assert_eq!(*h.view.shown.borrow(), vec![RenderedOutput::Html("<h1>Hi</h1>".to_string())]);
    assert_eq!(*h.view.loading.borrow(), vec![true, false]);
    assert_eq!(h.success().as_deref(), Some("Text formatted successfully!"));
    assert_eq!(*h.backend.bodies.borrow(), vec![r##"{"text":"# Hi"}"##.to_string()]);

    block_on(h.controller.copy());

    let tiers = h.tiers.borrow();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0].0, CopyOutcome::RichHtml);
    assert_eq!(tiers[0].1.html, "<h1>Hi</h1>");
    assert_eq!(tiers[0].1.text, "Hi");
    assert_eq!(h.success().as_deref(), Some("Content copied to clipboard with formatting!"));
    assert_eq!(h.view.flashes.get(), 1);
    assert!(!h.controller.is_copying());
}

#[test]
fn test_service_error_leaves_output_unchanged() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("| broken");
    h.backend.reply(r#"{"html": "", "error": "parse failed"}"#);

    block_on(h.controller.format());

    assert_eq!(h.controller.output(), RenderedOutput::Placeholder);
    assert!(h.view.shown.borrow().is_empty());
    let error = h.error().unwrap();
    assert!(error.contains("parse failed"), "got {:?}", error);
    assert_eq!(*h.view.loading.borrow(), vec![true, false]);
    assert!(!h.controller.is_formatting());
}

#[test]
fn test_network_failure_keeps_previous_output() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("first");
    h.backend.reply(r#"{"html": "<p>first</p>"}"#);
    block_on(h.controller.format());

    h.view.type_text("second");
    h.backend.fail("connection refused");
    block_on(h.controller.format());

    assert_eq!(h.controller.output(), RenderedOutput::Html("<p>first</p>".to_string()));
    assert_eq!(h.error().as_deref(), Some("Network error: connection refused"));
    assert_eq!(*h.view.loading.borrow(), vec![true, false, true, false]);
}

#[test]
fn test_malformed_reply_reported_as_network_error() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("x");
    h.backend.reply("<html>502 Bad Gateway</html>");

    block_on(h.controller.format());

    assert!(h.error().unwrap().starts_with("Network error: "));
    assert_eq!(*h.view.loading.borrow(), vec![true, false]);
}

#[test]
fn test_blank_input_is_rejected_locally() {
    let h = Harness::new([true, true, true]);
    for input in ["", "   ", "\n\t\n"] {
        h.view.type_text(input);
        block_on(h.controller.format());
        assert_eq!(h.error().as_deref(), Some("Please enter some Markdown text to format."));
    }
    assert!(h.backend.bodies.borrow().is_empty());
    assert!(h.view.loading.borrow().is_empty());
}

#[test]
fn test_blank_html_shows_no_content() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("<!-- nothing -->");
    h.backend.reply(r#"{"html": "", "error": null}"#);

    block_on(h.controller.format());

    assert_eq!(h.controller.output(), RenderedOutput::NoContent);
    let shown = h.view.shown.borrow();
    assert_eq!(shown[0].display_html(), NO_CONTENT_HTML);
    assert_eq!(h.success().as_deref(), Some("Text formatted successfully!"));
}

#[test]
fn test_every_submission_is_answered() {
    let replies = [
        r#"{"html": "<p>a</p>"}"#,
        r#"{"html": ""}"#,
        r#"{"error": "boom"}"#,
        "garbage",
        "{}",
    ];
    for reply in replies {
        let h = Harness::new([true, true, true]);
        h.view.type_text("text");
        h.backend.reply(reply);
        block_on(h.controller.format());
        assert!(
            h.success().is_some() || h.error().is_some(),
            "reply {:?} produced no notification",
            reply
        );
    }
}

#[test]
fn test_keyboard_shortcuts_reach_same_actions() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("**bold**");
    h.backend.reply(r#"{"html": "<p><strong>bold</strong></p>"}"#);

    let format = shortcut_for(&KeyChord::new("Enter").ctrl()).unwrap();
    block_on(h.controller.dispatch(format));
    assert!(h.controller.output().has_content());

    let copy = shortcut_for(&KeyChord::new("C").meta().shift()).unwrap();
    block_on(h.controller.dispatch(copy));
    assert_eq!(h.tiers.borrow()[0].1.text, "bold");
}

// ============================================================================
// Response ordering
// ============================================================================

fn race(ordering: ResponseOrdering) -> Harness {
    let h = Harness::with_ordering([true, true, true], ordering);
    let first = h.backend.defer();
    let second = h.backend.defer();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    h.view.type_text("one");
    let session = h.controller.clone();
    spawner.spawn_local(async move { session.format().await }).unwrap();
    pool.run_until_stalled();

    h.view.type_text("two");
    let session = h.controller.clone();
    spawner.spawn_local(async move { session.format().await }).unwrap();
    pool.run_until_stalled();
    assert!(h.controller.is_formatting());

    // Second request resolves first
    second.send(Ok(r#"{"html": "<p>two</p>"}"#.to_string())).unwrap();
    pool.run_until_stalled();
    assert_eq!(h.controller.output(), RenderedOutput::Html("<p>two</p>".to_string()));
    // First request is still pending, so the indicator stays up
    assert!(h.controller.is_formatting());
    assert_eq!(h.view.loading.borrow().last(), Some(&true));

    first.send(Ok(r#"{"html": "<p>one</p>"}"#.to_string())).unwrap();
    pool.run_until_stalled();

    assert!(!h.controller.is_formatting());
    assert_eq!(*h.view.loading.borrow(), vec![true, true, false]);
    h
}

#[test]
fn test_last_response_to_resolve_wins() {
    let h = race(ResponseOrdering::LastToResolve);
    assert_eq!(h.controller.output(), RenderedOutput::Html("<p>one</p>".to_string()));
    assert_eq!(h.view.shown.borrow().len(), 2);
}

#[test]
fn test_stale_response_discarded_when_latest_dispatched_wins() {
    let h = race(ResponseOrdering::LatestDispatched);
    assert_eq!(h.controller.output(), RenderedOutput::Html("<p>two</p>".to_string()));
    assert_eq!(h.view.shown.borrow().len(), 1);
}

// ============================================================================
// Copy scenarios
// ============================================================================

#[test]
fn test_copy_before_format_touches_no_clipboard() {
    let h = Harness::new([true, true, true]);
    block_on(h.controller.copy());

    assert_eq!(h.error().as_deref(), Some("No formatted content to copy."));
    assert!(h.tiers.borrow().is_empty());
}

#[test]
fn test_copy_of_no_content_is_rejected() {
    let h = Harness::new([true, true, true]);
    h.view.type_text("x");
    h.backend.reply(r#"{"html": "  "}"#);
    block_on(h.controller.format());

    block_on(h.controller.copy());

    assert_eq!(h.error().as_deref(), Some("No formatted content to copy."));
    assert!(h.tiers.borrow().is_empty());
}

#[test]
fn test_copy_falls_back_to_plain_text() {
    let h = Harness::new([false, false, true]);
    h.view.type_text("# Title");
    h.backend.reply(r#"{"html": "<h1 style=\"font-size: 18pt;\">Title</h1>"}"#);
    block_on(h.controller.format());

    block_on(h.controller.copy());

    let tried: Vec<_> = h.tiers.borrow().iter().map(|(outcome, _)| *outcome).collect();
    assert_eq!(
        tried,
        vec![CopyOutcome::RichHtml, CopyOutcome::LegacyHtml, CopyOutcome::PlainTextOnly]
    );
    assert_eq!(h.success().as_deref(), Some("Content copied to clipboard (plain text only)!"));
    assert_eq!(h.view.flashes.get(), 0);
}

#[test]
fn test_copy_with_every_tier_failing() {
    let h = Harness::new([false, false, false]);
    h.view.type_text("x");
    h.backend.reply(r#"{"html": "<p>x</p>"}"#);
    block_on(h.controller.format());

    block_on(h.controller.copy());

    assert_eq!(
        h.error().as_deref(),
        Some("Unable to copy to clipboard. Please select and copy manually.")
    );
    assert!(!h.controller.is_copying());
}
