//! Chat widget: one conversation session bound to a transcript and to the
//! delayed re-prompt timer. All entry points exist only once the catalogue
//! has loaded; a failed load renders the apology instead.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::catalogue::Catalogue;
use crate::config::ChatConfig;
use crate::conversation::{replies, ChatEvent, ConversationEngine, ConversationState, Effect, MenuChoice};
use crate::error::CatalogueError;
use crate::scheduler::{MenuDue, MenuTimer};
use crate::transcript::Transcript;

/// Text input under an open technology prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    text: String,
    suggestions: Vec<String>,
}

impl PromptInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Enter picks the last listed suggestion, else submits the typed text.
    pub fn enter(&self) -> Option<ChatEvent> {
        if let Some(last) = self.suggestions.last() {
            return Some(ChatEvent::PickSuggestion(last.clone()));
        }
        let text = self.text.trim();
        (!text.is_empty()).then(|| ChatEvent::Submit(text.to_string()))
    }
}

pub struct ChatWidget<T: Transcript> {
    id: Uuid,
    engine: ConversationEngine,
    timer: MenuTimer,
    transcript: T,
    input: Option<PromptInput>,
    suggestion_limit: usize,
    open: bool,
}

impl<T: Transcript> ChatWidget<T> {
    /// Wire a widget to a loaded catalogue and show the first menu.
    /// Returns the widget and the channel its re-prompt ticks arrive on.
    pub fn boot(
        catalogue: Arc<Catalogue>,
        transcript: T,
        config: &ChatConfig,
    ) -> (Self, mpsc::UnboundedReceiver<MenuDue>) {
        let (timer, due_rx) = MenuTimer::channel(config.menu_delay);
        let mut widget = Self {
            id: Uuid::new_v4(),
            engine: ConversationEngine::new(catalogue),
            timer,
            transcript,
            input: None,
            suggestion_limit: config.suggestion_limit,
            open: true,
        };
        info!(session = %widget.id, records = widget.engine.catalogue().len(), "chat_widget_ready");
        let effects = widget.engine.start();
        widget.apply(effects);
        (widget, due_rx)
    }

    /// Terminal state after a failed load: log it and show the apology.
    pub fn report_load_failure(transcript: &mut T, err: &CatalogueError) {
        error!(error = %err, "catalogue_load_failed");
        transcript.append_bot(&replies::load_failure());
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }

    pub fn state(&self) -> ConversationState {
        self.engine.state()
    }

    pub fn transcript(&self) -> &T {
        &self.transcript
    }

    pub fn input(&self) -> Option<&PromptInput> {
        self.input.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_reprompt_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.transcript.set_visible(true);
        debug!(session = %self.id, "chat_opened");
        // The re-prompt was dropped on close; an idle session gets its menu now.
        if self.state() == ConversationState::Idle && !self.timer.is_pending() {
            let effects = self.engine.handle(ChatEvent::MenuDue);
            self.apply(effects);
        }
    }

    /// Hide the widget and cancel anything scheduled against it.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.timer.cancel();
        self.transcript.set_visible(false);
        debug!(session = %self.id, "chat_closed");
    }

    pub fn choose(&mut self, choice: MenuChoice) {
        self.dispatch(ChatEvent::Choose(choice));
    }

    /// Keystroke in the prompt input: refresh live suggestions.
    pub fn type_text(&mut self, text: &str) -> &[String] {
        if !self.open || self.input.is_none() {
            return &[];
        }
        let suggestions = self.engine.live_suggestions(text, self.suggestion_limit);
        self.transcript.render_suggestions(&suggestions);
        match self.input.as_mut() {
            Some(input) => {
                input.text = text.to_string();
                input.suggestions = suggestions;
                &input.suggestions
            }
            None => &[],
        }
    }

    pub fn press_enter(&mut self) {
        if let Some(event) = self.input.as_ref().and_then(PromptInput::enter) {
            self.dispatch(event);
        }
    }

    pub fn pick_suggestion(&mut self, name: &str) {
        self.settle_input(name);
        self.dispatch(ChatEvent::PickSuggestion(name.to_string()));
    }

    /// Free-text submission. The suggestion list goes away with it, so a
    /// later Enter cannot pick a name from before a not-found reply.
    pub fn submit(&mut self, text: &str) {
        self.settle_input("");
        self.dispatch(ChatEvent::Submit(text.to_string()));
    }

    fn settle_input(&mut self, text: &str) {
        if !self.open {
            return;
        }
        if let Some(input) = self.input.as_mut() {
            input.text = text.to_string();
            input.suggestions.clear();
            self.transcript.render_suggestions(&[]);
        }
    }

    /// End the exchange and schedule the menu. Repeated calls leave a single
    /// re-prompt pending.
    pub fn reset_conversation(&mut self) {
        let effects = self.engine.reset();
        self.apply(effects);
    }

    /// A re-prompt tick from the timer channel.
    pub fn on_menu_due(&mut self, due: MenuDue) {
        if !self.timer.accept(due) {
            return;
        }
        self.dispatch(ChatEvent::MenuDue);
    }

    pub fn dispatch(&mut self, event: ChatEvent) {
        if !self.open {
            debug!(session = %self.id, event = ?event, "event_while_closed");
            return;
        }
        let effects = self.engine.handle(event);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UserMessage(text) => self.transcript.append_user(&text),
                Effect::BotMessage(message) => self.transcript.append_bot(&message),
                Effect::ShowMenu { greeting, choices } => {
                    self.transcript.append_bot(&greeting);
                    self.transcript.render_menu(&choices);
                }
                Effect::RemoveMenu => self.transcript.remove_menu(),
                Effect::Prompt(prompt) => {
                    self.input = Some(PromptInput::default());
                    self.transcript.render_text_prompt(&prompt);
                }
                Effect::ClearInput => {
                    self.input = None;
                    self.transcript.clear_input();
                }
                Effect::ScheduleMenu => {
                    if self.open {
                        self.timer.schedule();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::sample;
    use crate::transcript::{Entry, MemoryTranscript};
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(1500);

    fn boot() -> (ChatWidget<MemoryTranscript>, mpsc::UnboundedReceiver<MenuDue>) {
        let config = ChatConfig {
            menu_delay: DELAY,
            ..ChatConfig::default()
        };
        ChatWidget::boot(Arc::new(sample()), MemoryTranscript::new(), &config)
    }

    mod prompt_input {
        use super::*;

        #[test]
        fn enter_prefers_last_suggestion() {
            let input = PromptInput {
                text: "ja".into(),
                suggestions: vec!["Java".into(), "JavaScript".into()],
            };
            assert_eq!(input.enter(), Some(ChatEvent::PickSuggestion("JavaScript".into())));
        }

        #[test]
        fn enter_submits_trimmed_text() {
            let input = PromptInput {
                text: "  Kotlin ".into(),
                suggestions: vec![],
            };
            assert_eq!(input.enter(), Some(ChatEvent::Submit("Kotlin".into())));
        }

        #[test]
        fn enter_on_blank_does_nothing() {
            assert_eq!(PromptInput::default().enter(), None);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn boot_shows_menu() {
        let (widget, _rx) = boot();
        assert_eq!(widget.transcript().menus_on_screen(), 1);
        assert_eq!(widget.state(), ConversationState::Idle);
    }

    #[test]
    fn load_failure_renders_apology() {
        let mut transcript = MemoryTranscript::new();
        let err = Catalogue::from_json("not json").unwrap_err();
        ChatWidget::<MemoryTranscript>::report_load_failure(&mut transcript, &err);
        assert_eq!(transcript.bot_messages(), vec![replies::load_failure().to_plain()]);
        assert!(!transcript.has_menu());
    }

    #[tokio::test(start_paused = true)]
    async fn typing_shows_prefix_suggestions() {
        let (mut widget, _rx) = boot();
        widget.choose(MenuChoice::Detail);
        assert!(!widget.transcript().has_menu());

        let shown = widget.type_text("ja").to_vec();
        assert_eq!(shown, vec!["Java", "JavaScript"]);
        assert_eq!(widget.transcript().suggestions, shown);
    }

    #[tokio::test(start_paused = true)]
    async fn detail_flow_reprompts_after_delay() {
        let (mut widget, mut rx) = boot();
        widget.choose(MenuChoice::Detail);
        widget.type_text("pyt");
        widget.press_enter();

        assert_eq!(widget.state(), ConversationState::Idle);
        assert!(widget.input().is_none());
        assert!(widget.is_reprompt_pending());
        assert!(!widget.transcript().has_menu());

        tokio::time::sleep(DELAY * 2).await;
        let due = rx.try_recv().unwrap();
        widget.on_menu_due(due);
        assert_eq!(widget.transcript().menus_on_screen(), 1);
        assert!(!widget.is_reprompt_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn closing_cancels_reprompt_and_reopening_restores_menu() {
        let (mut widget, mut rx) = boot();
        widget.choose(MenuChoice::Evolution);
        widget.pick_suggestion("Python");
        assert!(widget.is_reprompt_pending());

        widget.close();
        assert!(!widget.transcript().visible);
        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());

        widget.open();
        assert_eq!(widget.transcript().menus_on_screen(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_twice_leaves_one_reprompt() {
        let (mut widget, mut rx) = boot();
        widget.choose(MenuChoice::Compare);
        widget.submit("Java");
        widget.reset_conversation();
        widget.reset_conversation();

        tokio::time::sleep(DELAY * 2).await;
        let due = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());
        widget.on_menu_due(due);
        assert_eq!(widget.transcript().menus_on_screen(), 1);
        assert!(widget.engine().pending_comparison_subject().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn submission_drops_stale_suggestions() {
        let (mut widget, _rx) = boot();
        widget.choose(MenuChoice::Detail);
        widget.type_text("ja");
        widget.submit("Kotlin");

        let input = widget.input().unwrap();
        assert!(input.suggestions().is_empty());
        assert!(widget.transcript().suggestions.is_empty());

        let answers = widget.transcript().bot_messages().len();
        widget.press_enter();
        assert_eq!(widget.state(), ConversationState::AwaitingDetailTarget);
        assert_eq!(widget.transcript().bot_messages().len(), answers);
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_keeps_prompt_open() {
        let (mut widget, _rx) = boot();
        widget.choose(MenuChoice::Detail);
        widget.submit("Zig");

        assert_eq!(widget.state(), ConversationState::AwaitingDetailTarget);
        assert!(widget.input().is_some());
        assert_eq!(
            widget.transcript().entries.last(),
            Some(&Entry::Bot(replies::not_found()))
        );
    }
}
