//! Language switch coordinator.
//!
//! Owns the session's current language and an explicit list of subscribers.
//! Changing the language notifies every subscriber in registration order,
//! handing each one the new render context and the page document.

use crate::i18n::{Language, TranslationDictionary};
use crate::render::{Document, RenderContext};
use tracing::debug;

/// Something that re-renders when the language changes.
pub trait LanguageSubscriber: Send {
    fn language_changed(&mut self, ctx: &RenderContext<'_>, document: &mut Document);
}

/// Handle returned by [`LanguageSwitch::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Whether the current language came from the default or from a user choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// No explicit selection yet; the default language applies.
    Default,
    /// A language was selected through [`LanguageSwitch::set_language`].
    Selected,
}

pub struct LanguageSwitch {
    current: Language,
    state: SwitchState,
    subscribers: Vec<(SubscriptionId, Box<dyn LanguageSubscriber>)>,
    next_id: u64,
}

impl LanguageSwitch {
    /// Create a coordinator starting at `initial`.
    pub fn new(initial: Language) -> Self {
        Self {
            current: initial,
            state: SwitchState::Default,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> &Language {
        &self.current
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Register a subscriber. It is not notified until the next change or
    /// [`notify_all`](Self::notify_all).
    pub fn subscribe(&mut self, subscriber: Box<dyn LanguageSubscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Select `language` and notify every subscriber.
    ///
    /// Selecting the language that is already active still notifies, so a
    /// repeated click re-renders exactly like the first one.
    pub fn set_language(
        &mut self,
        language: Language,
        dictionary: &TranslationDictionary,
        document: &mut Document,
    ) {
        debug!("Language changed: {} -> {}", self.current, language);
        self.current = language;
        self.state = SwitchState::Selected;
        self.notify_all(dictionary, document);
    }

    /// Notify every subscriber under the current language.
    pub fn notify_all(&mut self, dictionary: &TranslationDictionary, document: &mut Document) {
        let ctx = RenderContext {
            language: &self.current,
            dictionary,
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber.language_changed(&ctx, document);
        }
    }
}

impl Default for LanguageSwitch {
    fn default() -> Self {
        Self::new(Language::canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records the language it was notified with.
    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl LanguageSubscriber for Recorder {
        fn language_changed(&mut self, ctx: &RenderContext<'_>, _document: &mut Document) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.tag, ctx.language));
        }
    }

    fn recorder(tag: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Box<dyn LanguageSubscriber> {
        Box::new(Recorder {
            tag,
            log: Arc::clone(log),
        })
    }

    #[test]
    fn test_starts_in_default_state() {
        let switch = LanguageSwitch::default();
        assert_eq!(switch.current(), &Language::canonical());
        assert_eq!(switch.state(), SwitchState::Default);
        assert_eq!(switch.subscriber_count(), 0);
    }

    #[test]
    fn test_set_language_notifies_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut switch = LanguageSwitch::default();
        switch.subscribe(recorder("hero", &log));
        switch.subscribe(recorder("footer", &log));

        let mut document = Document::new();
        switch.set_language(
            Language::new("Español"),
            &TranslationDictionary::empty(),
            &mut document,
        );

        assert_eq!(switch.state(), SwitchState::Selected);
        assert_eq!(switch.current().name(), "Español");
        assert_eq!(
            *log.lock().unwrap(),
            vec!["hero:Español".to_string(), "footer:Español".to_string()]
        );
    }

    #[test]
    fn test_reselecting_same_language_notifies_again() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut switch = LanguageSwitch::default();
        switch.subscribe(recorder("hero", &log));

        let mut document = Document::new();
        let dictionary = TranslationDictionary::empty();
        switch.set_language(Language::canonical(), &dictionary, &mut document);
        switch.set_language(Language::canonical(), &dictionary, &mut document);

        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut switch = LanguageSwitch::default();
        let hero = switch.subscribe(recorder("hero", &log));
        switch.subscribe(recorder("footer", &log));

        assert!(switch.unsubscribe(hero));
        assert!(!switch.unsubscribe(hero));

        let mut document = Document::new();
        switch.notify_all(&TranslationDictionary::empty(), &mut document);

        assert_eq!(*log.lock().unwrap(), vec!["footer:English".to_string()]);
        // notify_all alone does not count as a user selection
        assert_eq!(switch.state(), SwitchState::Default);
    }
}
