//! Page sessions: one page view with its document, dictionary, current
//! language and section renderers.

use crate::content::{ContentLoader, LoadError};
use crate::i18n::{Language, LanguageSwitch, TranslationDictionary};
use crate::render::{Document, SectionRenderer, SectionView};
use crate::retry::{Bootstrap, RetryConfig};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// The site's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Goals,
    About,
    Signup,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [PageKind::Home, PageKind::Goals, PageKind::About, PageKind::Signup];

    /// Name of the page's own content document.
    pub fn content_document(self) -> &'static str {
        match self {
            PageKind::Home => "homepage",
            PageKind::Goals => "goals",
            PageKind::About => "about",
            PageKind::Signup => "signup",
        }
    }

    /// Sections rendered from the page's own content document.
    pub fn views(self) -> &'static [SectionView] {
        match self {
            PageKind::Home => &[SectionView::HomeHero, SectionView::GoalCards],
            PageKind::Goals => &[
                SectionView::GoalsHero,
                SectionView::GoalsIntro,
                SectionView::GoalsList,
            ],
            PageKind::About => &[SectionView::AboutHero, SectionView::History, SectionView::Team],
            PageKind::Signup => &[SectionView::SignupHero],
        }
    }

    /// Every mount point of the page, shared header and footer included.
    pub fn mount_ids(self) -> Vec<&'static str> {
        let mut ids = vec![SectionView::Header.mount_id()];
        ids.extend(self.views().iter().map(|view| view.mount_id()));
        ids.push(SectionView::Footer.mount_id());
        ids
    }

    /// An empty document with this page's mount points.
    pub fn document(self) -> Document {
        Document::with_mounts(self.mount_ids())
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Home => "home",
            PageKind::Goals => "goals",
            PageKind::About => "about",
            PageKind::Signup => "signup",
        };
        f.write_str(name)
    }
}

impl FromStr for PageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "index" | "homepage" => Ok(PageKind::Home),
            "goals" => Ok(PageKind::Goals),
            "about" => Ok(PageKind::About),
            "signup" | "sign-up" => Ok(PageKind::Signup),
            other => anyhow::bail!("Unknown page: '{}'", other),
        }
    }
}

/// Settings for opening a page session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub initial_language: Language,
    /// Polling used to acquire the translation dictionary.
    pub dictionary_poll: RetryConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_language: Language::canonical(),
            dictionary_poll: RetryConfig::init_poll(),
        }
    }
}

/// One page view.
pub struct PageSession {
    kind: PageKind,
    document: Document,
    dictionary: TranslationDictionary,
    switch: LanguageSwitch,
    dictionary_fell_back: bool,
    failed_documents: Vec<String>,
}

impl PageSession {
    /// Open `kind` with its default mount points.
    pub async fn open(kind: PageKind, loader: &ContentLoader, options: SessionOptions) -> Self {
        Self::open_into(kind, kind.document(), loader, options).await
    }

    /// Open `kind` rendering into `document`.
    ///
    /// Sections whose mount point is missing from `document` are skipped.
    /// Content documents load concurrently; one that fails to load only
    /// removes its own sections. The dictionary is polled with
    /// `options.dictionary_poll` and degrades to an empty dictionary.
    pub async fn open_into(
        kind: PageKind,
        document: Document,
        loader: &ContentLoader,
        options: SessionOptions,
    ) -> Self {
        info!("Opening {} page", kind);

        let mut bootstrap = Bootstrap::new("translations", options.dictionary_poll);
        let outcome = bootstrap
            .run(|| loader.load_dictionary(), TranslationDictionary::empty)
            .await;
        let dictionary_fell_back = outcome.is_fallback();
        let dictionary = outcome.into_inner();

        let (page, header, footer) = futures::join!(
            loader.load(kind.content_document()),
            loader.load("header"),
            loader.load("footer"),
        );

        let mut session = Self {
            kind,
            document,
            dictionary,
            switch: LanguageSwitch::new(options.initial_language),
            dictionary_fell_back,
            failed_documents: Vec::new(),
        };

        session.attach(kind.content_document(), page, kind.views());
        session.attach("header", header, &[SectionView::Header]);
        session.attach("footer", footer, &[SectionView::Footer]);

        session.paint();
        info!(
            "✓ {} page rendered ({} sections)",
            kind,
            session.switch.subscriber_count()
        );
        session
    }

    fn attach(&mut self, name: &str, loaded: Result<Value, LoadError>, views: &[SectionView]) {
        match loaded {
            Ok(content) => {
                for view in views {
                    self.switch
                        .subscribe(Box::new(SectionRenderer::new(*view, content.clone())));
                }
            }
            Err(e) => {
                warn!("Error loading {}: {}", name, e);
                self.failed_documents.push(name.to_string());
            }
        }
    }

    /// Render every section under the current language.
    pub fn paint(&mut self) {
        self.switch.notify_all(&self.dictionary, &mut self.document);
    }

    /// Switch language and re-render every section from cached content.
    pub fn set_language(&mut self, language: Language) {
        self.switch
            .set_language(language, &self.dictionary, &mut self.document);
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn language(&self) -> &Language {
        self.switch.current()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn dictionary(&self) -> &TranslationDictionary {
        &self.dictionary
    }

    /// Whether the dictionary could not be loaded and rendering is untranslated.
    pub fn dictionary_fell_back(&self) -> bool {
        self.dictionary_fell_back
    }

    /// Content documents that failed to load.
    pub fn failed_documents(&self) -> &[String] {
        &self.failed_documents
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}
