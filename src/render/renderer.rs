use crate::content::schema::{Footer, GoalCard, GoalDetail, Header, Hero, TeamMember};
use crate::i18n::{translate, Language, LanguageSubscriber, TranslationDictionary};
use crate::render::{sections, Document, Node};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Everything a renderer needs to know about the current language.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub language: &'a Language,
    pub dictionary: &'a TranslationDictionary,
}

/// The content of a section did not match the shape its template expects.
#[derive(Debug, Error)]
#[error("section '{section}' has unexpected content: {source}")]
pub struct ShapeError {
    pub section: String,
    #[source]
    pub source: serde_json::Error,
}

/// Outcome of a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The mount point was cleared and rebuilt.
    Rendered,
    /// The page has no such mount point.
    NoMount,
    /// The content document has no data for this section.
    NoContent,
}

/// Which template a section uses and where in its document it reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionView {
    HomeHero,
    GoalCards,
    GoalsHero,
    GoalsIntro,
    GoalsList,
    AboutHero,
    History,
    Team,
    SignupHero,
    Header,
    Footer,
}

impl SectionView {
    /// Mount point the section renders into by default.
    pub fn mount_id(self) -> &'static str {
        match self {
            SectionView::HomeHero => "hero",
            SectionView::GoalCards => "goals-container",
            SectionView::GoalsHero => "goals-hero",
            SectionView::GoalsIntro => "goals-intro",
            SectionView::GoalsList => "goals-list",
            SectionView::AboutHero => "about-hero",
            SectionView::History => "history",
            SectionView::Team => "team",
            SectionView::SignupHero => "signup-hero",
            SectionView::Header => "site-header",
            SectionView::Footer => "site-footer",
        }
    }

    /// Part of the content document this section reads.
    ///
    /// The homepage sections skip rendering when their key is absent; every
    /// other section renders its defaults instead.
    fn select<'a>(self, document: &'a Value) -> Option<&'a Value> {
        let key = match self {
            SectionView::Header | SectionView::Footer => return Some(document),
            SectionView::HomeHero => return document.get("hero"),
            SectionView::GoalCards => return document.get("goals"),
            SectionView::GoalsHero | SectionView::AboutHero | SectionView::SignupHero => "hero",
            SectionView::GoalsIntro => "intro",
            SectionView::GoalsList => "goals",
            SectionView::History => "history",
            SectionView::Team => "team",
        };
        Some(document.get(key).unwrap_or(&Value::Null))
    }

    /// Translate `content` for this section.
    ///
    /// The header's language names stay as written: each one is the key the
    /// picker switches to.
    fn translate(self, content: &Value, ctx: &RenderContext<'_>) -> Value {
        let mut translated = translate(content, ctx.language, ctx.dictionary);
        if self == SectionView::Header {
            if let (Some(slot), Some(names)) = (translated.get_mut("languages"), content.get("languages")) {
                *slot = names.clone();
            }
        }
        translated
    }

    fn build(self, mount_id: &str, content: &Value, language: &Language) -> Result<Vec<Node>, ShapeError> {
        let nodes = match self {
            SectionView::HomeHero => sections::home_hero(&parse::<Hero>(mount_id, content)?),
            SectionView::GoalCards => sections::goal_cards(&parse::<Vec<GoalCard>>(mount_id, content)?),
            SectionView::GoalsHero => sections::goals_hero(&parse::<Hero>(mount_id, content)?),
            SectionView::GoalsIntro => sections::goals_intro(&parse::<String>(mount_id, content)?),
            SectionView::GoalsList => sections::goals_list(&parse::<Vec<GoalDetail>>(mount_id, content)?),
            SectionView::AboutHero => sections::about_hero(&parse::<Hero>(mount_id, content)?),
            SectionView::History => sections::history(&parse::<String>(mount_id, content)?),
            SectionView::Team => sections::team(&parse::<Vec<TeamMember>>(mount_id, content)?),
            SectionView::SignupHero => sections::signup_hero(&parse::<Hero>(mount_id, content)?),
            SectionView::Header => sections::header(&parse::<Header>(mount_id, content)?, language),
            SectionView::Footer => sections::footer(&parse::<Footer>(mount_id, content)?),
        };
        Ok(nodes)
    }
}

/// Parse section content; `null` yields the type's default.
fn parse<T: DeserializeOwned + Default>(section: &str, content: &Value) -> Result<T, ShapeError> {
    serde_json::from_value::<Option<T>>(content.clone())
        .map(Option::unwrap_or_default)
        .map_err(|source| ShapeError {
            section: section.to_string(),
            source,
        })
}

/// Clear and rebuild mount `section_id` from already-translated content.
///
/// A missing mount point is not an error. On a shape error the mount is left
/// as it was.
pub fn render(
    document: &mut Document,
    section_id: &str,
    view: SectionView,
    content: &Value,
    language: &Language,
) -> Result<RenderOutcome, ShapeError> {
    if !document.has_mount(section_id) {
        debug!("Mount point '{}' not on this page, skipping", section_id);
        return Ok(RenderOutcome::NoMount);
    }
    let Some(selected) = view.select(content) else {
        debug!("No content for section '{}'", section_id);
        return Ok(RenderOutcome::NoContent);
    };

    let nodes = view.build(section_id, selected, language)?;
    document.replace_children(section_id, nodes);
    debug!("✓ Rendered section '{}'", section_id);
    Ok(RenderOutcome::Rendered)
}

/// A section bound to its cached content document.
///
/// Re-renders on every language change from the in-memory document; the
/// content is never re-fetched.
#[derive(Debug, Clone)]
pub struct SectionRenderer {
    mount_id: String,
    view: SectionView,
    content: Value,
}

impl SectionRenderer {
    pub fn new(view: SectionView, content: Value) -> Self {
        Self {
            mount_id: view.mount_id().to_string(),
            view,
            content,
        }
    }

    /// Render into a mount point other than the view's default.
    pub fn with_mount(mut self, mount_id: impl Into<String>) -> Self {
        self.mount_id = mount_id.into();
        self
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    pub fn view(&self) -> SectionView {
        self.view
    }

    /// Translate the cached content and render it.
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        document: &mut Document,
    ) -> Result<RenderOutcome, ShapeError> {
        let translated = self.view.translate(&self.content, ctx);
        render(document, &self.mount_id, self.view, &translated, ctx.language)
    }
}

impl LanguageSubscriber for SectionRenderer {
    fn language_changed(&mut self, ctx: &RenderContext<'_>, document: &mut Document) {
        if let Err(e) = self.render(ctx, document) {
            warn!("Skipping section '{}': {}", self.mount_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spanish_dictionary() -> TranslationDictionary {
        TranslationDictionary::from_value(json!({
            "Español": { "Clean Water": "Agua Limpia", "Privacy": "Privacidad" }
        }))
        .expect("dictionary")
    }

    #[test]
    fn test_render_is_idempotent() {
        let content = json!({ "goals": [{ "title": "Clean Water" }, { "title": "Zero Hunger" }] });
        let mut document = Document::with_mounts(["goals-container"]);
        let english = Language::canonical();

        render(&mut document, "goals-container", SectionView::GoalCards, &content, &english)
            .expect("render");
        let first = document.clone();
        render(&mut document, "goals-container", SectionView::GoalCards, &content, &english)
            .expect("render");

        assert_eq!(document, first);
        assert_eq!(
            document.mount_html("goals-container").unwrap().matches("goal-card").count(),
            2
        );
    }

    #[test]
    fn test_render_missing_mount_is_noop() {
        let mut document = Document::with_mounts(["hero"]);
        let outcome = render(
            &mut document,
            "team",
            SectionView::Team,
            &json!({ "team": [] }),
            &Language::canonical(),
        )
        .expect("no error");

        assert_eq!(outcome, RenderOutcome::NoMount);
        assert!(!document.has_mount("team"));
    }

    #[test]
    fn test_homepage_sections_skip_absent_keys() {
        let mut document = Document::with_mounts(["hero"]);
        let outcome = render(
            &mut document,
            "hero",
            SectionView::HomeHero,
            &json!({ "goals": [] }),
            &Language::canonical(),
        )
        .expect("no error");

        assert_eq!(outcome, RenderOutcome::NoContent);
        assert!(!document.is_painted("hero"));
    }

    #[test]
    fn test_other_sections_render_defaults_for_absent_keys() {
        let mut document = Document::with_mounts(["goals-hero"]);
        let outcome = render(
            &mut document,
            "goals-hero",
            SectionView::GoalsHero,
            &json!({}),
            &Language::canonical(),
        )
        .expect("no error");

        assert_eq!(outcome, RenderOutcome::Rendered);
        assert!(document.mount_html("goals-hero").unwrap().contains("Our Goals"));
    }

    #[test]
    fn test_shape_error_leaves_mount_untouched() {
        let mut document = Document::with_mounts(["goals-list"]);
        document.replace_children("goals-list", vec![Node::text("previous")]);

        let err = render(
            &mut document,
            "goals-list",
            SectionView::GoalsList,
            &json!({ "goals": "not a list" }),
            &Language::canonical(),
        )
        .unwrap_err();

        assert_eq!(err.section, "goals-list");
        assert_eq!(document.mount_html("goals-list").as_deref(), Some("previous"));
    }

    #[test]
    fn test_section_renderer_translates_before_rendering() {
        let renderer = SectionRenderer::new(
            SectionView::Footer,
            json!({ "links": [{ "label": "Privacy", "href": "privacy.html" }] }),
        );
        let mut document = Document::with_mounts(["site-footer"]);
        let dictionary = spanish_dictionary();
        let spanish = Language::new("Español");
        let ctx = RenderContext {
            language: &spanish,
            dictionary: &dictionary,
        };

        renderer.render(&ctx, &mut document).expect("render");

        let html = document.mount_html("site-footer").unwrap();
        assert!(html.contains(">Privacidad</a>"));
        assert!(html.contains("href=\"privacy.html\""));
    }

    #[test]
    fn test_header_language_names_are_not_translated() {
        let renderer = SectionRenderer::new(
            SectionView::Header,
            json!({
                "languages": ["English", "Español"],
                "nav": [{ "label": "English", "href": "index.html" }]
            }),
        );
        let mut document = Document::with_mounts(["site-header"]);
        let dictionary = TranslationDictionary::from_value(json!({
            "Español": { "English": "Inglés", "Español": "Castellano" }
        }))
        .expect("dictionary");
        let spanish = Language::new("Español");
        let ctx = RenderContext {
            language: &spanish,
            dictionary: &dictionary,
        };

        renderer.render(&ctx, &mut document).expect("render");

        let html = document.mount_html("site-header").unwrap();
        assert!(html.contains("<li data-lang=\"English\">English</li>"));
        assert!(html.contains("<li data-lang=\"Español\" class=\"active\">Español</li>"));
        assert!(html.contains(">Inglés</a>"));
        assert!(!html.contains("Castellano"));
    }

    #[test]
    fn test_section_renderer_custom_mount() {
        let renderer = SectionRenderer::new(SectionView::Footer, json!({}))
            .with_mount("secondary-footer");
        assert_eq!(renderer.mount_id(), "secondary-footer");
        assert_eq!(renderer.view(), SectionView::Footer);
    }

    #[test]
    fn test_language_change_rerenders_from_cache() {
        let mut renderer = SectionRenderer::new(
            SectionView::GoalCards,
            json!({ "goals": [{ "title": "Clean Water" }] }),
        );
        let mut document = Document::with_mounts(["goals-container"]);
        let dictionary = spanish_dictionary();

        let english = Language::canonical();
        renderer.language_changed(
            &RenderContext { language: &english, dictionary: &dictionary },
            &mut document,
        );
        assert!(document.mount_html("goals-container").unwrap().contains("Clean Water"));

        let spanish = Language::new("Español");
        renderer.language_changed(
            &RenderContext { language: &spanish, dictionary: &dictionary },
            &mut document,
        );
        assert!(document.mount_html("goals-container").unwrap().contains("Agua Limpia"));
    }
}
