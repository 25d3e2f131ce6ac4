//! Section templates: typed content in, element trees out.

use crate::content::schema::{Footer, GoalCard, GoalDetail, Header, Hero, TeamMember};
use crate::i18n::Language;
use crate::render::{Element, Node};

const DEFAULT_LOGO: &str = "assets/logo.png";

fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

/// Non-empty value of an optional field.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ==================== Home ====================

pub fn home_hero(hero: &Hero) -> Vec<Node> {
    let title = or(&hero.title, "");

    let mut text = Element::new("div")
        .class("hero-text")
        .child(Element::new("h1").text(title))
        .child(Element::new("p").text(or(&hero.subtitle, "")));

    if let Some(button) = &hero.button {
        text = text.child(
            Element::new("a")
                .class("hero-button")
                .attr("href", or(&button.href, "#"))
                .text(or(&button.text, "Learn more")),
        );
    }

    let mut container = Element::new("div").class("hero-inner").child(text);

    if let Some(image) = present(&hero.image) {
        let alt = if title.is_empty() { "Hero" } else { title };
        container = container.child(
            Element::new("div")
                .class("hero-image")
                .child(Element::new("img").attr("src", image).attr("alt", alt)),
        );
    }

    vec![container.into()]
}

pub fn goal_cards(goals: &[GoalCard]) -> Vec<Node> {
    goals.iter().map(|goal| goal_card(goal).into()).collect()
}

fn goal_card(goal: &GoalCard) -> Element {
    let title = or(&goal.title, "");
    let mut card = Element::new("article").class("goal-card");

    if let Some(image) = present(&goal.image) {
        card = card.child(Element::new("img").attr("src", image).attr("alt", title));
    }

    let mut body = Element::new("div").class("goal-body");
    if let Some(category) = present(&goal.category) {
        body = body.child(Element::new("p").class("goal-category").text(category));
    }
    body = body.child(Element::new("h3").text(title));
    if let Some(description) = present(&goal.description) {
        body = body.child(Element::new("p").text(description));
    }
    if let Some(link) = present(&goal.link) {
        body = body.child(Element::new("a").attr("href", link).text("Read more"));
    }

    card.child(body)
}

// ==================== Goals page ====================

pub fn goals_hero(hero: &Hero) -> Vec<Node> {
    let title = or(&hero.title, "Our Goals");

    let mut overlay = Element::new("div")
        .class("goals-hero-overlay")
        .child(Element::new("h1").class("goals-hero-title").text(title));
    if let Some(subtitle) = present(&hero.subtitle) {
        overlay = overlay.child(Element::new("p").class("goals-hero-subtitle").text(subtitle));
    }

    let wrap = Element::new("div")
        .class("goals-hero-inner")
        .child(
            Element::new("img")
                .class("goals-hero-img")
                .attr("src", or(&hero.image, DEFAULT_LOGO))
                .attr("alt", title),
        )
        .child(overlay);

    vec![wrap.into()]
}

pub fn goals_intro(text: &str) -> Vec<Node> {
    vec![Element::new("p").class("goals-intro-text").text(text).into()]
}

pub fn goals_list(goals: &[GoalDetail]) -> Vec<Node> {
    goals.iter().map(|goal| goal_item(goal).into()).collect()
}

fn goal_item(goal: &GoalDetail) -> Element {
    let title = or(&goal.title, "");

    let mut header = Element::new("div").class("goal-header");
    if let Some(icon) = present(&goal.icon) {
        header = header.child(
            Element::new("img")
                .class("goal-icon")
                .attr("src", icon)
                .attr("alt", title),
        );
    }
    header = header.child(Element::new("h3").class("goal-title").text(title));

    let mut item = Element::new("div").class("goal-item").child(header);

    if let Some(description) = present(&goal.description) {
        item = item.child(Element::new("p").class("goal-description").text(description));
    }

    if !goal.targets.is_empty() {
        let list = Element::new("ul").children(
            goal.targets
                .iter()
                .map(|target| Element::new("li").text(target.as_str()).into()),
        );
        item = item.child(
            Element::new("div")
                .class("goal-targets")
                .child(Element::new("h4").text("Key Targets:"))
                .child(list),
        );
    }

    item
}

// ==================== About page ====================

pub fn about_hero(hero: &Hero) -> Vec<Node> {
    let wrap = Element::new("div")
        .class("about-hero-inner")
        .child(
            Element::new("img")
                .attr("src", or(&hero.image, "assets/about-hero.jpg"))
                .attr("alt", or(&hero.title, "About")),
        )
        .child(Element::new("h1").text(or(&hero.title, "About Us")));
    vec![wrap.into()]
}

pub fn history(text: &str) -> Vec<Node> {
    vec![
        Element::new("h2").text("Our History").into(),
        Element::new("p").class("history-text").text(text).into(),
    ]
}

pub fn team(members: &[TeamMember]) -> Vec<Node> {
    let mut nodes: Vec<Node> = vec![Element::new("h2").text("Our Team").into()];
    nodes.extend(members.iter().map(|member| team_member(member).into()));
    nodes
}

fn team_member(member: &TeamMember) -> Element {
    let name = or(&member.name, "");
    Element::new("div")
        .class("team-member")
        .child(
            Element::new("img")
                .attr("src", or(&member.avatar, "assets/avatar1.png"))
                .attr("alt", name),
        )
        .child(
            Element::new("div")
                .child(Element::new("div").class("team-name").text(name))
                .child(Element::new("div").class("team-role").text(or(&member.role, ""))),
        )
}

// ==================== Signup page ====================

pub fn signup_hero(hero: &Hero) -> Vec<Node> {
    let mut overlay = Element::new("div").class("signup-hero-overlay").child(
        Element::new("h1")
            .class("signup-hero-title")
            .text(or(&hero.title, "Sign Up for Our Newsletter")),
    );
    if let Some(subtitle) = present(&hero.subtitle) {
        overlay = overlay.child(Element::new("p").class("signup-hero-subtitle").text(subtitle));
    }

    let wrap = Element::new("div")
        .class("signup-hero-inner")
        .child(
            Element::new("img")
                .class("signup-hero-img")
                .attr("src", or(&hero.image, DEFAULT_LOGO))
                .attr("alt", or(&hero.title, "Sign Up")),
        )
        .child(overlay);
    vec![wrap.into()]
}

// ==================== Shared chrome ====================

/// Site header: logo, language picker and navigation.
///
/// The language entry matching `active` carries the `active` class; when
/// none matches, the first entry does. The first navigation entry is always
/// marked active.
pub fn header(header: &Header, active: &Language) -> Vec<Node> {
    let logo = Element::new("figure").class("logo").child(
        Element::new("img")
            .attr("src", or(&header.logo, DEFAULT_LOGO))
            .attr("alt", "logo")
            .attr("width", "100")
            .attr("height", "100"),
    );

    let active_index = header
        .languages
        .iter()
        .position(|name| name.trim() == active.name())
        .unwrap_or(0);
    let languages = Element::new("ul").class("language").children(
        header.languages.iter().enumerate().map(|(idx, name)| {
            let item = Element::new("li").attr("data-lang", name.as_str()).text(name.as_str());
            let item = if idx == active_index { item.add_class("active") } else { item };
            item.into()
        }),
    );

    let mut navigation = Element::new("ul").class("navigation").children(
        header.nav.iter().enumerate().map(|(idx, entry)| {
            let item = Element::new("li").child(
                Element::new("a")
                    .attr("href", or(&entry.href, "#"))
                    .text(or(&entry.label, "")),
            );
            let item = if idx == 0 { item.class("active") } else { item };
            item.into()
        }),
    );
    if let Some(button) = &header.button {
        navigation = navigation.child(
            Element::new("button")
                .class("header-cta")
                .attr("data-href", or(&button.href, "#"))
                .text(or(&button.label, "Sign Up")),
        );
    }

    vec![logo.into(), languages.into(), navigation.into()]
}

pub fn footer(footer: &Footer) -> Vec<Node> {
    let links = Element::new("nav").class("footer-links").children(
        footer.links.iter().map(|link| {
            Element::new("a")
                .attr("href", or(&link.href, "#"))
                .text(or(&link.label, ""))
                .into()
        }),
    );

    let left = Element::new("div")
        .class("footer-left")
        .child(
            Element::new("img")
                .attr("src", or(&footer.logo, DEFAULT_LOGO))
                .attr("alt", "logo")
                .class("footer-logo"),
        )
        .child(links);

    let right = Element::new("div")
        .class("footer-right")
        .child(Element::new("div").text(or(&footer.copyright, "")));

    vec![Element::new("div")
        .class("footer-inner")
        .child(left)
        .child(right)
        .into()]
}
