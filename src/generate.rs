//! HTML site generation.
//!
//! Takes the loaded [`Site`] and writes one static HTML tree per configured
//! language.
//!
//! ## Generated Pages
//!
//! - **Redirect** (`/index.html`): sends visitors to the default language
//! - **Home** (`/{lang}/index.html`): home page document plus the subject grid
//! - **About / Privacy** (`/{lang}/about.html`, `/{lang}/privacy.html`): page documents
//! - **Subject pages** (`/{lang}/{subject}/index.html`): visible levels, one
//!   accordion per lesson listing its exercises and summaries
//! - **Content pages** (`/{lang}/{subject}/{level}/{type}/{id}.html`): one per
//!   visible item
//!
//! Every page links to the same page in the next configured language and sets
//! `dir="rtl"` for Arabic. Documents carry `<base href="/">`, so image paths
//! inside content resolve from the site root at any depth.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # Redirect to /fr/
//! ├── images/...                     # Assets copied from the content root
//! └── fr/
//!     ├── index.html
//!     ├── about.html
//!     ├── privacy.html
//!     └── math/
//!         ├── index.html
//!         └── math-1ac/
//!             └── lessons/
//!                 └── l1.html
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Content markdown is rendered by [`markdown::render`] and inserted
//! pre-escaped; every other string is escaped by maud.

use crate::config;
use crate::i18n::{self, Translations};
use crate::load::Site;
use crate::markdown;
use crate::naming::path_segment;
use crate::navigate::{ContentRef, list_associated, visible_items, visible_levels};
use crate::pages::PageKind;
use crate::types::{Item, ItemKind, Level, Subject};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot walk asset directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What [`generate`] wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub languages: Vec<String>,
    /// Home, about and privacy pages, all languages.
    pub fixed_pages: usize,
    pub subject_pages: usize,
    pub content_pages: usize,
    pub assets: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Write the whole site to `output_dir`.
///
/// When `assets_root` is given, every non-JSON file below it (images,
/// favicons) is copied to the same relative path in the output.
pub fn generate(
    site: &Site,
    assets_root: Option<&Path>,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let theme_css = config::generate_theme_css(&site.config.theme);
    let css = format!("{}\n\n{}", theme_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();

    if let Some(root) = assets_root {
        report.assets = copy_assets(root, output_dir)?;
    }

    let redirect = render_redirect(&site.config.site.title, &site.config.site.default_language);
    fs::write(output_dir.join("index.html"), redirect.into_string())?;

    for lang in &site.config.site.languages {
        let ctx = PageContext::new(site, lang, &css);
        let lang_dir = output_dir.join(path_segment(lang));
        fs::create_dir_all(&lang_dir)?;

        for kind in PageKind::ALL {
            let page = render_fixed_page(ctx, kind);
            fs::write(lang_dir.join(kind.output_file()), page.into_string())?;
            report.fixed_pages += 1;
        }

        for subject in &site.tree.subjects {
            let subject_dir = lang_dir.join(path_segment(&subject.id));
            fs::create_dir_all(&subject_dir)?;
            let page = render_subject_page(ctx, subject);
            fs::write(subject_dir.join("index.html"), page.into_string())?;
            report.subject_pages += 1;

            for level in &subject.levels {
                for kind in ItemKind::ALL {
                    let items = visible_items(level, kind);
                    if items.is_empty() {
                        continue;
                    }
                    let kind_dir = subject_dir.join(path_segment(&level.id)).join(kind.as_str());
                    fs::create_dir_all(&kind_dir)?;
                    for item in items {
                        let content = ContentRef {
                            subject,
                            level,
                            kind,
                            item,
                        };
                        let page = render_content_page(ctx, content);
                        let file_name = format!("{}.html", path_segment(&item.id));
                        fs::write(kind_dir.join(file_name), page.into_string())?;
                        report.content_pages += 1;
                    }
                }
            }
            debug!(lang = lang.as_str(), subject = subject.id.as_str(), "subject rendered");
        }

        info!(lang = lang.as_str(), "language generated");
        report.languages.push(lang.clone());
    }

    Ok(report)
}

/// Copy every non-JSON, non-hidden file below `src` into `dst`.
///
/// `config.toml` and anything inside `dst` itself are skipped.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    // Both sides canonical so an output spelled `images/../dist` is still skipped.
    let src = fs::canonicalize(src)?;
    let dst = fs::canonicalize(dst)?;
    let mut copied = 0;
    let walker = WalkDir::new(&src).min_depth(1).into_iter().filter_entry(|e| {
        let hidden = e.file_name().to_str().is_some_and(|n| n.starts_with('.'));
        !hidden && e.path() != dst
    });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_json = path.extension().is_some_and(|e| e == "json");
        if is_json || entry.file_name() == "config.toml" {
            continue;
        }
        let Ok(rel) = path.strip_prefix(&src) else {
            continue;
        };
        let target = dst.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
        copied += 1;
    }
    Ok(copied)
}

// ============================================================================
// URLs
// ============================================================================

pub fn home_url(lang: &str) -> String {
    format!("/{}/", path_segment(lang))
}

pub fn fixed_page_url(lang: &str, kind: PageKind) -> String {
    match kind {
        PageKind::Home => home_url(lang),
        _ => format!("/{}/{}", path_segment(lang), kind.output_file()),
    }
}

pub fn subject_url(lang: &str, subject_id: &str) -> String {
    format!("/{}/{}/", path_segment(lang), path_segment(subject_id))
}

pub fn content_url(
    lang: &str,
    subject_id: &str,
    level_id: &str,
    kind: ItemKind,
    item_id: &str,
) -> String {
    format!(
        "/{}/{}/{}/{}/{}.html",
        path_segment(lang),
        path_segment(subject_id),
        path_segment(level_id),
        kind,
        path_segment(item_id)
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Everything a page renderer needs about the language being generated.
#[derive(Clone, Copy)]
struct PageContext<'a> {
    site: &'a Site,
    lang: &'a str,
    t: &'static Translations,
    css: &'a str,
}

impl<'a> PageContext<'a> {
    fn new(site: &'a Site, lang: &'a str, css: &'a str) -> Self {
        Self {
            site,
            lang,
            t: i18n::translations(lang),
            css,
        }
    }

    /// Target and label of the language toggle, `None` with a single language.
    fn toggle(&self, url_for: impl Fn(&str) -> String) -> Option<(String, &'a str)> {
        i18n::next_language(&self.site.config.site.languages, self.lang)
            .filter(|next| *next != self.lang)
            .map(|next| (url_for(next), i18n::native_name(next)))
    }
}

/// Renders the base HTML document structure
fn base_document(
    ctx: PageContext,
    title: &str,
    meta_description: Option<&str>,
    body_id: &str,
    body_style: Option<String>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(ctx.lang) dir=(i18n::direction(ctx.lang)) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                base href="/";
                title { (title) }
                @if let Some(description) = meta_description {
                    meta name="description" content=(description);
                }
                style { (PreEscaped(ctx.css)) }
            }
            body id=(body_id) style=[body_style] {
                (content)
                (site_footer(ctx))
            }
        }
    }
}

/// Renders the site header: logo, page links, language toggle
fn site_header(
    ctx: PageContext,
    active: Option<PageKind>,
    toggle: Option<(String, &str)>,
) -> Markup {
    html! {
        header.site-header {
            nav.navbar {
                a.nav-logo href=(home_url(ctx.lang)) { (ctx.site.config.site.title) }
                ul.nav-menu {
                    @for kind in PageKind::ALL {
                        li {
                            a.nav-link.active[active == Some(kind)] href=(fixed_page_url(ctx.lang, kind)) {
                                (nav_label(ctx.t, kind))
                            }
                        }
                    }
                }
                @if let Some((href, label)) = toggle {
                    a.lang-toggle id="lang-toggle" href=(href) { (label) }
                }
            }
        }
    }
}

fn site_footer(ctx: PageContext) -> Markup {
    html! {
        footer.site-footer {
            p { (ctx.t.footer_copyright) }
        }
    }
}

fn nav_label(t: &Translations, kind: PageKind) -> &'static str {
    match kind {
        PageKind::Home => t.nav_home,
        PageKind::About => t.nav_about,
        PageKind::Privacy => t.nav_privacy,
    }
}

/// CSS override of the primary color for subject-scoped pages.
fn subject_style(subject: &Subject) -> Option<String> {
    subject
        .primary_color
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("--color-primary: {c}"))
}

fn background_style(image: Option<&str>) -> Option<String> {
    image
        .filter(|i| !i.trim().is_empty())
        .map(|i| format!("background-image: url('{i}')"))
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Root `index.html`: immediate redirect to the default language.
fn render_redirect(site_title: &str, default_lang: &str) -> Markup {
    let target = home_url(default_lang);
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                title { (site_title) }
            }
            body {
                a href=(target) { (target) }
            }
        }
    }
}

/// Home, about or privacy page.
fn render_fixed_page(ctx: PageContext, kind: PageKind) -> Markup {
    let doc = ctx.site.pages.get(kind);
    let page = doc.content(ctx.lang);
    let toggle = ctx.toggle(|next| fixed_page_url(next, kind));

    let (title, body_id) = match kind {
        PageKind::Home => (ctx.t.page_title_home.to_string(), "home-page"),
        PageKind::About => (
            format!("{} - {}", ctx.t.nav_about, ctx.site.config.site.title),
            "about-page",
        ),
        PageKind::Privacy => (
            format!("{} - {}", ctx.t.nav_privacy, ctx.site.config.site.title),
            "privacy-page",
        ),
    };

    let content = html! {
        (site_header(ctx, Some(kind), toggle))
        main.page-content {
            @if let Some(page) = page {
                section.page-hero {
                    @if let Some(heading) = page.title() {
                        h1.page-title { (heading) }
                    }
                    @if let Some(subtitle) = page.subtitle() {
                        p.page-subtitle { (subtitle) }
                    }
                }
                @if let Some(body) = page.body() {
                    article.page-body { (PreEscaped(markdown::render(body))) }
                }
            }
            @if kind == PageKind::Home {
                (subject_grid(ctx))
            }
        }
    };

    base_document(
        ctx,
        &title,
        doc.meta_description(ctx.lang),
        body_id,
        None,
        content,
    )
}

/// Subject cards linking to the subject pages.
fn subject_grid(ctx: PageContext) -> Markup {
    html! {
        div.subjects-grid {
            @for subject in &ctx.site.tree.subjects {
                a.subject-card-link href=(subject_url(ctx.lang, &subject.id)) {
                    div.subject-card style=[background_style(subject.background_image.as_deref())] {
                        h2.subject-card-title { (subject.name_in(ctx.lang)) }
                    }
                }
            }
        }
    }
}

/// Subject page: one section per visible level, one accordion per lesson.
fn render_subject_page(ctx: PageContext, subject: &Subject) -> Markup {
    let name = subject.name_in(ctx.lang);
    let title = format!("{} - {}", name, ctx.t.page_title_subject);
    let description = ctx.t.subject_meta_description(&name);
    let toggle = ctx.toggle(|next| subject_url(next, &subject.id));
    let levels = visible_levels(subject);

    let content = html! {
        (site_header(ctx, None, toggle))
        main.subject-page {
            h1 id="subject-title-header" { (name) }
            div id="levels-container" {
                @if levels.is_empty() {
                    p.empty-content.subject-empty { (ctx.t.no_content_for_subject) }
                }
                @for level in levels {
                    (level_section(ctx, subject, level))
                }
            }
        }
    };

    base_document(
        ctx,
        &title,
        Some(&description),
        "subject-page",
        subject_style(subject),
        content,
    )
}

fn level_section(ctx: PageContext, subject: &Subject, level: &Level) -> Markup {
    html! {
        section.level-section {
            h2.level-title { (level.name_in(ctx.lang)) }
            @for lesson in visible_items(level, ItemKind::Lessons) {
                @let exercises = list_associated(level, ItemKind::Exercises, &lesson.id);
                @let summaries = list_associated(level, ItemKind::Summaries, &lesson.id);
                details.lesson-accordion {
                    summary.lesson-accordion-title {
                        a href=(content_url(ctx.lang, &subject.id, &level.id, ItemKind::Lessons, &lesson.id)) {
                            (lesson.title_in(ctx.lang))
                        }
                    }
                    div.lesson-accordion-content {
                        @if exercises.is_empty() && summaries.is_empty() {
                            p.empty-content { (ctx.t.empty_content) }
                        } @else {
                            div.lesson-associated-content {
                                (associated_list(ctx, subject, level, ItemKind::Exercises, &exercises))
                                (associated_list(ctx, subject, level, ItemKind::Summaries, &summaries))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn associated_list(
    ctx: PageContext,
    subject: &Subject,
    level: &Level,
    kind: ItemKind,
    items: &[&Item],
) -> Markup {
    html! {
        @if !items.is_empty() {
            h4.content-list-title { (ctx.t.kind_label(kind)) }
            ul {
                @for item in items {
                    li {
                        a href=(content_url(ctx.lang, &subject.id, &level.id, kind, &item.id)) {
                            (item.title_in(ctx.lang))
                        }
                    }
                }
            }
        }
    }
}

/// Lesson, exercise or summary page.
fn render_content_page(ctx: PageContext, content: ContentRef) -> Markup {
    let ContentRef {
        subject,
        level,
        kind,
        item,
    } = content;
    let lang = ctx.lang;
    let item_title = item.title_in(lang);
    let text = item.content_in(lang);
    let solution = item.solution_in(lang);
    let video_id = item
        .youtube_video_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let title = format!("{} - {}", item_title, ctx.t.page_title_content);
    let description = markdown::content_meta_description(&item_title, &text);
    let toggle = ctx.toggle(|next| content_url(next, &subject.id, &level.id, kind, &item.id));

    let body = html! {
        (site_header(ctx, None, toggle))
        @if let Some(style) = background_style(item.background_image.as_deref()) {
            div.content-bg-header id="content-bg-header" style=(style) {}
        }
        main.content-page {
            nav.breadcrumbs id="breadcrumbs-container" {
                a href=(home_url(lang)) { (ctx.t.nav_home) }
                " » "
                a href=(subject_url(lang, &subject.id)) { (subject.name_in(lang)) }
                " » "
                span { (level.name_in(lang)) }
            }
            h1 id="content-title" { (item_title) }
            article.markdown-body id="content-main" {
                @if text.is_empty() {
                    p.empty-content { (ctx.t.empty_content) }
                } @else {
                    (PreEscaped(markdown::render(&text)))
                }
                @if let Some(id) = video_id {
                    div.video-container {
                        iframe src={ "https://www.youtube.com/embed/" (id) }
                            frameborder="0"
                            allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen {}
                    }
                }
            }
            @if !solution.is_empty() {
                details.solution id="solution-container" {
                    summary.solution-toggle { (ctx.t.show_solution_btn) }
                    div.markdown-body id="solution-content" {
                        h2 { (ctx.t.solution_title) }
                        (PreEscaped(markdown::render(&solution)))
                    }
                }
            }
        }
    };

    base_document(
        ctx,
        &title,
        description.as_deref(),
        "content-page",
        subject_style(subject),
        body,
    )
}
