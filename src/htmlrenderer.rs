//! Renders [`Page`]s into HTML documents with `maud`. Every value interpolated
//! into a template is escaped except entry bodies, which are
//! [`TrustedHtml`](crate::markdown::TrustedHtml).

use crate::config::{Author, Config};
use crate::entry::Entry;
use crate::page::Page;
use maud::{html, Markup, DOCTYPE};
use url::ParseError;

/// The site-relative URL of the stylesheet every page links to.
pub const STYLESHEET_PATH: &str = "/style.css";

/// How much of an entry a template shows.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Show {
    /// Date, linked title and tags.
    Summary,

    /// Date, linked title, tags and body.
    Full,

    /// Date, unlinked title, tags and body, for the entry's own page.
    Standalone,
}

/// Renders `page` into a complete HTML document.
pub fn render(page: &Page, config: &Config) -> Result<Markup, ParseError> {
    let feed_url = page.feed_url(config)?;
    let active_tag = page.active_tag();

    let content = match page {
        Page::Index { .. } | Page::Tag { .. } => html! {
            @for (i, entry) in page.entries().iter().enumerate() {
                @let show = if i == 0 { Show::Full } else { Show::Summary };
                (render_entry(entry, show, active_tag))
            }
        },
        Page::Detail { entry } => render_entry(entry, Show::Standalone, None),
        Page::NotFound => html! {
            p {
                "Resource not found. Go back to "
                a href="/" { "the front" }
                " page."
            }
        },
    };

    Ok(html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (page.head_title(config)) }
                link rel="stylesheet" type="text/css" href=(STYLESHEET_PATH);
                link rel="alternate" type="application/atom+xml"
                    title=(page.head_title(config)) href=(feed_url.as_str());
            }
            body {
                h1 {
                    @if matches!(page, Page::Index { .. }) {
                        (config.heading())
                    } @else {
                        a href="/" { (config.heading()) }
                    }
                }
                (content)
                (render_elsewhere(&config.author))
                (render_footer(&config.author))
            }
        }
    })
}

fn render_entry(entry: &Entry, show: Show, active_tag: Option<&str>) -> Markup {
    html! {
        div.hentry {
            abbr.updated title=(entry.date.iso8601()) { (entry.date.display()) }
            h2 {
                @if show == Show::Standalone {
                    (entry.title)
                } @else {
                    a href={ "/" (entry.slug) } rel="bookmark" { (entry.title) }
                }
            }
            ul.tags {
                @for tag in entry.tags.iter() {
                    li class=[(active_tag == Some(tag.as_str())).then(|| "active")] {
                        a href={ "/tags/" (tag) } rel="tag" { (tag) }
                    }
                }
            }
            @if show != Show::Summary {
                div.entry-content { (entry.content_html) }
            }
        }
    }
}

fn render_elsewhere(author: &Author) -> Markup {
    html! {
        @if !author.elsewhere.is_empty() {
            p #elsewhere {
                @for link in author.elsewhere.iter() {
                    a href=(link.url.as_str()) { (link.name) }
                }
            }
        }
    }
}

fn render_footer(author: &Author) -> Markup {
    html! {
        p #footer {
            span class="author vcard" {
                "Written by "
                @if let Some(url) = &author.url {
                    a class="url fn" href=(url.as_str()) { (author.name) }
                } @else {
                    span class="fn" { (author.name) }
                }
                " <"
                a class="email" href={ "mailto:" (author.email) } { (author.email) }
                ">."
            }
            " Powered by daybook."
        }
    }
}
