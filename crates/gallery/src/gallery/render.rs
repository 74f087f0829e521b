//! HTML markup for the gallery. Everything here is a pure function of its
//! arguments.

use std::fmt::Write as _;

use v3_core::job_events::MSG_TYPE_GALLERY_RENDER;

use super::view::{GalleryView, JobCard, Preview};

pub const EMPTY_GALLERY_HTML: &str =
    "<p>No jobs yet. Click a button above to create a test job!</p>";
pub const LOADING_HTML: &str = "<p>Creating test job...</p>";

const PAGE_TEMPLATE: &str = include_str!("../../assets/page.html");

/// Render the gallery contents.
pub fn render_gallery(view: &GalleryView) -> String {
    match view {
        GalleryView::Empty => EMPTY_GALLERY_HTML.to_string(),
        GalleryView::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

/// Placeholder shown while a create request is in flight.
pub fn render_loading() -> String {
    LOADING_HTML.to_string()
}

/// Inline error shown in place of the gallery.
pub fn render_error(message: &str) -> String {
    format!("<p>Error: {}</p>", escape_html(message))
}

/// The full page around already-rendered gallery markup.
pub fn render_page(gallery_html: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{render_message}}", MSG_TYPE_GALLERY_RENDER)
        .replace("{{loading_html}}", &format!("'{}'", render_loading()))
        .replace("{{gallery}}", gallery_html)
}

fn render_card(card: &JobCard) -> String {
    let mut html = String::new();

    // Writing to a String cannot fail.
    let _ = write!(
        html,
        r#"<div class="job-card {status_class}"><div class="job-header"><span class="job-id">{id}</span><span class="status-badge">{status}</span></div>"#,
        status_class = escape_html(&card.status_class()),
        id = escape_html(&card.short_id),
        status = escape_html(&card.status_label),
    );

    match &card.preview {
        Preview::Image { url, alt, demo } => {
            let _ = write!(
                html,
                r#"<div class="job-preview"><img src="{}" alt="{}" loading="lazy" />"#,
                escape_html(url),
                escape_html(alt),
            );
            if *demo {
                html.push_str(r#"<div class="demo-badge">DEMO</div>"#);
            }
            html.push_str("</div>");
        }
        Preview::Generating => html.push_str(r#"<div class="job-loading">⏳ Generating...</div>"#),
        Preview::Queued => html.push_str(r#"<div class="job-loading">⏸ Queued...</div>"#),
        Preview::None => {}
    }

    let _ = write!(
        html,
        r#"<div class="job-content"><div class="job-type">{}</div><div class="job-prompt">{}</div><div class="job-meta">{}</div></div>"#,
        escape_html(&card.type_line),
        escape_html(&card.prompt),
        escape_html(&card.time_ago),
    );

    if let Some(error) = &card.error {
        let _ = write!(html, r#"<div class="job-error">{}</div>"#, escape_html(error));
    }

    html.push_str("</div>");
    html
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
