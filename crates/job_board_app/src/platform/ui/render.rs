use job_board_core::{BoardViewModel, DetailView, JobCardView, Layout, SummarySection};

use super::constants::*;

/// One widget variant: how the job list and the detail panel turn into markup.
pub trait PageRenderer {
    fn render_list(&self, view: &BoardViewModel) -> String;
    fn render_detail(&self, view: &BoardViewModel) -> String;
}

pub fn renderer_for(layout: Layout) -> Box<dyn PageRenderer> {
    match layout {
        Layout::Collapsible => Box::new(CollapsibleCards),
        Layout::InlineExpand => Box::new(InlineExpandCards),
        Layout::MasterDetail => Box::new(MasterDetail),
    }
}

/// Cards whose summary swaps between preview and full text.
pub struct CollapsibleCards;

impl PageRenderer for CollapsibleCards {
    fn render_list(&self, view: &BoardViewModel) -> String {
        render_cards(view, |card| {
            let (collapsed_style, full_style) = if card.expanded {
                (" style=\"display: none;\"", "")
            } else {
                ("", " style=\"display: none;\"")
            };
            format!(
                "<div class=\"job-summary formatted-summary\">\
                 <div class=\"summary-collapsed\"{collapsed_style}><p>{preview}</p></div>\
                 <div class=\"summary-full\"{full_style}>{full}</div>\
                 </div>{toggle}",
                preview = escape(&card.preview),
                full = summary_html(&card.summary),
                toggle = toggle_button(card),
            )
        })
    }

    fn render_detail(&self, _view: &BoardViewModel) -> String {
        String::new()
    }
}

/// Cards that always show the preview and grow the full summary underneath.
pub struct InlineExpandCards;

impl PageRenderer for InlineExpandCards {
    fn render_list(&self, view: &BoardViewModel) -> String {
        render_cards(view, |card| {
            let full = if card.expanded {
                format!(
                    "<div class=\"summary-inline\">{}</div>",
                    summary_html(&card.summary)
                )
            } else {
                String::new()
            };
            format!(
                "<div class=\"job-summary\"><p>{preview}</p>{full}</div>{toggle}",
                preview = escape(&card.preview),
                toggle = toggle_button(card),
            )
        })
    }

    fn render_detail(&self, _view: &BoardViewModel) -> String {
        String::new()
    }
}

/// Compact list on the left, full posting for the selection on the right.
pub struct MasterDetail;

impl PageRenderer for MasterDetail {
    fn render_list(&self, view: &BoardViewModel) -> String {
        if view.cards.is_empty() {
            return no_jobs_html();
        }
        view.cards
            .iter()
            .map(|card| {
                let class = if card.selected {
                    "job-list-item selected"
                } else {
                    "job-list-item"
                };
                format!(
                    "<div class=\"{class}\" id=\"{CARD_ID_PREFIX}{index}\" data-index=\"{index}\">\
                     <h3>{title}</h3>{company}\
                     <span class=\"job-location\">📍 {location}</span>\
                     <span class=\"job-posted\">🕒 {posted}</span></div>",
                    index = card.position,
                    title = escape(&card.title),
                    company = company_html(card),
                    location = escape(&card.location),
                    posted = escape(&card.posted_label),
                )
            })
            .collect()
    }

    fn render_detail(&self, view: &BoardViewModel) -> String {
        match &view.detail {
            DetailView::Hidden => String::new(),
            DetailView::Empty { message } => {
                format!("<div class=\"job-detail empty\"><p>{}</p></div>", escape(message))
            }
            DetailView::Job(card) => format!(
                "<div class=\"job-detail\" data-index=\"{index}\">{header}\
                 <div class=\"job-summary formatted-summary\">{full}</div>{actions}</div>",
                index = card.position,
                header = card_header(card),
                full = summary_html(&card.summary),
                actions = apply_link(card),
            ),
        }
    }
}

fn render_cards(view: &BoardViewModel, body: impl Fn(&JobCardView) -> String) -> String {
    if view.cards.is_empty() {
        return no_jobs_html();
    }
    view.cards
        .iter()
        .map(|card| {
            let state = if card.expanded { "expanded" } else { "collapsed" };
            format!(
                "<div class=\"job-card {state}\" id=\"{CARD_ID_PREFIX}{index}\" data-index=\"{index}\">\
                 {header}{body}{actions}</div>",
                index = card.position,
                header = card_header(card),
                body = body(card),
                actions = apply_link(card),
            )
        })
        .collect()
}

fn no_jobs_html() -> String {
    "<p class=\"no-jobs\">No jobs found.</p>".to_string()
}

fn card_header(card: &JobCardView) -> String {
    let pay = card
        .pay
        .as_deref()
        .map(|pay| format!("<div class=\"job-pay\">💰 {}</div>", escape(pay)))
        .unwrap_or_default();
    format!(
        "<div class=\"job-card-header\"><h3 class=\"heading-style-h4\">{title}</h3>{company}\
         <div class=\"job-card-meta\">\
         <span class=\"job-location\">📍 {location}</span>\
         <span class=\"job-posted\">🕒 {posted}</span></div></div>\
         <div class=\"job-card-details\"><div class=\"job-type-tag\">💼 {job_type}</div>{pay}</div>",
        title = escape(&card.title),
        company = company_html(card),
        location = escape(&card.location),
        posted = escape(&card.posted_label),
        job_type = escape(&card.job_type),
    )
}

fn company_html(card: &JobCardView) -> String {
    card.company
        .as_deref()
        .filter(|company| !company.is_empty())
        .map(|company| format!("<div class=\"job-company\">{}</div>", escape(company)))
        .unwrap_or_default()
}

fn toggle_button(card: &JobCardView) -> String {
    let label = if card.expanded {
        LABEL_VIEW_LESS
    } else {
        LABEL_VIEW_MORE
    };
    format!(
        "<button class=\"toggle-summary\" data-target=\"{CARD_ID_PREFIX}{}\">{label}</button>",
        card.position
    )
}

fn apply_link(card: &JobCardView) -> String {
    format!(
        "<div class=\"job-card-actions\"><a href=\"{}\" target=\"_blank\" class=\"button-link\">{LABEL_APPLY}</a></div>",
        escape(&card.apply_url)
    )
}

/// `<h4>` headings, one `<ul>` per bullet run, `<p>` paragraphs.
pub fn summary_html(sections: &[SummarySection]) -> String {
    let mut html = String::new();
    for section in sections {
        match section {
            SummarySection::Heading(text) => {
                html.push_str(&format!("<h4>{}</h4>", escape(text)));
            }
            SummarySection::BulletList(items) => {
                html.push_str("<ul>");
                for item in items {
                    html.push_str(&format!("<li>{}</li>", escape(item)));
                }
                html.push_str("</ul>");
            }
            SummarySection::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>", escape(text)));
            }
        }
    }
    html
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
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
