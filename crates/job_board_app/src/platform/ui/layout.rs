use job_board_core::{BoardViewModel, Layout, SortKey};

use super::constants::*;
use super::render::{escape, renderer_for};

const SORT_OPTIONS: [(SortKey, &str); 3] = [
    (SortKey::DateDesc, "Newest first"),
    (SortKey::DateAsc, "Oldest first"),
    (SortKey::Title, "Title (A-Z)"),
];

/// Full HTML document for the current view.
pub fn render_page(view: &BoardViewModel, generated_at: &str) -> String {
    let renderer = renderer_for(view.layout);
    let list = renderer.render_list(view);
    let detail = renderer.render_detail(view);

    let body = if view.layout == Layout::MasterDetail {
        format!(
            "<div class=\"job-board master-detail\">\
             <div id=\"{LISTINGS_ID}\" class=\"job-list\">{list}</div>\
             <aside id=\"{DETAIL_ID}\" class=\"job-detail-panel\">{detail}</aside></div>"
        )
    } else {
        format!("<div class=\"job-board {}\"><div id=\"{LISTINGS_ID}\">{list}</div></div>", view.layout)
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Job Board</title>\n</head>\n<body>\n{controls}\n{status}\n{body}\n\
         <footer class=\"generated\">Generated {generated}</footer>\n</body>\n</html>\n",
        controls = filter_controls(view),
        status = status_line(view),
        generated = escape(generated_at),
    )
}

fn filter_controls(view: &BoardViewModel) -> String {
    let type_options: String = std::iter::once(("", LABEL_ALL_TYPES))
        .chain(
            view.job_type_options
                .iter()
                .map(|job_type| (job_type.as_str(), job_type.as_str())),
        )
        .map(|(value, label)| option_html(value, label, value == view.job_type))
        .collect();
    let sort_options: String = SORT_OPTIONS
        .iter()
        .map(|(key, label)| option_html(&key.to_string(), label, *key == view.sort_key))
        .collect();

    format!(
        "<form class=\"job-filters\">\
         <input type=\"search\" id=\"{SEARCH_INPUT_ID}\" value=\"{search}\" placeholder=\"Search jobs\">\
         <select id=\"{TYPE_FILTER_ID}\">{type_options}</select>\
         <select id=\"{SORT_SELECT_ID}\">{sort_options}</select></form>",
        search = escape(&view.search_text),
    )
}

fn option_html(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(
        "<option value=\"{}\"{selected}>{}</option>",
        escape(value),
        escape(label)
    )
}

fn status_line(view: &BoardViewModel) -> String {
    format!(
        "<p class=\"job-count\">Showing {} of {} jobs</p>",
        view.cards.len(),
        view.total_jobs
    )
}
