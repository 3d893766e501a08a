use crate::{BoardState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every filter input funnels into the state's single recompute; nothing
/// here patches derived state directly.
pub fn update(mut state: BoardState, msg: Msg) -> (BoardState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started { source } => {
            if state.is_loaded() {
                Vec::new()
            } else {
                vec![Effect::LoadJobs { source }]
            }
        }
        Msg::JobsLoaded(jobs) => {
            state.load_jobs(jobs);
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            state.set_search_text(&text);
            Vec::new()
        }
        Msg::JobTypeChanged(job_type) => {
            state.set_job_type(&job_type);
            Vec::new()
        }
        Msg::SortChanged(sort_key) => {
            state.set_sort_key(sort_key);
            Vec::new()
        }
        Msg::JobSelected { index } => {
            state.select(index);
            Vec::new()
        }
        Msg::ToggleExpanded { index } => {
            state.toggle_expanded(index);
            Vec::new()
        }
        Msg::ExportRequested => vec![Effect::WritePage],
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
