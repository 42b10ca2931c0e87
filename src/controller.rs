/// Popup state and event handling, independent of the DOM

use crate::host::{TabHost, TagStore};
use crate::suggest::suggest;
use crate::tags::{Tag, TagSet};
use url::Url;

/// Key code that confirms the top suggestion
pub const ENTER_KEY: u32 = 13;

/// Key code for a `KeyboardEvent.key` name; only Enter is handled
pub fn key_code(key: &str) -> Option<u32> {
    match key {
        "Enter" => Some(ENTER_KEY),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirstRender,
    Interactive,
}

/// What the view should do with the key event after handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    PassThrough,
    PreventDefault,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub phase: Phase,
    /// Storage key; empty when the tab URL could not be resolved
    pub url: String,
    pub selected: TagSet,
    pub suggestions: Vec<Tag>,
    pub input: String,
}

impl PopupState {
    pub fn new() -> Self {
        PopupState {
            phase: Phase::AwaitingFirstRender,
            url: String::new(),
            selected: TagSet::new(),
            suggestions: Vec::new(),
            input: String::new(),
        }
    }

    pub fn loaded(url: String, selected: TagSet) -> Self {
        PopupState {
            phase: Phase::Interactive,
            url,
            selected,
            ..Self::new()
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.phase == Phase::Interactive
    }

    /// Text changed: recompute suggestions
    pub fn on_input(&mut self, text: String) {
        if !self.is_interactive() {
            return;
        }
        self.suggestions = suggest(&text);
        self.input = text;
        log::debug!("{} suggestions for {:?}", self.suggestions.len(), self.input);
    }

    /// Enter confirms the top suggestion and never submits the form
    pub fn on_key_down(&mut self, key_code: u32) -> KeyOutcome {
        if !self.is_interactive() || key_code != ENTER_KEY {
            return KeyOutcome::PassThrough;
        }

        if let Some(first) = self.suggestions.first().cloned() {
            log::debug!("Selected tag {}", first);
            self.selected.push(first);
            self.suggestions.clear();
            self.input.clear();
        }

        KeyOutcome::PreventDefault
    }
}

impl Default for PopupState {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the tab URL and its saved tags. Failures fall back to empty values.
pub async fn initialize<H: TabHost + TagStore>(host: &H) -> PopupState {
    let url = match host.active_tab_url().await {
        Ok(url) => url,
        Err(e) => {
            log::warn!("{}", e);
            String::new()
        }
    };
    log::debug!("url {}", url);

    let selected = match host.load(&url).await {
        Ok(Some(tags)) => tags,
        Ok(None) => TagSet::new(),
        Err(e) => {
            log::warn!("Could not load tags for {}: {}", url, e);
            TagSet::new()
        }
    };

    PopupState::loaded(url, selected)
}

/// Persist the current selection for the current URL. Errors are only logged.
pub async fn submit<S: TagStore>(store: &S, state: &PopupState) {
    if !state.is_interactive() {
        return;
    }

    if let Err(e) = store.save(&state.url, &state.selected).await {
        log::warn!("Could not save tags for {}: {}", state.url, e);
    }
}

/// Host shown in the popup heading
pub fn page_label(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    match Url::parse(url) {
        Ok(parsed) => Some(parsed.host_str().unwrap_or(url).to_string()),
        Err(_) => Some(url.to_string()),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::host::testing::MemoryHost;
    use serde_json::json;

    const URL: &str = "https://github.com/yewstack/yew";

    fn tags(labels: &[&str]) -> TagSet {
        labels.iter().map(|label| Tag::from(*label)).collect()
    }

    async fn typed(host: &MemoryHost, text: &str) -> PopupState {
        let mut state = initialize(host).await;
        state.on_input(text.to_string());
        state
    }

    #[tokio::test]
    async fn test_initial_render_without_record() {
        let host = MemoryHost::new(URL);

        let state = initialize(&host).await;

        assert!(state.is_interactive());
        assert_eq!(state.url, URL);
        assert!(state.selected.is_empty());
        assert!(state.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_initial_render_with_record() {
        let host = MemoryHost::new(URL).with_record(URL, json!(["redux", "react"]));

        let state = initialize(&host).await;

        assert_eq!(state.selected, tags(&["redux", "react"]));
    }

    #[tokio::test]
    async fn test_load_failure_leaves_selection_empty() {
        let mut host = MemoryHost::new(URL).with_record(URL, json!(["redux"]));
        host.fail_load = true;

        let state = initialize(&host).await;

        assert!(state.is_interactive());
        assert!(state.selected.is_empty());
    }

    #[tokio::test]
    async fn test_tab_failure_uses_empty_key() {
        let mut host = MemoryHost::new(URL);
        host.url = Err("no active tab".to_string());

        let state = initialize(&host).await;

        assert_eq!(state.url, "");
        assert!(state.selected.is_empty());
    }

    #[tokio::test]
    async fn test_input_updates_suggestions() {
        let host = MemoryHost::new(URL);

        let state = typed(&host, "fro").await;

        assert_eq!(state.input, "fro");
        assert_eq!(state.suggestions.first(), Some(&Tag::from("frontend")));

        let state = typed(&host, "xyz123").await;
        assert!(state.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_enter_selects_first_suggestion() {
        let host = MemoryHost::new(URL).with_record(URL, json!(["react"]));
        let mut state = typed(&host, "fro").await;

        let outcome = state.on_key_down(ENTER_KEY);

        assert_eq!(outcome, KeyOutcome::PreventDefault);
        assert_eq!(state.selected, tags(&["react", "frontend"]));
        assert!(state.suggestions.is_empty());
        assert_eq!(state.input, "");
    }

    #[tokio::test]
    async fn test_enter_without_suggestions_changes_nothing() {
        let host = MemoryHost::new(URL).with_record(URL, json!(["react"]));
        let mut state = typed(&host, "xyz123").await;
        let before = state.clone();

        let outcome = state.on_key_down(ENTER_KEY);

        assert_eq!(outcome, KeyOutcome::PreventDefault);
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_other_keys_pass_through() {
        let host = MemoryHost::new(URL);
        let mut state = typed(&host, "fro").await;
        let before = state.clone();

        assert_eq!(state.on_key_down(65), KeyOutcome::PassThrough);
        assert_eq!(state, before);
    }

    #[test]
    fn test_events_before_initialization_are_ignored() {
        let mut state = PopupState::new();

        state.on_input("fro".to_string());
        let outcome = state.on_key_down(ENTER_KEY);

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert_eq!(state, PopupState::new());
    }

    #[tokio::test]
    async fn test_duplicate_selection_is_kept() {
        let host = MemoryHost::new(URL);
        let mut state = initialize(&host).await;

        for _ in 0..2 {
            state.on_input("redux".to_string());
            state.on_key_down(ENTER_KEY);
        }

        assert_eq!(state.selected, tags(&["redux", "redux"]));
    }

    #[tokio::test]
    async fn test_submit_persists_selection() {
        let host = MemoryHost::new(URL).with_record(URL, json!(["angular"]));
        let mut state = typed(&host, "fro").await;
        state.on_key_down(ENTER_KEY);

        submit(&host, &state).await;

        assert_eq!(host.record(URL), Some(json!(["angular", "frontend"])));
    }

    #[tokio::test]
    async fn test_last_submit_wins() {
        let host = MemoryHost::new(URL);
        let first = PopupState::loaded(URL.to_string(), tags(&["react"]));
        let second = PopupState::loaded(URL.to_string(), tags(&["redux", "angular"]));

        submit(&host, &first).await;
        submit(&host, &second).await;

        assert_eq!(host.load(URL).await, Ok(Some(tags(&["redux", "angular"]))));
    }

    #[tokio::test]
    async fn test_submit_leaves_other_urls_alone() {
        let other = "https://example.com/";
        let host = MemoryHost::new(URL).with_record(other, json!(["angular"]));
        let state = PopupState::loaded(URL.to_string(), tags(&["react"]));

        submit(&host, &state).await;

        assert_eq!(host.record(other), Some(json!(["angular"])));
    }

    #[tokio::test]
    async fn test_save_then_fresh_load_round_trips() {
        let host = MemoryHost::new(URL);
        let saved = tags(&["functional programming", "react", "react"]);

        submit(&host, &PopupState::loaded(URL.to_string(), saved.clone())).await;
        let reloaded = initialize(&host).await;

        assert_eq!(reloaded.selected, saved);
        assert!(reloaded.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_is_silent() {
        let mut host = MemoryHost::new(URL);
        host.fail_save = true;
        let state = PopupState::loaded(URL.to_string(), tags(&["react"]));

        submit(&host, &state).await;

        assert_eq!(host.record(URL), None);
    }

    #[tokio::test]
    async fn test_submit_before_initialization_is_ignored() {
        let host = MemoryHost::new(URL);

        submit(&host, &PopupState::new()).await;

        assert!(host.records.borrow().is_empty());
    }

    #[test]
    fn test_key_code_from_key_name() {
        assert_eq!(key_code("Enter"), Some(ENTER_KEY));
        assert_eq!(key_code("a"), None);
        assert_eq!(key_code("Tab"), None);
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label(URL), Some("github.com".to_string()));
        assert_eq!(page_label("about:blank"), Some("about:blank".to_string()));
        assert_eq!(page_label("not a url"), Some("not a url".to_string()));
        assert_eq!(page_label(""), None);
    }
}
