// Per-panel filter state
use std::collections::BTreeMap;

pub const DEFAULT_FILTER: &str = "12months";

/// Strip every whitespace character, so "Last 7 Days" becomes "Last7Days".
pub fn normalize_label(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whitespace-insensitive comparison of a display label and a state key.
pub fn is_selected(display_label: &str, active: &str) -> bool {
    normalize_label(display_label) == normalize_label(active)
}

/// Active filter label per panel id. Values are immutable: `set` returns a
/// new map and leaves every other panel's entry untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelFilterState {
    entries: BTreeMap<String, String>,
}

impl PanelFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, panel_id: &str) -> &str {
        self.entries
            .get(panel_id)
            .map(String::as_str)
            .unwrap_or(DEFAULT_FILTER)
    }

    /// A blank label clears the panel's entry back to the default.
    pub fn set(&self, panel_id: &str, label: &str) -> Self {
        let mut entries = self.entries.clone();
        let label = normalize_label(label);
        if label.is_empty() {
            entries.remove(panel_id);
        } else {
            entries.insert(panel_id.to_string(), label);
        }
        Self { entries }
    }

    /// Build from `filter[<panel-id>]=<label>` query pairs; other keys are ignored.
    pub fn from_query<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        pairs
            .into_iter()
            .filter_map(|(key, label)| {
                let panel_id = key.strip_prefix("filter[")?.strip_suffix(']')?;
                (!panel_id.is_empty()).then_some((panel_id, label.as_str()))
            })
            .fold(Self::new(), |state, (panel_id, label)| state.set(panel_id, label))
    }
}
