/// Case-insensitive substring search over the window/tab snapshot
use crate::tab_data::Window;
use hashlink::LinkedHashMap;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lowercased query, or `None` when it is blank. Surrounding whitespace is
/// part of the needle.
fn prepare_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Filter windows down to the tabs whose title or URL contains `query`.
///
/// - Blank query returns the input unchanged
/// - Windows left without tabs are dropped
/// - Window order and tab order are preserved
pub fn filter_windows(windows: &[Window], query: &str) -> Vec<Window> {
    let Some(needle) = prepare_query(query) else {
        return windows.to_vec();
    };

    windows
        .iter()
        .filter_map(|window| {
            let tabs: Vec<_> = window
                .tabs
                .iter()
                .filter(|tab| {
                    tab.title.to_lowercase().contains(&needle)
                        || tab.url.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();

            (!tabs.is_empty()).then(|| Window {
                tabs,
                ..window.clone()
            })
        })
        .collect()
}

/// Lowercase, replace non-word characters with spaces, collapse whitespace
pub fn normalize_text(text: &str) -> String {
    let lower = text.to_lowercase();
    let spaced = NON_WORD.replace_all(&lower, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndexEntry {
    pub window_id: i32,
    pub tab_id: i32,
    pub title: String,
    pub url: String,
    pub searchable_text: String,
}

/// One precomputed record per tab, reused across queries on the same snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    entries: Vec<SearchIndexEntry>,
}

impl SearchIndex {
    pub fn build(windows: &[Window]) -> SearchIndex {
        let entries = windows
            .iter()
            .flat_map(|window| {
                window.tabs.iter().map(move |tab| {
                    let title = tab.title.to_lowercase();
                    let url = tab.url.to_lowercase();
                    let searchable_text = normalize_text(&format!("{} {}", title, url));
                    SearchIndexEntry {
                        window_id: window.id,
                        tab_id: tab.id,
                        title,
                        url,
                        searchable_text,
                    }
                })
            })
            .collect();

        SearchIndex { entries }
    }

    /// Ids of tabs matching a non-blank query.
    ///
    /// A substring of the title or URL always normalizes to a substring of
    /// `searchable_text`, so the normalized check only rejects; the final
    /// decision is made on the lowercased title and URL.
    pub fn matching_tab_ids(&self, query: &str) -> HashSet<i32> {
        self.matches(query).map(|entry| entry.tab_id).collect()
    }

    fn matches(&self, query: &str) -> impl Iterator<Item = &SearchIndexEntry> {
        let needle = prepare_query(query);
        let normalized = needle.as_deref().map(normalize_text);

        self.entries.iter().filter(move |entry| match (&needle, &normalized) {
            (Some(needle), Some(normalized)) => {
                entry.searchable_text.contains(normalized.as_str())
                    && (entry.title.contains(needle.as_str()) || entry.url.contains(needle.as_str()))
            }
            _ => false,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub windows: Vec<Window>,
    pub matching_tab_ids: HashSet<i32>,
}

/// Bounded memo of query results; oldest entry is evicted first
#[derive(Debug)]
pub struct SearchCache {
    entries: LinkedHashMap<String, SearchResult>,
    capacity: usize,
}

impl SearchCache {
    pub fn new(capacity: usize) -> SearchCache {
        SearchCache {
            entries: LinkedHashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<&SearchResult> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, result: SearchResult) {
        if self.capacity == 0 {
            return;
        }
        self.entries.insert(key, result);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-view search state. Replacing the snapshot rebuilds the index and
/// empties the cache.
#[derive(Debug)]
pub struct TabSearch {
    windows: Vec<Window>,
    index: SearchIndex,
    cache: SearchCache,
}

impl TabSearch {
    pub fn new(cache_capacity: usize) -> TabSearch {
        TabSearch {
            windows: Vec::new(),
            index: SearchIndex::default(),
            cache: SearchCache::new(cache_capacity),
        }
    }

    pub fn set_snapshot(&mut self, windows: Vec<Window>) {
        self.index = SearchIndex::build(&windows);
        self.windows = windows;
        self.cache.clear();
    }

    #[cfg(test)]
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    pub fn search(&mut self, query: &str) -> SearchResult {
        let Some(key) = prepare_query(query) else {
            return SearchResult {
                windows: self.windows.clone(),
                matching_tab_ids: HashSet::new(),
            };
        };

        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let mut matching_tab_ids = HashSet::new();
        let mut matching_window_ids = HashSet::new();
        for entry in self.index.matches(&key) {
            matching_tab_ids.insert(entry.tab_id);
            matching_window_ids.insert(entry.window_id);
        }

        let windows = self
            .windows
            .iter()
            .filter(|window| matching_window_ids.contains(&window.id))
            .filter_map(|window| {
                let tabs: Vec<_> = window
                    .tabs
                    .iter()
                    .filter(|tab| matching_tab_ids.contains(&tab.id))
                    .cloned()
                    .collect();
                (!tabs.is_empty()).then(|| Window {
                    tabs,
                    ..window.clone()
                })
            })
            .collect();

        let result = SearchResult {
            windows,
            matching_tab_ids,
        };
        self.cache.insert(key, result.clone());
        result
    }
}
