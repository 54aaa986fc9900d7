/// Presentation helpers: highlighting, domains, favicons, window titles
use crate::tab_data::{Tab, Window};
use regex::RegexBuilder;
use url::Url;

const MAX_RAW_URL_CHARS: usize = 30;

/// A run of text, highlighted when it matched the search query
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            highlighted: false,
        }
    }
}

/// Split `text` around case-insensitive occurrences of `query`.
/// The query is matched literally.
pub fn highlight_segments(text: &str, query: &str) -> Vec<Segment> {
    if query.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment {
            text: found.as_str().to_string(),
            highlighted: true,
        });
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}

/// Short host name for display: `https://www.github.com/x` → `github.com`
///
/// URLs without a host (e.g. `about:blank`) or that fail to parse are shown
/// raw, cut to 30 characters.
pub fn display_domain(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host.replacen("www.", "", 1),
        None if url.chars().count() > MAX_RAW_URL_CHARS => {
            let cut: String = url.chars().take(MAX_RAW_URL_CHARS).collect();
            format!("{}...", cut)
        }
        None => url.to_string(),
    }
}

/// Icon for a tab: its own favicon, or a favicon service lookup for web pages
pub fn favicon_url(tab: &Tab) -> Option<String> {
    if let Some(icon) = &tab.fav_icon_url {
        return Some(icon.clone());
    }
    if !tab.url.starts_with("http") {
        return None;
    }

    let parsed = Url::parse(&tab.url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("https://www.google.com/s2/favicons?domain={}&sz=16", host))
}

/// Title of the window's active tab, or a generic name
pub fn window_title(window: &Window) -> String {
    window
        .active_tab()
        .map(|tab| tab.title.clone())
        .unwrap_or_else(|| format!("Window {}", window.id))
}

/// Badge colour by number of tabs in a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabLoad {
    Light,
    Busy,
    Heavy,
}

impl TabLoad {
    pub fn for_count(tabs: usize) -> TabLoad {
        if tabs > 10 {
            TabLoad::Heavy
        } else if tabs > 5 {
            TabLoad::Busy
        } else {
            TabLoad::Light
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            TabLoad::Light => "status-badge green",
            TabLoad::Busy => "status-badge yellow",
            TabLoad::Heavy => "status-badge red",
        }
    }
}
