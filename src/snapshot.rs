/// Reading the current set of windows and tabs
use crate::errors::FetchError;
use crate::host::TabHost;
use crate::tab_data::{HostWindow, Window};

/// Fetch every window with its tabs. No caching and no retry.
pub async fn fetch_windows<H: TabHost>(host: &H) -> Result<Vec<Window>, FetchError> {
    let host_windows = host.all_windows().await?;
    let windows = normalize_windows(host_windows);
    log::debug!("Fetched {} windows, {} tabs", windows.len(), count_tabs(&windows));
    Ok(windows)
}

/// Apply defaults and drop entries the host reported without an id
pub fn normalize_windows(host_windows: Vec<HostWindow>) -> Vec<Window> {
    host_windows
        .into_iter()
        .filter_map(HostWindow::into_window)
        .collect()
}

pub fn count_tabs(windows: &[Window]) -> usize {
    windows.iter().map(|w| w.tabs.len()).sum()
}
