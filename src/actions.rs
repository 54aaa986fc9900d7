/// Tab actions: switching, closing, and opening the manager page
use crate::errors::MutationError;
use crate::host::TabHost;

/// Activate a tab and bring its window to the front
pub async fn switch_to_tab<H: TabHost>(host: &H, tab_id: i32) -> Result<(), MutationError> {
    let fail = |source| MutationError::Switch { tab_id, source };

    host.activate_tab(tab_id).await.map_err(fail)?;
    let tab = host.get_tab(tab_id).await.map_err(fail)?;
    if let Some(window_id) = tab.window_id {
        host.focus_window(window_id).await.map_err(fail)?;
    }

    Ok(())
}

pub async fn close_tab<H: TabHost>(host: &H, tab_id: i32) -> Result<(), MutationError> {
    host.remove_tab(tab_id)
        .await
        .map_err(|source| MutationError::Close { tab_id, source })
}

/// Switch to an already open manager tab, or open a new one
pub async fn open_or_focus_manager<H: TabHost>(host: &H, page_url: &str) -> Result<(), MutationError> {
    let fail = |source| MutationError::OpenManager { source };

    let existing = host.query_tabs_by_url(page_url).await.map_err(fail)?;

    match existing.into_iter().find_map(|tab| tab.id.map(|id| (id, tab.window_id))) {
        Some((tab_id, window_id)) => {
            host.activate_tab(tab_id).await.map_err(fail)?;
            if let Some(window_id) = window_id {
                host.focus_window(window_id).await.map_err(fail)?;
            }
        }
        None => {
            host.create_tab(page_url).await.map_err(fail)?;
        }
    }

    Ok(())
}
