/// UI module exports
pub mod components;
pub mod hooks;
pub mod manager;
pub mod options;
pub mod popup;
