//! Output formats built from a finished report.

pub mod history;
pub mod html;

pub use history::{history_rows, to_csv, HistoryRow};
pub use html::{render_page, PageCopy};
