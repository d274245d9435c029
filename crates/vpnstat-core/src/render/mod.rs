pub mod change_line;
pub mod status_table;

pub use change_line::render_change_line;
pub use status_table::{render_status_table, EMPTY_TABLE_MESSAGE};
