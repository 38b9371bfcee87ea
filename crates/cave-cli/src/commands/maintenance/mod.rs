mod backup;
mod check;
mod stats;

pub use backup::handle_backup;
pub use check::handle_check;
pub use stats::handle_stats;
