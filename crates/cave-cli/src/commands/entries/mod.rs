mod add;
mod mine;
mod random;
mod remove;
mod search;
mod show;

pub use add::handle_add;
pub use mine::handle_mine;
pub use random::handle_random;
pub use remove::handle_remove;
pub use search::handle_search;
pub use show::handle_show;
