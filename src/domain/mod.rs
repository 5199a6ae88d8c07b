mod activity;
mod data_stores;
mod error;
mod log_entry;
mod member;
mod member_id;
mod member_name;
mod totals;

pub use activity::*;
pub use data_stores::*;
pub use error::*;
pub use log_entry::*;
pub use member::*;
pub use member_id::*;
pub use member_name::*;
pub use totals::*;
