mod add_entry;
mod add_member;
mod all_entries;
mod delete_entry;
mod delete_member;
mod list_members;
mod single_member;
mod totals;

pub use add_entry::*;
pub use add_member::*;
pub use all_entries::*;
pub use delete_entry::*;
pub use delete_member::*;
pub use list_members::*;
pub use single_member::*;
pub use totals::*;
