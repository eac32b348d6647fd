//! Shared CLI argument types

mod filters;
mod global;
mod pagination;

pub use filters::{
    CalendarFilterArgs, ClientFilterArgs, EntryFilterArgs, ProjectFilterArgs, TaskFilterArgs,
    UserFilterArgs,
};
pub use global::GlobalOptions;
pub use pagination::PaginationArgs;
