//! Traq API client

pub mod api;
pub mod family;
#[cfg(any(test, feature = "http-tests"))]
pub mod fixtures;
pub mod http;
#[cfg(any(test, feature = "http-tests"))]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;

pub use api::{AuthApi, CalendarApi, ClientApi, ProjectApi, TaskApi, TimeEntryApi, UserApi};
pub use family::Family;
pub use http::TraqClient;
#[cfg(any(test, feature = "http-tests"))]
#[allow(unused_imports)]
pub use mock::MockTraqClient;
pub use pagination::{Page, PaginationParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use parallel::fetch_remaining_pages;

/// Full Traq API surface.
///
/// Blanket-implemented for anything that implements every family trait,
/// so `TraqClient`, the cached wrapper, and test mocks all qualify.
pub trait TraqApi:
    AuthApi + ClientApi + ProjectApi + TaskApi + TimeEntryApi + UserApi + CalendarApi
{
}

impl<T> TraqApi for T where
    T: AuthApi + ClientApi + ProjectApi + TaskApi + TimeEntryApi + UserApi + CalendarApi
{
}
