//! Cached wrapper for the Traq API client
//!
//! Read-through caching for every GET, family-wide invalidation after
//! every mutation, and single-flight coalescing so two concurrent reads
//! of the same resource key issue one request between them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex as AsyncMutex;

use crate::cache::{cache_key, entity_key, CacheStorage, CacheTtl};
use crate::client::api::{
    AuthApi, CalendarApi, ClientApi, ProjectApi, TaskApi, TimeEntryApi, UserApi,
};
use crate::client::models::{
    CalendarEvent, CalendarEventCreate, CalendarEventFilter, CalendarEventUpdate, CalendarStats,
    CalendarUploadReport, Client as ClientModel, ClientCreate, ClientFilter, ClientUpdate,
    CurrentUser, Priority, Project, ProjectCreate, ProjectFilter, ProjectUpdate, Task,
    TaskCategory, TaskCreate, TaskFilter, TaskStatus, TaskUpdate, TimeEntry, TimeEntryCreate,
    TimeEntryFilter, TimeEntryUpdate, TimeSummary, TimerStart, TimerStop, TokenPair, User,
    UserFilter,
};
use crate::client::pagination::{Page, PaginationParams};
use crate::client::{Family, TraqApi};
use crate::error::{Error, Result};

/// Key of the single active-timer entry
fn active_timer_key() -> String {
    cache_key(Family::TimeEntries, "active-timer", &[])
}

/// Cached wrapper for any TraqApi implementation.
///
/// `--no-cache` turns every read into a forced revalidation: freshness
/// checks are skipped but results are still stored, so later reads (and
/// other processes) observe the refreshed data. The storage handle is
/// wrapped in a Mutex for thread-safety; the in-flight map holds one
/// async lock per resource key to coalesce duplicate requests.
pub struct CachedTraqClient<C: TraqApi> {
    inner: Arc<C>,
    cache: Option<Mutex<CacheStorage>>,
    force_refresh: bool,
    in_flight: AsyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl<C: TraqApi> CachedTraqClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `enabled` - false for --no-cache: reads revalidate, writes still land
    pub fn new(inner: C, enabled: bool) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: CacheStorage::open().ok().map(Mutex::new),
            force_refresh: !enabled,
            in_flight: AsyncMutex::new(HashMap::new()),
        }
    }

    /// Wrap with an explicit storage handle (tests use a temp directory).
    #[allow(dead_code)]
    pub fn with_storage(inner: C, storage: Option<CacheStorage>) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: storage.map(Mutex::new),
            force_refresh: false,
            in_flight: AsyncMutex::new(HashMap::new()),
        }
    }

    /// Get the inner client (for operations not part of the traits)
    #[allow(dead_code)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Try to get fresh cached data
    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get(key)
            .ok()
            .flatten()
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    /// Try to get cached data ignoring expiry
    fn get_stale<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get_stale(key)
            .ok()
            .flatten()
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    /// Store data in cache
    fn set_cached<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        family: Family,
        view: &str,
        ttl: Duration,
    ) {
        if let Some(ref cache) = self.cache {
            if let Ok(guard) = cache.lock() {
                if let Ok(json) = serde_json::to_vec(data) {
                    let _ = guard.put(key, &json, family.as_str(), view, ttl);
                }
            }
        }
    }

    /// Remove one entry
    fn remove_cached(&self, key: &str) {
        if let Some(ref cache) = self.cache {
            if let Ok(guard) = cache.lock() {
                let _ = guard.delete_by_key(key);
            }
        }
    }

    /// Drop every cached view of a family after a mutation.
    ///
    /// Deliberately coarse: any filtered or paginated view may contain the
    /// mutated entity, so they all go. The cost is a refetch per open view
    /// on next read.
    fn invalidate(&self, family: Family) {
        if let Some(ref cache) = self.cache {
            if let Ok(guard) = cache.lock() {
                match guard.delete_by_family(family.as_str()) {
                    Ok(n) => log::debug!("Invalidated {} cached {} entries", n, family),
                    Err(e) => log::warn!("Cache invalidation failed for {}: {}", family, e),
                }
            }
        }
    }

    /// Seed the detail entry for a just-mutated entity, saving the next
    /// `get` a round-trip.
    fn seed_entity<T: Serialize>(&self, family: Family, id: i64, value: &T) {
        self.set_cached(
            &entity_key(family, id),
            value,
            family,
            "detail",
            CacheTtl::for_family(family),
        );
    }

    /// Per-key lock used to coalesce concurrent fetches of the same key.
    async fn key_guard(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut map = self.in_flight.lock().await;
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Read-through fetch for one resource key.
    ///
    /// Fresh hit: returned without touching the network. Miss: the caller
    /// takes the key's in-flight lock, re-checks the cache (a coalesced
    /// peer may have filled it while we waited), fetches, stores, and
    /// releases. On transport/server failure a stale entry is returned
    /// with a warning instead of the error, when one exists.
    async fn cached_fetch<T, F, Fut>(
        &self,
        family: Family,
        view: &str,
        params: &[(&'static str, String)],
        ttl: Duration,
        fetch: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.cache.is_none() {
            return fetch().await;
        }

        let key = cache_key(family, view, params);

        if !self.force_refresh {
            if let Some(cached) = self.get_cached(&key) {
                log::debug!("Cache hit: {} {}", family, view);
                return Ok(cached);
            }
        }

        let guard = self.key_guard(&key).await;
        let _held = guard.lock().await;

        // Re-check after acquiring: the request we coalesced behind may
        // have stored the value already. A forced revalidation always
        // issues its own request.
        if !self.force_refresh {
            if let Some(cached) = self.get_cached(&key) {
                log::debug!("Cache hit after coalesced wait: {} {}", family, view);
                return Ok(cached);
            }
        }

        match fetch().await {
            Ok(value) => {
                self.set_cached(&key, &value, family, view, ttl);
                Ok(value)
            }
            Err(Error::Api(api_err)) if api_err.allows_stale() => {
                match self.get_stale(&key) {
                    Some(stale) => {
                        log::warn!(
                            "Refresh of {} {} failed ({}), serving stale data",
                            family,
                            view,
                            api_err
                        );
                        Ok(stale)
                    }
                    None => Err(api_err.into()),
                }
            }
            Err(err) => Err(err),
        }
    }
}

/// Combine pagination and filter params into one resource-key component
fn list_params(
    pagination: &PaginationParams,
    filter_pairs: Vec<(&'static str, String)>,
) -> Vec<(&'static str, String)> {
    let mut params = pagination.to_query_params();
    params.extend(filter_pairs);
    params
}

#[async_trait]
impl<C: TraqApi + 'static> AuthApi for CachedTraqClient<C> {
    /// Authentication - never cached
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        self.inner.login(username, password).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        self.inner.refresh(refresh_token).await
    }

    async fn me(&self) -> Result<CurrentUser> {
        self.inner.me().await
    }

    async fn logout(&self) -> Result<()> {
        self.inner.logout().await
    }
}

#[async_trait]
impl<C: TraqApi + 'static> ClientApi for CachedTraqClient<C> {
    async fn list_clients(
        &self,
        pagination: &PaginationParams,
        filter: &ClientFilter,
    ) -> Result<Page<ClientModel>> {
        let params = list_params(pagination, filter.query_pairs());
        self.cached_fetch(Family::Clients, "list", &params, CacheTtl::CLIENTS, || async {
            self.inner.list_clients(pagination, filter).await
        })
        .await
    }

    async fn get_client(&self, id: i64) -> Result<ClientModel> {
        let params = [("id", id.to_string())];
        self.cached_fetch(Family::Clients, "detail", &params, CacheTtl::CLIENTS, || async {
            self.inner.get_client(id).await
        })
        .await
    }

    async fn create_client(&self, payload: ClientCreate) -> Result<ClientModel> {
        let created = self.inner.create_client(payload).await?;
        self.invalidate(Family::Clients);
        Ok(created)
    }

    async fn update_client(&self, id: i64, payload: ClientUpdate) -> Result<ClientModel> {
        let updated = self.inner.update_client(id, payload).await?;
        self.invalidate(Family::Clients);
        self.seed_entity(Family::Clients, id, &updated);
        Ok(updated)
    }

    async fn delete_client(&self, id: i64) -> Result<()> {
        self.inner.delete_client(id).await?;
        self.invalidate(Family::Clients);
        self.remove_cached(&entity_key(Family::Clients, id));
        Ok(())
    }
}

#[async_trait]
impl<C: TraqApi + 'static> ProjectApi for CachedTraqClient<C> {
    async fn list_projects(
        &self,
        pagination: &PaginationParams,
        filter: &ProjectFilter,
    ) -> Result<Page<Project>> {
        let params = list_params(pagination, filter.query_pairs());
        self.cached_fetch(Family::Projects, "list", &params, CacheTtl::PROJECTS, || async {
            self.inner.list_projects(pagination, filter).await
        })
        .await
    }

    async fn get_project(&self, id: i64) -> Result<Project> {
        let params = [("id", id.to_string())];
        self.cached_fetch(Family::Projects, "detail", &params, CacheTtl::PROJECTS, || async {
            self.inner.get_project(id).await
        })
        .await
    }

    async fn create_project(&self, payload: ProjectCreate) -> Result<Project> {
        let created = self.inner.create_project(payload).await?;
        self.invalidate(Family::Projects);
        Ok(created)
    }

    async fn update_project(&self, id: i64, payload: ProjectUpdate) -> Result<Project> {
        let updated = self.inner.update_project(id, payload).await?;
        self.invalidate(Family::Projects);
        self.seed_entity(Family::Projects, id, &updated);
        Ok(updated)
    }

    async fn delete_project(&self, id: i64) -> Result<()> {
        self.inner.delete_project(id).await?;
        self.invalidate(Family::Projects);
        self.remove_cached(&entity_key(Family::Projects, id));
        Ok(())
    }
}

#[async_trait]
impl<C: TraqApi + 'static> TaskApi for CachedTraqClient<C> {
    async fn list_tasks(
        &self,
        pagination: &PaginationParams,
        filter: &TaskFilter,
    ) -> Result<Page<Task>> {
        let params = list_params(pagination, filter.query_pairs());
        self.cached_fetch(Family::Tasks, "list", &params, CacheTtl::TASKS, || async {
            self.inner.list_tasks(pagination, filter).await
        })
        .await
    }

    async fn get_task(&self, id: i64) -> Result<Task> {
        let params = [("id", id.to_string())];
        self.cached_fetch(Family::Tasks, "detail", &params, CacheTtl::TASKS, || async {
            self.inner.get_task(id).await
        })
        .await
    }

    async fn create_task(&self, payload: TaskCreate) -> Result<Task> {
        let created = self.inner.create_task(payload).await?;
        self.invalidate(Family::Tasks);
        Ok(created)
    }

    async fn update_task(&self, id: i64, payload: TaskUpdate) -> Result<Task> {
        let updated = self.inner.update_task(id, payload).await?;
        self.invalidate(Family::Tasks);
        self.seed_entity(Family::Tasks, id, &updated);
        Ok(updated)
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.inner.delete_task(id).await?;
        self.invalidate(Family::Tasks);
        self.remove_cached(&entity_key(Family::Tasks, id));
        Ok(())
    }

    async fn assign_task(&self, id: i64, user_id: i64) -> Result<Task> {
        let updated = self.inner.assign_task(id, user_id).await?;
        self.invalidate(Family::Tasks);
        self.seed_entity(Family::Tasks, id, &updated);
        Ok(updated)
    }

    async fn set_task_status(&self, id: i64, status_id: i64) -> Result<Task> {
        let updated = self.inner.set_task_status(id, status_id).await?;
        self.invalidate(Family::Tasks);
        self.seed_entity(Family::Tasks, id, &updated);
        Ok(updated)
    }

    async fn list_task_categories(&self) -> Result<Vec<TaskCategory>> {
        self.cached_fetch(Family::Tasks, "categories", &[], CacheTtl::LOOKUPS, || async {
            self.inner.list_task_categories().await
        })
        .await
    }

    async fn list_task_statuses(&self) -> Result<Vec<TaskStatus>> {
        self.cached_fetch(Family::Tasks, "statuses", &[], CacheTtl::LOOKUPS, || async {
            self.inner.list_task_statuses().await
        })
        .await
    }

    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        self.cached_fetch(Family::Tasks, "priorities", &[], CacheTtl::LOOKUPS, || async {
            self.inner.list_priorities().await
        })
        .await
    }
}

#[async_trait]
impl<C: TraqApi + 'static> TimeEntryApi for CachedTraqClient<C> {
    async fn list_time_entries(
        &self,
        pagination: &PaginationParams,
        filter: &TimeEntryFilter,
    ) -> Result<Page<TimeEntry>> {
        let params = list_params(pagination, filter.query_pairs());
        self.cached_fetch(
            Family::TimeEntries,
            "list",
            &params,
            CacheTtl::TIME_ENTRIES,
            || async { self.inner.list_time_entries(pagination, filter).await },
        )
        .await
    }

    async fn get_time_entry(&self, id: i64) -> Result<TimeEntry> {
        let params = [("id", id.to_string())];
        self.cached_fetch(
            Family::TimeEntries,
            "detail",
            &params,
            CacheTtl::TIME_ENTRIES,
            || async { self.inner.get_time_entry(id).await },
        )
        .await
    }

    async fn create_time_entry(&self, payload: TimeEntryCreate) -> Result<TimeEntry> {
        let created = self.inner.create_time_entry(payload).await?;
        self.invalidate(Family::TimeEntries);
        Ok(created)
    }

    async fn update_time_entry(&self, id: i64, payload: TimeEntryUpdate) -> Result<TimeEntry> {
        let updated = self.inner.update_time_entry(id, payload).await?;
        self.invalidate(Family::TimeEntries);
        self.seed_entity(Family::TimeEntries, id, &updated);
        Ok(updated)
    }

    async fn delete_time_entry(&self, id: i64) -> Result<()> {
        self.inner.delete_time_entry(id).await?;
        self.invalidate(Family::TimeEntries);
        self.remove_cached(&entity_key(Family::TimeEntries, id));
        Ok(())
    }

    /// Start seeds the active-timer entry directly with the response; the
    /// family invalidation also drops stale summary and list views.
    async fn start_timer(&self, payload: TimerStart) -> Result<TimeEntry> {
        let entry = self.inner.start_timer(payload).await?;
        self.invalidate(Family::TimeEntries);
        self.set_cached(
            &active_timer_key(),
            &Some(entry.clone()),
            Family::TimeEntries,
            "active-timer",
            CacheTtl::ACTIVE_TIMER,
        );
        self.seed_entity(Family::TimeEntries, entry.id, &entry);
        Ok(entry)
    }

    /// Stop clears the active-timer entry and invalidates the family so
    /// entry lists and the summary reflect the closed entry.
    async fn stop_timer(&self, payload: TimerStop) -> Result<TimeEntry> {
        let entry = self.inner.stop_timer(payload).await?;
        self.invalidate(Family::TimeEntries);
        self.remove_cached(&active_timer_key());
        self.seed_entity(Family::TimeEntries, entry.id, &entry);
        Ok(entry)
    }

    async fn active_timer(&self) -> Result<Option<TimeEntry>> {
        self.cached_fetch(
            Family::TimeEntries,
            "active-timer",
            &[],
            CacheTtl::ACTIVE_TIMER,
            || async { self.inner.active_timer().await },
        )
        .await
    }

    async fn time_summary(&self) -> Result<TimeSummary> {
        self.cached_fetch(
            Family::TimeEntries,
            "summary",
            &[],
            CacheTtl::SUMMARY,
            || async { self.inner.time_summary().await },
        )
        .await
    }
}

#[async_trait]
impl<C: TraqApi + 'static> UserApi for CachedTraqClient<C> {
    async fn list_users(
        &self,
        pagination: &PaginationParams,
        filter: &UserFilter,
    ) -> Result<Page<User>> {
        let params = list_params(pagination, filter.query_pairs());
        self.cached_fetch(Family::Users, "list", &params, CacheTtl::USERS, || async {
            self.inner.list_users(pagination, filter).await
        })
        .await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        let params = [("id", id.to_string())];
        self.cached_fetch(Family::Users, "detail", &params, CacheTtl::USERS, || async {
            self.inner.get_user(id).await
        })
        .await
    }
}

#[async_trait]
impl<C: TraqApi + 'static> CalendarApi for CachedTraqClient<C> {
    async fn list_calendar_events(
        &self,
        pagination: &PaginationParams,
        filter: &CalendarEventFilter,
    ) -> Result<Page<CalendarEvent>> {
        let params = list_params(pagination, filter.query_pairs());
        self.cached_fetch(Family::Calendar, "list", &params, CacheTtl::CALENDAR, || async {
            self.inner.list_calendar_events(pagination, filter).await
        })
        .await
    }

    async fn get_calendar_event(&self, id: i64) -> Result<CalendarEvent> {
        let params = [("id", id.to_string())];
        self.cached_fetch(Family::Calendar, "detail", &params, CacheTtl::CALENDAR, || async {
            self.inner.get_calendar_event(id).await
        })
        .await
    }

    async fn create_calendar_event(&self, payload: CalendarEventCreate) -> Result<CalendarEvent> {
        let created = self.inner.create_calendar_event(payload).await?;
        self.invalidate(Family::Calendar);
        Ok(created)
    }

    async fn update_calendar_event(
        &self,
        id: i64,
        payload: CalendarEventUpdate,
    ) -> Result<CalendarEvent> {
        let updated = self.inner.update_calendar_event(id, payload).await?;
        self.invalidate(Family::Calendar);
        self.seed_entity(Family::Calendar, id, &updated);
        Ok(updated)
    }

    async fn delete_calendar_event(&self, id: i64) -> Result<()> {
        self.inner.delete_calendar_event(id).await?;
        self.invalidate(Family::Calendar);
        self.remove_cached(&entity_key(Family::Calendar, id));
        Ok(())
    }

    /// Upload is a bulk insert, so it mutates the calendar family
    async fn upload_calendar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<CalendarUploadReport> {
        let report = self.inner.upload_calendar(file_name, bytes).await?;
        self.invalidate(Family::Calendar);
        Ok(report)
    }

    async fn calendar_stats(&self) -> Result<CalendarStats> {
        self.cached_fetch(
            Family::Calendar,
            "stats",
            &[],
            CacheTtl::CALENDAR_STATS,
            || async { self.inner.calendar_stats().await },
        )
        .await
    }
}
