//! Reactive resource cache
//!
//! The reactive half of the data-fetch layer: a process-wide store of
//! keyed request state provided through Leptos context, with the
//! single-flight / last-fetch-wins / invalidation rules delegated to the
//! [`pop_core::cache::CacheLedger`].
//!
//! Views consume it through hooks:
//!
//! - [`use_resource`] - one keyed GET; a `None` key issues no request
//!   (the create-form case),
//! - [`use_collection`] - the unpaged collection, for pickers,
//! - [`use_paged_list`] - page window + decoupled count, the machinery
//!   every entity list shares.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use leptos::logging::warn;
use leptos::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use pop_core::cache::CacheLedger;
use pop_core::listing::{Pager, DEFAULT_PAGE_SIZE};
use pop_core::model::CountResponse;

use crate::api::{self, ApiClient, ApiError};

// ============================================================================
// Resource state
// ============================================================================

/// Last-known state for one cache key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceState {
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    pub loading: bool,
}

impl ResourceState {
    /// True only while the very first fetch for the key is in flight;
    /// revalidations keep rendering the cached rows.
    pub fn is_initial_loading(&self) -> bool {
        self.loading && self.data.is_none()
    }

    /// Decodes the cached value. Decode failures are logged and read as
    /// "no data" rather than crashing the view.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.data.clone()?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!("resposta inesperada da API: {err}");
                None
            }
        }
    }
}

// ============================================================================
// Store
// ============================================================================

struct Inner {
    ledger: CacheLedger,
    states: HashMap<String, RwSignal<ResourceState>>,
}

/// Process-wide cache store. Cloning shares the same entries, so a
/// product list and a recipe form reading the product collection observe
/// one underlying entry.
#[derive(Clone)]
pub struct ResourceStore {
    /// Owner the per-key signals are created under. Entries outlive any
    /// single view, so they must hang off the root scope, not whichever
    /// component happened to read the key first.
    owner: Option<Owner>,
    inner: Rc<RefCell<Inner>>,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore {
    pub fn new() -> Self {
        Self {
            owner: Owner::current(),
            inner: Rc::new(RefCell::new(Inner {
                ledger: CacheLedger::new(),
                states: HashMap::new(),
            })),
        }
    }

    fn signal(&self, key: &str) -> RwSignal<ResourceState> {
        let owner = self.owner;
        let mut inner = self.inner.borrow_mut();
        *inner
            .states
            .entry(key.to_string())
            .or_insert_with(|| match owner {
                Some(owner) => {
                    with_owner(owner, || create_rw_signal(ResourceState::default()))
                }
                None => create_rw_signal(ResourceState::default()),
            })
    }

    /// Issues a fetch unless one is already in flight for `key`. The
    /// resolved response is kept only if its generation is still current.
    fn spawn_fetch(&self, client: &ApiClient, key: &str) {
        let token = self.inner.borrow_mut().ledger.begin_fetch(key);
        let Some(token) = token else {
            return; // shared with the request already in the air
        };
        let signal = self.signal(key);
        signal.update(|s| s.loading = true);

        let store = self.clone();
        let client = client.clone();
        let key = key.to_string();
        spawn_local(async move {
            let result = client.get_value(&key).await;
            let current = store.inner.borrow_mut().ledger.settle(&key, token);
            if !current {
                return; // a newer fetch owns this key now
            }
            signal.update(|s| {
                s.loading = false;
                match result {
                    Ok(value) => {
                        s.data = Some(value);
                        s.error = None;
                    }
                    Err(err) => s.error = Some(err),
                }
            });
        });
    }

    fn subscribe(&self, client: &ApiClient, key: &str) {
        let revalidate = self.inner.borrow_mut().ledger.subscribe(key);
        if revalidate {
            self.spawn_fetch(client, key);
        }
    }

    fn unsubscribe(&self, key: &str) {
        self.inner.borrow_mut().ledger.unsubscribe(key);
    }

    /// Marks one key stale, refetching immediately while a consumer is
    /// mounted. Fire-and-forget: callers never wait on the revalidation.
    pub fn invalidate(&self, client: &ApiClient, key: &str) {
        let refetch = self.inner.borrow_mut().ledger.invalidate(key);
        if refetch {
            self.spawn_fetch(client, key);
        }
    }

    /// Invalidates everything under a collection: page windows, the count
    /// and by-id entries. Called after every successful mutation.
    pub fn invalidate_collection(&self, client: &ApiClient, collection: &str) {
        let keys = self
            .inner
            .borrow_mut()
            .ledger
            .invalidate_prefix(&api::collection_key(collection));
        for key in keys {
            self.spawn_fetch(client, &key);
        }
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// Subscribes the calling view to the resource named by `key`. The
/// subscription follows the key reactively and is dropped on unmount, so
/// a response landing after the view is gone updates nobody.
pub fn use_resource(key: impl Fn() -> Option<String> + 'static) -> Signal<ResourceState> {
    let store = expect_context::<ResourceStore>();
    let client = expect_context::<ApiClient>();
    let key = Signal::derive(key);
    let active = store_value::<Option<String>>(None);

    {
        let store = store.clone();
        let client = client.clone();
        create_effect(move |_| {
            let next = key.get();
            let prev = active.get_value();
            if prev == next {
                return;
            }
            if let Some(prev) = prev {
                store.unsubscribe(&prev);
            }
            if let Some(next) = next.as_ref() {
                store.subscribe(&client, next);
            }
            active.set_value(next);
        });
    }

    {
        let store = store.clone();
        on_cleanup(move || {
            if let Some(prev) = active.get_value() {
                store.unsubscribe(&prev);
            }
        });
    }

    Signal::derive(move || match key.get() {
        Some(k) => store.signal(&k).get(),
        None => ResourceState::default(),
    })
}

/// The unpaged collection resource, shared by pickers.
pub fn use_collection(collection: &'static str) -> Signal<ResourceState> {
    use_resource(move || Some(api::collection_key(collection)))
}

/// One entity by id; `None` (create mode) issues no request.
pub fn use_entity(
    collection: &'static str,
    id: impl Fn() -> Option<String> + 'static,
) -> Signal<ResourceState> {
    use_resource(move || id().map(|id| api::entity_key(collection, &id)))
}

/// The paginated-list service every entity list view uses: page window
/// keyed on `(collection, page)`, plus the decoupled `/count` resource
/// folded into the pager. The count is refetched on every page change -
/// cheap, and it keeps the total in sync with concurrent external
/// mutations.
#[derive(Clone)]
pub struct PagedList {
    collection: &'static str,
    store: ResourceStore,
    client: ApiClient,
    pub pager: RwSignal<Pager>,
    pub state: Signal<ResourceState>,
}

pub fn use_paged_list(collection: &'static str) -> PagedList {
    let store = expect_context::<ResourceStore>();
    let client = expect_context::<ApiClient>();
    let pager = create_rw_signal(Pager::default());

    let state = use_resource(move || {
        Some(api::page_key(
            collection,
            pager.with(|p| p.page()),
            DEFAULT_PAGE_SIZE,
        ))
    });

    let count_state = use_resource(move || Some(api::count_key(collection)));

    {
        let store = store.clone();
        let client = client.clone();
        let last_page = store_value(0usize);
        create_effect(move |_| {
            let page = pager.with(|p| p.page());
            if last_page.get_value() != page {
                last_page.set_value(page);
                store.invalidate(&client, &api::count_key(collection));
            }
        });
    }

    create_effect(move |_| {
        if let Some(count) = count_state.get().decode::<CountResponse>() {
            pager.update(|p| p.set_total_items(count.count));
        }
    });

    PagedList {
        collection,
        store,
        client,
        pager,
        state,
    }
}

impl PagedList {
    /// Rows of the current page, decoded; empty while nothing is cached.
    pub fn items<T: DeserializeOwned + Clone + PartialEq + 'static>(&self) -> Signal<Vec<T>> {
        let state = self.state;
        Signal::derive(move || state.get().decode::<Vec<T>>().unwrap_or_default())
    }

    /// Invalidates the whole collection after a mutation.
    pub fn invalidate(&self) {
        self.store.invalidate_collection(&self.client, self.collection);
    }
}
