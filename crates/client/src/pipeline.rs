//! The catalog pipeline: every derived view and the single order they update in.
//!
//! ```text
//! products ──┐
//!            ├─ enrich ──► products_enriched ──┬─► products_in_category ◄── category filter
//! categories ┘                                 │
//!                        edits ──► reconcile ◄─┘
//!                                     │
//!                                     ▼
//!                            products_reconciled ──► selected_product ◄── selected id
//!                                                          │
//!                                   suppliers ──► selected_product_suppliers
//! ```
//!
//! Every input (fetched collection, edit intent, selection change) is handled
//! under one lock, start to finish: the affected views are recomputed
//! synchronously and published before the next input is looked at. That lock
//! is what puts snapshots and edits into a single total order, so the
//! reconciliation fold sees them exactly as they were handed in.
//!
//! Each view is a [`Multicast`]: computed once per upstream event no matter how
//! many observers there are, and replayed to observers that arrive late.
//!
//! A failed source routes its message to `errors` and degrades the views that
//! depend on it to an empty collection; the pipeline itself keeps running.

use std::sync::{Mutex, MutexGuard};

use catalogsync_core::{CategoryId, FetchError, FetchResult, ProductId};
use catalogsync_events::{CombineLatest, Fold, Multicast, Subject, Subscription};
use catalogsync_products::{
    Category, EditIntent, FoldInput, PriceMarkup, Product, ProductReconciler, Supplier,
    enrich_all, filter_by_category, find_selected, suppliers_for,
};

#[derive(Debug)]
enum SourceState<T> {
    Pending,
    Ready(T),
    Failed,
}

#[derive(Debug)]
struct PipelineState {
    products: SourceState<Vec<Product>>,
    categories: SourceState<Vec<Category>>,
    /// Set while enrichment is serving its empty fallback for a failed source.
    degraded: bool,
    reconciler: Fold<ProductReconciler>,
    selection: CombineLatest<Vec<Product>, ProductId>,
    supplier_view: CombineLatest<Option<Product>, Vec<Supplier>>,
    category_view: CombineLatest<Vec<Product>, Option<CategoryId>>,
}

/// Derived catalog views over fetched collections and local edits.
#[derive(Debug)]
pub struct CatalogPipeline {
    markup: PriceMarkup,
    state: Mutex<PipelineState>,

    categories: Multicast<Vec<Category>>,
    enriched: Multicast<Vec<Product>>,
    reconciled: Multicast<Vec<Product>>,
    selected_id: Multicast<ProductId>,
    selected: Multicast<Option<Product>>,
    selected_suppliers: Multicast<Vec<Supplier>>,
    category_filter: Multicast<Option<CategoryId>>,
    in_category: Multicast<Vec<Product>>,

    edits: Subject<EditIntent>,
    errors: Subject<String>,
}

impl CatalogPipeline {
    pub fn new(markup: PriceMarkup) -> Self {
        Self {
            markup,
            state: Mutex::new(PipelineState {
                products: SourceState::Pending,
                categories: SourceState::Pending,
                degraded: false,
                reconciler: Fold::new(ProductReconciler),
                selection: CombineLatest::with_right(ProductId::NONE),
                supplier_view: CombineLatest::new(),
                category_view: CombineLatest::with_right(None),
            }),
            categories: Multicast::new(),
            enriched: Multicast::new(),
            reconciled: Multicast::new(),
            selected_id: Multicast::with_initial(ProductId::NONE),
            selected: Multicast::new(),
            selected_suppliers: Multicast::new(),
            category_filter: Multicast::with_initial(None),
            in_category: Multicast::new(),
            edits: Subject::new(),
            errors: Subject::new(),
        }
    }

    // --- inputs ---

    /// Feed a product collection (initial load or base refresh).
    ///
    /// A successful collection becomes a new base snapshot once categories are
    /// known, replacing the reconciled list and any local edits on it.
    pub fn ingest_products(&self, result: FetchResult<Vec<Product>>) {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        state.products = self.settle("products", result);
        self.recompute_enriched(state);
    }

    pub fn ingest_categories(&self, result: FetchResult<Vec<Category>>) {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        state.categories = self.settle("categories", result);

        let listed = match &state.categories {
            SourceState::Ready(categories) => categories.clone(),
            SourceState::Pending | SourceState::Failed => Vec::new(),
        };
        emit(&self.categories, "categories", listed);

        self.recompute_enriched(state);
    }

    pub fn ingest_suppliers(&self, result: FetchResult<Vec<Supplier>>) {
        let mut guard = self.lock_state();
        let suppliers = match self.settle("suppliers", result) {
            SourceState::Ready(suppliers) => suppliers,
            SourceState::Pending | SourceState::Failed => Vec::new(),
        };

        let derived = guard
            .supplier_view
            .set_right(suppliers)
            .map(|(selected, suppliers)| suppliers_for(selected.as_ref(), suppliers));
        if let Some(derived) = derived {
            emit(&self.selected_suppliers, "selected_product_suppliers", derived);
        }
    }

    /// Fold one edit intent into the reconciled list.
    ///
    /// Fire-and-forget: intents are applied in the order this is called.
    pub fn submit(&self, intent: EditIntent) {
        let mut guard = self.lock_state();
        self.apply_edit(&mut guard, intent);
    }

    /// Append `item` unless no item is given, in which case `placeholder` is appended.
    ///
    /// The duplicate check for the placeholder id runs under the same lock as the
    /// append, so it sees exactly the list the placeholder lands in.
    pub fn submit_add(&self, item: Option<Product>, placeholder: &Product) {
        let mut guard = self.lock_state();
        let item = match item {
            Some(item) => item,
            None => {
                if guard.reconciler.state().iter().any(|p| p.id == placeholder.id) {
                    tracing::warn!(
                        product_id = %placeholder.id,
                        "placeholder product id already in the catalog; adding a duplicate"
                    );
                }
                placeholder.clone()
            }
        };
        self.apply_edit(&mut guard, EditIntent::Add(item));
    }

    fn apply_edit(&self, state: &mut PipelineState, intent: EditIntent) {
        tracing::debug!(
            action = intent.action().as_str(),
            product_id = %intent.item().id,
            "edit intent submitted"
        );
        if let Err(err) = self.edits.publish(intent.clone()) {
            tracing::error!(stream = "edits", error = %err, "failed to publish");
        }
        self.fold(state, FoldInput::Edit(intent));
    }

    /// Change the selected product. Unknown ids are accepted and select nothing.
    pub fn select_product(&self, id: ProductId) {
        let mut guard = self.lock_state();
        emit(&self.selected_id, "selected_product_id", id);

        let selected = guard
            .selection
            .set_right(id)
            .map(|(products, id)| find_selected(products, *id));
        if let Some(selected) = selected {
            self.publish_selected(&mut guard, selected);
        }
    }

    /// Restrict `products_in_category` to one category, or lift the filter with `None`.
    pub fn select_category(&self, category: Option<CategoryId>) {
        let mut guard = self.lock_state();
        emit(&self.category_filter, "category_filter", category);

        let filtered = guard
            .category_view
            .set_right(category)
            .map(|(products, category)| filter_by_category(products, *category));
        if let Some(filtered) = filtered {
            emit(&self.in_category, "products_in_category", filtered);
        }
    }

    // --- outputs ---

    pub fn products_enriched(&self) -> Subscription<Vec<Product>> {
        self.enriched.subscribe()
    }

    pub fn products_reconciled(&self) -> Subscription<Vec<Product>> {
        self.reconciled.subscribe()
    }

    pub fn selected_product(&self) -> Subscription<Option<Product>> {
        self.selected.subscribe()
    }

    pub fn selected_product_suppliers(&self) -> Subscription<Vec<Supplier>> {
        self.selected_suppliers.subscribe()
    }

    pub fn selected_product_id(&self) -> Subscription<ProductId> {
        self.selected_id.subscribe()
    }

    pub fn categories(&self) -> Subscription<Vec<Category>> {
        self.categories.subscribe()
    }

    pub fn products_in_category(&self) -> Subscription<Vec<Product>> {
        self.in_category.subscribe()
    }

    pub fn edits(&self) -> Subscription<EditIntent> {
        self.edits.subscribe()
    }

    /// One message per source failure. Never terminates.
    pub fn errors(&self) -> Subscription<String> {
        self.errors.subscribe()
    }

    pub fn current_enriched(&self) -> Option<Vec<Product>> {
        self.enriched.latest()
    }

    pub fn current_reconciled(&self) -> Option<Vec<Product>> {
        self.reconciled.latest()
    }

    pub fn current_selected(&self) -> Option<Option<Product>> {
        self.selected.latest()
    }

    pub fn current_selected_suppliers(&self) -> Option<Vec<Supplier>> {
        self.selected_suppliers.latest()
    }

    /// How many times each view has been computed: (enriched, reconciled, selected).
    pub fn computations(&self) -> (u64, u64, u64) {
        (
            self.enriched.emissions(),
            self.reconciled.emissions(),
            self.selected.emissions(),
        )
    }

    // --- propagation ---

    fn lock_state(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::error!("pipeline state lock poisoned; continuing with last state");
            poisoned.into_inner()
        })
    }

    fn settle<T>(&self, source: &'static str, result: FetchResult<T>) -> SourceState<T> {
        match result {
            Ok(value) => {
                tracing::debug!(source, "source emitted");
                SourceState::Ready(value)
            }
            Err(err) => {
                self.report(source, &err);
                SourceState::Failed
            }
        }
    }

    fn report(&self, source: &'static str, err: &FetchError) {
        tracing::warn!(source, error = %err, "source failed; dependent views fall back to empty");
        if let Err(publish_err) = self.errors.publish(err.to_string()) {
            tracing::error!(stream = "errors", error = %publish_err, "failed to publish");
        }
    }

    fn recompute_enriched(&self, state: &mut PipelineState) {
        let enriched = match (&state.products, &state.categories) {
            (SourceState::Ready(products), SourceState::Ready(categories)) => {
                state.degraded = false;
                enrich_all(products, categories, self.markup)
            }
            (SourceState::Failed, _) | (_, SourceState::Failed) => {
                // Fall back once; later emissions of the healthy side change nothing.
                if state.degraded {
                    return;
                }
                state.degraded = true;
                Vec::new()
            }
            _ => return,
        };

        tracing::debug!(count = enriched.len(), "products enriched");
        emit(&self.enriched, "products_enriched", enriched.clone());

        let filtered = state
            .category_view
            .set_left(enriched.clone())
            .map(|(products, category)| filter_by_category(products, *category));
        if let Some(filtered) = filtered {
            emit(&self.in_category, "products_in_category", filtered);
        }

        self.fold(state, FoldInput::Snapshot(enriched));
    }

    fn fold(&self, state: &mut PipelineState, input: FoldInput) {
        let reconciled = state.reconciler.apply(input).clone();
        tracing::debug!(
            count = reconciled.len(),
            applied = state.reconciler.applied(),
            "products reconciled"
        );
        emit(&self.reconciled, "products_reconciled", reconciled.clone());

        let selected = state
            .selection
            .set_left(reconciled)
            .map(|(products, id)| find_selected(products, *id));
        if let Some(selected) = selected {
            self.publish_selected(state, selected);
        }
    }

    fn publish_selected(&self, state: &mut PipelineState, selected: Option<Product>) {
        tracing::debug!(product_id = ?selected.as_ref().map(|p| p.id), "selected product");
        emit(&self.selected, "selected_product", selected.clone());

        let suppliers = state
            .supplier_view
            .set_left(selected)
            .map(|(product, suppliers)| suppliers_for(product.as_ref(), suppliers));
        if let Some(suppliers) = suppliers {
            emit(&self.selected_suppliers, "selected_product_suppliers", suppliers);
        }
    }
}

impl Default for CatalogPipeline {
    fn default() -> Self {
        Self::new(PriceMarkup::DEFAULT)
    }
}

fn emit<T: Clone>(cell: &Multicast<T>, stream: &'static str, value: T) {
    let subscribers = cell.publish(value);
    tracing::trace!(stream, subscribers, "view published");
}
