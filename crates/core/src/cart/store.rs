//! The persisting cart store.

use std::sync::Arc;

use super::record::{self, CART_STORAGE_KEY};
use super::{CartError, CartLine, CartObserver, CartState, Command, PersistenceError, Product};
use crate::storage::KeyValueStore;
use crate::types::{ItemId, Price};

/// Owns the cart for one session.
///
/// Wraps the pure [`CartState::apply`] with persistence: every accepted
/// command rewrites the stored record before returning. Storage trouble is
/// reported to the observer and otherwise ignored, so the cart keeps working
/// in memory when the backend is unavailable.
pub struct CartStore<S> {
    state: CartState,
    storage: S,
    observer: Arc<dyn CartObserver>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the store, hydrating from `storage` if a record exists.
    ///
    /// A missing record yields an empty cart. An unreadable one also yields
    /// an empty cart and is reported to `observer`.
    pub fn open(storage: S, observer: Arc<dyn CartObserver>) -> Self {
        let state = match storage.get(CART_STORAGE_KEY) {
            Ok(None) => CartState::new(),
            Ok(Some(raw)) => match record::decode(&raw) {
                Ok(hydrated) => {
                    if hydrated.dropped > 0 {
                        observer.lines_dropped(hydrated.dropped);
                    }
                    hydrated.state
                }
                Err(e) => {
                    observer.persistence_failed(&PersistenceError::Corrupt(e));
                    CartState::new()
                }
            },
            Err(e) => {
                observer.persistence_failed(&PersistenceError::Read(e));
                CartState::new()
            }
        };

        tracing::debug!(lines = state.line_count(), "Cart hydrated");

        Self {
            state,
            storage,
            observer,
        }
    }

    /// Apply a command and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the command is rejected; the cart and the
    /// stored record are then unchanged.
    pub fn dispatch(&mut self, command: &Command) -> Result<(), CartError> {
        let next = self.state.apply(command).inspect_err(|e| {
            tracing::debug!(command = command.name(), error = %e, "Cart command rejected");
        })?;
        self.commit(command.name(), next);
        Ok(())
    }

    fn commit(&mut self, command: &'static str, next: CartState) {
        self.state = next;
        tracing::debug!(
            command,
            lines = self.state.line_count(),
            units = self.state.total_units(),
            "Cart updated"
        );
        self.persist();
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProduct`] for a product without an id or
    /// with a negative price.
    pub fn add_item(&mut self, product: Product) -> Result<(), CartError> {
        self.dispatch(&Command::AddItem(product))
    }

    /// Remove a line. Absent ids are ignored.
    pub fn remove_item(&mut self, item_id: &ItemId) {
        let next = self.state.without(item_id);
        self.commit("remove_item", next);
    }

    /// Set a line's quantity exactly; zero or below removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` exceeds what a
    /// line can hold.
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: i64) -> Result<(), CartError> {
        self.dispatch(&Command::SetQuantity {
            item_id: item_id.clone(),
            quantity,
        })
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.commit("clear", CartState::new());
    }

    fn persist(&self) {
        let result = record::encode(&self.state)
            .map_err(PersistenceError::Encode)
            .and_then(|raw| {
                self.storage
                    .set(CART_STORAGE_KEY, &raw)
                    .map_err(PersistenceError::Write)
            });
        if let Err(e) = result {
            self.observer.persistence_failed(&e);
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in insertion order, for rendering.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.state.line_count()
    }

    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.state.total_units()
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        self.state.total_price()
    }

    #[must_use]
    pub fn quantity_of(&self, item_id: &ItemId) -> u32 {
        self.state.quantity_of(item_id)
    }

    #[must_use]
    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.state.contains(item_id)
    }
}

impl<S> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::RecordingObserver;
    use crate::storage::MemoryStore;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    fn fern() -> Product {
        Product::new("p1", "Fern", Decimal::from(199))
    }

    fn open(storage: Arc<MemoryStore>) -> (CartStore<Arc<MemoryStore>>, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::new());
        let store = CartStore::open(storage, observer.clone());
        (store, observer)
    }

    #[test]
    fn test_open_without_record_is_empty() {
        let (store, observer) = open(Arc::new(MemoryStore::new()));
        assert_eq!(store.line_count(), 0);
        assert!(observer.failures().is_empty());
    }

    #[test]
    fn test_open_with_corrupt_record_is_empty_and_reported() {
        let storage = Arc::new(MemoryStore::with_entry(CART_STORAGE_KEY, "{definitely not json"));
        let (store, observer) = open(storage);
        assert_eq!(store.line_count(), 0);
        assert_eq!(observer.failures().len(), 1);
    }

    #[test]
    fn test_open_with_unreadable_storage_is_empty_and_reported() {
        let storage = Arc::new(MemoryStore::with_entry(
            CART_STORAGE_KEY,
            r#"{"lines":[{"itemId":"p1","unitPrice":199,"quantity":2}]}"#,
        ));
        storage.fail_reads(true);

        let (store, observer) = open(storage);
        assert_eq!(store.line_count(), 0);
        assert_eq!(store.total_price(), Price::ZERO);
        let failures = observer.failures();
        assert_eq!(failures.len(), 1);
        let message = failures.first().unwrap();
        assert!(message.starts_with("failed to read persisted cart"), "{message}");
        assert_eq!(observer.dropped(), 0);
    }

    #[test]
    fn test_open_reports_dropped_lines() {
        let raw = r#"{"lines":[{"itemId":"a","unitPrice":1,"quantity":1},{"itemId":"b","unitPrice":1,"quantity":0}]}"#;
        let (store, observer) = open(Arc::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw)));
        assert_eq!(store.line_count(), 1);
        assert_eq!(observer.dropped(), 1);
    }

    #[test]
    fn test_every_command_is_persisted() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, _) = open(storage.clone());

        store.add_item(fern()).unwrap();
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"quantity\":1"));

        store.set_quantity(&id("p1"), 4).unwrap();
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"quantity\":4"));

        store.clear();
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(saved, r#"{"lines":[]}"#);
    }

    #[test]
    fn test_reload_restores_cart() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, _) = open(storage.clone());
        store.add_item(fern()).unwrap();
        store.add_item(fern()).unwrap();
        store
            .add_item(Product::new("p2", "Aloe", Decimal::new(2450, 2)))
            .unwrap();

        let (reloaded, observer) = open(storage);
        assert_eq!(reloaded.lines(), store.lines());
        assert_eq!(reloaded.total_units(), 3);
        assert_eq!(reloaded.total_price(), store.total_price());
        assert!(observer.failures().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_change() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, observer) = open(storage.clone());
        store.add_item(fern()).unwrap();

        storage.fail_writes(true);
        store.add_item(fern()).unwrap();
        assert_eq!(store.quantity_of(&id("p1")), 2);
        assert_eq!(observer.failures().len(), 1);

        // The stored record still reflects the last successful write.
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"quantity\":1"));
    }

    #[test]
    fn test_rejected_command_does_not_write() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, _) = open(storage.clone());
        let bad = Product::new("", "Nameless", Decimal::ONE);
        assert!(matches!(store.add_item(bad), Err(CartError::InvalidProduct { .. })));
        assert!(storage.get(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let (mut store, _) = open(Arc::new(MemoryStore::new()));
        store.add_item(fern()).unwrap();
        store.set_quantity(&id("p1"), 0).unwrap();
        assert!(!store.contains(&id("p1")));
    }

    #[test]
    fn test_remove_item() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, _) = open(storage.clone());
        store.add_item(fern()).unwrap();
        store
            .add_item(Product::new("p2", "Aloe", Decimal::from(99)))
            .unwrap();

        store.remove_item(&id("p1"));
        store.remove_item(&id("p1"));
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.total_price(), Price::from_major(99));

        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(!saved.contains("\"p1\""));
        assert!(saved.contains("\"p2\""));
    }

    #[test]
    fn test_remove_and_clear_report_write_failures() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, observer) = open(storage.clone());
        store.add_item(fern()).unwrap();

        storage.fail_writes(true);
        store.remove_item(&id("p1"));
        store.clear();
        assert_eq!(store.line_count(), 0);
        assert_eq!(observer.failures().len(), 2);
    }
}
