//! The shopping cart: a shared subject that notifies observers on mutation.
//!
//! There is one process-wide cart, reached through [`CartHandle::shared`].
//! Every handle is a cheap clone of the same `Arc`, so sharing is explicit at
//! each call site instead of hidden behind a global. Independent carts can be
//! built with [`CartHandle::new`].

use log::debug;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

/// The kind of mutation an observer is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// An item was appended to the cart.
    Added,

    /// The first occurrence of an item was removed from the cart.
    Removed,
}

impl CartAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAction::Added => "added",
            CartAction::Removed => "removed",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives cart mutation events.
///
/// `update` runs synchronously while the cart is locked, so implementations
/// must not call back into the cart.
pub trait CartObserver: Send + Sync {
    /// Called once per mutation with the affected item, the action and the
    /// full item sequence after the mutation.
    fn update(&self, item: &str, action: CartAction, items: &[String]);
}

/// Ordered item sequence plus observer registrations.
///
/// # Invariants
///
/// - Items only change through [`add_item`](Self::add_item) and
///   [`remove_item`](Self::remove_item)
/// - Each successful mutation notifies every live observer exactly once, in
///   registration order
#[derive(Default)]
pub struct ShoppingCart {
    items: Vec<String>,

    /// Non-owning registrations. Dropped observers are pruned lazily.
    observers: Vec<Weak<dyn CartObserver>>,
}

impl ShoppingCart {
    /// Creates an empty cart with no observers.
    pub fn new() -> Self {
        ShoppingCart {
            items: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer. No dedup: registering twice notifies twice.
    ///
    /// The cart only keeps a `Weak` reference. The caller must hold on to the
    /// `Arc`; `cart.add_observer(&Arc::new(sink))` registers an observer that
    /// is already gone when the call returns and is never notified.
    pub fn add_observer<O: CartObserver + 'static>(&mut self, observer: &Arc<O>) {
        let registration = Arc::<O>::downgrade(observer);
        self.observers.push(registration);
    }

    /// Appends an item and notifies every observer.
    pub fn add_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        self.items.push(item.clone());
        debug!("Added {:?}, cart now holds {} item(s)", item, self.items.len());
        self.notify(&item, CartAction::Added);
    }

    /// Removes the first occurrence of `item` and notifies every observer.
    ///
    /// Returns `false` and leaves the cart untouched, with no notification,
    /// if the item is not present. Absence is not an error.
    pub fn remove_item(&mut self, item: &str) -> bool {
        let Some(index) = self.items.iter().position(|i| i == item) else {
            debug!("Remove of {:?} ignored, not in cart", item);
            return false;
        };

        self.items.remove(index);
        debug!("Removed {:?}, cart now holds {} item(s)", item, self.items.len());
        self.notify(item, CartAction::Removed);
        true
    }

    /// Current item sequence in insertion order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|o| o.strong_count() > 0).count()
    }

    fn notify(&mut self, item: &str, action: CartAction) {
        let before = self.observers.len();
        self.observers.retain(|o| o.strong_count() > 0);
        if self.observers.len() < before {
            debug!(
                "Pruned {} dropped observer(s)",
                before - self.observers.len()
            );
        }

        for observer in self.observers.iter().filter_map(Weak::upgrade) {
            observer.update(item, action, &self.items);
        }
    }
}

/// A shared, cloneable handle to a [`ShoppingCart`].
///
/// Every method takes the cart lock for the whole read-modify-notify sequence.
#[derive(Clone, Default)]
pub struct CartHandle(Arc<Mutex<ShoppingCart>>);

static SHARED_CART: OnceLock<CartHandle> = OnceLock::new();

impl CartHandle {
    /// Creates a handle to a new, independent cart.
    pub fn new() -> Self {
        CartHandle(Arc::new(Mutex::new(ShoppingCart::new())))
    }

    /// Returns a handle to the process-wide cart, creating it empty on the
    /// first call. All calls return handles to the same instance.
    pub fn shared() -> Self {
        SHARED_CART
            .get_or_init(|| {
                debug!("Initializing shared cart");
                CartHandle::new()
            })
            .clone()
    }

    /// Returns `true` if both handles point at the same cart.
    pub fn ptr_eq(&self, other: &CartHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Registers a non-owning observer, see [`ShoppingCart::add_observer`].
    /// Keep the `Arc` alive for as long as it should receive updates.
    pub fn add_observer<O: CartObserver + 'static>(&self, observer: &Arc<O>) {
        self.lock().add_observer(observer);
    }

    pub fn add_item(&self, item: impl Into<String>) {
        self.lock().add_item(item);
    }

    /// See [`ShoppingCart::remove_item`].
    pub fn remove_item(&self, item: &str) -> bool {
        self.lock().remove_item(item)
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<String> {
        self.lock().items().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items().is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observer_count()
    }

    fn lock(&self) -> MutexGuard<'_, ShoppingCart> {
        // An observer panicking mid-update leaves the item list consistent.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
