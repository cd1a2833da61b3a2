use eventura_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    lock(collection).push(val.clone());
}

/// Pushes `val` unless `conflicts` matches a stored item. The check and the
/// push happen under the same lock.
///
/// Returns whether `val` was inserted.
pub fn insert_unique<T: Clone, F: FnMut(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    mut conflicts: F,
) -> bool {
    let mut items = lock(collection);
    if items.iter().any(|item| conflicts(item)) {
        return false;
    }
    items.push(val.clone());
    true
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    lock(collection)
        .iter()
        .find(|item| item.id() == val_id)
        .cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

/// Applies `update` to the item with the given id while holding the lock, so
/// that the check and the write inside `update` happen atomically.
///
/// Returns `None` if there is no such item, otherwise what `update` returned.
pub fn update_one<T: Entity, R, F: FnOnce(&mut T) -> R>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    update: F,
) -> Option<R> {
    lock(collection)
        .iter_mut()
        .find(|item| item.id() == val_id)
        .map(update)
}
