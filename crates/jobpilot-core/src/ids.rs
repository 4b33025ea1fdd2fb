//! Time-ordered UUID helpers.

use uuid::Uuid;

/// Generate a new UUIDv7 (time-ordered). Used for store primary keys so
/// insertion order is reflected in index order.
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}
