// Room catalog: the external source of room-type reference data
use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

use crate::model::RoomType;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("Catalog contains no room types")]
    Empty,
}

// Source of room-type reference data. Assumed static for the lifetime of one
// wizard session, so callers are free to fetch once and keep the result.
#[async_trait]
pub trait RoomCatalog: Send + Sync {
    async fn list_room_types(&self) -> Result<Vec<RoomType>, CatalogError>;
}

// Parse a catalog payload. Rejects empty catalogs and rooms with a
// non-positive rate or capacity so a bad feed cannot produce zero-cost stays.
pub fn room_types_from_json(json: &str) -> Result<Vec<RoomType>, CatalogError> {
    let rooms: Vec<RoomType> =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

    if rooms.is_empty() {
        return Err(CatalogError::Empty);
    }
    for room in &rooms {
        if room.rate <= 0.0 {
            return Err(CatalogError::Parse(format!(
                "room type '{}' has non-positive rate {}",
                room.id, room.rate
            )));
        }
        if room.capacity == 0 {
            return Err(CatalogError::Parse(format!(
                "room type '{}' has zero capacity",
                room.id
            )));
        }
    }
    Ok(rooms)
}

// The four categories the front desk sells by default.
pub fn default_room_types() -> Vec<RoomType> {
    vec![
        RoomType {
            id: "standard".to_string(),
            name: "Standard Room".to_string(),
            rate: 99.0,
            capacity: 2,
            bed_type: "Queen".to_string(),
            available: 8,
        },
        RoomType {
            id: "deluxe".to_string(),
            name: "Deluxe Room".to_string(),
            rate: 149.0,
            capacity: 2,
            bed_type: "King".to_string(),
            available: 5,
        },
        RoomType {
            id: "suite".to_string(),
            name: "Executive Suite".to_string(),
            rate: 249.0,
            capacity: 4,
            bed_type: "King + Sofa".to_string(),
            available: 3,
        },
        RoomType {
            id: "family".to_string(),
            name: "Family Room".to_string(),
            rate: 199.0,
            capacity: 4,
            bed_type: "2 Queen".to_string(),
            available: 2,
        },
    ]
}

// Fixed in-memory catalog, handy as a default and as a test double.
pub struct StaticRoomCatalog {
    rooms: Vec<RoomType>,
}

impl StaticRoomCatalog {
    pub fn new(rooms: Vec<RoomType>) -> Self {
        Self { rooms }
    }
}

impl Default for StaticRoomCatalog {
    fn default() -> Self {
        Self::new(default_room_types())
    }
}

#[async_trait]
impl RoomCatalog for StaticRoomCatalog {
    async fn list_room_types(&self) -> Result<Vec<RoomType>, CatalogError> {
        if self.rooms.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(self.rooms.clone())
    }
}

// Caches the first successful fetch from an inner catalog for the rest of the
// session. Failed fetches are not cached, so a catalog that was down at mount
// can still recover on a later call.
pub struct SessionCatalog<C> {
    inner: C,
    cached: RwLock<Option<Vec<RoomType>>>,
}

impl<C: RoomCatalog> SessionCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cached: RwLock::new(None),
        }
    }
}

#[async_trait]
impl<C: RoomCatalog> RoomCatalog for SessionCatalog<C> {
    async fn list_room_types(&self) -> Result<Vec<RoomType>, CatalogError> {
        if let Some(rooms) = self.cached.read().clone() {
            return Ok(rooms);
        }

        let rooms = self.inner.list_room_types().await?;
        *self.cached.write() = Some(rooms.clone());
        Ok(rooms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        calls: AtomicUsize,
        fail_first: AtomicUsize,
    }

    impl CountingCatalog {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(fail_first),
            }
        }
    }

    #[async_trait]
    impl RoomCatalog for CountingCatalog {
        async fn list_room_types(&self) -> Result<Vec<RoomType>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.fail_first.load(Ordering::SeqCst);
            if remaining > 0 {
                self.fail_first.store(remaining - 1, Ordering::SeqCst);
                return Err(CatalogError::Unavailable("catalog offline".to_string()));
            }
            Ok(default_room_types())
        }
    }

    #[test]
    fn parses_a_catalog_feed() {
        let json = r#"[
            {"id": "standard", "name": "Standard Room", "rate": 99.0, "capacity": 2, "bed_type": "Queen", "available": 8},
            {"id": "deluxe", "name": "Deluxe Room", "rate": 149.0, "capacity": 2, "bed_type": "King"}
        ]"#;

        let rooms = room_types_from_json(json).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id, "standard");
        // `available` is optional in the feed
        assert_eq!(rooms[1].available, 0);
    }

    #[test]
    fn rejects_empty_and_malformed_feeds() {
        assert!(matches!(room_types_from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(
            room_types_from_json("not json"),
            Err(CatalogError::Parse(_))
        ));

        let zero_rate = r#"[{"id": "x", "name": "X", "rate": 0.0, "capacity": 2, "bed_type": "Queen"}]"#;
        assert!(matches!(
            room_types_from_json(zero_rate),
            Err(CatalogError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn session_catalog_fetches_once() {
        let catalog = SessionCatalog::new(CountingCatalog::new(0));

        let first = catalog.list_room_types().await.unwrap();
        let second = catalog.list_room_types().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(catalog.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn session_catalog_does_not_cache_failures() {
        let catalog = SessionCatalog::new(CountingCatalog::new(1));

        assert!(catalog.list_room_types().await.is_err());
        assert!(catalog.list_room_types().await.is_ok());
        assert_eq!(catalog.inner.calls.load(Ordering::SeqCst), 2);
    }
}
