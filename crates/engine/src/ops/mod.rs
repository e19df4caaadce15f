use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{ResultEngine, SeaStore, Store};

mod events;
mod expenditures;
mod invitations;
mod users;

pub use users::Usage;

#[derive(Debug)]
pub struct Engine {
    store: Arc<dyn Store>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    store: Option<Arc<dyn Store>>,
}

impl EngineBuilder {
    /// Pass the required database. Ignored when a store is set.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Use a custom store instead of the sea-orm one.
    pub fn store(mut self, store: Arc<dyn Store>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = match self.store {
            Some(store) => store,
            None => Arc::new(SeaStore::new(self.database)),
        };
        Ok(Engine { store })
    }
}
