mod builder;
pub use builder::Builder;

mod transaction;

use crate::model::ModelState;
use crate::{Driver, Error, Model, ModelDef, Result, Timestamps};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    /// `None` for a database built without a driver.
    driver: Option<Arc<dyn Driver>>,

    /// Timestamp columns for models that do not set their own.
    timestamps: Timestamps,

    /// Registered models, plus default models created on first use.
    models: RwLock<HashMap<String, Arc<ModelState>>>,
}

/// A database handle. Cheap to clone; clones share models and the driver.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(
        driver: Option<Arc<dyn Driver>>,
        timestamps: Timestamps,
        defs: Vec<ModelDef>,
    ) -> Db {
        let models = defs
            .into_iter()
            .map(|def| {
                let table = def.table.clone();
                (table, Arc::new(ModelState::new(def, &timestamps)))
            })
            .collect();

        Db {
            shared: Arc::new(Shared {
                driver,
                timestamps,
                models: RwLock::new(models),
            }),
        }
    }

    /// The model for `table`. Tables that were never registered get a model
    /// with no relations and default settings, created once and reused.
    pub fn model(&self, table: &str) -> Model {
        let existing = self
            .shared
            .models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .cloned();

        let state = match existing {
            Some(state) => state,
            None => self
                .shared
                .models
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(table.to_string())
                .or_insert_with(|| {
                    Arc::new(ModelState::new(
                        ModelDef::new(table),
                        &self.shared.timestamps,
                    ))
                })
                .clone(),
        };

        Model::new(self.clone(), state)
    }

    pub fn is_connected(&self) -> bool {
        self.shared.driver.is_some()
    }

    pub(crate) fn driver(&self) -> Result<&Arc<dyn Driver>> {
        self.shared.driver.as_ref().ok_or_else(Error::not_connected)
    }
}

impl core::fmt::Debug for Db {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field("timestamps", &self.shared.timestamps)
            .finish()
    }
}
