use super::Db;
use crate::{Driver, ModelDef, Timestamps};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<ModelDef>,

    timestamps: Timestamps,
}

impl Builder {
    pub fn register(&mut self, model: ModelDef) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Set the timestamp columns for every model that does not override them
    pub fn timestamps(&mut self, timestamps: Timestamps) -> &mut Self {
        self.timestamps = timestamps;
        self
    }

    pub fn build(&mut self, driver: impl Driver) -> Db {
        self.finish(Some(Arc::new(driver)))
    }

    /// Builds a database with no driver. Models can be defined and rendered
    /// but every query fails with a not-connected error.
    pub fn build_disconnected(&mut self) -> Db {
        self.finish(None)
    }

    fn finish(&mut self, driver: Option<Arc<dyn Driver>>) -> Db {
        Db::new(
            driver,
            self.timestamps.clone(),
            std::mem::take(&mut self.models),
        )
    }
}
