//! Registry of model descriptors built once at startup.

use std::any::TypeId;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::Model;
use crate::error::{ModelError, ModelResult};
use crate::info::ModelInfo;

/// Descriptors for every record type the process uses.
///
/// Register each type before serving traffic, then share the registry (or the
/// `Arc<ModelInfo>` handles it returns) read-only.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: IndexMap<TypeId, Arc<ModelInfo>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and cache the descriptor for `T`.
    ///
    /// Registering the same type again returns the cached descriptor.
    pub fn register<T: Model>(&mut self) -> Arc<ModelInfo> {
        self.models
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                let info = ModelInfo::of::<T>();
                debug!(
                    model = T::MODEL_NAME,
                    fields = info.fields().len(),
                    indexes = info.indexes().count(),
                    "Registered model"
                );
                Arc::new(info)
            })
            .clone()
    }

    /// Register `T` and return the registry, for chained setup.
    pub fn with<T: Model>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Get the descriptor for `T`.
    pub fn get<T: Model>(&self) -> ModelResult<Arc<ModelInfo>> {
        self.models
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| ModelError::unregistered(T::MODEL_NAME))
    }

    /// Check if `T` is registered.
    pub fn contains<T: Model>(&self) -> bool {
        self.models.contains_key(&TypeId::of::<T>())
    }

    /// Registered descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ModelInfo>> {
        self.models.values()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::FieldTags;
    use crate::copy::CopyModel;

    struct Show;
    struct Episode;

    impl CopyModel for Show {
        fn copy_from(&mut self, _src: &Self, _ignored: &[&str]) -> bool {
            false
        }
    }

    impl CopyModel for Episode {
        fn copy_from(&mut self, _src: &Self, _ignored: &[&str]) -> bool {
            false
        }
    }

    impl Model for Show {
        const MODEL_NAME: &'static str = "Show";
        const FIELD_TAGS: &'static [FieldTags] = &[
            FieldTags::new("id", "id", "_id"),
            FieldTags::new("url", "url", "url").index(",unique"),
        ];
    }

    impl Model for Episode {
        const MODEL_NAME: &'static str = "Episode";
        const FIELD_TAGS: &'static [FieldTags] = &[FieldTags::new("guid", "guid", "guid")];
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ModelRegistry::new();
        let info = registry.register::<Show>();
        assert_eq!(info.name(), "Show");

        let cached = registry.get::<Show>().unwrap();
        assert!(Arc::ptr_eq(&info, &cached));
        assert!(Arc::ptr_eq(&info, &registry.register::<Show>()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unregistered() {
        let registry = ModelRegistry::new().with::<Show>();
        let err = registry.get::<Episode>().unwrap_err();
        assert_eq!(err, ModelError::Unregistered("Episode"));
        assert!(!registry.contains::<Episode>());
    }

    #[test]
    fn test_iter_in_registration_order() {
        let registry = ModelRegistry::new().with::<Episode>().with::<Show>();
        let names: Vec<_> = registry.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Episode", "Show"]);
    }
}
