//! Run-wide type registry.
//!
//! The registry maps declared names to the entities that own them. It is
//! filled while metadata files are loaded, in the order they are supplied,
//! and only read once emission starts.

use crate::error::SchemaError;
use crate::types::{Entity, EntityKind};
use std::collections::HashMap;
use std::sync::Arc;

/// What to do when a name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The newer entity takes precedence for future lookups.
    #[default]
    Replace,
    /// The first entity stays registered; the newer one is dropped.
    KeepFirst,
    /// Registration fails with [`SchemaError::NameCollision`].
    Reject,
}

impl CollisionPolicy {
    /// Parses a policy from its command-line spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "replace" | "last-wins" => Some(Self::Replace),
            "keep-first" | "keep" | "first-wins" => Some(Self::KeepFirst),
            "reject" | "error" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// A recorded name collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Colliding name.
    pub name: String,
    /// Kind of the entity registered first.
    pub existing: EntityKind,
    /// Kind of the entity registered second.
    pub incoming: EntityKind,
    /// Whether the incoming entity replaced the existing one.
    pub replaced: bool,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The name was new.
    Added,
    /// The name existed and now refers to the new entity.
    Replaced,
    /// The name existed and still refers to the old entity.
    Kept,
}

/// Table from type names to entities.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entities: HashMap<String, Arc<Entity>>,
    policy: CollisionPolicy,
    collisions: Vec<Collision>,
}

impl TypeRegistry {
    /// Creates an empty registry with the default collision policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given collision policy.
    #[must_use]
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Returns the collision policy.
    #[must_use]
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Registers an entity under its declared name.
    ///
    /// # Errors
    /// Returns `SchemaError::NameCollision` if the name is taken and the
    /// policy is [`CollisionPolicy::Reject`].
    pub fn register(&mut self, entity: Arc<Entity>) -> Result<Registration, SchemaError> {
        let name = entity.name().to_string();

        let Some(existing) = self.entities.get(&name) else {
            tracing::debug!("Registered {} '{}'", entity.kind(), name);
            self.entities.insert(name, entity);
            return Ok(Registration::Added);
        };

        let existing_kind = existing.kind();
        let incoming_kind = entity.kind();

        if self.policy == CollisionPolicy::Reject {
            return Err(SchemaError::NameCollision {
                name,
                existing: existing_kind.to_string(),
                incoming: incoming_kind.to_string(),
            });
        }

        let replaced = self.policy == CollisionPolicy::Replace;
        tracing::warn!(
            "Name collision on '{}': {} {} existing {}",
            name,
            incoming_kind,
            if replaced { "replaces" } else { "ignored, keeping" },
            existing_kind
        );
        self.collisions.push(Collision {
            name: name.clone(),
            existing: existing_kind,
            incoming: incoming_kind,
            replaced,
        });

        if replaced {
            self.entities.insert(name, entity);
            Ok(Registration::Replaced)
        } else {
            Ok(Registration::Kept)
        }
    }

    /// Looks up the entity currently registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<Entity>> {
        self.entities.get(name)
    }

    /// Looks up `name`, failing if it was never registered.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvedType` if the name is absent.
    pub fn resolve(&self, name: &str) -> Result<&Arc<Entity>, SchemaError> {
        self.lookup(name)
            .ok_or_else(|| SchemaError::unresolved(name))
    }

    /// Looks up a possibly namespace-qualified name.
    ///
    /// `Gdk.Rectangle` is tried as written, then by its local name
    /// `Rectangle`.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvedType` carrying `name` if neither form
    /// is registered.
    pub fn resolve_qualified(&self, name: &str) -> Result<&Arc<Entity>, SchemaError> {
        if let Some(entity) = self.lookup(name) {
            return Ok(entity);
        }
        match name.rsplit_once('.') {
            Some((_, local)) if !local.is_empty() => self
                .lookup(local)
                .ok_or_else(|| SchemaError::unresolved(name)),
            _ => Err(SchemaError::unresolved(name)),
        }
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Number of distinct registered names.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Collisions observed so far, in order.
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alias, EntityBase, Record, TypeRef};

    fn alias(name: &str) -> Arc<Entity> {
        Arc::new(Entity::Alias(Alias {
            base: EntityBase::new(name),
            aliased_type: TypeRef::new("gint", "gint"),
        }))
    }

    fn record(name: &str) -> Arc<Entity> {
        Arc::new(Entity::Record(Record::new(EntityBase::new(name))))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TypeRegistry::new();
        assert!(registry.is_empty());

        let outcome = registry.register(alias("Size")).expect("register");
        assert_eq!(outcome, Registration::Added);
        assert_eq!(registry.count(), 1);
        assert!(registry.contains("Size"));
        assert_eq!(
            registry.lookup("Size").map(|e| e.kind()),
            Some(EntityKind::Alias)
        );
        assert!(registry.lookup("Missing").is_none());
    }

    #[test]
    fn test_replace_keeps_count_and_updates_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register(alias("Widget")).expect("register");
        let outcome = registry.register(record("Widget")).expect("register");

        assert_eq!(outcome, Registration::Replaced);
        assert_eq!(registry.count(), 1);
        assert_eq!(
            registry.lookup("Widget").map(|e| e.kind()),
            Some(EntityKind::Record)
        );

        let collisions = registry.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].existing, EntityKind::Alias);
        assert_eq!(collisions[0].incoming, EntityKind::Record);
        assert!(collisions[0].replaced);
    }

    #[test]
    fn test_replaced_entity_outlives_registration() {
        let mut registry = TypeRegistry::new();
        let first = alias("Widget");
        registry.register(Arc::clone(&first)).expect("register");
        registry.register(record("Widget")).expect("register");

        assert_eq!(first.kind(), EntityKind::Alias);
        assert_eq!(first.name(), "Widget");
    }

    #[test]
    fn test_resolve_qualified_falls_back_to_local_name() {
        let mut registry = TypeRegistry::new();
        registry.register(record("Rectangle")).expect("register");

        let entity = registry.resolve_qualified("Gdk.Rectangle").expect("resolve");
        assert_eq!(entity.name(), "Rectangle");
        assert!(registry.resolve_qualified("Rectangle").is_ok());
        assert!(registry.resolve("Gdk.Rectangle").is_err());

        match registry.resolve_qualified("Gdk.Point") {
            Err(SchemaError::UnresolvedType { name }) => assert_eq!(name, "Gdk.Point"),
            other => panic!("expected unresolved type, got {other:?}"),
        }
        assert!(registry.resolve_qualified("Gdk.").is_err());
    }

    #[test]
    fn test_keep_first_policy() {
        let mut registry = TypeRegistry::with_policy(CollisionPolicy::KeepFirst);
        registry.register(alias("Widget")).expect("register");
        let outcome = registry.register(record("Widget")).expect("register");

        assert_eq!(outcome, Registration::Kept);
        assert_eq!(
            registry.lookup("Widget").map(|e| e.kind()),
            Some(EntityKind::Alias)
        );
        assert!(!registry.collisions()[0].replaced);
    }

    #[test]
    fn test_reject_policy() {
        let mut registry = TypeRegistry::with_policy(CollisionPolicy::Reject);
        registry.register(alias("Widget")).expect("register");
        let err = registry.register(record("Widget")).unwrap_err();

        assert!(matches!(err, SchemaError::NameCollision { ref name, .. } if name == "Widget"));
        assert_eq!(registry.count(), 1);
        assert!(registry.collisions().is_empty());
    }

    #[test]
    fn test_resolve_missing_name() {
        let registry = TypeRegistry::new();
        let err = registry.resolve("GObject").unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedType { ref name } if name == "GObject"));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(CollisionPolicy::parse("replace"), Some(CollisionPolicy::Replace));
        assert_eq!(CollisionPolicy::parse("Keep-First"), Some(CollisionPolicy::KeepFirst));
        assert_eq!(CollisionPolicy::parse("reject"), Some(CollisionPolicy::Reject));
        assert_eq!(CollisionPolicy::parse("merge"), None);
    }
}
