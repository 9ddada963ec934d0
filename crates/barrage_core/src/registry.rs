//! # Instance Template Registry
//!
//! Maps every [`BulletKind`] a stage uses to the prototype it is built from
//! and the number of instances to pre-warm.
//!
//! The registry is validated as it is built and read-only afterwards:
//! - At most one template per kind
//! - Every template names a prototype
//!
//! Lookups go through a fixed table indexed by [`BulletKind::index`], so
//! `template_for` is O(1) and never allocates.

use barrage_shared::BulletKind;

use crate::error::{ConfigError, ConfigResult};

/// Prototype and pre-warm count for one kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceTemplate {
    /// Kind this template builds.
    pub kind: BulletKind,
    /// Prototype reference handed to the prototype source.
    pub prototype: String,
    /// Number of inactive entries created by pre-warm.
    pub max_count: usize,
}

impl InstanceTemplate {
    /// Creates a new template.
    #[must_use]
    pub fn new(kind: BulletKind, prototype: impl Into<String>, max_count: usize) -> Self {
        Self {
            kind,
            prototype: prototype.into(),
            max_count,
        }
    }

    /// Checks that the template carries a prototype.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingPrototype`] if the prototype reference is blank.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.prototype.trim().is_empty() {
            return Err(ConfigError::MissingPrototype(self.kind));
        }
        Ok(())
    }
}

/// Registered templates, in registration order.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    /// Templates in the order they were registered.
    templates: Vec<InstanceTemplate>,
    /// Per-kind slot into `templates`.
    lookup: [Option<usize>; BulletKind::COUNT],
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of templates.
    ///
    /// # Errors
    ///
    /// Fails on the first template that is a duplicate or has no prototype.
    pub fn from_templates<I>(templates: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = InstanceTemplate>,
    {
        let mut registry = Self::new();
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    /// Registers a template.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateTemplate`] if the kind already has one
    /// - [`ConfigError::MissingPrototype`] if the prototype is blank
    pub fn register(&mut self, template: InstanceTemplate) -> ConfigResult<()> {
        let slot = template.kind.index();
        if self.lookup[slot].is_some() {
            return Err(ConfigError::DuplicateTemplate(template.kind));
        }
        template.validate()?;

        self.lookup[slot] = Some(self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Template registered for `kind`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingTemplate`] if the kind was never registered.
    #[inline]
    pub fn template_for(&self, kind: BulletKind) -> ConfigResult<&InstanceTemplate> {
        self.lookup[kind.index()]
            .map(|slot| &self.templates[slot])
            .ok_or(ConfigError::MissingTemplate(kind))
    }

    /// True if `kind` has a template.
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: BulletKind) -> bool {
        self.lookup[kind.index()].is_some()
    }

    /// Templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &InstanceTemplate> {
        self.templates.iter()
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Sum of all pre-warm counts.
    #[must_use]
    pub fn total_prewarm(&self) -> usize {
        self.templates.iter().map(|t| t.max_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = TemplateRegistry::from_templates([
            InstanceTemplate::new(BulletKind::Hamon, "bullets/hamon", 3),
            InstanceTemplate::new(BulletKind::TopLeft, "bullets/top_left", 5),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.total_prewarm(), 8);
        assert_eq!(registry.template_for(BulletKind::TopLeft).unwrap().max_count, 5);
        assert!(registry.contains(BulletKind::Hamon));

        let order: Vec<_> = registry.iter().map(|t| t.kind).collect();
        assert_eq!(order, vec![BulletKind::Hamon, BulletKind::TopLeft]);
    }

    #[test]
    fn test_missing_template() {
        let registry = TemplateRegistry::new();
        assert_eq!(
            registry.template_for(BulletKind::SDownEUp),
            Err(ConfigError::MissingTemplate(BulletKind::SDownEUp))
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = TemplateRegistry::from_templates([
            InstanceTemplate::new(BulletKind::Hamon, "a", 1),
            InstanceTemplate::new(BulletKind::Hamon, "b", 2),
        ]);
        assert_eq!(result.unwrap_err(), ConfigError::DuplicateTemplate(BulletKind::Hamon));
    }

    #[test]
    fn test_blank_prototype_rejected() {
        let mut registry = TemplateRegistry::new();
        let err = registry
            .register(InstanceTemplate::new(BulletKind::TopRight, "  ", 2))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingPrototype(BulletKind::TopRight));
        // A rejected template leaves no trace.
        assert!(registry.is_empty());
        assert!(!registry.contains(BulletKind::TopRight));
    }
}
