//! Pooled bullet instances.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use barrage_core::{InstanceTemplate, PrototypeSource};
use barrage_shared::BulletKind;

/// A bullet built from a template's prototype.
///
/// `serial` is unique per source and never reused, so it identifies the
/// underlying object across reuses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bullet {
    /// Kind of the template that produced it.
    pub kind: BulletKind,
    /// Prototype reference it was built from.
    pub prototype: Arc<str>,
    /// Creation order.
    pub serial: u64,
}

/// Builds [`Bullet`]s and counts how many were ever made.
#[derive(Debug, Default)]
pub struct BulletFactory {
    created: AtomicU64,
}

impl BulletFactory {
    /// Creates a factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bullets produced so far.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }
}

impl PrototypeSource for BulletFactory {
    type Instance = Bullet;

    fn produce(&self, template: &InstanceTemplate) -> Bullet {
        let serial = self.created.fetch_add(1, Ordering::Relaxed);
        Bullet {
            kind: template.kind,
            prototype: Arc::from(template.prototype.as_str()),
            serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serials_are_sequential() {
        let factory = BulletFactory::new();
        let template = InstanceTemplate::new(BulletKind::TopLeft, "bullets/tl", 1);
        let a = factory.produce(&template);
        let b = factory.produce(&template);
        assert_eq!(a.serial, 0);
        assert_eq!(b.serial, 1);
        assert_eq!(&*b.prototype, "bullets/tl");
        assert_eq!(factory.created(), 2);
    }
}
