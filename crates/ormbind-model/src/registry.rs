//! The ordered class registry the pipeline walks.

use crate::class::ClassDetails;
use crate::error::ModelError;
use std::collections::HashMap;

/// All classes of one source model, in registration order.
///
/// Registration order is meaningful: root discovery and sub-type walks
/// iterate it, so two runs over the same model produce identical output.
/// Registries are assembled through [`add_class`](Self::add_class); classes
/// themselves are the serialization boundary.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    classes: Vec<ClassDetails>,
    by_name: HashMap<String, usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class. Names must be unique.
    pub fn add_class(&mut self, class: ClassDetails) -> Result<(), ModelError> {
        if self.by_name.contains_key(&class.name) {
            return Err(ModelError::DuplicateClass { name: class.name });
        }
        self.by_name.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    /// Look up a class by name.
    pub fn resolve(&self, name: &str) -> Option<&ClassDetails> {
        self.by_name.get(name).map(|&i| &self.classes[i])
    }

    /// Look up a class by name, failing when absent.
    pub fn expect(&self, name: &str) -> Result<&ClassDetails, ModelError> {
        self.resolve(name).ok_or_else(|| ModelError::UnknownClass {
            name: name.to_string(),
        })
    }

    /// All classes, in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDetails> {
        self.classes.iter()
    }

    /// Classes whose declared super-type is `name`, in registration order.
    pub fn direct_subtypes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ClassDetails> {
        self.classes
            .iter()
            .filter(move |c| c.super_class.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::Marker;

    fn registry_with(names: &[(&str, Option<&str>)]) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for (name, super_class) in names {
            let mut class = ClassDetails::new(*name).with_marker(Marker::Entity { name: None });
            if let Some(s) = super_class {
                class = class.extends(*s);
            }
            registry.add_class(class).unwrap();
        }
        registry
    }

    #[test]
    fn test_registration_and_lookup() {
        let registry = registry_with(&[("Payment", None), ("CardPayment", Some("Payment"))]);
        assert_eq!(registry.len(), 2);
        assert!(registry.resolve("Payment").is_some());
        assert!(registry.resolve("WirePayment").is_none());
        assert!(registry.expect("CardPayment").is_ok());
        assert!(matches!(
            registry.expect("WirePayment"),
            Err(ModelError::UnknownClass { .. })
        ));
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut registry = ModelRegistry::new();
        registry.add_class(ClassDetails::new("Payment")).unwrap();
        let err = registry.add_class(ClassDetails::new("Payment"));
        assert!(matches!(err, Err(ModelError::DuplicateClass { .. })));
    }

    #[test]
    fn test_direct_subtypes_in_registration_order() {
        let registry = registry_with(&[
            ("Payment", None),
            ("WirePayment", Some("Payment")),
            ("CardPayment", Some("Payment")),
            ("Refund", None),
        ]);
        let subs: Vec<&str> = registry
            .direct_subtypes("Payment")
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(subs, vec!["WirePayment", "CardPayment"]);
        assert_eq!(registry.direct_subtypes("Refund").count(), 0);
    }
}
