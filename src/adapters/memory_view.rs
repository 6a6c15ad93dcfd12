use crate::core::{ElementId, FormView, Result, MODAL_VISIBLE_CLASS};
use crate::utils::error::FormError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    text: String,
    classes: Vec<String>,
}

/// In-memory page holding the form handler's elements and every alert raised.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<ElementId, Element>,
    alerts: Vec<String>,
}

impl MemoryDocument {
    /// A page declaring every element the handler uses.
    pub fn standard() -> Self {
        Self::with_elements(ElementId::ALL)
    }

    pub fn with_elements(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            elements: ids.into_iter().map(|id| (id, Element::default())).collect(),
            alerts: Vec::new(),
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|element| element.text.as_str())
    }

    pub fn classes(&self, id: ElementId) -> Option<&[String]> {
        self.elements.get(&id).map(|element| element.classes.as_slice())
    }

    pub fn is_modal_visible(&self) -> bool {
        self.classes(ElementId::PredictionModal)
            .is_some_and(|classes| classes.iter().any(|class| class == MODAL_VISIBLE_CLASS))
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or_else(|| FormError::MissingElement {
                id: id.as_str().to_string(),
            })
    }
}

impl FormView for MemoryDocument {
    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        self.element_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        if !element.classes.iter().any(|existing| existing == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        self.element_mut(id)?
            .classes
            .retain(|existing| existing != class);
        Ok(())
    }

    fn has_class(&self, id: ElementId, class: &str) -> Result<bool> {
        self.classes(id)
            .map(|classes| classes.iter().any(|existing| existing == class))
            .ok_or_else(|| FormError::MissingElement {
                id: id.as_str().to_string(),
            })
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_document_has_every_element() {
        let doc = MemoryDocument::standard();
        for id in ElementId::ALL {
            assert!(doc.contains(id), "missing {}", id);
            assert_eq!(doc.text(id), Some(""));
        }
        assert!(!doc.is_modal_visible());
    }

    #[test]
    fn test_class_list_is_a_set() {
        let mut doc = MemoryDocument::standard();
        doc.add_class(ElementId::PredictionModal, "show").unwrap();
        doc.add_class(ElementId::PredictionModal, "show").unwrap();
        assert_eq!(
            doc.classes(ElementId::PredictionModal).unwrap(),
            &["show".to_string()]
        );
        assert!(doc.has_class(ElementId::PredictionModal, "show").unwrap());

        doc.remove_class(ElementId::PredictionModal, "show").unwrap();
        doc.remove_class(ElementId::PredictionModal, "show").unwrap();
        assert!(!doc.is_modal_visible());
    }

    #[test]
    fn test_missing_element_is_an_error() {
        let mut doc = MemoryDocument::with_elements([ElementId::PredictionModal]);
        let err = doc.set_text(ElementId::Eoq, "40").unwrap_err();
        assert!(matches!(err, FormError::MissingElement { ref id } if id == "eoq"));
        assert!(doc.has_class(ElementId::Rol, "show").is_err());
    }

    #[test]
    fn test_alerts_are_recorded_in_order() {
        let mut doc = MemoryDocument::standard();
        doc.alert("first");
        doc.alert("second");
        assert_eq!(doc.alerts(), &["first".to_string(), "second".to_string()]);
    }
}
