//! Event names and typed events.
//!
//! The event names form a closed set; their exact strings are the wire
//! contract between components. Render targets emit intent events
//! (`product:add`, `cart:open`, field edits, submits) and the store emits
//! change events (`catalog:changed`, `cart:changed`, `formErrors:changed`,
//! ...). The orchestrator consumes both.
//!
//! Change-event payloads are an optimization only: every consumer contract
//! is "state is now consistent; re-read to render", so any view can be
//! rebuilt from store queries alone.

use crate::domain::{Payment, Product};
use crate::validation::FormErrors;
use std::fmt;

/// The closed set of event names.
///
/// `as_str` values are the exact wire strings; no other event names exist
/// and no wildcard matching is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Catalog replaced after a successful fetch
    CatalogChanged,
    /// A catalog card was chosen for detail view
    ProductSelect,
    /// Add-to-cart intent from the preview
    ProductAdd,
    /// Remove-from-cart intent from the preview or a cart row
    ProductRemove,
    /// Modal opened
    ModalOpen,
    /// Modal closed
    ModalClose,
    /// Preview selection changed
    PreviewChanged,
    /// Open-cart intent from the page header
    CartOpen,
    /// Cart contents changed
    CartChanged,
    /// Cart badge count must resynchronize
    CounterChanged,
    /// Begin-checkout intent from the cart panel
    OrderOpen,
    /// Payment method chosen on the order form
    PaymentChanged,
    /// Address input edited on the order form
    AddressChanged,
    /// Email input edited on the contacts form
    EmailChanged,
    /// Phone input edited on the contacts form
    PhoneChanged,
    /// Validation error mapping recomputed
    FormErrorsChanged,
    /// Order form submitted (advance to contacts step)
    OrderSubmit,
    /// Contacts form submitted (post the order)
    ContactsSubmit,
}

impl EventName {
    /// Every event name, in contract order
    pub const ALL: [Self; 18] = [
        Self::CatalogChanged,
        Self::ProductSelect,
        Self::ProductAdd,
        Self::ProductRemove,
        Self::ModalOpen,
        Self::ModalClose,
        Self::PreviewChanged,
        Self::CartOpen,
        Self::CartChanged,
        Self::CounterChanged,
        Self::OrderOpen,
        Self::PaymentChanged,
        Self::AddressChanged,
        Self::EmailChanged,
        Self::PhoneChanged,
        Self::FormErrorsChanged,
        Self::OrderSubmit,
        Self::ContactsSubmit,
    ];

    /// The exact wire string for this event name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CatalogChanged => "catalog:changed",
            Self::ProductSelect => "product:select",
            Self::ProductAdd => "product:add",
            Self::ProductRemove => "product:remove",
            Self::ModalOpen => "modal:open",
            Self::ModalClose => "modal:close",
            Self::PreviewChanged => "preview:changed",
            Self::CartOpen => "cart:open",
            Self::CartChanged => "cart:changed",
            Self::CounterChanged => "counter:changed",
            Self::OrderOpen => "order:open",
            Self::PaymentChanged => "payment:changed",
            Self::AddressChanged => "order.address:changed",
            Self::EmailChanged => "contacts.email:changed",
            Self::PhoneChanged => "contacts.phone:changed",
            Self::FormErrorsChanged => "formErrors:changed",
            Self::OrderSubmit => "order:submit",
            Self::ContactsSubmit => "contacts:submit",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed event: an [`EventName`] paired with its payload.
///
/// Intent events carry what the render target knows (the clicked product,
/// the edited value). Change events carry a snapshot of the mutated state,
/// but consumers must not depend on it — re-reading the store is the
/// contract.
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// Catalog replaced; carries the new catalog
    CatalogChanged {
        /// The full new catalog
        catalog: Vec<Product>,
    },
    /// Detail-view intent; carries the chosen product
    ProductSelect {
        /// The chosen product
        product: Product,
    },
    /// Add-to-cart intent
    ProductAdd {
        /// The product to add
        product: Product,
    },
    /// Remove-from-cart intent
    ProductRemove {
        /// The product to remove
        product: Product,
    },
    /// Modal opened
    ModalOpen,
    /// Modal closed
    ModalClose,
    /// Preview selection changed; carries the full product
    PreviewChanged {
        /// The previewed product
        product: Product,
    },
    /// Open-cart intent
    CartOpen,
    /// Cart contents changed; carries the cart snapshot
    CartChanged {
        /// Current cart contents, in insertion order
        cart: Vec<Product>,
    },
    /// Badge count resynchronization; carries the cart size
    CounterChanged {
        /// Number of items in the cart
        count: usize,
    },
    /// Begin-checkout intent
    OrderOpen,
    /// Payment method chosen on the order form
    PaymentChanged {
        /// The chosen method
        payment: Payment,
    },
    /// Address edited
    AddressChanged {
        /// Current input value
        value: String,
    },
    /// Email edited
    EmailChanged {
        /// Current input value
        value: String,
    },
    /// Phone edited
    PhoneChanged {
        /// Current input value
        value: String,
    },
    /// Error mapping recomputed; carries the full mapping
    FormErrorsChanged {
        /// Current per-field errors
        errors: FormErrors,
    },
    /// Order form submitted; the draft is read from the store
    OrderSubmit,
    /// Contacts form submitted; the draft is read from the store
    ContactsSubmit,
}

impl AppEvent {
    /// The name this event is published under
    #[must_use]
    pub const fn name(&self) -> EventName {
        match self {
            Self::CatalogChanged { .. } => EventName::CatalogChanged,
            Self::ProductSelect { .. } => EventName::ProductSelect,
            Self::ProductAdd { .. } => EventName::ProductAdd,
            Self::ProductRemove { .. } => EventName::ProductRemove,
            Self::ModalOpen => EventName::ModalOpen,
            Self::ModalClose => EventName::ModalClose,
            Self::PreviewChanged { .. } => EventName::PreviewChanged,
            Self::CartOpen => EventName::CartOpen,
            Self::CartChanged { .. } => EventName::CartChanged,
            Self::CounterChanged { .. } => EventName::CounterChanged,
            Self::OrderOpen => EventName::OrderOpen,
            Self::PaymentChanged { .. } => EventName::PaymentChanged,
            Self::AddressChanged { .. } => EventName::AddressChanged,
            Self::EmailChanged { .. } => EventName::EmailChanged,
            Self::PhoneChanged { .. } => EventName::PhoneChanged,
            Self::FormErrorsChanged { .. } => EventName::FormErrorsChanged,
            Self::OrderSubmit => EventName::OrderSubmit,
            Self::ContactsSubmit => EventName::ContactsSubmit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_are_exact() {
        assert_eq!(EventName::CatalogChanged.as_str(), "catalog:changed");
        assert_eq!(EventName::AddressChanged.as_str(), "order.address:changed");
        assert_eq!(EventName::EmailChanged.as_str(), "contacts.email:changed");
        assert_eq!(EventName::PhoneChanged.as_str(), "contacts.phone:changed");
        assert_eq!(EventName::FormErrorsChanged.as_str(), "formErrors:changed");
    }

    #[test]
    fn all_names_are_distinct() {
        for (i, a) in EventName::ALL.iter().enumerate() {
            for b in &EventName::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn event_maps_to_its_name() {
        assert_eq!(AppEvent::CartOpen.name(), EventName::CartOpen);
        assert_eq!(
            AppEvent::CounterChanged { count: 3 }.name(),
            EventName::CounterChanged
        );
        assert_eq!(
            AppEvent::AddressChanged {
                value: "Elm Street 7".to_owned()
            }
            .name(),
            EventName::AddressChanged
        );
    }
}
