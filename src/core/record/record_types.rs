//! Symbolic record type names
//!
//! Operators type names like `Sales Order`, `SALES_ORDER` or `salesorder`;
//! the store only knows its own ids. The table is built once and passed to
//! whoever needs to resolve names.

use crate::config::RecordTypeAliases;
use std::collections::BTreeMap;

/// Standard record types, keyed by symbolic name
const STANDARD_TYPES: &[(&str, &str)] = &[
    ("ACCOUNT", "account"),
    ("ASSEMBLY_ITEM", "assemblyitem"),
    ("CASH_SALE", "cashsale"),
    ("CONTACT", "contact"),
    ("CREDIT_MEMO", "creditmemo"),
    ("CUSTOMER", "customer"),
    ("CUSTOMER_PAYMENT", "customerpayment"),
    ("DEPARTMENT", "department"),
    ("EMPLOYEE", "employee"),
    ("ESTIMATE", "estimate"),
    ("INVENTORY_ITEM", "inventoryitem"),
    ("INVOICE", "invoice"),
    ("ITEM_FULFILLMENT", "itemfulfillment"),
    ("ITEM_RECEIPT", "itemreceipt"),
    ("JOURNAL_ENTRY", "journalentry"),
    ("LOCATION", "location"),
    ("NON_INVENTORY_ITEM", "noninventoryitem"),
    ("PARTNER", "partner"),
    ("PURCHASE_ORDER", "purchaseorder"),
    ("RETURN_AUTHORIZATION", "returnauthorization"),
    ("SALES_ORDER", "salesorder"),
    ("SUBSIDIARY", "subsidiary"),
    ("TRANSFER_ORDER", "transferorder"),
    ("VENDOR", "vendor"),
    ("VENDOR_BILL", "vendorbill"),
    ("VENDOR_PAYMENT", "vendorpayment"),
];

/// Types the store accepts but does not list among its standard names
pub const UNDOCUMENTED_TYPES: &[(&str, &str)] = &[
    ("TRANSFER", "transfer"),
    ("CURRENCY_REVALUATION", "fxreval"),
];

fn letters_only(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Immutable name-to-id mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTypeTable {
    entries: BTreeMap<String, String>,
}

impl Default for RecordTypeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RecordTypeTable {
    /// Standard and undocumented types
    pub fn standard() -> Self {
        let entries = STANDARD_TYPES
            .iter()
            .chain(UNDOCUMENTED_TYPES)
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect();
        Self { entries }
    }

    /// Standard table extended (or overridden) by configured aliases
    pub fn with_aliases(aliases: &RecordTypeAliases) -> Self {
        let mut table = Self::standard();
        for (name, id) in &aliases.0 {
            table.entries.insert(name.clone(), id.clone());
        }
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an operator-typed name to a store id
    ///
    /// Exact symbolic names win, then names that already are a known id,
    /// then symbolic names equal after dropping non-letters. Anything else
    /// passes through in its letters-only lowercase form.
    pub fn resolve(&self, name: &str) -> String {
        if let Some(id) = self.entries.get(name) {
            return id.clone();
        }

        let normalized = letters_only(name);
        if self.entries.values().any(|id| *id == normalized) {
            return normalized;
        }

        self.entries
            .iter()
            .find(|(key, _)| letters_only(key) == normalized)
            .map(|(_, id)| id.clone())
            .unwrap_or(normalized)
    }

    /// `SALES_ORDER` style names rendered as `Sales Order`
    pub fn display_names(&self) -> Vec<String> {
        self.entries.keys().map(|name| display_name(name)).collect()
    }
}

fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
