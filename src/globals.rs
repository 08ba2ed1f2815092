//! Names the helpers are published under on `window`.
//!
//! Classic page scripts call `TaskManager.showToast(...)` or
//! `TaskManager.Storage.get(...)` without importing the module.

/// Property on `window` holding the helper object.
pub const GLOBAL_NAME: &str = "TaskManager";

/// Nested object grouping the storage helpers.
pub const STORAGE_NAMESPACE: &str = "Storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Export {
    ShowToast,
    FormatDate,
    Debounce,
    StorageGet,
    StorageSet,
    StorageRemove,
}

impl Export {
    pub const ALL: [Self; 6] = [
        Self::ShowToast,
        Self::FormatDate,
        Self::Debounce,
        Self::StorageGet,
        Self::StorageSet,
        Self::StorageRemove,
    ];

    /// Namespace under the global object, if any.
    #[must_use]
    pub fn namespace(self) -> Option<&'static str> {
        match self {
            Self::StorageGet | Self::StorageSet | Self::StorageRemove => Some(STORAGE_NAMESPACE),
            Self::ShowToast | Self::FormatDate | Self::Debounce => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ShowToast => "showToast",
            Self::FormatDate => "formatDate",
            Self::Debounce => "debounce",
            Self::StorageGet => "get",
            Self::StorageSet => "set",
            Self::StorageRemove => "remove",
        }
    }

    /// Dotted path as page scripts write it, e.g. `TaskManager.Storage.get`.
    #[must_use]
    pub fn path(self) -> String {
        match self.namespace() {
            Some(namespace) => format!("{GLOBAL_NAME}.{namespace}.{}", self.name()),
            None => format!("{GLOBAL_NAME}.{}", self.name()),
        }
    }
}

#[cfg(test)]
#[path = "globals_test.rs"]
mod globals_test;
