//! Shared constants for the page behavior layer.

/// Root attribute listing the behavior groups already wired on this page.
pub const WIRED_GROUPS_ATTRIBUTE: &str = "data-page-behaviors";

// ── Theme ───────────────────────────────────────────────────────

/// Storage key holding the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Attribute on the root element that carries the active theme.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Id of the theme toggle control.
pub const THEME_TOGGLE_ID: &str = "themeToggle";

/// Id of the theme icon indicator.
pub const THEME_ICON_ID: &str = "themeIcon";

/// Whole-page transition applied while the theme flips.
pub const THEME_TRANSITION: &str = "all 0.3s ease";

pub const THEME_TRANSITION_MS: u32 = 300;

// ── Forms ───────────────────────────────────────────────────────

pub const NEEDS_VALIDATION_CLASS: &str = "needs-validation";
pub const WAS_VALIDATED_CLASS: &str = "was-validated";
pub const REGISTER_ACTION_FRAGMENT: &str = "register";
pub const PASSWORD_FIELD: &str = "password";
pub const CONFIRM_PASSWORD_FIELD: &str = "confirm_password";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const DUE_DATE_FIELD: &str = "due_date";
pub const ADD_PAGE_FRAGMENT: &str = "/add";
pub const PAST_DUE_DATE_WARNING: &str = "Warning: The selected date is in the past";

// ── Interactions ────────────────────────────────────────────────

pub const TOGGLE_HREF_FRAGMENT: &str = "/toggle/";
pub const DELETE_HREF_FRAGMENT: &str = "/delete/";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task? This action cannot be undone.";
pub const COMPLETE_ANIMATION_CLASS: &str = "task-complete-animation";
pub const DISABLED_CLASS: &str = "disabled";
pub const SPINNER_HTML: &str = r#"<i class="bi bi-arrow-repeat spinner-grow spinner-grow-sm"></i>"#;
pub const ALERT_CLASS: &str = "alert";
pub const CLOSE_BUTTON_CLASS: &str = "btn-close";
pub const FLASH_DISMISS_MS: u32 = 5000;
pub const ROW_HOVER_SHIFT: &str = "translateX(4px)";
pub const ROW_HOVER_REST: &str = "translateX(0)";
pub const ROW_HOVER_TRANSITION: &str = "transform 0.2s ease";

// ── Entrance animation ──────────────────────────────────────────

/// Delay between consecutive row entrances.
pub const ROW_STAGGER_MS: u32 = 100;

pub const CARD_CLASS: &str = "card";

/// Fraction of a card that must be visible before it settles.
pub const CARD_VISIBLE_THRESHOLD: f64 = 0.1;

/// Shrinks the observed viewport by 50px at the bottom.
pub const CARD_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// ── Toasts ──────────────────────────────────────────────────────

pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const TOAST_CONTAINER_CLASS: &str = "toast-container position-fixed top-0 end-0 p-3";
pub const TOAST_Z_INDEX: &str = "9999";

/// How long a toast stays on screen before it hides itself.
pub const TOAST_LIFETIME_MS: u32 = 5000;

/// Fade-out duration between hiding a toast and removing its node.
pub const TOAST_FADE_MS: u32 = 150;
