//! Client-side state for the expense tracker SPA: the authenticated
//! session, the display preferences, and their persistence in browser
//! local storage.

use common::AccountSummary;
use gloo_storage::{LocalStorage, Storage};

pub mod api;

/// Local storage key for the session token.
pub const TOKEN_STORAGE_KEY: &str = "token";
/// Local storage key for the serialized account summary.
pub const ACCOUNT_STORAGE_KEY: &str = "user";
/// Local storage key for the dark mode flag.
pub const THEME_STORAGE_KEY: &str = "darkMode";
/// Local storage key for the grid/list view preference.
pub const VIEW_MODE_STORAGE_KEY: &str = "viewMode";

/// The authenticated session, or lack thereof.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppContext {
    /// The account the client is signed in as.
    pub current_account: Option<AccountSummary>,
    /// The bearer token sent with every protected request.
    pub token: Option<String>,
}

impl AppContext {
    /// A signed-in context.
    pub fn signed_in(account: AccountSummary, token: String) -> Self {
        Self {
            current_account: Some(account),
            token: Some(token),
        }
    }
}

/// The light/dark display preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The CSS class applied to the app root.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The label on the toggle button, naming the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    fn from_storage_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn storage_flag(self) -> bool {
        self == Theme::Dark
    }
}

/// The grid/list display preference for the expense collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// The preference as stored in local storage.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    /// Parse a stored preference, falling back to the grid view for
    /// anything unrecognized.
    pub fn from_stored(raw: &str) -> Self {
        match raw {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }
}

/// Restore the persisted session, if any.
pub fn load_session() -> AppContext {
    let token: Option<String> = LocalStorage::get(TOKEN_STORAGE_KEY).ok();
    let account: Option<AccountSummary> = LocalStorage::get(ACCOUNT_STORAGE_KEY).ok();

    match (account, token) {
        (Some(account), Some(token)) => AppContext::signed_in(account, token),
        _ => AppContext::default(),
    }
}

/// Persist the session so it survives a reload.
pub fn store_session(account: &AccountSummary, token: &str) {
    if let Err(error) = LocalStorage::set(TOKEN_STORAGE_KEY, token) {
        gloo_console::error!(format!("could not persist the session token: {error}"));
    }
    if let Err(error) = LocalStorage::set(ACCOUNT_STORAGE_KEY, account) {
        gloo_console::error!(format!("could not persist the account: {error}"));
    }
}

/// Forget the persisted session. Logout is client-side only; the token
/// itself stays valid until it expires.
pub fn clear_session() {
    LocalStorage::delete(TOKEN_STORAGE_KEY);
    LocalStorage::delete(ACCOUNT_STORAGE_KEY);
}

/// Restore the persisted theme preference.
pub fn load_theme() -> Theme {
    Theme::from_storage_flag(LocalStorage::get(THEME_STORAGE_KEY).unwrap_or(false))
}

/// Persist the theme preference.
pub fn store_theme(theme: Theme) {
    if let Err(error) = LocalStorage::set(THEME_STORAGE_KEY, theme.storage_flag()) {
        gloo_console::error!(format!("could not persist the theme: {error}"));
    }
}

/// Restore the persisted view mode preference.
pub fn load_view_mode() -> ViewMode {
    LocalStorage::get::<String>(VIEW_MODE_STORAGE_KEY)
        .map(|raw| ViewMode::from_stored(&raw))
        .unwrap_or_default()
}

/// Persist the view mode preference.
pub fn store_view_mode(view_mode: ViewMode) {
    if let Err(error) = LocalStorage::set(VIEW_MODE_STORAGE_KEY, view_mode.as_str()) {
        gloo_console::error!(format!("could not persist the view mode: {error}"));
    }
}

#[cfg(test)]
mod preference_tests {
    use super::{Theme, ViewMode};

    #[test]
    fn theme_defaults_to_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::from_storage_flag(false), Theme::Light);
        assert_eq!(Theme::from_storage_flag(true), Theme::Dark);
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!(Theme::Dark.storage_flag());
        assert!(!Theme::Light.storage_flag());
    }

    #[test]
    fn view_mode_round_trips_through_storage_strings() {
        for mode in [ViewMode::Grid, ViewMode::List] {
            assert_eq!(ViewMode::from_stored(mode.as_str()), mode);
        }
    }

    #[test]
    fn unrecognized_view_mode_falls_back_to_grid() {
        assert_eq!(ViewMode::from_stored("mosaic"), ViewMode::Grid);
        assert_eq!(ViewMode::from_stored(""), ViewMode::Grid);
    }
}
