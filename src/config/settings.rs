use crate::adapters::render::OutputFormat;
use crate::core::paginator::{HasNextPolicy, DEFAULT_PAGE_SIZE};
use crate::core::sorter::{MissingPlacement, SortKey, DEFAULT_MISSING_PLACEMENT};
use crate::core::view::ViewState;
use crate::core::visibility::VisibilityMap;
use crate::core::ViewConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};

pub const MAX_PAGE_SIZE: i64 = 500;

/// Fully resolved listing settings after defaults, config file and flags are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub page_size: i64,
    pub default_sort: SortKey,
    pub missing_placement: MissingPlacement,
    pub has_next: HasNextPolicy,
    pub columns: VisibilityMap,
    pub format: OutputFormat,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: SortKey::None,
            missing_placement: DEFAULT_MISSING_PLACEMENT,
            has_next: HasNextPolicy::FullPage,
            columns: VisibilityMap::all_visible(),
            format: OutputFormat::Text,
        }
    }
}

impl ViewSettings {
    pub fn initial_state(&self, page: usize) -> ViewState {
        ViewState::new(self.default_sort, page, self.columns)
    }
}

impl ViewConfigProvider for ViewSettings {
    fn page_size(&self) -> i64 {
        self.page_size
    }

    fn missing_placement(&self) -> MissingPlacement {
        self.missing_placement
    }

    fn has_next_policy(&self) -> HasNextPolicy {
        self.has_next
    }
}

impl Validate for ViewSettings {
    fn validate(&self) -> Result<()> {
        validate_range("view.page_size", self.page_size, 1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::visibility::Column;

    #[test]
    fn test_defaults() {
        let settings = ViewSettings::default();
        assert_eq!(settings.page_size(), 20);
        assert_eq!(settings.missing_placement(), MissingPlacement::Last);
        assert_eq!(settings.has_next_policy(), HasNextPolicy::FullPage);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_initial_state_uses_defaults() {
        let settings = ViewSettings {
            default_sort: SortKey::Departure,
            columns: VisibilityMap::default().toggle(Column::Stops),
            ..ViewSettings::default()
        };
        let state = settings.initial_state(3);
        assert_eq!(state.sort_key, SortKey::Departure);
        assert_eq!(state.page, 3);
        assert!(!state.visibility.is_visible(Column::Stops));
    }

    #[test]
    fn test_page_size_out_of_range() {
        let settings = ViewSettings {
            page_size: 0,
            ..ViewSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
