use crate::core::format::{
    display_or_placeholder, format_duration, format_place, format_stops, format_timestamp,
    MISSING_PLACEHOLDER,
};
use crate::core::paginator::{paginate, HasNextPolicy, PageRequest};
use crate::core::sorter::{sort_itineraries, MissingPlacement, SortKey};
use crate::core::visibility::{Column, VisibilityMap};
use crate::domain::field::Field;
use crate::domain::model::{FlightData, Itinerary, Leg};
use crate::domain::ports::ViewConfigProvider;
use crate::utils::error::Result;
use serde::Serialize;

/// Caller-owned view state. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub page: usize,
    pub visibility: VisibilityMap,
}

impl ViewState {
    pub fn new(sort_key: SortKey, page: usize, visibility: VisibilityMap) -> Self {
        Self {
            sort_key,
            page,
            visibility,
        }
    }

    /// Switching the sort key keeps the current page index.
    #[must_use]
    pub fn with_sort_key(self, sort_key: SortKey) -> Self {
        Self { sort_key, ..self }
    }

    #[must_use]
    pub fn next_page(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self
        }
    }

    #[must_use]
    pub fn previous_page(self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
    }

    #[must_use]
    pub fn toggle_column(self, column: Column) -> Self {
        Self {
            visibility: self.visibility.toggle(column),
            ..self
        }
    }
}

/// One leg, ready for display. Absent values are already replaced by the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegRow {
    pub itinerary_id: String,
    pub leg_id: String,
    pub airline: String,
    pub airline_logo: Option<String>,
    pub departure_time: String,
    pub origin: String,
    pub arrival_time: String,
    pub destination: String,
    pub duration: String,
    pub stops: String,
    pub price: String,
}

impl LegRow {
    fn from_leg(itinerary: &Itinerary, leg: &Leg) -> Result<Self> {
        let carrier = leg.primary_carrier();
        let duration = match leg.duration_in_minutes {
            Field::Present(minutes) => format_duration(i64::from(minutes))?,
            Field::Missing => MISSING_PLACEHOLDER.to_string(),
        };

        Ok(Self {
            itinerary_id: display_or_placeholder(itinerary.id.clone()),
            leg_id: display_or_placeholder(leg.id.clone()),
            airline: display_or_placeholder(carrier.and_then(|c| c.name.clone())),
            airline_logo: carrier.and_then(|c| c.logo_url.clone()).present(),
            departure_time: display_or_placeholder(leg.departure.as_ref().map(format_timestamp)),
            origin: format_place(leg.origin.as_ref()),
            arrival_time: display_or_placeholder(leg.arrival.as_ref().map(format_timestamp)),
            destination: format_place(leg.destination.as_ref()),
            duration,
            stops: display_or_placeholder(leg.stop_count.map(format_stops)),
            price: display_or_placeholder(itinerary.price_formatted().map(str::to_string)),
        })
    }

    /// Header/value pairs a column contributes, in display order.
    pub fn cells(&self, column: Column) -> Vec<(&'static str, &str)> {
        match column {
            Column::Airline => vec![("Airline", self.airline.as_str())],
            Column::Departure => vec![
                ("Departure", self.departure_time.as_str()),
                ("Origin", self.origin.as_str()),
            ],
            Column::Arrival => vec![
                ("Arrival", self.arrival_time.as_str()),
                ("Destination", self.destination.as_str()),
            ],
            Column::Duration => vec![("Duration", self.duration.as_str())],
            Column::Stops => vec![("Stops", self.stops.as_str()), ("Price", self.price.as_str())],
        }
    }
}

/// Headers produced by [`LegRow::cells`] for the visible columns.
pub fn visible_headers(visibility: &VisibilityMap) -> Vec<&'static str> {
    let headers = |column: Column| -> &'static [&'static str] {
        match column {
            Column::Airline => &["Airline"],
            Column::Departure => &["Departure", "Origin"],
            Column::Arrival => &["Arrival", "Destination"],
            Column::Duration => &["Duration"],
            Column::Stops => &["Stops", "Price"],
        }
    };
    visibility
        .visible_columns()
        .into_iter()
        .flat_map(|c| headers(c).iter().copied())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub rows: Vec<LegRow>,
    pub itineraries_shown: usize,
    pub total_itineraries: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub sort_key: SortKey,
    pub visibility: VisibilityMap,
}

/// The itineraries chosen for one page, before they are turned into rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub itineraries: Vec<&'a Itinerary>,
    pub page: usize,
    pub total_itineraries: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Sorter → Paginator composition with fixed paging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsPipeline {
    page_size: i64,
    placement: MissingPlacement,
    has_next_policy: HasNextPolicy,
}

impl ResultsPipeline {
    pub fn new(
        page_size: i64,
        placement: MissingPlacement,
        has_next_policy: HasNextPolicy,
    ) -> Result<Self> {
        PageRequest::new(0, page_size)?;
        Ok(Self {
            page_size,
            placement,
            has_next_policy,
        })
    }

    pub fn from_config<C: ViewConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.page_size(),
            config.missing_placement(),
            config.has_next_policy(),
        )
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn select<'a>(
        &self,
        itineraries: Option<&'a [Itinerary]>,
        state: &ViewState,
    ) -> Result<Selection<'a>> {
        let page_index = i64::try_from(state.page).unwrap_or(i64::MAX);
        let request = PageRequest::new(page_index, self.page_size)?;

        let sorted = sort_itineraries(itineraries, state.sort_key, self.placement);
        let page = paginate(&sorted, request, self.has_next_policy);

        Ok(Selection {
            itineraries: page.visible.to_vec(),
            page: page.page,
            total_itineraries: page.total_items,
            has_previous: page.has_previous,
            has_next: page.has_next,
        })
    }

    pub fn compute(&self, data: &FlightData, state: &ViewState) -> Result<ResultsView> {
        let selection = self.select(data.itineraries(), state)?;

        let mut rows = Vec::new();
        for itinerary in &selection.itineraries {
            for (index, leg) in itinerary.legs.iter().enumerate() {
                match leg {
                    Field::Present(leg) => rows.push(LegRow::from_leg(itinerary, leg)?),
                    Field::Missing => {
                        tracing::debug!("Skipping missing leg {} of itinerary {:?}", index, itinerary.id)
                    }
                }
            }
        }

        tracing::debug!(
            "Page {} built {} rows from {} itineraries",
            selection.page,
            rows.len(),
            selection.itineraries.len()
        );

        Ok(ResultsView {
            rows,
            itineraries_shown: selection.itineraries.len(),
            total_itineraries: selection.total_itineraries,
            page: selection.page,
            page_size: usize::try_from(self.page_size).unwrap_or(usize::MAX),
            has_previous: selection.has_previous,
            has_next: selection.has_next,
            sort_key: state.sort_key,
            visibility: state.visibility,
        })
    }
}

impl Default for ResultsPipeline {
    fn default() -> Self {
        Self {
            page_size: crate::core::paginator::DEFAULT_PAGE_SIZE,
            placement: MissingPlacement::default(),
            has_next_policy: HasNextPolicy::default(),
        }
    }
}
