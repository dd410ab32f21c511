use std::sync::Arc;

use curbside_core::{
    model::{Address, CalendarEvent, JurisdictionId, StreetDirection, StreetType},
    service::WasteEventService,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    JurisdictionSelect,
    AddressForm,
    EventView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    HouseNumber,
    Direction,
    StreetName,
    StreetType,
    Unit,
}

impl FormField {
    pub(crate) const ALL: [Self; 5] = [
        Self::HouseNumber,
        Self::Direction,
        Self::StreetName,
        Self::StreetType,
        Self::Unit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::HouseNumber => "House number",
            Self::Direction => "Direction (N/S/E/W/NE/NW/SE/SW, optional)",
            Self::StreetName => "Street name",
            Self::StreetType => "Street type (St, Ave, Blvd, ..., optional)",
            Self::Unit => "Unit (optional)",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::HouseNumber => Self::Direction,
            Self::Direction => Self::StreetName,
            Self::StreetName => Self::StreetType,
            Self::StreetType => Self::Unit,
            Self::Unit => Self::HouseNumber,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Self::HouseNumber => Self::Unit,
            Self::Direction => Self::HouseNumber,
            Self::StreetName => Self::Direction,
            Self::StreetType => Self::StreetName,
            Self::Unit => Self::StreetType,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<WasteEventService>,

    pub screen: Screen,
    pub jurisdictions: Vec<(JurisdictionId, String)>,
    pub jurisdiction_list_index: usize,
    pub selected_jurisdiction: Option<(JurisdictionId, String)>,

    pub active_field: FormField,
    pub house_number: String,
    pub direction: String,
    pub street_name: String,
    pub street_type: String,
    pub unit: String,

    pub looked_up: Option<(Address, CalendarEvent)>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<WasteEventService>) -> Self {
        let jurisdictions = service.jurisdictions();
        Self {
            service,
            screen: Screen::JurisdictionSelect,
            jurisdictions,
            jurisdiction_list_index: 0,
            selected_jurisdiction: None,
            active_field: FormField::HouseNumber,
            house_number: String::new(),
            direction: String::new(),
            street_name: String::new(),
            street_type: String::new(),
            unit: String::new(),
            looked_up: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn select_current_jurisdiction(&mut self) {
        if let Some(entry) = self.jurisdictions.get(self.jurisdiction_list_index) {
            self.selected_jurisdiction = Some(entry.clone());
            self.screen = Screen::AddressForm;
        }
    }

    pub(crate) fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::HouseNumber => &self.house_number,
            FormField::Direction => &self.direction,
            FormField::StreetName => &self.street_name,
            FormField::StreetType => &self.street_type,
            FormField::Unit => &self.unit,
        }
    }

    pub(crate) fn field_value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::HouseNumber => &mut self.house_number,
            FormField::Direction => &mut self.direction,
            FormField::StreetName => &mut self.street_name,
            FormField::StreetType => &mut self.street_type,
            FormField::Unit => &mut self.unit,
        }
    }

    /// Assemble an [`Address`] from the form, or explain what doesn't parse.
    ///
    /// Length limits are left to the provider; only the closed direction and
    /// street-type vocabularies are checked here so typos surface before the
    /// network call.
    pub(crate) fn build_address(&self) -> Result<Address, String> {
        let Some((id, _name)) = &self.selected_jurisdiction else {
            return Err(String::from("Select a jurisdiction first"));
        };

        let direction_input = self.direction.trim();
        let street_direction = if direction_input.is_empty() {
            None
        } else {
            Some(
                StreetDirection::parse(direction_input)
                    .ok_or_else(|| format!("Unknown direction: {direction_input}"))?,
            )
        };

        let type_input = self.street_type.trim();
        let street_type = if type_input.is_empty() {
            None
        } else {
            Some(
                StreetType::parse(type_input)
                    .ok_or_else(|| format!("Unknown street type: {type_input}"))?,
            )
        };

        let unit_input = self.unit.trim();
        let unit_number = if unit_input.is_empty() {
            None
        } else {
            Some(unit_input.to_owned())
        };

        Ok(Address {
            street_number: self.house_number.trim().to_owned(),
            street_direction,
            street_name: self.street_name.trim().to_owned(),
            street_type,
            unit_number,
            city: id.city.clone(),
            state: id.state.clone(),
        })
    }
}
