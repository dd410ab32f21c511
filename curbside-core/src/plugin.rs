//! Registry for all jurisdiction plugins and their ports.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{JurisdictionId, JurisdictionMeta};
use crate::ports::{ScheduleCalculator, ScheduleError, ScheduleResolver};

/// Capability set implementing a provider for a single municipality.
pub struct JurisdictionPlugin {
    /// Static metadata describing the jurisdiction.
    pub meta: JurisdictionMeta,
    /// Implementation for resolving an address to a schedule code.
    pub resolver: Arc<dyn ScheduleResolver>,
    /// Implementation for computing the next pickup from a schedule code.
    pub calculator: Arc<dyn ScheduleCalculator>,
}

/// Registry that resolves plugins by `(state, city)` key.
///
/// Adding a municipality is a registration here, not a new code path in the
/// service.
pub struct JurisdictionRegistry {
    plugins: HashMap<JurisdictionId, JurisdictionPlugin>,
}

impl JurisdictionRegistry {
    /// Build a registry from the provided plugin list.
    #[must_use]
    pub fn new(plugins: Vec<JurisdictionPlugin>) -> Self {
        let plugins_map = plugins
            .into_iter()
            .map(|plugin| (plugin.meta.id.clone(), plugin))
            .collect();
        Self {
            plugins: plugins_map,
        }
    }

    /// Return metadata for all registered jurisdictions.
    #[must_use]
    pub fn jurisdictions(&self) -> Vec<JurisdictionMeta> {
        self.plugins
            .values()
            .map(|plugin| plugin.meta.clone())
            .collect()
    }

    /// Iterator over jurisdiction metadata.
    pub fn jurisdictions_iter(&self) -> impl Iterator<Item = &JurisdictionMeta> {
        self.plugins.values().map(|plugin| &plugin.meta)
    }

    /// Look up a plugin for the given jurisdiction key.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnsupportedState`] when no registered
    /// jurisdiction matches the state, and [`ScheduleError::UnsupportedCity`]
    /// when the state is known but the city is not.
    pub fn plugin(&self, id: &JurisdictionId) -> Result<&JurisdictionPlugin, ScheduleError> {
        if let Some(found) = self.plugins.get(id) {
            return Ok(found);
        }
        if self.plugins.keys().any(|key| key.state == id.state) {
            Err(ScheduleError::UnsupportedCity(id.city.clone()))
        } else {
            Err(ScheduleError::UnsupportedState(id.state.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::model::{
        Address, CalendarEvent, JurisdictionId, JurisdictionMeta, ScheduleCode,
    };
    use crate::ports::{ScheduleCalculator, ScheduleError, ScheduleResolver};

    use super::{JurisdictionPlugin, JurisdictionRegistry};

    struct StubResolver {
        meta: JurisdictionMeta,
    }

    #[async_trait]
    impl ScheduleResolver for StubResolver {
        fn jurisdiction(&self) -> &JurisdictionMeta {
            &self.meta
        }

        async fn resolve(&self, _address: &Address) -> Result<ScheduleCode, ScheduleError> {
            Ok(ScheduleCode::MonA)
        }
    }

    struct StubCalculator {
        meta: JurisdictionMeta,
    }

    impl ScheduleCalculator for StubCalculator {
        fn jurisdiction(&self) -> &JurisdictionMeta {
            &self.meta
        }

        fn next_event(
            &self,
            _code: ScheduleCode,
            reference: NaiveDate,
        ) -> Result<CalendarEvent, ScheduleError> {
            Ok(CalendarEvent {
                date: reference,
                trash: true,
                recycle: false,
            })
        }
    }

    fn test_registry() -> JurisdictionRegistry {
        let meta = JurisdictionMeta {
            id: JurisdictionId::new("WI", "Madison"),
            name: String::from("Madison, Wisconsin"),
        };
        JurisdictionRegistry::new(vec![JurisdictionPlugin {
            meta: meta.clone(),
            resolver: Arc::new(StubResolver { meta: meta.clone() }),
            calculator: Arc::new(StubCalculator { meta }),
        }])
    }

    #[test]
    fn test_lookup_hits_registered_jurisdiction() {
        let registry = test_registry();
        let plugin = registry.plugin(&JurisdictionId::new("WI", "Madison")).unwrap();
        assert_eq!(plugin.meta.id, JurisdictionId::new("WI", "Madison"));
    }

    #[test]
    fn test_unknown_state_and_city_are_distinct() {
        let registry = test_registry();

        let result = registry.plugin(&JurisdictionId::new("MN", "Minneapolis"));
        assert!(matches!(
            result,
            Err(ScheduleError::UnsupportedState(state)) if state == "MN"
        ));

        let result = registry.plugin(&JurisdictionId::new("WI", "Milwaukee"));
        assert!(matches!(
            result,
            Err(ScheduleError::UnsupportedCity(city)) if city == "Milwaukee"
        ));
    }

    #[test]
    fn test_jurisdictions_lists_all_registered() {
        let registry = test_registry();
        let listed = registry.jurisdictions();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Madison, Wisconsin");
    }
}
