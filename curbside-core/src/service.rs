//! High-level service facade combining all jurisdiction providers.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::model::{Address, CalendarEvent, JurisdictionId};
use crate::plugin::JurisdictionRegistry;
use crate::ports::ScheduleError;

/// Public entry point for looking up the next waste pickup for an address.
pub struct WasteEventService {
    registry: Arc<JurisdictionRegistry>,
}

impl WasteEventService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<JurisdictionRegistry>) -> Self {
        Self { registry }
    }

    /// List all supported jurisdictions and their display names.
    #[must_use]
    pub fn jurisdictions(&self) -> Vec<(JurisdictionId, String)> {
        self.registry
            .jurisdictions()
            .into_iter()
            .map(|meta| (meta.id, meta.name))
            .collect()
    }

    /// Resolve the address's pickup route and compute its next occurrence.
    ///
    /// The reference date defaults to today (local time) when absent; the
    /// computed event is always strictly after it. Each call performs exactly
    /// one remote lookup followed by one pure computation, so callers may fan
    /// out over many addresses concurrently without coordination.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the jurisdiction is unsupported, the
    /// address fails the jurisdiction's validation, or the remote lookup does
    /// not yield a known schedule code. Errors from either stage propagate
    /// unchanged.
    pub async fn next_waste_event(
        &self,
        address: &Address,
        reference: Option<NaiveDate>,
    ) -> Result<CalendarEvent, ScheduleError> {
        let plugin = self.registry.plugin(&address.jurisdiction())?;
        let code = plugin.resolver.resolve(address).await?;
        let reference = reference.unwrap_or_else(|| Local::now().date_naive());
        plugin.calculator.next_event(code, reference)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Days, NaiveDate};
    use reqwest::StatusCode;

    use crate::model::{
        Address, CalendarEvent, JurisdictionId, JurisdictionMeta, Rotation, ScheduleCode,
    };
    use crate::plugin::{JurisdictionPlugin, JurisdictionRegistry};
    use crate::ports::{ScheduleCalculator, ScheduleError, ScheduleResolver};

    use super::WasteEventService;

    fn test_meta() -> JurisdictionMeta {
        JurisdictionMeta {
            id: JurisdictionId::new("WI", "Madison"),
            name: String::from("Madison, Wisconsin"),
        }
    }

    fn test_address() -> Address {
        Address {
            street_number: String::from("1210"),
            street_direction: None,
            street_name: String::from("Williamson"),
            street_type: None,
            unit_number: None,
            city: String::from("Madison"),
            state: String::from("WI"),
        }
    }

    struct CountingResolver {
        meta: JurisdictionMeta,
        calls: Arc<AtomicUsize>,
        outcome: Result<ScheduleCode, fn() -> ScheduleError>,
    }

    #[async_trait]
    impl ScheduleResolver for CountingResolver {
        fn jurisdiction(&self) -> &JurisdictionMeta {
            &self.meta
        }

        async fn resolve(&self, _address: &Address) -> Result<ScheduleCode, ScheduleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(code) => Ok(*code),
                Err(make_err) => Err(make_err()),
            }
        }
    }

    struct DayAfterCalculator {
        meta: JurisdictionMeta,
    }

    impl ScheduleCalculator for DayAfterCalculator {
        fn jurisdiction(&self) -> &JurisdictionMeta {
            &self.meta
        }

        fn next_event(
            &self,
            code: ScheduleCode,
            reference: NaiveDate,
        ) -> Result<CalendarEvent, ScheduleError> {
            let date = reference
                .checked_add_days(Days::new(1))
                .ok_or_else(|| ScheduleError::Internal(String::from("date overflow")))?;
            Ok(CalendarEvent {
                date,
                trash: true,
                recycle: code.rotation() == Rotation::B,
            })
        }
    }

    fn service_with(
        outcome: Result<ScheduleCode, fn() -> ScheduleError>,
    ) -> (WasteEventService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let meta = test_meta();
        let registry = JurisdictionRegistry::new(vec![JurisdictionPlugin {
            meta: meta.clone(),
            resolver: Arc::new(CountingResolver {
                meta: meta.clone(),
                calls: Arc::clone(&calls),
                outcome,
            }),
            calculator: Arc::new(DayAfterCalculator { meta }),
        }]);
        (WasteEventService::new(Arc::new(registry)), calls)
    }

    #[tokio::test]
    async fn test_dispatch_resolve_compute() {
        let (service, calls) = service_with(Ok(ScheduleCode::TueB));
        let reference = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let event = service
            .next_waste_event(&test_address(), Some(reference))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 6, 12).unwrap());
        assert!(event.trash);
        assert!(event.recycle);
    }

    #[tokio::test]
    async fn test_unsupported_jurisdiction_skips_resolver() {
        let (service, calls) = service_with(Ok(ScheduleCode::MonA));
        let mut address = test_address();
        address.state = String::from("MN");

        let err = service.next_waste_event(&address, None).await.unwrap_err();

        assert!(matches!(err, ScheduleError::UnsupportedState(state) if state == "MN"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolver_error_propagates_unchanged() {
        fn resolution_error() -> ScheduleError {
            ScheduleError::Resolution {
                status: StatusCode::OK,
                location: None,
                body: String::from("<html>try again</html>"),
            }
        }
        let (service, _calls) = service_with(Err(resolution_error));

        let err = service
            .next_waste_event(&test_address(), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScheduleError::Resolution { status, location: None, .. } if status == StatusCode::OK
        ));
    }
}
