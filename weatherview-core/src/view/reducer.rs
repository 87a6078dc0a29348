//! Reducer - `(state, action) -> effects`
//!
//! All state transitions of the view happen here. No I/O, no clocks: timers
//! and fetches are requested as [`Effect`]s and reported back as actions.

use tracing::{debug, info, warn};

use crate::ResponseOrdering;

use super::action::{Action, RequestId};
use super::effect::{DispatchResult, Effect};
use super::state::{ErrorInfo, FetchState, ViewState};

pub fn reducer(state: &mut ViewState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::QueryInput(text) => {
            if state.input == text {
                return DispatchResult::unchanged();
            }
            state.input = text;
            DispatchResult::changed()
        }

        Action::QuerySubmit => {
            if state.input.is_empty() {
                state.shake_generation += 1;
                state.shake = Some(state.shake_generation);
                debug!(generation = state.shake_generation, "empty submit, shaking");
                return DispatchResult::changed_with(Effect::StartShakeTimer {
                    generation: state.shake_generation,
                });
            }
            state.query = std::mem::take(&mut state.input);
            reconcile(state)
        }

        Action::QueryReconcile => reconcile(state),

        Action::WeatherDidLoad { request, snapshot } => {
            if !accepts(state, request) {
                return DispatchResult::unchanged();
            }
            info!(%request, place = %snapshot.place, "conditions loaded");
            state.settled = true;
            state.applied = Some(request);
            state.last_loaded = Some(snapshot.clone());
            state.fetch = FetchState::Loaded(snapshot);
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, error } => {
            if !accepts(state, request) {
                return DispatchResult::unchanged();
            }
            let info = ErrorInfo::from(error);
            info!(%request, message = %info.message, "conditions lookup failed");
            state.settled = true;
            state.applied = Some(request);
            state.fetch = FetchState::Failed(info.clone());
            state.error = Some(info);
            state.error_generation += 1;
            DispatchResult::changed_with(Effect::StartErrorTimer {
                generation: state.error_generation,
            })
        }

        Action::ShakeDidExpire(generation) => {
            if state.shake != Some(generation) {
                return DispatchResult::unchanged();
            }
            state.shake = None;
            DispatchResult::changed()
        }

        Action::ErrorDidExpire(generation) => {
            if state.error.is_none() || state.error_generation != generation {
                return DispatchResult::unchanged();
            }
            state.error = None;
            DispatchResult::changed()
        }
    }
}

/// Issue exactly one fetch for the current query.
fn reconcile(state: &mut ViewState) -> DispatchResult<Effect> {
    state.issued += 1;
    let request = RequestId(state.issued);
    state.fetch = FetchState::Loading;
    info!(%request, place = %state.query, "issuing conditions lookup");
    DispatchResult::changed_with(Effect::FetchConditions { request, place: state.query.clone() })
}

/// Whether a completion for `request` may be applied under the ordering policy.
///
/// Under `LastResolved` a completion for an older request still lands and
/// overwrites whatever a newer one showed; that is logged but not prevented.
fn accepts(state: &ViewState, request: RequestId) -> bool {
    let latest = state.latest_request();
    let stale = latest.is_some_and(|latest| request < latest);
    if !stale {
        return true;
    }
    match state.ordering {
        ResponseOrdering::LastResolved => {
            warn!(%request, latest = ?latest, "stale response overwrites newer request");
            true
        }
        ResponseOrdering::LatestIssued => {
            debug!(%request, latest = ?latest, "dropping stale response");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiError, Condition, WeatherSnapshot};

    fn snapshot(place: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            place: place.into(),
            country: "RO".into(),
            condition: Condition::Clear,
            description: "clear sky".into(),
            temperature_c: 22.4,
            feels_like_c: 21.9,
            humidity_pct: 40,
            wind_speed_mps: 3.2,
            visibility_m: Some(10000),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Lookup { status: 404, message: "city not found".into() }
    }

    fn submit(state: &mut ViewState, text: &str) -> DispatchResult<Effect> {
        reducer(state, Action::QueryInput(text.into()));
        reducer(state, Action::QuerySubmit)
    }

    fn load(state: &mut ViewState, request: u64, place: &str) -> DispatchResult<Effect> {
        let request = RequestId(request);
        reducer(state, Action::WeatherDidLoad { request, snapshot: snapshot(place) })
    }

    fn fail(state: &mut ViewState, request: u64) -> DispatchResult<Effect> {
        reducer(state, Action::WeatherDidError { request: RequestId(request), error: not_found() })
    }

    #[test]
    fn reconcile_issues_one_fetch_for_default_query() {
        let mut state = ViewState::default();
        assert_eq!(state.fetch, FetchState::Idle);

        let result = reducer(&mut state, Action::QueryReconcile);

        assert!(result.changed);
        assert_eq!(
            result.effects,
            vec![Effect::FetchConditions { request: RequestId(1), place: "Bucharest".into() }]
        );
        assert_eq!(state.fetch, FetchState::Loading);
    }

    #[test]
    fn query_input_only_stores_text() {
        let mut state = ViewState::default();

        let result = reducer(&mut state, Action::QueryInput("  Par".into()));

        assert!(result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.input, "  Par");
        assert_eq!(state.query, "Bucharest");
        assert_eq!(state.fetch, FetchState::Idle);
    }

    #[test]
    fn submit_assigns_query_clears_input_and_fetches() {
        let mut state = ViewState::default();

        let result = submit(&mut state, "Paris");

        assert_eq!(state.query, "Paris");
        assert_eq!(state.input, "");
        assert_eq!(state.fetch, FetchState::Loading);
        assert_eq!(
            result.effects,
            vec![Effect::FetchConditions { request: RequestId(1), place: "Paris".into() }]
        );
    }

    #[test]
    fn resubmitting_same_place_still_fetches() {
        let mut state = ViewState::default();
        submit(&mut state, "Bucharest");

        let result = submit(&mut state, "Bucharest");

        assert_eq!(
            result.effects,
            vec![Effect::FetchConditions { request: RequestId(2), place: "Bucharest".into() }]
        );
    }

    #[test]
    fn empty_submit_shakes_without_fetching() {
        let mut state = ViewState::default();

        let result = reducer(&mut state, Action::QuerySubmit);

        assert_eq!(result.effects, vec![Effect::StartShakeTimer { generation: 1 }]);
        assert_eq!(state.query, "Bucharest");
        assert_eq!(state.issued, 0);
        assert!(state.is_shaking());
    }

    #[test]
    fn repeated_empty_submit_bumps_shake_generation() {
        let mut state = ViewState::default();
        reducer(&mut state, Action::QuerySubmit);

        let result = reducer(&mut state, Action::QuerySubmit);
        assert_eq!(result.effects, vec![Effect::StartShakeTimer { generation: 2 }]);

        // The superseded expiry must not end the newer shake.
        assert!(!reducer(&mut state, Action::ShakeDidExpire(1)).changed);
        assert!(state.is_shaking());

        assert!(reducer(&mut state, Action::ShakeDidExpire(2)).changed);
        assert!(!state.is_shaking());
    }

    #[test]
    fn load_sets_loaded_and_remembers_snapshot() {
        let mut state = ViewState::default();
        reducer(&mut state, Action::QueryReconcile);

        let result = load(&mut state, 1, "Bucharest");

        assert!(result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.fetch, FetchState::Loaded(snapshot("Bucharest")));
        assert_eq!(state.last_loaded, Some(snapshot("Bucharest")));
        assert_eq!(state.applied, Some(RequestId(1)));
        assert!(state.settled);
    }

    #[test]
    fn error_sets_failed_and_banner_and_starts_timer() {
        let mut state = ViewState::default();
        submit(&mut state, "Nowhereistan");

        let result = fail(&mut state, 1);

        assert_eq!(result.effects, vec![Effect::StartErrorTimer { generation: 1 }]);
        let FetchState::Failed(info) = &state.fetch else { panic!("expected failure") };
        assert_eq!(info.message, "city not found");
        assert_eq!(state.error_message(), Some("city not found"));
    }

    #[test]
    fn error_expiry_clears_banner_but_keeps_failed() {
        let mut state = ViewState::default();
        submit(&mut state, "Nowhereistan");
        fail(&mut state, 1);

        assert!(reducer(&mut state, Action::ErrorDidExpire(1)).changed);

        assert_eq!(state.error, None);
        assert!(matches!(state.fetch, FetchState::Failed(_)));
    }

    #[test]
    fn newer_error_replaces_older_and_outlives_its_timer() {
        let mut state = ViewState::default();
        submit(&mut state, "A");
        submit(&mut state, "B");
        fail(&mut state, 1);
        let second = ApiError::Transport("connection reset".into());
        let result = reducer(
            &mut state,
            Action::WeatherDidError { request: RequestId(2), error: second.clone() },
        );

        assert_eq!(result.effects, vec![Effect::StartErrorTimer { generation: 2 }]);
        let expected = second.message();
        assert_eq!(state.error_message(), Some(expected.as_str()));

        assert!(!reducer(&mut state, Action::ErrorDidExpire(1)).changed);
        assert!(state.error.is_some());
    }

    #[test]
    fn banner_survives_a_new_loading_request() {
        let mut state = ViewState::default();
        submit(&mut state, "Nowhereistan");
        fail(&mut state, 1);

        submit(&mut state, "Bucharest");

        assert_eq!(state.fetch, FetchState::Loading);
        assert_eq!(state.error_message(), Some("city not found"));
    }

    #[test]
    fn stale_response_wins_when_it_lands_last() {
        // Known race: without cancellation an older request that resolves
        // later overwrites the newer result.
        let mut state = ViewState::default();
        submit(&mut state, "A");
        submit(&mut state, "B");

        load(&mut state, 2, "B");
        let result = load(&mut state, 1, "A");

        assert!(result.changed);
        assert_eq!(state.fetch, FetchState::Loaded(snapshot("A")));
        assert_eq!(state.applied, Some(RequestId(1)));
        assert_eq!(state.query, "B");
    }

    #[test]
    fn latest_issued_ordering_drops_stale_responses() {
        let mut state = ViewState::new("Bucharest", ResponseOrdering::LatestIssued);
        submit(&mut state, "A");
        submit(&mut state, "B");

        load(&mut state, 2, "B");
        let late_load = load(&mut state, 1, "A");
        let late_error = fail(&mut state, 1);

        assert!(!late_load.changed);
        assert!(!late_error.changed);
        assert_eq!(state.fetch, FetchState::Loaded(snapshot("B")));
        assert_eq!(state.error, None);
    }

    #[test]
    fn stale_error_still_shows_banner_under_last_resolved() {
        let mut state = ViewState::default();
        submit(&mut state, "A");
        submit(&mut state, "B");

        load(&mut state, 2, "B");
        fail(&mut state, 1);

        assert!(matches!(state.fetch, FetchState::Failed(_)));
        assert_eq!(state.last_loaded, Some(snapshot("B")));
        assert_eq!(state.error_message(), Some("city not found"));
    }
}
