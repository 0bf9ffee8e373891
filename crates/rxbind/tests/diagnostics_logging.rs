//! Diagnostics surface as `warn!` events as well as structured report
//! values. These tests install a counting layer and check that the two
//! channels agree: one warning per diagnostic, silence on clean passes, and
//! nothing above debug for ignored post-destroy notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rxbind::{FieldGroup, LifecycleEvent, LifecycleHooks, Projection, reconcile, reconcile_projected};
use serde_json::json;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct WarnCounter {
    warnings: Arc<AtomicUsize>,
}

impl WarnCounter {
    fn count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn with_warn_counter<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, counter.count())
}

#[test]
fn each_diagnostic_logs_one_warning() {
    let (report, warnings) = with_warn_counter(|| {
        let mut form = FieldGroup::new()
            .with("name", json!(""))
            .with("address", FieldGroup::new().with("city", json!("")));
        let projection = Projection::of(["name", "email", "address"]);
        reconcile_projected(
            &projection,
            &mut form,
            &json!({ "name": "Alice", "address": null }),
        )
    });

    assert_eq!(report.diagnostics().len(), 2, "missing email, null address");
    assert_eq!(warnings, 2);
}

#[test]
fn clean_pass_logs_no_warning() {
    let ((), warnings) = with_warn_counter(|| {
        let mut form = FieldGroup::new().with("name", json!(""));
        let report = reconcile(&mut form, &json!({ "name": "Alice" }));
        assert!(report.is_clean());
    });

    assert_eq!(warnings, 0);
}

#[test]
fn non_object_source_logs_one_warning() {
    let (report, warnings) = with_warn_counter(|| {
        let mut form = FieldGroup::new().with("name", json!(""));
        reconcile(&mut form, &json!(17))
    });

    assert_eq!(report.diagnostics().len(), 1);
    assert_eq!(warnings, 1);
}

#[test]
fn ignored_post_destroy_notify_is_not_a_warning() {
    let ((), warnings) = with_warn_counter(|| {
        let hooks = LifecycleHooks::new();
        hooks.notify(LifecycleEvent::Destroy);
        hooks.notify(LifecycleEvent::Init);
    });

    assert_eq!(warnings, 0, "dropped notifications log at debug only");
}
