//! Instrumentation sink that forwards events to `tracing`.

use tracing::info;

use crate::domain::ports::{Instrumentation, InstrumentationEvent};

/// Emits each event as a structured `info!` record under the
/// `shortlink::instrumentation` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInstrumentation;

impl Instrumentation for TracingInstrumentation {
    fn record(&self, event: &InstrumentationEvent) {
        let name = event.name();
        match event {
            InstrumentationEvent::FeatureToggleRetrieved { feature, found } => {
                info!(target: "shortlink::instrumentation", event = name, %feature, found);
            }
            InstrumentationEvent::FeatureEvaluated {
                feature,
                user_id,
                enabled,
            } => {
                let user_id = user_id.as_ref().map(|id| id.as_ref());
                info!(
                    target: "shortlink::instrumentation",
                    event = name,
                    %feature,
                    user_id,
                    enabled
                );
            }
            InstrumentationEvent::PermissionChecked {
                user_id,
                permission,
                granted,
            } => {
                info!(
                    target: "shortlink::instrumentation",
                    event = name,
                    user_id = %user_id,
                    %permission,
                    granted
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::domain::feature::FeatureId;
    use crate::domain::rbac::Permission;
    use rstest::rstest;

    #[rstest]
    fn records_every_event_kind_without_a_subscriber() {
        let sink = TracingInstrumentation;
        let feature = FeatureId::new("change-log").expect("valid feature id");
        let user_id = UserId::new("alpha").expect("valid id");

        sink.record(&InstrumentationEvent::FeatureToggleRetrieved {
            feature: feature.clone(),
            found: true,
        });
        sink.record(&InstrumentationEvent::FeatureEvaluated {
            feature,
            user_id: None,
            enabled: false,
        });
        sink.record(&InstrumentationEvent::PermissionChecked {
            user_id,
            permission: Permission::ViewChange,
            granted: true,
        });
    }
}
