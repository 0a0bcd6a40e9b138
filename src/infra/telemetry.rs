use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::application::contact::CONTACT_SUBMISSIONS_METRIC;
use crate::application::posts::POSTS_CREATED_METRIC;
use crate::config::{LogFormat, LoggingSettings};
use crate::infra::http::AUTH_REJECTIONS_METRIC;

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            POSTS_CREATED_METRIC,
            Unit::Count,
            "Total number of posts created through the API."
        );
        describe_counter!(
            CONTACT_SUBMISSIONS_METRIC,
            Unit::Count,
            "Total number of accepted contact form submissions, labelled by priority."
        );
        describe_counter!(
            AUTH_REJECTIONS_METRIC,
            Unit::Count,
            "Total number of requests rejected for a missing or invalid bearer token."
        );
    });
}
