use crate::config::MetricsConfig;
use metrics_exporter_statsd::StatsdBuilder;

#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    #[error("could not build statsd recorder: {0}")]
    Build(String),
    #[error("a metrics recorder is already installed")]
    AlreadyInstalled,
}

/// Installs a statsd recorder for every metric emitted by the pipeline.
/// Without a metrics section all metrics are discarded.
pub fn init(config: Option<&MetricsConfig>) -> Result<(), StatsError> {
    let Some(config) = config else {
        return Ok(());
    };

    let recorder = StatsdBuilder::from(config.statsd_host.clone(), config.statsd_port)
        .build(Some(&config.prefix))
        .map_err(|e| StatsError::Build(e.to_string()))?;

    metrics::set_global_recorder(recorder).map_err(|_| StatsError::AlreadyInstalled)?;
    shared::metrics_defs::describe_all(census::metrics_defs::ALL_METRICS);

    tracing::debug!(
        host = %config.statsd_host,
        port = config.statsd_port,
        "Sending metrics to statsd"
    );
    Ok(())
}
