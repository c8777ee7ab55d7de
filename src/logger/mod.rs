mod metrics;

pub use metrics::TrainLogger;
