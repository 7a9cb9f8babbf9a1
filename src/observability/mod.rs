pub mod metrics;
pub mod textfile;
