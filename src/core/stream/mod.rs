// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod mapper;
pub mod output;

pub use self::output::{AlertPublisher, FileSink, LogSink, Sink};

// Re-export mapper types for convenience
pub use self::mapper::{
    alert_mapper::{mapper_for_format, JsonAlertMapper, TextAlertMapper},
    csv_mapper::CsvSourceMapper,
    series_mapper::{SeriesCsvMapper, SeriesPoint},
    AlertMapper, SourceMapper,
};
