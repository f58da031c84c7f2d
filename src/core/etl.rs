use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting late-fee report");

        // Extract
        let records = self.pipeline.extract()?;
        tracing::info!("Read {} return records", records.len());

        // Transform
        let report = self.pipeline.transform(records)?;
        tracing::info!(
            "Aggregated {} records into {} patrons, total fees {}",
            report.records_processed,
            report.entries.len(),
            report.total()
        );

        // Load
        let output_path = self.pipeline.load(report)?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(output_path)
    }
}
