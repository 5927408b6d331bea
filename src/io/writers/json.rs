use crate::io::output::OutputWriter;
use crate::report::ProjectionReport;
use crate::risk::PatientProjection;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ProjectionReport) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_patient(&mut self, projection: &PatientProjection) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, projection)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
